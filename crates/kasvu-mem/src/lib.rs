//! A contiguous growable array with offset based positions.
//!
//! [`DynArray`] owns one heap buffer and grows it through a
//! [`CapacityPolicy`] (doubling by default). [`Position`] values locate
//! slots for [`DynArray::insert`] and [`DynArray::erase`]. Checked accessors
//! report [`AccessError`]; the unchecked ones are `unsafe fn`s without
//! release-mode validation.
//!
//! Growth and failed checked accesses are reported through `kasvu-log` at
//! trace and debug level.

pub mod capacity_policy;
pub mod vec_types;

mod macros;
mod errors;

pub use errors::AccessError;
pub use capacity_policy::{CapacityPolicy, Doubling};
pub use vec_types::{DynArray, Position, IntoIter};

pub type Result<T> = core::result::Result<T, AccessError>;
