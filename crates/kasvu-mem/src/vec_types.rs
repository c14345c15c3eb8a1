mod buffer;
mod position;
mod dyn_array;
mod into_iter;

pub use position::Position;
pub use dyn_array::DynArray;
pub use into_iter::IntoIter;
