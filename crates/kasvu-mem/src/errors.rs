#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AccessError {
    OutOfRange {
        index: usize,
        len: usize,
    },
}

impl core::fmt::Display for AccessError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::OutOfRange { index, len } => {
                write!(f, "index {} was out of range for len {}", index, len)
            },
        }
    }
}

impl core::error::Error for AccessError {}
