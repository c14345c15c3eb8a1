#[derive(Debug)]
pub enum LogError {
    IoError(std::io::Error),
    Uninitialized,
}

impl core::fmt::Display for LogError {

    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::IoError(_) => write!(f, "IO error"),
            Self::Uninitialized => write!(f, "logger was not initialized"),
        }
    }
}

impl core::error::Error for LogError {

    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::IoError(err) => Some(err),
            Self::Uninitialized => None,
        }
    }
}

impl From<std::io::Error> for LogError {

    fn from(value: std::io::Error) -> Self {
        Self::IoError(value)
    }
}
