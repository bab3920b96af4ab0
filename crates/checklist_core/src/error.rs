use std::fmt;

/// Ambient failures outside the reducer: bad CLI input, undecodable data,
/// filesystem trouble. The reducer itself never produces errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Input(String),
    Data(String),
    Io(String),
}

impl AppError {
    pub fn invalid_input<M: Into<String>>(message: M) -> Self {
        Self::Input(message.into())
    }

    pub fn invalid_data<M: Into<String>>(message: M) -> Self {
        Self::Data(message.into())
    }

    pub fn io<M: Into<String>>(message: M) -> Self {
        Self::Io(message.into())
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Input(_) => "invalid_input",
            Self::Data(_) => "invalid_data",
            Self::Io(_) => "io_error",
        }
    }

    pub fn message(&self) -> &str {
        let (Self::Input(message) | Self::Data(message) | Self::Io(message)) = self;
        message
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.code(), self.message())
    }
}

impl std::error::Error for AppError {}
