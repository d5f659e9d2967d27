use std::process::ExitCode;

pub mod format;
pub mod lookup;
pub mod parse;

/// Result of one command, mapped onto the process exit status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// The query resolved to nothing.
    NotFound,
    /// Config, catalog or output could not be loaded or written.
    Failure,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Self::Success => 0,
            Self::NotFound => 1,
            Self::Failure => 2,
        }
    }
}

impl From<Outcome> for ExitCode {
    fn from(value: Outcome) -> Self {
        ExitCode::from(value.code())
    }
}
