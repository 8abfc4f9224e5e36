// Error taxonomy for the translation layer

use thiserror::Error;

/// Everything that can stop an action from producing a command.
///
/// User cancellation is deliberately absent: a declined prompt is a normal
/// outcome with its own status text, not an error.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Malformed or missing user input, caught before anything is built
    #[error("{0}")]
    InvalidInput(String),

    #[error("Selected row {row} is out of range ({len} tasks listed)")]
    RowOutOfRange { row: usize, len: usize },

    #[error("No task @{0} in the current list")]
    TaskNotFound(i64),

    /// The calendar tool answered, but with no event to use
    #[error("Nothing available on Calendar")]
    NothingScheduled,

    #[error("Could not parse tracker export: {0}")]
    Export(String),

    #[error("Calendar output not understood: {0}")]
    Calendar(String),

    #[error("{program} exited with status {status}: {stderr}")]
    ExternalFailure {
        program: String,
        status: String,
        stderr: String,
    },

    #[error("Failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} did not finish within {secs}s")]
    Timeout { program: String, secs: u64 },
}

impl BridgeError {
    pub fn invalid(message: impl Into<String>) -> Self {
        BridgeError::InvalidInput(message.into())
    }

    /// True for problems the user can fix by changing the request.
    /// Everything else came from an external tool.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            BridgeError::InvalidInput(_)
                | BridgeError::RowOutOfRange { .. }
                | BridgeError::TaskNotFound(_)
                | BridgeError::NothingScheduled
        )
    }
}

pub type BridgeResult<T> = std::result::Result<T, BridgeError>;
