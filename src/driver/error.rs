use thiserror::Error;

/// Failure of a single call into the automation driver.
///
/// These are transient from the point of view of the search and interaction
/// layers: they are recorded, logged, and retried, never surfaced one by one.
#[derive(Debug, Error)]
pub enum DriverError {
    /// The query matched nothing (W3C `no such element`)
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// No modal alert is currently presented
    #[error("no alert is open")]
    NoAlert,

    /// The automation server rejected or failed a command
    #[error("command '{command}' failed: {message}")]
    Command { command: String, message: String },

    /// Transport failure talking to the automation server
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Response body did not have the expected shape
    #[error("JSON error ({context}): {source}")]
    Json {
        context: String,
        #[source]
        source: serde_json::Error,
    },

    /// The driver does not implement this capability
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl DriverError {
    pub fn command(command: impl Into<String>, message: impl Into<String>) -> Self {
        DriverError::Command {
            command: command.into(),
            message: message.into(),
        }
    }
}
