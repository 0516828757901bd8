use cirrus_core::{ConnectError, render::RenderError, tonic::Status};
use colored::*;

/// A wrapper struct for a formatted, colored string.
///
/// Implements `Display` so it can be printed directly.
pub struct FormattedString(pub String);

/// Footer printed after a listing that was cut short by an error.
pub struct Incomplete(pub usize);

impl std::fmt::Display for FormattedString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "{}", self.0)?;
        Ok(())
    }
}

impl From<serde_json::Value> for FormattedString {
    fn from(value: serde_json::Value) -> Self {
        FormattedString(serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string()))
    }
}

impl From<Status> for FormattedString {
    fn from(status: Status) -> Self {
        FormattedString(format!(
            "{} code={:?} message={:?}",
            "gRPC Failed:".red().bold(),
            status.code(),
            status.message()
        ))
    }
}

impl From<ConnectError> for FormattedString {
    fn from(err: ConnectError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Invalid endpoint:".red().bold(),
            err
        ))
    }
}

impl From<RenderError> for FormattedString {
    fn from(err: RenderError) -> Self {
        FormattedString(format!(
            "{}\n\n'{}'",
            "Failed to render resource:".red().bold(),
            err
        ))
    }
}

impl From<Incomplete> for FormattedString {
    fn from(Incomplete(count): Incomplete) -> Self {
        FormattedString(format!(
            "{} only {} item(s) were listed before the error",
            "Incomplete listing:".yellow().bold(),
            count
        ))
    }
}
