//! Status classification
//!
//! Maps an HTTP status (number, numeric string, or the `"Error"` sentinel)
//! to a severity bucket used to color status lines.

use crate::types::ResponseStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusClass {
    /// 1xx
    Informational,
    /// 2xx
    Success,
    /// 3xx
    Redirection,
    /// 4xx
    ClientError,
    /// 5xx
    ServerError,
    /// Unparseable or out of the 100..=599 range
    Unknown,
}

impl StatusClass {
    pub fn from_code(code: i64) -> Self {
        match code {
            100..=199 => StatusClass::Informational,
            200..=299 => StatusClass::Success,
            300..=399 => StatusClass::Redirection,
            400..=499 => StatusClass::ClientError,
            500..=599 => StatusClass::ServerError,
            _ => StatusClass::Unknown,
        }
    }

    pub fn from_text(text: &str) -> Self {
        text.trim()
            .parse::<i64>()
            .map(Self::from_code)
            .unwrap_or(StatusClass::Unknown)
    }
}

impl From<&ResponseStatus> for StatusClass {
    fn from(status: &ResponseStatus) -> Self {
        match status {
            ResponseStatus::Code(code) => StatusClass::from_code(i64::from(*code)),
            ResponseStatus::Error => StatusClass::Unknown,
        }
    }
}
