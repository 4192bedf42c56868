// ---------------------------------------------------------------------------
// DashboardError: typed errors for configuration and data loading
// ---------------------------------------------------------------------------

use std::fmt;

/// Errors that can occur while loading dashboard configuration or data.
///
/// Absent values inside a dataset are not errors; they are carried as `None`
/// and simply omitted from tooltips.
#[derive(Debug)]
pub enum DashboardError {
    /// I/O error (file not found, permission denied, etc.)
    Io(std::io::Error),
    /// JSON decoding failed (malformed or mistyped document).
    Json(String),
    /// A colour string in the configuration is not a valid hex colour.
    InvalidColor { value: String, reason: String },
    /// A flat monthly sequence does not line up with the 12-month windows.
    WindowLength {
        series: &'static str,
        expected: usize,
        found: usize,
    },
    /// An axis range cannot produce a usable set of ticks.
    InvalidAxis { reason: String },
    /// The data years run past the representable range.
    YearRange { first_year: i32, years: usize },
}

impl fmt::Display for DashboardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DashboardError::Io(e) => write!(f, "I/O error: {e}"),
            DashboardError::Json(msg) => write!(f, "JSON error: {msg}"),
            DashboardError::InvalidColor { value, reason } => {
                write!(f, "Invalid colour {value:?}: {reason}")
            }
            DashboardError::WindowLength {
                series,
                expected,
                found,
            } => write!(
                f,
                "Series {series} has {found} monthly values, expected at most {expected}"
            ),
            DashboardError::InvalidAxis { reason } => write!(f, "Invalid axis range: {reason}"),
            DashboardError::YearRange { first_year, years } => {
                write!(f, "{years} data years starting at {first_year} overflow the year range")
            }
        }
    }
}

impl std::error::Error for DashboardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DashboardError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DashboardError {
    fn from(e: std::io::Error) -> Self {
        DashboardError::Io(e)
    }
}

impl From<serde_json::Error> for DashboardError {
    fn from(e: serde_json::Error) -> Self {
        DashboardError::Json(e.to_string())
    }
}
