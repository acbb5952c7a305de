/*
 * Error type for the chrome layer. Most native calls made by this crate are
 * deliberately best-effort (compositor attributes, frame extension, the theme
 * registry probe) and absorb failure as graceful visual degradation. The
 * error type covers the few seams where failure must surface to the caller,
 * such as attaching the chrome hook to a window handle.
 */
use std::fmt;

#[derive(Debug)]
pub enum ChromeError {
    /// The chrome hook could not be installed on the target window.
    InitializationFailed(String),
    /// A native window handle was invalid for the requested operation.
    InvalidHandle(String),
    /// A requested operation could not be completed.
    OperationFailed(String),
}

impl fmt::Display for ChromeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChromeError::InitializationFailed(msg) => {
                write!(f, "Chrome initialization failed: {msg}")
            }
            ChromeError::InvalidHandle(msg) => write!(f, "Invalid handle: {msg}"),
            ChromeError::OperationFailed(msg) => write!(f, "Operation failed: {msg}"),
        }
    }
}

impl std::error::Error for ChromeError {}

pub type Result<T> = std::result::Result<T, ChromeError>;
