//! Exit codes for the `signhost` binary.
//! Library errors keep the code reported by `SignhostError::exit_code`.

use signhost_api::SignhostError;

pub const SUCCESS: i32 = 0;
pub const POSTBACK_INVALID: i32 = 1; // Checksum did not match, or body unusable
pub const CONFIG_ERROR: i32 = 2;
pub const IO_ERROR: i32 = 5;

/// Exit code for an error that escaped a command.
pub fn for_error(err: &anyhow::Error) -> i32 {
    if let Some(e) = err.downcast_ref::<SignhostError>() {
        e.exit_code()
    } else if err.downcast_ref::<std::io::Error>().is_some() {
        IO_ERROR
    } else {
        CONFIG_ERROR
    }
}
