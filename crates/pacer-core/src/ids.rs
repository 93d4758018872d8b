//! ID prefixes and generation.
//!
//! IDs look like `tsk-a3f8b2c1`: a three-letter entity prefix, a dash, and
//! eight lowercase hex characters drawn from the OS random source.

use std::fmt::Write;

use crate::errors::CoreError;

pub const PREFIX_TASK: &str = "tsk";

/// Every known prefix.
pub const ALL_PREFIXES: &[&str] = &[PREFIX_TASK];

/// Generate a fresh prefixed ID, e.g. `"tsk-a3f8b2c1"`.
///
/// # Errors
///
/// Returns `CoreError::Random` if the OS random source is unavailable.
pub fn generate_id(prefix: &str) -> Result<String, CoreError> {
    let mut bytes = [0u8; 4];
    getrandom::fill(&mut bytes).map_err(|e| CoreError::Random(e.to_string()))?;

    let mut id = String::with_capacity(prefix.len() + 9);
    id.push_str(prefix);
    id.push('-');
    for byte in bytes {
        let _ = write!(id, "{byte:02x}");
    }
    Ok(id)
}

/// Check whether `id` has the `{prefix}-{8 hex}` shape.
#[must_use]
pub fn has_prefix(id: &str, prefix: &str) -> bool {
    id.strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|hex| hex.len() == 8 && hex.chars().all(|c| c.is_ascii_hexdigit()))
}
