//! Input path validation

use std::path::Path;

use crate::constants::BLM_EXTENSION;

/// Check that `path` names a `.blm` file: something before the last '.', and
/// `blm` (any case) after it
pub fn validate(path: &str) -> bool {
    match path.rsplit_once('.') {
        Some((prefix, extension)) => {
            !prefix.is_empty() && extension.eq_ignore_ascii_case(BLM_EXTENSION)
        }
        None => false,
    }
}

/// [`validate`] for filesystem paths; paths that are not valid UTF-8 are rejected
pub fn validate_path(path: &Path) -> bool {
    path.to_str().is_some_and(validate)
}
