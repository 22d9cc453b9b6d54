//! SHA-256 fingerprints of workbook contents.

use std::fmt;
use std::io::Read;
use std::path::Path;

use mealbox_common::error::{MealboxError, Result};
use sha2::{Digest, Sha256};

/// Hex-encoded SHA-256 digest of a file.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Fingerprint(String);

impl Fingerprint {
    /// Returns the hex-encoded digest.
    #[must_use]
    pub fn as_hex(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Fingerprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "sha256:{}", self.0)
    }
}

/// Computes the fingerprint of a workbook.
///
/// # Errors
///
/// Returns [`MealboxError::WorkbookNotFound`] if the file is absent, or
/// [`MealboxError::Io`] if it cannot be read.
pub fn fingerprint_file(path: &Path) -> Result<Fingerprint> {
    if !path.is_file() {
        return Err(MealboxError::WorkbookNotFound {
            path: path.to_path_buf(),
        });
    }
    tracing::trace!(path = %path.display(), "computing SHA-256 fingerprint");

    let io_error = |e| MealboxError::Io {
        path: path.to_path_buf(),
        source: e,
    };
    let mut file = std::fs::File::open(path).map_err(io_error)?;
    let mut hasher = Sha256::new();
    let mut buf = [0u8; 8192];
    loop {
        let n = file.read(&mut buf).map_err(io_error)?;
        if n == 0 {
            break;
        }
        hasher.update(&buf[..n]);
    }

    let hex = hasher
        .finalize()
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<String>();
    Ok(Fingerprint(hex))
}
