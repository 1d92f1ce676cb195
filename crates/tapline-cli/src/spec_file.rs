//! Filter spec files.
//!
//! A spec file is a TOML rendition of [`FilterSpec`]:
//!
//! ```toml
//! kind = "fir"
//! pass_type = "high"
//! cutoff_frequency_hz = 1000
//! sampling_rate_hz = 48000
//! window = "blackman"
//!
//! [taps]
//! mode = "optimal"
//! attenuation_db = 40.0
//! transition_length_hz = 200
//! ```

use std::path::{Path, PathBuf};
use tapline_core::FilterSpec;
use thiserror::Error;

/// Failure to load a spec file.
#[derive(Debug, Error)]
pub enum SpecFileError {
    /// The file could not be read.
    #[error("failed to read spec file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file is not a valid spec.
    #[error("invalid spec file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Read and parse a spec file.
pub fn load(path: &Path) -> Result<FilterSpec, SpecFileError> {
    let text = std::fs::read_to_string(path).map_err(|source| SpecFileError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let spec = toml::from_str(&text).map_err(|source| SpecFileError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    tracing::debug!(path = %path.display(), "loaded spec file");
    Ok(spec)
}
