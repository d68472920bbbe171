//! Loading round input from disk.
//!
//! The host toolchain hands the generator its declarations as a JSON
//! document shaped like [`RoundInput`].

use std::fs;
use std::path::Path;

use rxgen_define::RoundInput;
use tracing::debug;

use crate::errors::{GeneratorError, Result};

/// Reads and parses a JSON round description.
///
/// ## Errors
///
/// Returns `GeneratorError::Read` when the file cannot be read and
/// `GeneratorError::Parse` when it is not a valid round description
/// (including malformed type expressions).
pub fn load_round(path: &Path) -> Result<RoundInput> {
    let content = fs::read_to_string(path).map_err(|e| GeneratorError::Read {
        path: path.display().to_string(),
        source: e,
    })?;
    let round = parse_round(&content, &path.display().to_string())?;
    debug!(
        path = %path.display(),
        types = round.types.len(),
        fields = round.fields.len(),
        "loaded round input"
    );
    Ok(round)
}

/// Parses a JSON round description; `origin` names the source in errors.
///
/// ## Errors
///
/// Returns `GeneratorError::Parse` for invalid JSON or declarations.
pub fn parse_round(content: &str, origin: &str) -> Result<RoundInput> {
    serde_json::from_str(content).map_err(|e| GeneratorError::Parse {
        path: origin.to_string(),
        source: e,
    })
}
