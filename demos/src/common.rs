use std::fs;
use std::path::PathBuf;

use positivity::{MultiRegionTimeseries, PositivityError};

/// Environment variable naming a JSON store snapshot to use instead of the
/// built-in fixture.
pub const INPUT_ENV: &str = "POSITIVITY_DEMOS_INPUT";
/// Environment variable naming the directory demos write their output to.
pub const OUT_DIR_ENV: &str = "POSITIVITY_DEMOS_OUT";

/// Input store for demos.
///
/// Reads the JSON snapshot named by [`INPUT_ENV`] when set, otherwise falls
/// back to the US states fixture.
///
/// # Errors
/// Returns `Io` if the snapshot cannot be read and `Data` if it is not a
/// valid store.
pub fn load_store() -> Result<MultiRegionTimeseries, PositivityError> {
    match std::env::var(INPUT_ENV) {
        Ok(path) => {
            let text = fs::read_to_string(&path)?;
            serde_json::from_str(&text)
                .map_err(|e| PositivityError::data(format!("{path}: {e}")))
        }
        Err(_) => {
            println!("--- (Using US states fixture) ---");
            positivity_mock::fixtures::us_states()
        }
    }
}

/// Directory demos write files to: [`OUT_DIR_ENV`] or the system temp dir.
#[must_use]
pub fn output_dir() -> PathBuf {
    std::env::var_os(OUT_DIR_ENV).map_or_else(std::env::temp_dir, PathBuf::from)
}
