use std::fs;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::InputError;
use crate::model::{ViewProfile, ViewState};

/// Reads a persisted view state. A missing file yields the profile defaults;
/// a malformed one yields the defaults and a warning.
pub fn load_view_state<F, S>(
    path: &Path,
    profile: &ViewProfile<F, S>,
) -> Result<ViewState<F, S>, InputError>
where
    F: DeserializeOwned + Clone,
    S: DeserializeOwned + Clone,
{
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Ok(profile.initial_state());
        }
        Err(e) => return Err(InputError::Io(e)),
    };
    match serde_json::from_str(&text) {
        Ok(state) => Ok(state),
        Err(e) => {
            tracing::warn!(
                path = %path.display(),
                error = %e,
                "ignoring malformed view state; using defaults"
            );
            Ok(profile.initial_state())
        }
    }
}

pub fn save_view_state<F, S>(path: &Path, state: &ViewState<F, S>) -> Result<(), InputError>
where
    F: Serialize,
    S: Serialize,
{
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(state)?;
    fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/view_state.rs"]
mod tests;
