//! What the footer buttons and drag-and-drop do to the elevation list.
//!
//! Every function leaves `list` reloaded from `store` when the store was
//! touched, so the window only has to repaint. Prompting is kept apart
//! from the store updates: a modal prompt runs its own message loop, and
//! the window must not be holding its list while that loop dispatches.

use std::path::PathBuf;

use crate::elevation::{ElevationList, ElevationStore};
use crate::prompt::{ABOUT_MESSAGE, Prompt, PromptKind, REMOVE_MESSAGE, SELECT_FIRST_MESSAGE};
use crate::{log_debug, log_info};

/// Marks `paths` and reloads. Returns whether the store was touched.
pub fn add(
    list: &mut ElevationList,
    store: &mut impl ElevationStore,
    paths: &[PathBuf],
) -> Result<bool, String> {
    if paths.is_empty() {
        return Ok(false);
    }
    store.add_paths(paths)?;
    log_info!("added {} program(s)", paths.len());
    list.reload(store)?;
    Ok(true)
}

/// Asks whether the `selected` paths may be unmarked.
///
/// Without a selection the user is told to select something first and
/// the answer is always no.
pub fn confirm_removal(selected: &[PathBuf], prompt: &impl Prompt) -> bool {
    if selected.is_empty() {
        prompt.confirm(SELECT_FIRST_MESSAGE, PromptKind::OkWarning);
        return false;
    }
    let accepted = prompt.confirm(REMOVE_MESSAGE, PromptKind::YesNoWarning);
    if !accepted {
        log_debug!("remove cancelled by user");
    }
    accepted
}

/// Unmarks `paths` and reloads. Returns whether the store was touched.
pub fn remove(
    list: &mut ElevationList,
    store: &mut impl ElevationStore,
    paths: &[PathBuf],
) -> Result<bool, String> {
    if paths.is_empty() {
        return Ok(false);
    }
    store.remove_paths(paths)?;
    log_info!("removed {} program(s)", paths.len());
    list.reload(store)?;
    Ok(true)
}

/// Shows the about prompt. Returns whether the homepage should open.
pub fn about(prompt: &impl Prompt) -> bool {
    prompt.confirm(ABOUT_MESSAGE, PromptKind::YesNoInfo)
}
