//! Confirm-then-remove flow used in delete mode.

use crate::store::FeatureStore;

/// Yes/no prompt supplied by the UI.
pub trait Confirm {
    /// Ask the user; true means proceed.
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

/// Ask to delete feature `id` and remove it if confirmed.
///
/// Returns true if the feature was removed. Unknown ids are not prompted for.
pub fn confirm_and_remove(store: &mut FeatureStore, id: &str, confirm: &mut dyn Confirm) -> bool {
    let Some(feature) = store.get(id) else {
        return false;
    };
    let prompt = format!("Delete {}?", feature.name);
    if !confirm.confirm(&prompt) {
        log::debug!("Deletion of {} declined", id);
        return false;
    }
    store.remove(id)
}
