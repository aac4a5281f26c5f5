//! Vertex editing of existing features.
//!
//! Selecting a feature copies its geometry into a staged working copy.
//! Vertex moves only touch that copy; the store sees the change when the
//! same feature is clicked again (commit). Clicking another feature while
//! one is selected commits the current one and then selects the other.

use crate::error::AoiError;
use crate::model::{Coordinate, FeatureId, FeaturePatch, Geometry};
use crate::store::FeatureStore;

/// Selection state of the edit flow.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EditState {
    /// No feature selected.
    #[default]
    Unselected,
    /// A feature is selected with a staged copy of its geometry.
    Selected {
        feature_id: FeatureId,
        staged: Geometry,
    },
}

/// What a feature click did in edit mode.
#[derive(Debug, Clone, PartialEq)]
pub enum EditOutcome {
    /// The feature became selected.
    Selected(FeatureId),
    /// The selected feature was clicked again and committed.
    /// `changed` is false when the staged geometry matched the store.
    Committed { feature_id: FeatureId, changed: bool },
    /// Another feature was clicked: the previous one was committed and the
    /// clicked one selected.
    Switched {
        committed: FeatureId,
        changed: bool,
        selected: FeatureId,
    },
    /// The clicked id is not in the store.
    Ignored,
}

/// Staged per-feature geometry editing.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    state: EditState,
}

impl EditSession {
    /// Create a session with nothing selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// The current selection state.
    pub fn state(&self) -> &EditState {
        &self.state
    }

    /// Id of the selected feature.
    pub fn selected_id(&self) -> Option<&str> {
        match &self.state {
            EditState::Selected { feature_id, .. } => Some(feature_id),
            EditState::Unselected => None,
        }
    }

    /// Staged geometry of the selected feature, for highlighting.
    pub fn staged(&self) -> Option<&Geometry> {
        match &self.state {
            EditState::Selected { staged, .. } => Some(staged),
            EditState::Unselected => None,
        }
    }

    /// Handle a click on feature `id`.
    ///
    /// If committing fails the error is returned and the current selection
    /// is kept so the staged geometry can be corrected or discarded.
    pub fn click_feature(
        &mut self,
        store: &mut FeatureStore,
        id: &str,
    ) -> Result<EditOutcome, AoiError> {
        let Some(feature) = store.get(id) else {
            log::debug!("Edit click on unknown feature {}", id);
            return Ok(EditOutcome::Ignored);
        };
        let fresh = EditState::Selected {
            feature_id: feature.id.clone(),
            staged: feature.geometry.clone(),
        };

        match self.selected_id().map(str::to_owned) {
            None => {
                self.state = fresh;
                log::debug!("Selected {} for editing", id);
                Ok(EditOutcome::Selected(id.to_string()))
            }
            Some(selected) if selected == id => {
                let changed = self.commit(store)?;
                Ok(EditOutcome::Committed {
                    feature_id: selected,
                    changed,
                })
            }
            Some(selected) => {
                let changed = self.commit(store)?;
                self.state = fresh;
                log::debug!("Switched editing from {} to {}", selected, id);
                Ok(EditOutcome::Switched {
                    committed: selected,
                    changed,
                    selected: id.to_string(),
                })
            }
        }
    }

    /// Move vertex `index` of the staged geometry.
    ///
    /// Returns false if nothing is selected or the index does not exist.
    pub fn move_vertex(&mut self, index: usize, coord: Coordinate) -> bool {
        match &mut self.state {
            EditState::Selected { staged, .. } => staged.set_vertex(index, coord),
            EditState::Unselected => false,
        }
    }

    /// Write the staged geometry to the store if it differs, then deselect.
    ///
    /// Returns whether the store was updated. A selected feature that no
    /// longer exists is simply deselected.
    pub fn commit(&mut self, store: &mut FeatureStore) -> Result<bool, AoiError> {
        let EditState::Selected { feature_id, staged } = &self.state else {
            return Ok(false);
        };

        let differs = store
            .get(feature_id)
            .is_some_and(|current| current.geometry != *staged);
        let changed = if differs {
            store.update(feature_id, FeaturePatch::new().geometry(staged.clone()))?
        } else {
            false
        };
        log::debug!("Committed edit of {} (changed: {})", feature_id, changed);

        self.state = EditState::Unselected;
        Ok(changed)
    }

    /// Drop the selection and any staged changes.
    pub fn discard(&mut self) {
        if let EditState::Selected { feature_id, .. } = &self.state {
            log::debug!("Discarding staged edit of {}", feature_id);
        }
        self.state = EditState::Unselected;
    }
}
