//! Event routing between the map UI and the AOI core.
//!
//! [`AoiEditor`] owns the feature store and both interaction sessions and
//! dispatches each incoming event according to the active mode, so a UI only
//! has to forward raw events and render what the accessors expose.

use crate::config::AppConfig;
use crate::error::AoiError;
use crate::geo_math::Bounds;
use crate::model::{AoiFeature, Coordinate, Geometry};
use crate::session::{
    Confirm, DrawingMode, DrawingSession, EditOutcome, EditSession, Preview, confirm_and_remove,
};
use crate::store::FeatureStore;

/// Result of clicking an existing feature.
#[derive(Debug, Clone, PartialEq)]
pub enum FeatureClick {
    /// Edit mode handled the click.
    Edit(EditOutcome),
    /// Delete mode; true if the feature was removed.
    Delete(bool),
    /// Any other mode: bounds for the map to focus on.
    Focus(Option<Bounds>),
}

/// Mode-aware dispatcher over a feature store.
#[derive(Debug)]
pub struct AoiEditor {
    store: FeatureStore,
    drawing: DrawingSession,
    edit: EditSession,
    /// Hit radius for point features in meters.
    point_hit_radius_m: f64,
    /// Clear the mode after each created feature.
    exit_mode_after_create: bool,
}

impl AoiEditor {
    /// Create an editor over `store` with default settings.
    pub fn new(store: FeatureStore) -> Self {
        Self::with_config(store, &AppConfig::default())
    }

    /// Create an editor over `store` using interaction settings from `config`.
    pub fn with_config(store: FeatureStore, config: &AppConfig) -> Self {
        Self {
            store,
            drawing: DrawingSession::new(),
            edit: EditSession::new(),
            point_hit_radius_m: config.point_hit_radius_m,
            exit_mode_after_create: config.exit_mode_after_create,
        }
    }

    /// The feature store.
    pub fn store(&self) -> &FeatureStore {
        &self.store
    }

    /// Mutable access for list operations (rename, clear).
    pub fn store_mut(&mut self) -> &mut FeatureStore {
        &mut self.store
    }

    /// The active mode.
    pub fn mode(&self) -> Option<DrawingMode> {
        self.drawing.mode()
    }

    /// Change the mode.
    ///
    /// Leaving a drawing mode discards the in-progress gesture; leaving edit
    /// mode discards staged, uncommitted geometry.
    pub fn set_mode(&mut self, mode: Option<DrawingMode>) {
        if mode != Some(DrawingMode::Edit) {
            self.edit.discard();
        }
        self.drawing.set_mode(mode);
    }

    /// Toolbar button press: toggles `pressed` on or off.
    pub fn toggle_mode(&mut self, pressed: DrawingMode) {
        self.set_mode(DrawingMode::toggle(self.mode(), pressed));
    }

    /// Map click on empty space (or anywhere, while drawing).
    ///
    /// Returns the created feature when the click completes a shape.
    pub fn map_click(&mut self, coord: Coordinate) -> Result<Option<AoiFeature>, AoiError> {
        let completed = self.drawing.click(coord);
        self.finish(completed)
    }

    /// Map double-click.
    pub fn map_double_click(&mut self) -> Result<Option<AoiFeature>, AoiError> {
        let completed = self.drawing.double_click();
        self.finish(completed)
    }

    /// Pointer movement over the map.
    pub fn pointer_moved(&mut self, coord: Coordinate) {
        self.drawing.pointer_moved(coord);
    }

    /// Click on the feature with `id`.
    pub fn feature_click(
        &mut self,
        id: &str,
        confirm: &mut dyn Confirm,
    ) -> Result<FeatureClick, AoiError> {
        match self.mode() {
            Some(DrawingMode::Edit) => {
                let outcome = self.edit.click_feature(&mut self.store, id)?;
                Ok(FeatureClick::Edit(outcome))
            }
            Some(DrawingMode::Delete) => Ok(FeatureClick::Delete(confirm_and_remove(
                &mut self.store,
                id,
                confirm,
            ))),
            _ => Ok(FeatureClick::Focus(self.store.feature_bounds(id))),
        }
    }

    /// Click at a map position: routes to the topmost feature there in edit
    /// and delete modes, otherwise treats it as a map click.
    ///
    /// In edit mode the selected feature is hit-tested against its staged
    /// geometry, which is the shape on screen.
    pub fn click_at(
        &mut self,
        coord: Coordinate,
        confirm: &mut dyn Confirm,
    ) -> Result<Option<FeatureClick>, AoiError> {
        if matches!(
            self.mode(),
            Some(DrawingMode::Edit | DrawingMode::Delete)
        ) {
            let hit = self.staged_hit(&coord).or_else(|| {
                self.store
                    .hit_test(&coord, self.point_hit_radius_m)
                    .map(|f| f.id.clone())
            });
            return match hit {
                Some(id) => self.feature_click(&id, confirm).map(Some),
                None => Ok(None),
            };
        }
        self.map_click(coord).map(|_| None)
    }

    /// A vertex handle of the selected feature was dragged to `coord`.
    pub fn vertex_dragged(&mut self, index: usize, coord: Coordinate) -> bool {
        self.mode() == Some(DrawingMode::Edit) && self.edit.move_vertex(index, coord)
    }

    /// Live geometry of the shape being drawn.
    pub fn drawing_preview(&self) -> Option<Preview> {
        self.drawing.preview()
    }

    /// Id and staged geometry of the feature being edited.
    pub fn staged_edit(&self) -> Option<(&str, &Geometry)> {
        Some((self.edit.selected_id()?, self.edit.staged()?))
    }

    /// Id of the selected feature if `coord` falls on its staged geometry.
    fn staged_hit(&self, coord: &Coordinate) -> Option<String> {
        let (id, staged) = self.staged_edit()?;
        staged
            .contains(coord, self.point_hit_radius_m)
            .then(|| id.to_string())
    }

    /// Hand a completed gesture to the store.
    ///
    /// A rejected geometry ends the gesture; the drawing session is already
    /// idle at this point.
    fn finish(&mut self, completed: Option<Geometry>) -> Result<Option<AoiFeature>, AoiError> {
        let Some(geometry) = completed else {
            return Ok(None);
        };
        let feature = self.store.create(geometry).inspect_err(|e| {
            log::warn!("Discarded drawing: {}", e);
        })?;
        if self.exit_mode_after_create {
            self.set_mode(None);
        }
        Ok(Some(feature))
    }
}
