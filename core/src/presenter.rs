//! Display capability for generated markup.
//!
//! The host picks an implementation when it wires up its components:
//! [`SurfaceRegistry`] keeps named surfaces in memory (an HTML page is built on
//! top of it in the CLI), [`NoopPresenter`] is for headless runs.

use std::collections::BTreeMap;

use tracing::{debug, error};

use crate::error::PresentError;

/// Replaces the content of a named surface with SVG markup.
pub trait Presenter {
    /// Fails with [`PresentError::SurfaceNotFound`] and leaves every surface
    /// untouched when `surface_id` is unknown.
    fn present(&mut self, markup: &str, surface_id: &str) -> Result<(), PresentError>;
}

/// Accepts everything and displays nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopPresenter;

impl Presenter for NoopPresenter {
    fn present(&mut self, _markup: &str, surface_id: &str) -> Result<(), PresentError> {
        debug!(surface = surface_id, "presentation disabled");
        Ok(())
    }
}

/// Named surfaces holding the last markup presented to them.
#[derive(Debug, Clone, Default)]
pub struct SurfaceRegistry {
    surfaces: BTreeMap<String, String>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a surface with placeholder content. Re-registering keeps the
    /// current content.
    pub fn register(&mut self, surface_id: &str, placeholder: &str) {
        self.surfaces
            .entry(surface_id.to_string())
            .or_insert_with(|| placeholder.to_string());
    }

    pub fn content(&self, surface_id: &str) -> Option<&str> {
        self.surfaces.get(surface_id).map(String::as_str)
    }

    /// Surfaces in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.surfaces.iter().map(|(id, content)| (id.as_str(), content.as_str()))
    }
}

impl Presenter for SurfaceRegistry {
    fn present(&mut self, markup: &str, surface_id: &str) -> Result<(), PresentError> {
        match self.surfaces.get_mut(surface_id) {
            Some(content) => {
                markup.clone_into(content);
                debug!(surface = surface_id, bytes = markup.len(), "surface updated");
                Ok(())
            }
            None => {
                error!(surface = surface_id, "surface not found");
                Err(PresentError::SurfaceNotFound(surface_id.to_string()))
            }
        }
    }
}
