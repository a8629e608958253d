// Library crate: the headless rendering & interaction engine, exposed for integration tests
// and scripted sessions. Window-specific modules (app, ui, canvas, GL viewport) stay in the
// binary crate.

pub mod catalog;
pub mod command;
pub mod draw2d;
pub mod fixtures;
pub mod geometry;
pub mod harness;
pub mod interaction;
pub mod lighting;
pub mod mapping;
pub mod scene3d;
pub mod shapes;
pub mod state;
pub mod validation;

/// CPU-side mesh and picking types shared by the scene builder and the GL viewport.
/// Camera and renderers stay in the binary crate.
pub mod viewport {
    pub mod mesh;
    pub mod picking;
}
