//! Click-to-zoom image portal for Yew.
//!
//! The pure transform engine lives in [`state`] and [`config`] and has no
//! browser dependency. [`components`] wires it to the DOM.

pub mod components;
pub mod config;
pub mod dom;
pub mod model;
pub mod state;
pub mod util;

pub use components::{ControlsPanel, ImageControls, ImagePortal, ImageZoomContainer, ImagesZoomGroup};
pub use config::{BoundPolicy, ConfigError, ElementOverrides, ZoomBounds, ZoomConfig};
pub use model::{ImageSource, Point, Size, TransformMode};
pub use state::{GestureController, PortalPhase, TransformState};
