pub mod app;
pub mod controls_panel;
pub mod image_portal;
pub mod image_zoom_container;
pub mod images_zoom_group;

pub use app::App;
pub use controls_panel::{ControlsPanel, ImageControls};
pub use image_portal::ImagePortal;
pub use image_zoom_container::ImageZoomContainer;
pub use images_zoom_group::ImagesZoomGroup;
