pub mod fit;
pub mod gesture;
pub mod phase;
pub mod touch;
pub mod transform;

pub use fit::fit_to_viewport;
pub use gesture::{GestureController, wheel_zoom_step};
pub use phase::{LifecycleToken, PortalLifecycle, PortalPhase};
pub use touch::GestureContext;
pub use transform::{TransformState, ZoomStep};
