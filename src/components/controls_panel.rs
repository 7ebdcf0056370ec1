use crate::model::{Point, TransformMode};
use crate::state::PortalPhase;
use yew::prelude::*;

/// Control methods and current values handed to custom control renderers.
#[derive(Clone, PartialEq)]
pub struct ImageControls {
    pub transform_scale: Callback<(f64, TransformMode)>,
    pub transform_position: Callback<(Point, TransformMode)>,
    pub transform_rotation: Callback<(f64, TransformMode)>,
    pub transform_wrapper_position: Callback<(Point, TransformMode)>,
    pub reset_image_transform: Callback<()>,
    pub close_portal: Callback<()>,
    pub scale: f64,
    pub position: Point,
    pub wrapper_position: Point,
    pub rotation: f64,
    pub phase: PortalPhase,
}

/// Step used by the zoom buttons.
pub const BUTTON_ZOOM_STEP: f64 = 0.1;

#[derive(Properties, PartialEq, Clone)]
pub struct ControlsPanelProps {
    pub controls: ImageControls,
}

#[function_component(ControlsPanel)]
pub fn controls_panel(props: &ControlsPanelProps) -> Html {
    let zi = {
        let cb = props.controls.transform_scale.clone();
        Callback::from(move |_| cb.emit((BUTTON_ZOOM_STEP, TransformMode::Increment)))
    };
    let zo = {
        let cb = props.controls.transform_scale.clone();
        Callback::from(move |_| cb.emit((-BUTTON_ZOOM_STEP, TransformMode::Increment)))
    };
    let reset = {
        let cb = props.controls.reset_image_transform.clone();
        Callback::from(move |_| cb.emit(()))
    };
    let close = {
        let cb = props.controls.close_portal.clone();
        Callback::from(move |_| cb.emit(()))
    };
    // keep clicks from reaching the backdrop, which closes the portal
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());
    html! {<div onclick={swallow} style="position:absolute; right:16px; top:16px; z-index:100; background:rgba(22,27,34,0.9); border:1px solid #30363d; border-radius:8px; padding:8px; display:flex; gap:6px; align-items:center;">
        <button aria-label="zoom in" onclick={zi}> {"+"} </button>
        <button aria-label="zoom out" onclick={zo}> {"-"} </button>
        <span style="width:8px;"></span>
        <button aria-label="reset" onclick={reset}> {"Reset"} </button>
        <button aria-label="close" onclick={close}> {"×"} </button>
    </div>}
}
