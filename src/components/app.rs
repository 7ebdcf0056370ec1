use super::{ImageControls, ImageZoomContainer, ImagesZoomGroup};
use crate::config::ZoomConfig;
use crate::model::TransformMode;
use yew::prelude::*;

const DEMO_IMAGES: [&str; 3] = [
    "https://images.unsplash.com/photo-1728068136248-6527c9c06c73?q=80&w=2574",
    "https://plus.unsplash.com/premium_photo-1728034277956-9f6fbf7b4c33?q=80&w=2574",
    "https://images.unsplash.com/photo-1728046321877-f76888663fd6?q=80&w=1000",
];

const THUMB_STYLE: &str = "width:100px; height:100px; object-fit:cover; margin:4px;";

/// Reads an optional JSON config from `<body data-zoom-config="...">`.
fn page_config() -> ZoomConfig {
    let raw = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
        .and_then(|b| b.get_attribute("data-zoom-config"));
    let Some(raw) = raw else {
        return ZoomConfig::default();
    };
    match ZoomConfig::from_json(&raw) {
        Ok(config) => config,
        Err(e) => {
            log::error!("ignoring data-zoom-config: {e}");
            ZoomConfig::default()
        }
    }
}

fn rotating_controls(controls: ImageControls) -> Html {
    let rotate = |deg: f64| {
        let cb = controls.transform_rotation.clone();
        Callback::from(move |_: MouseEvent| cb.emit((deg, TransformMode::Increment)))
    };
    let zoom = |step: f64| {
        let cb = controls.transform_scale.clone();
        Callback::from(move |_: MouseEvent| cb.emit((step, TransformMode::Increment)))
    };
    let reset = {
        let cb = controls.reset_image_transform.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    let close = {
        let cb = controls.close_portal.clone();
        Callback::from(move |_: MouseEvent| cb.emit(()))
    };
    html! {
        <div style="position:absolute; left:16px; top:16px; display:flex; gap:6px; align-items:center; color:#e6edf3;">
            <button onclick={rotate(-90.0)}>{"⟲"}</button>
            <button onclick={rotate(90.0)}>{"⟳"}</button>
            <button onclick={zoom(0.25)}>{"+"}</button>
            <button onclick={zoom(-0.25)}>{"-"}</button>
            <button onclick={reset}>{"Reset"}</button>
            <button onclick={close}>{"Close"}</button>
            <span style="font:12px monospace;">
                { format!("{:.0}% · {:.0}°", controls.scale * 100.0, controls.rotation) }
            </span>
        </div>
    }
}

#[function_component(App)]
pub fn app() -> Html {
    let config = use_memo((), |_| page_config());
    let custom = Callback::from(rotating_controls);

    html! {
        <div style="padding:16px;">
            <section>
                <h3>{"Single images"}</h3>
                { for DEMO_IMAGES.iter().map(|src| html! {
                    <ImageZoomContainer src={*src} style={THUMB_STYLE} config={(*config).clone()} />
                }) }
            </section>
            <section class="gallery">
                <h3>{"Group with custom controls"}</h3>
                { for DEMO_IMAGES.iter().enumerate().map(|(i, src)| html! {
                    <img src={*src} alt={format!("gallery image {}", i + 1)} style={THUMB_STYLE} />
                }) }
            </section>
            <ImagesZoomGroup
                selector=".gallery img"
                config={(*config).clone()}
                custom_controls={Some(custom)}
                />
        </div>
    }
}
