use wasm_bindgen::JsCast;
use web_sys::{HtmlImageElement, MouseEvent};
use yew::prelude::*;

use super::controls_panel::ImageControls;
use super::image_portal::ImagePortal;
use crate::config::ZoomConfig;
use crate::dom::{self, EventListenerGuard};
use crate::model::ImageSource;

#[derive(Properties, PartialEq, Clone)]
pub struct ImagesZoomGroupProps {
    /// CSS selector for the page images to bind, e.g. `".gallery img"`.
    pub selector: AttrValue,
    #[prop_or_default]
    pub config: ZoomConfig,
    #[prop_or_default]
    pub custom_controls: Option<Callback<ImageControls, Html>>,
}

fn source_of(img: &HtmlImageElement) -> ImageSource {
    ImageSource {
        src: img.current_src(),
        alt: img.alt(),
        natural: dom::natural_size(img),
    }
}

/// Opens any already-rendered image matching `selector` in a shared portal.
/// Matches are collected once per selector change.
#[function_component(ImagesZoomGroup)]
pub fn images_zoom_group(props: &ImagesZoomGroupProps) -> Html {
    let opened = use_state(|| None::<ImageSource>);

    {
        let opened = opened.clone();
        use_effect_with(props.selector.clone(), move |selector| {
            let mut guards = Vec::new();
            let nodes = web_sys::window()
                .and_then(|w| w.document())
                .map(|d| d.query_selector_all(selector));
            match nodes {
                Some(Ok(list)) => {
                    for i in 0..list.length() {
                        let Some(img) = list.item(i).and_then(|n| n.dyn_into::<HtmlImageElement>().ok())
                        else {
                            continue;
                        };
                        let opened = opened.clone();
                        let target = img.clone();
                        let guard = EventListenerGuard::attach(&target, "click", move |_: MouseEvent| {
                            opened.set(Some(source_of(&img)));
                        });
                        guards.extend(guard);
                    }
                    log::debug!("bound {} image(s) for '{selector}'", guards.len());
                }
                Some(Err(e)) => log::warn!("bad image selector '{selector}': {e:?}"),
                None => log::warn!("no document to bind images in"),
            }
            move || drop(guards)
        });
    }

    let on_close = {
        let opened = opened.clone();
        Callback::from(move |_| opened.set(None))
    };

    html! {
        <ImagePortal
            image={(*opened).clone()}
            on_close={on_close}
            config={props.config.clone()}
            custom_controls={props.custom_controls.clone()}
        />
    }
}
