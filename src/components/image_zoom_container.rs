use web_sys::HtmlImageElement;
use yew::prelude::*;

use super::controls_panel::ImageControls;
use super::image_portal::ImagePortal;
use crate::config::ZoomConfig;
use crate::dom;
use crate::model::ImageSource;

#[derive(Properties, PartialEq, Clone)]
pub struct ImageZoomContainerProps {
    pub src: AttrValue,
    #[prop_or_default]
    pub alt: AttrValue,
    #[prop_or_default]
    pub class: Classes,
    #[prop_or_default]
    pub style: AttrValue,
    #[prop_or_default]
    pub config: ZoomConfig,
    #[prop_or_default]
    pub custom_controls: Option<Callback<ImageControls, Html>>,
}

/// A single thumbnail that opens itself in the zoom portal when clicked.
#[function_component(ImageZoomContainer)]
pub fn image_zoom_container(props: &ImageZoomContainerProps) -> Html {
    let thumb_ref = use_node_ref();
    let opened = use_state(|| None::<ImageSource>);

    let onclick = {
        let thumb_ref = thumb_ref.clone();
        let opened = opened.clone();
        let src = props.src.clone();
        let alt = props.alt.clone();
        Callback::from(move |_: MouseEvent| {
            let natural = thumb_ref
                .cast::<HtmlImageElement>()
                .map(|img| dom::natural_size(&img))
                .unwrap_or_default();
            opened.set(Some(ImageSource {
                src: src.to_string(),
                alt: alt.to_string(),
                natural,
            }));
        })
    };
    let on_close = {
        let opened = opened.clone();
        Callback::from(move |_| opened.set(None))
    };

    html! {
        <>
            <img
                ref={thumb_ref}
                src={props.src.clone()}
                alt={props.alt.clone()}
                class={props.class.clone()}
                style={format!("cursor:zoom-in; {}", props.style)}
                onclick={onclick}
            />
            <ImagePortal
                image={(*opened).clone()}
                on_close={on_close}
                config={props.config.clone()}
                custom_controls={props.custom_controls.clone()}
            />
        </>
    }
}
