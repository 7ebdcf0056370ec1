use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{Event, EventTarget, HtmlElement, HtmlImageElement, MouseEvent, TouchEvent, WheelEvent};
use yew::prelude::*;

use super::controls_panel::{ControlsPanel, ImageControls};
use crate::config::{ZoomBounds, ZoomConfig};
use crate::dom::{self, EventListenerGuard, PhaseTimer, ScrollLock};
use crate::model::{ImageSource, Point, Size, TransformMode};
use crate::state::{GestureController, PortalLifecycle, TransformState, fit_to_viewport};
use crate::util::{image_transform_css, join_class, join_style, wrapper_transform_css};

#[derive(Properties, PartialEq, Clone)]
pub struct ImagePortalProps {
    /// Image to show. `None` keeps the portal unmounted.
    pub image: Option<ImageSource>,
    /// Fired once the exit animation has finished.
    pub on_close: Callback<()>,
    #[prop_or_default]
    pub config: ZoomConfig,
    /// Replaces the default button group.
    #[prop_or_default]
    pub custom_controls: Option<Callback<ImageControls, Html>>,
}

/// Shared handles to the per-portal state. Cloned into listeners and timers.
#[derive(Clone)]
struct PortalHandles {
    transform: Rc<RefCell<TransformState>>,
    gestures: Rc<RefCell<GestureController>>,
    lifecycle: Rc<RefCell<PortalLifecycle>>,
    timer: Rc<RefCell<PhaseTimer>>,
    scroll_lock: Rc<RefCell<ScrollLock>>,
    redraw: Callback<()>,
}

impl PortalHandles {
    fn new(bounds: ZoomBounds, redraw: Callback<()>) -> Self {
        Self {
            transform: Rc::new(RefCell::new(TransformState::new(bounds))),
            gestures: Rc::default(),
            lifecycle: Rc::default(),
            timer: Rc::default(),
            scroll_lock: Rc::default(),
            redraw,
        }
    }

    fn open(&self, source: &ImageSource, bounds: ZoomBounds, duration: u32) {
        *self.transform.borrow_mut() = TransformState::new(bounds);
        *self.gestures.borrow_mut() = GestureController::new();
        self.resync_initial_scale(source.natural);
        self.scroll_lock.borrow_mut().lock();

        let token = self.lifecycle.borrow_mut().open();
        log::debug!("portal opening for {}", source.src);
        let handles = self.clone();
        self.timer.borrow_mut().schedule(duration, move || {
            if handles.lifecycle.borrow_mut().complete_enter(token) {
                handles.redraw.emit(());
            }
        });
        self.redraw.emit(());
    }

    /// Fade out first; reset, unlock and notify the host only after the
    /// animation has run.
    fn close(&self, duration: u32, on_close: Callback<()>) {
        let Some(token) = self.lifecycle.borrow_mut().request_close() else {
            return;
        };
        log::debug!("portal closing");
        let handles = self.clone();
        self.timer.borrow_mut().schedule(duration, move || {
            if !handles.lifecycle.borrow_mut().complete_close(token) {
                return;
            }
            handles.transform.borrow_mut().reset();
            handles.gestures.borrow_mut().touch_end();
            handles.scroll_lock.borrow_mut().unlock();
            on_close.emit(());
        });
        self.redraw.emit(());
    }

    /// Host dropped the image (or unmounted us) without going through close.
    fn teardown(&self) {
        if !self.lifecycle.borrow().phase().is_mounted() {
            return;
        }
        log::debug!("portal torn down while {:?}", self.lifecycle.borrow().phase());
        self.timer.borrow_mut().cancel();
        self.lifecycle.borrow_mut().force_close();
        self.gestures.borrow_mut().touch_end();
        self.scroll_lock.borrow_mut().unlock();
    }

    fn resync_initial_scale(&self, natural: Size) {
        let mut st = self.transform.borrow_mut();
        st.set_natural_size(natural);
        let Some(viewport) = dom::viewport_size() else {
            return;
        };
        let initial = fit_to_viewport(natural, viewport, &st.bounds());
        st.set_initial_scale(initial);
        log::debug!(
            "fit {}x{} into {}x{}: initial scale {:.3}",
            natural.width,
            natural.height,
            viewport.width,
            viewport.height,
            st.initial_scale()
        );
    }

    fn attach_listeners(&self, img: &HtmlImageElement, portal: &HtmlElement) -> Vec<EventListenerGuard> {
        let mut guards = Vec::new();
        let img_target: &EventTarget = img.as_ref();
        let portal_target: &EventTarget = portal.as_ref();

        let wheel = {
            let h = self.clone();
            let img = img.clone();
            EventListenerGuard::attach(img_target, "wheel", move |e: WheelEvent| {
                e.prevent_default();
                let geometry = dom::read_geometry(&img);
                let changed = h.gestures.borrow_mut().wheel(
                    &mut h.transform.borrow_mut(),
                    &geometry,
                    dom::client_point(&e),
                    e.delta_y(),
                );
                if changed {
                    h.redraw.emit(());
                }
            })
        };
        guards.extend(wheel);

        let mousedown = {
            let h = self.clone();
            EventListenerGuard::attach(img_target, "mousedown", move |e: MouseEvent| {
                e.prevent_default();
                h.gestures.borrow_mut().pointer_down(dom::client_point(&e));
                h.redraw.emit(());
            })
        };
        guards.extend(mousedown);

        // moves are tracked on the whole portal so fast drags don't slip off the image
        let mousemove = {
            let h = self.clone();
            EventListenerGuard::attach(portal_target, "mousemove", move |e: MouseEvent| {
                let changed = h
                    .gestures
                    .borrow_mut()
                    .pointer_move(&mut h.transform.borrow_mut(), dom::client_point(&e));
                if changed {
                    h.redraw.emit(());
                }
            })
        };
        guards.extend(mousemove);

        // release anywhere on the page ends the drag
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            let h = self.clone();
            let mouseup = EventListenerGuard::attach(&document, "mouseup", move |_e: MouseEvent| {
                if h.gestures.borrow().is_dragging() {
                    h.gestures.borrow_mut().pointer_up();
                    h.redraw.emit(());
                }
            });
            guards.extend(mouseup);
        }

        let touchstart = {
            let h = self.clone();
            EventListenerGuard::attach(img_target, "touchstart", move |e: TouchEvent| {
                h.gestures
                    .borrow_mut()
                    .touch_start(&dom::touch_points(&e.touches()));
            })
        };
        guards.extend(touchstart);

        let touchmove = {
            let h = self.clone();
            EventListenerGuard::attach(img_target, "touchmove", move |e: TouchEvent| {
                e.prevent_default();
                let changed = h
                    .gestures
                    .borrow_mut()
                    .touch_move(&mut h.transform.borrow_mut(), &dom::touch_points(&e.touches()));
                if changed {
                    h.redraw.emit(());
                }
            })
        };
        guards.extend(touchmove);

        for event in ["touchend", "touchcancel"] {
            let h = self.clone();
            let end = EventListenerGuard::attach(img_target, event, move |_e: TouchEvent| {
                h.gestures.borrow_mut().touch_end();
                h.redraw.emit(());
            });
            guards.extend(end);
        }

        // natural size may only become known once the full image has loaded
        let load = {
            let h = self.clone();
            let img = img.clone();
            EventListenerGuard::attach(img_target, "load", move |_e: Event| {
                h.refit_if_loaded(&img);
            })
        };
        guards.extend(load);
        // a cached image may have finished before the listener existed
        self.refit_if_loaded(img);

        guards
    }

    /// Re-fit once the decoded size differs from the one the portal opened with.
    fn refit_if_loaded(&self, img: &HtmlImageElement) -> bool {
        if !img.complete() {
            return false;
        }
        let natural = dom::natural_size(img);
        if !natural.is_laid_out() || natural == self.transform.borrow().natural_size() {
            return false;
        }
        self.resync_initial_scale(natural);
        self.redraw.emit(());
        true
    }
}

/// Build a control callback that mutates the transform and re-renders.
fn control<T: 'static>(
    transform: &Rc<RefCell<TransformState>>,
    redraw: &Callback<()>,
    apply: fn(&mut TransformState, T),
) -> Callback<T> {
    let transform = transform.clone();
    let redraw = redraw.clone();
    Callback::from(move |arg: T| {
        apply(&mut transform.borrow_mut(), arg);
        redraw.emit(());
    })
}

#[function_component(ImagePortal)]
pub fn image_portal(props: &ImagePortalProps) -> Html {
    let img_ref = use_node_ref();
    let portal_ref = use_node_ref();
    let force_update = use_force_update();
    let handles = {
        let bounds = props.config.bounds;
        let redraw = Callback::from(move |_: ()| force_update.force_update());
        (*use_memo((), move |_| PortalHandles::new(bounds, redraw))).clone()
    };
    let transform = handles.transform.clone();
    let redraw = handles.redraw.clone();
    let config = props.config.clone();

    // Bounds changed while open: re-clamp in place
    {
        let h = handles.clone();
        use_effect_with(config.bounds, move |bounds| {
            h.transform.borrow_mut().set_bounds(*bounds);
            || ()
        });
    }

    // Open / close driven by the bound image; listeners live as long as it does
    {
        let h = handles.clone();
        let img_ref = img_ref.clone();
        let portal_ref = portal_ref.clone();
        let bounds = config.bounds;
        let duration = config.portal_animation_duration;
        use_effect_with(props.image.clone(), move |image| {
            let mut guards = Vec::new();
            match image {
                Some(source) => {
                    h.open(source, bounds, duration);
                    let img = img_ref.cast::<HtmlImageElement>();
                    let portal = portal_ref.cast::<HtmlElement>();
                    if let (Some(img), Some(portal)) = (img, portal) {
                        guards = h.attach_listeners(&img, &portal);
                    } else {
                        log::warn!("portal elements not mounted, gestures disabled");
                    }
                }
                None => h.teardown(),
            }
            move || drop(guards)
        });
    }

    // Unmount
    {
        let h = handles.clone();
        use_effect_with((), move |_| move || h.teardown());
    }

    let Some(image) = props.image.clone() else {
        return html! {};
    };
    let Some(host) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        log::warn!("no document body to mount the portal on");
        return html! {};
    };

    let close_portal = {
        let h = handles.clone();
        let on_close = props.on_close.clone();
        let duration = config.portal_animation_duration;
        Callback::from(move |_: ()| h.close(duration, on_close.clone()))
    };
    let on_backdrop_click = {
        let close = close_portal.clone();
        Callback::from(move |_: MouseEvent| close.emit(()))
    };
    let swallow = Callback::from(|e: MouseEvent| e.stop_propagation());

    let phase = handles.lifecycle.borrow().phase();
    let dragging = handles.gestures.borrow().is_dragging();
    let st = transform.borrow();

    let controls = ImageControls {
        transform_scale: control(&transform, &redraw, |st: &mut TransformState, (v, mode): (f64, TransformMode)| {
            st.transform_scale(v, mode)
        }),
        transform_position: control(&transform, &redraw, |st: &mut TransformState, (p, mode): (Point, TransformMode)| {
            st.transform_position(p, mode)
        }),
        transform_rotation: control(&transform, &redraw, |st: &mut TransformState, (v, mode): (f64, TransformMode)| {
            st.transform_rotation(v, mode)
        }),
        transform_wrapper_position: control(
            &transform,
            &redraw,
            |st: &mut TransformState, (p, mode): (Point, TransformMode)| st.transform_wrapper_position(p, mode),
        ),
        reset_image_transform: control(&transform, &redraw, |st: &mut TransformState, _: ()| st.reset()),
        close_portal,
        scale: st.scale(),
        position: st.position(),
        wrapper_position: st.wrapper_position(),
        rotation: st.rotation(),
        phase,
    };

    let controls_html = match &props.custom_controls {
        Some(render) => html! {
            <div class={classes!(config.custom_control_class.clone())} onclick={swallow.clone()} style="position:relative; z-index:100;">
                { render.emit(controls) }
            </div>
        },
        None => html! { <ControlsPanel controls={controls} /> },
    };

    let portal_class = join_class(&format!("image-portal {}", phase.class_name()), &config.portal);
    let portal_style = join_style(
        format!(
            "position:fixed; inset:0; z-index:1000; background:rgba(0,0,0,0.8); overflow:hidden; opacity:{}; transition:opacity {}ms; pointer-events:{};",
            if phase.is_shown() { 1 } else { 0 },
            config.portal_animation_duration,
            if phase.is_shown() { "auto" } else { "none" },
        ),
        &config.portal,
    );
    let wrapper_transition = if dragging {
        "none".to_string()
    } else {
        format!("transform {}ms", config.image_transform_duration)
    };
    let wrapper_style = join_style(
        format!(
            "position:absolute; top:50%; left:50%; transform:{}; transition:{}; will-change:transform;",
            wrapper_transform_css(st.wrapper_position()),
            wrapper_transition,
        ),
        &config.wrapper,
    );
    let image_style = join_style(
        format!(
            "display:block; max-width:none; user-select:none; cursor:{}; transform:{}; transition:transform {}ms; will-change:transform;",
            if dragging { "grabbing" } else { "grab" },
            image_transform_css(st.position(), st.scale(), st.rotation()),
            config.image_transform_duration,
        ),
        &config.image,
    );

    let content = html! {
        <div ref={portal_ref} class={portal_class} style={portal_style} onclick={on_backdrop_click}>
            { controls_html }
            <div class={join_class("image-wrapper", &config.wrapper)} style={wrapper_style}>
                <img
                    ref={img_ref}
                    src={image.src.clone()}
                    alt={image.alt.clone()}
                    draggable="false"
                    class={join_class("", &config.image)}
                    style={image_style}
                    onclick={swallow}
                />
            </div>
        </div>
    };
    yew::create_portal(content, host.into())
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use crate::state::PortalPhase;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::Cell;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    const PIXEL_GIF: &str = "data:image/gif;base64,R0lGODlhAQABAIAAAAAAAP///yH5BAEAAAAALAAAAAABAAEAAAIBRAA7";

    fn body_overflow() -> String {
        let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
        body.style().get_property_value("overflow").unwrap()
    }

    fn set_body_overflow(value: &str) {
        let body = web_sys::window().unwrap().document().unwrap().body().unwrap();
        body.style().set_property("overflow", value).unwrap();
    }

    fn source() -> ImageSource {
        ImageSource {
            src: PIXEL_GIF.to_string(),
            alt: String::new(),
            natural: Size::new(400.0, 300.0),
        }
    }

    fn counter() -> (Rc<Cell<u32>>, Callback<()>) {
        let hits = Rc::new(Cell::new(0));
        let cb = {
            let hits = hits.clone();
            Callback::from(move |_: ()| hits.set(hits.get() + 1))
        };
        (hits, cb)
    }

    fn handles() -> PortalHandles {
        PortalHandles::new(ZoomBounds::default(), Callback::noop())
    }

    #[wasm_bindgen_test]
    async fn test_close_resets_only_after_animation() {
        set_body_overflow("scroll");
        let h = handles();
        let bounds = ZoomBounds::absolute(0.1, 4.0).unwrap();

        h.open(&source(), bounds, 20);
        assert_eq!(body_overflow(), "hidden");
        TimeoutFuture::new(60).await;
        assert_eq!(h.lifecycle.borrow().phase(), PortalPhase::Open);

        let initial = h.transform.borrow().initial_scale();
        h.transform.borrow_mut().transform_scale(3.0, TransformMode::Absolute);
        h.transform
            .borrow_mut()
            .transform_wrapper_position(Point::new(12.0, -4.0), TransformMode::Increment);
        h.gestures.borrow_mut().pointer_down(Point::new(5.0, 5.0));

        let (closed, on_close) = counter();
        h.close(80, on_close.clone());
        assert_eq!(h.lifecycle.borrow().phase(), PortalPhase::Exiting);
        // a second request while fading out is ignored
        h.close(80, on_close);

        TimeoutFuture::new(20).await;
        assert_eq!(closed.get(), 0);
        assert_eq!(h.transform.borrow().scale(), 3.0);
        assert_eq!(h.transform.borrow().wrapper_position(), Point::new(12.0, -4.0));
        assert!(h.gestures.borrow().is_dragging());
        assert_eq!(body_overflow(), "hidden");

        TimeoutFuture::new(150).await;
        assert_eq!(closed.get(), 1);
        assert_eq!(h.lifecycle.borrow().phase(), PortalPhase::Closed);
        assert_eq!(h.transform.borrow().scale(), initial);
        assert_eq!(h.transform.borrow().wrapper_position(), Point::ZERO);
        assert!(!h.gestures.borrow().is_dragging());
        assert_eq!(body_overflow(), "scroll");

        // the next cycle locks and unlocks again
        h.open(&source(), bounds, 10);
        assert_eq!(body_overflow(), "hidden");
        let (closed_again, on_close) = counter();
        h.close(10, on_close);
        TimeoutFuture::new(80).await;
        assert_eq!(closed_again.get(), 1);
        assert_eq!(closed.get(), 1);
        assert_eq!(body_overflow(), "scroll");

        set_body_overflow("");
    }

    #[wasm_bindgen_test]
    async fn test_teardown_cancels_pending_close() {
        set_body_overflow("auto");
        let h = handles();
        h.open(&source(), ZoomBounds::default(), 10);
        TimeoutFuture::new(40).await;

        let (closed, on_close) = counter();
        h.close(50, on_close);
        h.teardown();
        assert_eq!(h.lifecycle.borrow().phase(), PortalPhase::Closed);
        assert_eq!(body_overflow(), "auto");

        TimeoutFuture::new(120).await;
        assert_eq!(closed.get(), 0);
        assert_eq!(h.lifecycle.borrow().phase(), PortalPhase::Closed);

        set_body_overflow("");
    }

    #[wasm_bindgen_test]
    async fn test_refit_when_image_already_loaded() {
        let img = HtmlImageElement::new().unwrap();
        img.set_src(PIXEL_GIF);
        for _ in 0..50 {
            if img.complete() && img.natural_width() > 0 {
                break;
            }
            TimeoutFuture::new(10).await;
        }
        assert!(img.complete());

        let h = handles();
        let unloaded = ImageSource {
            natural: Size::default(),
            ..source()
        };
        h.open(&unloaded, ZoomBounds::absolute(0.1, 4.0).unwrap(), 10);
        assert_eq!(h.transform.borrow().natural_size(), Size::default());

        assert!(h.refit_if_loaded(&img));
        assert_eq!(h.transform.borrow().natural_size(), Size::new(1.0, 1.0));
        // nothing new to fit the second time
        assert!(!h.refit_if_loaded(&img));

        h.teardown();
    }
}
