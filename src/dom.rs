//! Browser glue: scoped listeners, body scroll lock, phase timers and
//! geometry reads. Failures are logged and otherwise ignored; none of them
//! should take the page down.

use gloo_timers::callback::Timeout;
use std::fmt;
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Event, EventTarget, HtmlElement, HtmlImageElement, MouseEvent, TouchList};

use crate::model::{BoundingBox, ImageGeometry, Point, Size};

/// An event listener that is removed when the guard is dropped.
pub struct EventListenerGuard {
    target: EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl EventListenerGuard {
    pub fn new<E, F>(target: &EventTarget, event: &'static str, mut handler: F) -> Result<Self, JsValue>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::wrap(Box::new(move |e: Event| {
            if let Ok(e) = e.dyn_into::<E>() {
                handler(e);
            }
        }) as Box<dyn FnMut(Event)>);
        target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Like [`EventListenerGuard::new`], logging instead of returning the error.
    pub fn attach<E, F>(target: &EventTarget, event: &'static str, handler: F) -> Option<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        match Self::new(target, event, handler) {
            Ok(guard) => Some(guard),
            Err(e) => {
                log::warn!("failed to listen for '{event}': {e:?}");
                None
            }
        }
    }
}

impl Drop for EventListenerGuard {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref());
    }
}

impl fmt::Debug for EventListenerGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventListenerGuard")
            .field("event", &self.event)
            .finish_non_exhaustive()
    }
}

fn body() -> Option<HtmlElement> {
    web_sys::window()?.document()?.body()
}

/// Hides body overflow while a portal is open and restores the previous value.
#[derive(Debug, Default)]
pub struct ScrollLock {
    saved_overflow: Option<String>,
}

impl ScrollLock {
    pub fn is_locked(&self) -> bool {
        self.saved_overflow.is_some()
    }

    pub fn lock(&mut self) {
        if self.is_locked() {
            return;
        }
        let Some(body) = body() else {
            log::warn!("scroll lock: no document body");
            return;
        };
        let style = body.style();
        let previous = style.get_property_value("overflow").unwrap_or_default();
        match style.set_property("overflow", "hidden") {
            Ok(()) => self.saved_overflow = Some(previous),
            Err(e) => log::warn!("scroll lock failed: {e:?}"),
        }
    }

    pub fn unlock(&mut self) {
        let Some(previous) = self.saved_overflow.take() else {
            return;
        };
        let Some(body) = body() else {
            return;
        };
        let style = body.style();
        let restored = if previous.is_empty() {
            style.remove_property("overflow").map(|_| ())
        } else {
            style.set_property("overflow", &previous)
        };
        if let Err(e) = restored {
            log::warn!("scroll unlock failed: {e:?}");
        }
    }
}

impl Drop for ScrollLock {
    fn drop(&mut self) {
        self.unlock();
    }
}

/// Slot for the single pending animation timer of a portal. Scheduling
/// replaces (and so cancels) whatever was pending.
#[derive(Default)]
pub struct PhaseTimer {
    pending: Option<Timeout>,
}

impl PhaseTimer {
    pub fn schedule<F>(&mut self, millis: u32, callback: F)
    where
        F: FnOnce() + 'static,
    {
        self.pending = Some(Timeout::new(millis, callback));
    }

    /// Dropping a gloo `Timeout` clears it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

impl fmt::Debug for PhaseTimer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PhaseTimer")
            .field("pending", &self.pending.is_some())
            .finish()
    }
}

pub fn read_geometry(img: &HtmlImageElement) -> ImageGeometry {
    let rect = img.get_bounding_client_rect();
    ImageGeometry {
        natural: natural_size(img),
        offset: Size::new(img.offset_width() as f64, img.offset_height() as f64),
        rect: BoundingBox {
            left: rect.left(),
            top: rect.top(),
            width: rect.width(),
            height: rect.height(),
        },
    }
}

pub fn natural_size(img: &HtmlImageElement) -> Size {
    Size::new(img.natural_width() as f64, img.natural_height() as f64)
}

pub fn viewport_size() -> Option<Size> {
    let window = web_sys::window()?;
    let width = window.inner_width().ok()?.as_f64()?;
    let height = window.inner_height().ok()?.as_f64()?;
    Some(Size::new(width, height))
}

pub fn client_point(e: &MouseEvent) -> Point {
    Point::new(e.client_x() as f64, e.client_y() as f64)
}

pub fn touch_points(touches: &TouchList) -> Vec<Point> {
    (0..touches.length())
        .filter_map(|i| touches.item(i))
        .map(|t| Point::new(t.client_x() as f64, t.client_y() as f64))
        .collect()
}

#[cfg(all(test, target_arch = "wasm32"))]
mod tests {
    use super::*;
    use gloo_timers::future::TimeoutFuture;
    use std::cell::Cell;
    use std::rc::Rc;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_scroll_lock_restores_previous_overflow() {
        let body = body().unwrap();
        body.style().set_property("overflow", "scroll").unwrap();

        let mut lock = ScrollLock::default();
        lock.lock();
        lock.lock();
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "hidden");
        lock.unlock();
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "scroll");
        lock.unlock();
        assert_eq!(body.style().get_property_value("overflow").unwrap(), "scroll");

        body.style().remove_property("overflow").unwrap();
    }

    #[wasm_bindgen_test]
    fn test_listener_guard_detaches_on_drop() {
        let target: EventTarget = body().unwrap().into();
        let hits = Rc::new(Cell::new(0));
        let guard = {
            let hits = hits.clone();
            EventListenerGuard::new(&target, "zoomtest", move |_: Event| hits.set(hits.get() + 1)).unwrap()
        };
        target.dispatch_event(&Event::new("zoomtest").unwrap()).unwrap();
        drop(guard);
        target.dispatch_event(&Event::new("zoomtest").unwrap()).unwrap();
        assert_eq!(hits.get(), 1);
    }

    #[wasm_bindgen_test]
    async fn test_phase_timer_fires_after_delay() {
        let fired = Rc::new(Cell::new(false));
        let mut timer = PhaseTimer::default();
        {
            let fired = fired.clone();
            timer.schedule(60, move || fired.set(true));
        }
        TimeoutFuture::new(10).await;
        assert!(!fired.get());
        TimeoutFuture::new(100).await;
        assert!(fired.get());
    }

    #[wasm_bindgen_test]
    async fn test_phase_timer_cancel_and_replace() {
        let first = Rc::new(Cell::new(false));
        let second = Rc::new(Cell::new(false));
        let mut timer = PhaseTimer::default();
        {
            let first = first.clone();
            timer.schedule(20, move || first.set(true));
        }
        {
            let second = second.clone();
            timer.schedule(20, move || second.set(true));
        }
        TimeoutFuture::new(60).await;
        assert!(!first.get());
        assert!(second.get());

        let third = Rc::new(Cell::new(false));
        {
            let third = third.clone();
            timer.schedule(20, move || third.set(true));
        }
        timer.cancel();
        TimeoutFuture::new(60).await;
        assert!(!third.get());
    }
}
