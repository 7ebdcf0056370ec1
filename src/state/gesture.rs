//! Input interpretation for the portal image.
//!
//! The controller turns wheel, pointer and touch input into updates on a
//! [`TransformState`]. Wheel zoom is anchored: the image offset is adjusted
//! together with the scale so the point under the cursor stays put. Pinch
//! zoom only changes the scale and has no midpoint compensation. Every
//! handler returns whether state changed, so the host knows when to re-render.

use super::touch::{GestureContext, pinch_distance};
use super::transform::{TransformState, ZoomStep};
use crate::model::{GEOMETRY_EPSILON, ImageGeometry, Point, TransformMode};

/// Scale factor per wheel tick when scrolling towards the user (zoom in).
pub const WHEEL_ZOOM_IN: f64 = 1.1;
/// Scale factor per wheel tick when scrolling away (zoom out).
pub const WHEEL_ZOOM_OUT: f64 = 0.9;

const SCALE_EPSILON: f64 = 1e-9;

/// Compute a cursor-anchored zoom tick.
///
/// `clamp` applies the active bound policy and returns `None` for an
/// unusable scale. Returns `None` when the tick should be skipped:
/// - the image has no measurable size yet,
/// - the wheel has no vertical component,
/// - the clamped scale equals the current one (already saturated).
///
/// The position delta is computed from the clamped scale, so a tick that
/// hits a bound still keeps the anchor fixed.
pub fn wheel_zoom_step(
    geometry: &ImageGeometry,
    scale: f64,
    cursor: Point,
    delta_y: f64,
    clamp: impl Fn(f64) -> Option<f64>,
) -> Option<ZoomStep> {
    let rect = geometry.rect;
    if !rect.size().is_laid_out() || !geometry.offset.is_laid_out() {
        return None;
    }
    if delta_y == 0.0 || !delta_y.is_finite() || !cursor.is_finite() {
        return None;
    }

    let center = rect.center();
    let rate = Point::new(
        (cursor.x - center.x) / (rect.width / 2.0),
        (cursor.y - center.y) / (rect.height / 2.0),
    );

    let factor = if delta_y > 0.0 { WHEEL_ZOOM_OUT } else { WHEEL_ZOOM_IN };
    let next = clamp(scale * factor)?;
    if (next - scale).abs() <= SCALE_EPSILON {
        return None;
    }

    let offset = geometry.offset;
    let size_diff = Point::new(
        (offset.width * next - offset.width * scale) / 2.0,
        (offset.height * next - offset.height * scale) / 2.0,
    );
    let position_delta = Point::new(-size_diff.x * rate.x, -size_diff.y * rate.y);
    position_delta.is_finite().then_some(ZoomStep {
        scale: next,
        position_delta,
    })
}

#[derive(Debug, Default, Clone)]
pub struct GestureController {
    ctx: GestureContext,
}

impl GestureController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn context(&self) -> &GestureContext {
        &self.ctx
    }

    pub fn is_dragging(&self) -> bool {
        self.ctx.is_dragging
    }

    pub fn wheel(
        &mut self,
        state: &mut TransformState,
        geometry: &ImageGeometry,
        cursor: Point,
        delta_y: f64,
    ) -> bool {
        let scale = state.scale();
        match wheel_zoom_step(geometry, scale, cursor, delta_y, |s| state.clamp_scale(s)) {
            Some(step) => {
                log::trace!(
                    "wheel zoom {scale:.4} -> {:.4}, shift ({:.2}, {:.2})",
                    step.scale,
                    step.position_delta.x,
                    step.position_delta.y
                );
                state.apply_zoom(step);
                true
            }
            None => {
                log::trace!("wheel tick skipped at scale {scale:.4}");
                false
            }
        }
    }

    pub fn pointer_down(&mut self, at: Point) {
        self.ctx.begin_drag(at);
    }

    /// Drag moves the whole wrapper, not the image inside it.
    pub fn pointer_move(&mut self, state: &mut TransformState, at: Point) -> bool {
        match self.ctx.drag_to(at) {
            Some(delta) => {
                state.transform_wrapper_position(delta, TransformMode::Increment);
                true
            }
            None => false,
        }
    }

    pub fn pointer_up(&mut self) {
        self.ctx.is_dragging = false;
    }

    pub fn touch_start(&mut self, touches: &[Point]) {
        match touches {
            [] => {}
            [single] => {
                self.ctx.pinch_baseline_distance = None;
                self.ctx.begin_drag(*single);
            }
            _ => {
                self.ctx.is_dragging = false;
                self.ctx.pinch_baseline_distance = pinch_distance(touches);
            }
        }
    }

    pub fn touch_move(&mut self, state: &mut TransformState, touches: &[Point]) -> bool {
        match touches {
            [] => false,
            [single] => self.pointer_move(state, *single),
            _ => self.pinch(state, touches),
        }
    }

    pub fn touch_end(&mut self) {
        self.ctx.clear();
    }

    /// Scale by the finger-distance ratio since the last re-base. The
    /// baseline only advances when the scale actually changed, so a pinch
    /// held against a bound does not drift.
    fn pinch(&mut self, state: &mut TransformState, touches: &[Point]) -> bool {
        let Some(baseline) = self.ctx.pinch_baseline_distance else {
            log::debug!("pinch move without a baseline, ignoring");
            return false;
        };
        let Some(current) = pinch_distance(touches) else {
            return false;
        };
        if baseline <= GEOMETRY_EPSILON {
            return false;
        }
        let scale = state.scale();
        let Some(next) = state.clamp_scale(scale * (current / baseline)) else {
            return false;
        };
        if (next - scale).abs() <= SCALE_EPSILON {
            return false;
        }
        state.transform_scale(next, TransformMode::Absolute);
        self.ctx.pinch_baseline_distance = Some(current);
        log::trace!("pinch zoom {scale:.4} -> {next:.4}");
        true
    }
}
