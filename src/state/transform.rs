// Scale / position / rotation state of one open portal.
use crate::config::ZoomBounds;
use crate::model::{Point, Size, TransformMode};

/// A zoom tick: the new scale plus the image offset that keeps the anchor
/// point in place. Applied as one update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomStep {
    pub scale: f64,
    pub position_delta: Point,
}

/// Wrap degrees into `[0, 360)`. Negative input wraps upward (-90 -> 270).
pub fn wrap_degrees(degrees: f64) -> f64 {
    let wrapped = degrees.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to exactly 360.0
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

#[derive(Clone, Debug, PartialEq)]
pub struct TransformState {
    scale: f64,
    /// Offset of the image inside its wrapper, used by anchored zoom.
    position: Point,
    /// Offset of the whole wrapper, used by drag.
    wrapper_position: Point,
    rotation: f64,
    initial_scale: f64,
    natural: Size,
    bounds: ZoomBounds,
}

impl Default for TransformState {
    fn default() -> Self {
        Self::new(ZoomBounds::default())
    }
}

impl TransformState {
    pub fn new(bounds: ZoomBounds) -> Self {
        let mut st = Self {
            scale: 1.0,
            position: Point::ZERO,
            wrapper_position: Point::ZERO,
            rotation: 0.0,
            initial_scale: 1.0,
            natural: Size::default(),
            bounds,
        };
        st.reclamp();
        st
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    pub fn position(&self) -> Point {
        self.position
    }

    pub fn wrapper_position(&self) -> Point {
        self.wrapper_position
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn initial_scale(&self) -> f64 {
        self.initial_scale
    }

    pub fn natural_size(&self) -> Size {
        self.natural
    }

    pub fn bounds(&self) -> ZoomBounds {
        self.bounds
    }

    /// Allowed scale interval. The fitted initial scale may sit below the
    /// policy floor (a narrow, tall image) and stays reachable. `None` while
    /// the rendered-width policy has no natural width to work from.
    pub fn scale_range(&self) -> Option<(f64, f64)> {
        let (min, max) = self.bounds.scale_range(self.natural.width)?;
        Some((min.min(self.initial_scale), max))
    }

    /// Clamp into [`Self::scale_range`]. `None` if there is no usable scale,
    /// in which case callers leave the state unchanged.
    pub fn clamp_scale(&self, scale: f64) -> Option<f64> {
        if !scale.is_finite() {
            return None;
        }
        let (min, max) = self.scale_range()?;
        let clamped = scale.clamp(min, max);
        (clamped > 0.0).then_some(clamped)
    }

    pub fn set_bounds(&mut self, bounds: ZoomBounds) {
        self.bounds = bounds;
        self.reclamp();
    }

    /// Record the image's natural size once it is known.
    pub fn set_natural_size(&mut self, natural: Size) {
        if !natural.width.is_finite() || !natural.height.is_finite() {
            return;
        }
        self.natural = natural;
        self.reclamp();
    }

    /// Store a new fit scale and snap the current scale to it. The fit is
    /// kept as computed and only capped by the upper bound; with no known
    /// interval yet it is stored unchanged.
    pub fn set_initial_scale(&mut self, initial_scale: f64) {
        if !initial_scale.is_finite() || initial_scale <= 0.0 {
            log::trace!("ignoring unusable initial scale {initial_scale}");
            return;
        }
        let initial = match self.bounds.scale_range(self.natural.width) {
            Some((_, max)) => initial_scale.min(max),
            None => initial_scale,
        };
        self.initial_scale = initial;
        self.scale = initial;
    }

    pub fn transform_scale(&mut self, value: f64, mode: TransformMode) {
        let candidate = match mode {
            TransformMode::Increment => self.scale + value,
            TransformMode::Absolute => value,
        };
        match self.clamp_scale(candidate) {
            Some(scale) => self.scale = scale,
            None => log::trace!("ignoring scale {candidate} ({mode:?})"),
        }
    }

    pub fn transform_position(&mut self, value: Point, mode: TransformMode) {
        if let Some(next) = apply_point(self.position, value, mode) {
            self.position = next;
        }
    }

    pub fn transform_wrapper_position(&mut self, value: Point, mode: TransformMode) {
        if let Some(next) = apply_point(self.wrapper_position, value, mode) {
            self.wrapper_position = next;
        }
    }

    pub fn transform_rotation(&mut self, value: f64, mode: TransformMode) {
        if !value.is_finite() {
            return;
        }
        self.rotation = match mode {
            TransformMode::Increment => wrap_degrees(self.rotation + value),
            TransformMode::Absolute => wrap_degrees(value),
        };
    }

    /// Apply an anchored zoom tick. The delta was computed against the
    /// current geometry, so position and scale change together.
    pub fn apply_zoom(&mut self, step: ZoomStep) {
        let Some(scale) = self.clamp_scale(step.scale) else {
            return;
        };
        if !step.position_delta.is_finite() {
            return;
        }
        self.position = self.position + step.position_delta;
        self.scale = scale;
    }

    pub fn reset(&mut self) {
        self.scale = self.initial_scale;
        self.position = Point::ZERO;
        self.rotation = 0.0;
        self.wrapper_position = Point::ZERO;
    }

    fn reclamp(&mut self) {
        let Some((_, max)) = self.bounds.scale_range(self.natural.width) else {
            return;
        };
        self.initial_scale = self.initial_scale.min(max);
        if let Some(scale) = self.clamp_scale(self.scale) {
            self.scale = scale;
        }
    }
}

fn apply_point(current: Point, value: Point, mode: TransformMode) -> Option<Point> {
    if !value.is_finite() {
        return None;
    }
    Some(match mode {
        TransformMode::Increment => current + value,
        TransformMode::Absolute => value,
    })
}
