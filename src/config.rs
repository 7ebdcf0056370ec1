//! Portal configuration and the zoom bound policy.
//!
//! Options can be built in code or parsed from camelCase JSON, e.g.
//! `{"portalAnimationDuration": 250, "zoomBounds": {"minZoom": 0.2, "maxZoom": 4}}`.
//! Bounds are validated when they are constructed, so a `ZoomBounds` value
//! is always usable as a clamp.

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_PORTAL_ANIMATION_MS: u32 = 300;
pub const DEFAULT_IMAGE_TRANSFORM_MS: u32 = 100;
pub const DEFAULT_MIN_RENDERED_WIDTH: f64 = 200.0;
pub const DEFAULT_MAX_RENDERED_WIDTH: f64 = 10_000.0;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("minZoom ({min}) must not exceed maxZoom ({max})")]
    InvertedZoomRange { min: f64, max: f64 },
    #[error("minRenderedWidth ({min}) must not exceed maxRenderedWidth ({max})")]
    InvertedWidthRange { min: f64, max: f64 },
    #[error("zoom bound {0} must be positive")]
    NonPositiveBound(f64),
    #[error("zoom bound is not a finite number")]
    NonFiniteBound,
    #[error("invalid zoom config: {0}")]
    Json(#[from] serde_json::Error),
}

/// Which quantity the scale bounds are expressed in.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoundPolicy {
    /// Scale itself is clamped to `[min_zoom, max_zoom]`.
    Absolute { min_zoom: f64, max_zoom: f64 },
    /// `scale * natural_width` is clamped to `[min_rendered_width, max_rendered_width]`.
    RenderedWidth {
        min_rendered_width: f64,
        max_rendered_width: f64,
    },
}

/// A validated bound policy.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BoundsRepr", into = "BoundsRepr")]
pub struct ZoomBounds(BoundPolicy);

impl ZoomBounds {
    pub fn absolute(min_zoom: f64, max_zoom: f64) -> Result<Self, ConfigError> {
        check_range(min_zoom, max_zoom)
            .map_err(|e| swap_range_error(e, |min, max| ConfigError::InvertedZoomRange { min, max }))?;
        Ok(Self(BoundPolicy::Absolute { min_zoom, max_zoom }))
    }

    pub fn rendered_width(
        min_rendered_width: f64,
        max_rendered_width: f64,
    ) -> Result<Self, ConfigError> {
        check_range(min_rendered_width, max_rendered_width).map_err(|e| {
            swap_range_error(e, |min, max| ConfigError::InvertedWidthRange { min, max })
        })?;
        Ok(Self(BoundPolicy::RenderedWidth {
            min_rendered_width,
            max_rendered_width,
        }))
    }

    pub fn policy(&self) -> BoundPolicy {
        self.0
    }

    /// Allowed scale interval for an image of the given natural width.
    /// `None` when the policy depends on a width that is not known yet.
    pub fn scale_range(&self, natural_width: f64) -> Option<(f64, f64)> {
        match self.0 {
            BoundPolicy::Absolute { min_zoom, max_zoom } => Some((min_zoom, max_zoom)),
            BoundPolicy::RenderedWidth {
                min_rendered_width,
                max_rendered_width,
            } => {
                if natural_width <= crate::model::GEOMETRY_EPSILON || !natural_width.is_finite() {
                    return None;
                }
                Some((
                    min_rendered_width / natural_width,
                    max_rendered_width / natural_width,
                ))
            }
        }
    }

    /// Saturate `scale` into the allowed interval. `None` while the interval
    /// is unknown (rendered-width policy before the image has a width).
    pub fn clamp(&self, scale: f64, natural_width: f64) -> Option<f64> {
        let (min, max) = self.scale_range(natural_width)?;
        Some(scale.clamp(min, max))
    }

    /// Floor for the fit-to-viewport target width. Zero for the absolute policy.
    pub fn min_rendered_width(&self) -> f64 {
        match self.0 {
            BoundPolicy::Absolute { .. } => 0.0,
            BoundPolicy::RenderedWidth {
                min_rendered_width, ..
            } => min_rendered_width,
        }
    }
}

impl Default for ZoomBounds {
    fn default() -> Self {
        Self(BoundPolicy::RenderedWidth {
            min_rendered_width: DEFAULT_MIN_RENDERED_WIDTH,
            max_rendered_width: DEFAULT_MAX_RENDERED_WIDTH,
        })
    }
}

fn check_range(min: f64, max: f64) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() {
        return Err(ConfigError::NonFiniteBound);
    }
    if min <= 0.0 {
        return Err(ConfigError::NonPositiveBound(min));
    }
    if max <= 0.0 {
        return Err(ConfigError::NonPositiveBound(max));
    }
    if min > max {
        return Err(ConfigError::InvertedZoomRange { min, max });
    }
    Ok(())
}

fn swap_range_error(err: ConfigError, inverted: impl Fn(f64, f64) -> ConfigError) -> ConfigError {
    match err {
        ConfigError::InvertedZoomRange { min, max } => inverted(min, max),
        other => other,
    }
}

/// Serialized form of [`ZoomBounds`].
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BoundsRepr {
    #[serde(rename_all = "camelCase")]
    Absolute { min_zoom: f64, max_zoom: f64 },
    #[serde(rename_all = "camelCase")]
    RenderedWidth {
        min_rendered_width: f64,
        max_rendered_width: f64,
    },
}

impl TryFrom<BoundsRepr> for ZoomBounds {
    type Error = ConfigError;

    fn try_from(repr: BoundsRepr) -> Result<Self, Self::Error> {
        match repr {
            BoundsRepr::Absolute { min_zoom, max_zoom } => ZoomBounds::absolute(min_zoom, max_zoom),
            BoundsRepr::RenderedWidth {
                min_rendered_width,
                max_rendered_width,
            } => ZoomBounds::rendered_width(min_rendered_width, max_rendered_width),
        }
    }
}

impl From<ZoomBounds> for BoundsRepr {
    fn from(bounds: ZoomBounds) -> Self {
        match bounds.0 {
            BoundPolicy::Absolute { min_zoom, max_zoom } => BoundsRepr::Absolute { min_zoom, max_zoom },
            BoundPolicy::RenderedWidth {
                min_rendered_width,
                max_rendered_width,
            } => BoundsRepr::RenderedWidth {
                min_rendered_width,
                max_rendered_width,
            },
        }
    }
}

/// Extra class/style appended to one of the portal's elements.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElementOverrides {
    pub class: Option<String>,
    pub style: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ZoomConfig {
    /// Portal fade in/out duration in milliseconds.
    pub portal_animation_duration: u32,
    /// CSS transition applied to zoom and drag updates, in milliseconds.
    pub image_transform_duration: u32,
    #[serde(rename = "zoomBounds")]
    pub bounds: ZoomBounds,
    #[serde(rename = "portalProps")]
    pub portal: ElementOverrides,
    #[serde(rename = "wrapperProps")]
    pub wrapper: ElementOverrides,
    #[serde(rename = "imageProps")]
    pub image: ElementOverrides,
    pub custom_control_class: Option<String>,
}

impl Default for ZoomConfig {
    fn default() -> Self {
        Self {
            portal_animation_duration: DEFAULT_PORTAL_ANIMATION_MS,
            image_transform_duration: DEFAULT_IMAGE_TRANSFORM_MS,
            bounds: ZoomBounds::default(),
            portal: ElementOverrides::default(),
            wrapper: ElementOverrides::default(),
            image: ElementOverrides::default(),
            custom_control_class: None,
        }
    }
}

impl ZoomConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }
}
