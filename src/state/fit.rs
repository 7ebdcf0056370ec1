// Fit-to-viewport sizing used when a portal opens.
use crate::config::ZoomBounds;
use crate::model::Size;

/// Share of the viewport the opened image may occupy.
pub const VIEWPORT_FILL: f64 = 0.8;

/// Target box for an opened image: 80% of the viewport, with the width
/// never below the configured minimum rendered width.
pub fn target_box(viewport: Size, bounds: &ZoomBounds) -> Size {
    Size::new(
        (viewport.width * VIEWPORT_FILL).max(bounds.min_rendered_width()),
        viewport.height * VIEWPORT_FILL,
    )
}

/// Initial scale for an image: shrink uniformly to fit the target box if it
/// overflows either dimension, otherwise show it at natural size.
pub fn fit_to_viewport(natural: Size, viewport: Size, bounds: &ZoomBounds) -> f64 {
    if !natural.is_laid_out() || !viewport.is_laid_out() {
        return 1.0;
    }
    let target = target_box(viewport, bounds);
    if natural.height > target.height || natural.width > target.width {
        (target.height / natural.height).min(target.width / natural.width)
    } else {
        1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_large_image_shrinks_to_fit() {
        let bounds = ZoomBounds::default();
        // target box 800 wide x 640 high
        let scale = fit_to_viewport(Size::new(2000.0, 1000.0), Size::new(1000.0, 800.0), &bounds);
        assert!((scale - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_square_target_box() {
        let bounds = ZoomBounds::absolute(0.1, 4.0).unwrap();
        let scale = fit_to_viewport(Size::new(2000.0, 1000.0), Size::new(1000.0, 1000.0), &bounds);
        assert!((scale - 0.4).abs() < 1e-12);
    }

    #[test]
    fn test_small_image_keeps_natural_size() {
        let bounds = ZoomBounds::default();
        let scale = fit_to_viewport(Size::new(300.0, 200.0), Size::new(1280.0, 720.0), &bounds);
        assert_eq!(scale, 1.0);
    }

    #[test]
    fn test_width_floor_on_narrow_viewport() {
        let bounds = ZoomBounds::rendered_width(600.0, 5000.0).unwrap();
        // 0.8 * 400 = 320 is below the 600px floor
        let target = target_box(Size::new(400.0, 900.0), &bounds);
        assert_eq!(target.width, 600.0);
        let scale = fit_to_viewport(Size::new(1200.0, 300.0), Size::new(400.0, 900.0), &bounds);
        assert_eq!(scale, 0.5);
    }

    #[test]
    fn test_unloaded_image_defaults_to_one() {
        let bounds = ZoomBounds::default();
        assert_eq!(fit_to_viewport(Size::default(), Size::new(800.0, 600.0), &bounds), 1.0);
    }
}
