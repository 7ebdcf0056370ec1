// Logging setup and CSS helpers for the portal elements.

use crate::config::ElementOverrides;
use crate::model::Point;

/// Install the panic hook and route `log` output to the browser console.
pub fn init_logging() {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Debug);
}

pub fn image_transform_css(position: Point, scale: f64, rotation: f64) -> String {
    format!(
        "translate({}px, {}px) scale({}) rotate({}deg)",
        position.x, position.y, scale, rotation
    )
}

/// The wrapper is centered with -50% and then offset by the drag position.
pub fn wrapper_transform_css(position: Point) -> String {
    format!(
        "translate(calc(-50% + {}px), calc(-50% + {}px))",
        position.x, position.y
    )
}

pub fn join_class(base: &str, extra: &ElementOverrides) -> String {
    match extra.class.as_deref() {
        Some(c) if !c.is_empty() && !base.is_empty() => format!("{base} {c}"),
        Some(c) if !c.is_empty() => c.to_string(),
        _ => base.to_string(),
    }
}

/// User style goes last so it wins over the computed declarations.
pub fn join_style(base: String, extra: &ElementOverrides) -> String {
    match extra.style.as_deref() {
        Some(s) if !s.is_empty() => format!("{base} {s}"),
        _ => base,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_css() {
        assert_eq!(
            image_transform_css(Point::new(3.0, -4.5), 1.5, 90.0),
            "translate(3px, -4.5px) scale(1.5) rotate(90deg)"
        );
        assert_eq!(
            wrapper_transform_css(Point::new(10.0, 0.0)),
            "translate(calc(-50% + 10px), calc(-50% + 0px))"
        );
    }

    #[test]
    fn test_overrides_are_appended() {
        let extra = ElementOverrides {
            class: Some("dark".into()),
            style: Some("border-radius:4px;".into()),
        };
        assert_eq!(join_class("image-portal enter", &extra), "image-portal enter dark");
        assert_eq!(join_class("", &extra), "dark");
        assert_eq!(join_class("x", &ElementOverrides::default()), "x");
        assert_eq!(
            join_style("opacity:1;".to_string(), &extra),
            "opacity:1; border-radius:4px;"
        );
    }
}
