use serde::Serialize;

use crate::utils::config::MapConfig;
use crate::utils::geometry::GeometryKind;

/// Path options handed to the renderer for one feature.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Style {
    pub color: String,
    pub weight: u32,
    pub fill_color: String,
    pub fill_opacity: f64,
}

/// Opacity and stroke settings shared by every layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleOptions {
    pub point_opacity: f64,
    pub polygon_opacity: f64,
    pub highlight_opacity_boost: f64,
    pub stroke_weight: u32,
    pub highlight_weight: u32,
}

impl Default for StyleOptions {
    fn default() -> Self {
        StyleOptions::from(&MapConfig::default())
    }
}

impl From<&MapConfig> for StyleOptions {
    fn from(config: &MapConfig) -> Self {
        StyleOptions {
            point_opacity: config.point_opacity,
            polygon_opacity: config.polygon_opacity,
            highlight_opacity_boost: config.highlight_opacity_boost,
            stroke_weight: config.stroke_weight,
            highlight_weight: config.highlight_weight,
        }
    }
}

/// The color a layer was assigned together with the kind of the feature being drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StyleRule<'a> {
    pub color: &'a str,
    pub kind: Option<GeometryKind>,
}

impl<'a> StyleRule<'a> {
    pub fn new(color: &'a str, kind: Option<GeometryKind>) -> Self {
        Self { color, kind }
    }
}

/// Style of a feature at rest. Point kinds get the point opacity, everything
/// else (including a missing geometry) the area opacity.
pub fn style(rule: StyleRule<'_>, options: &StyleOptions) -> Style {
    let is_point = rule.kind.is_some_and(|kind| kind.is_point());
    Style {
        color: rule.color.to_string(),
        weight: options.stroke_weight,
        fill_color: rule.color.to_string(),
        fill_opacity: if is_point {
            options.point_opacity
        } else {
            options.polygon_opacity
        },
    }
}

/// Style of a hovered feature. Independent of the geometry kind.
pub fn highlight(color: &str, options: &StyleOptions) -> Style {
    Style {
        color: color.to_string(),
        weight: options.highlight_weight,
        fill_color: color.to_string(),
        fill_opacity: (options.polygon_opacity + options.highlight_opacity_boost).min(1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLUE: &str = "#1f78b4";

    #[test]
    fn test_point_uses_point_opacity() {
        let options = StyleOptions::default();
        for kind in [GeometryKind::Point, GeometryKind::MultiPoint] {
            let style = style(StyleRule::new(BLUE, Some(kind)), &options);
            assert_eq!(style.fill_opacity, 0.7);
            assert_eq!(style.weight, 2);
            assert_eq!(style.color, BLUE);
            assert_eq!(style.fill_color, BLUE);
        }
    }

    #[test]
    fn test_area_uses_polygon_opacity() {
        let options = StyleOptions::default();
        for kind in [
            GeometryKind::Polygon,
            GeometryKind::MultiPolygon,
            GeometryKind::LineString,
            GeometryKind::GeometryCollection,
        ] {
            let style = style(StyleRule::new(BLUE, Some(kind)), &options);
            assert_eq!(style.fill_opacity, 0.25);
        }
        assert_eq!(style(StyleRule::new(BLUE, None), &options).fill_opacity, 0.25);
    }

    #[test]
    fn test_highlight_boosts_area_opacity() {
        let style = highlight(BLUE, &StyleOptions::default());
        assert_eq!(style.weight, 3);
        assert_eq!(style.color, BLUE);
        assert!((style.fill_opacity - 0.40).abs() < 1e-9);
    }

    #[test]
    fn test_highlight_opacity_is_clamped() {
        let options = StyleOptions {
            polygon_opacity: 0.95,
            ..StyleOptions::default()
        };
        assert_eq!(highlight(BLUE, &options).fill_opacity, 1.0);
    }

    #[test]
    fn test_style_serializes_camel_case() {
        let json = serde_json::to_value(style(
            StyleRule::new(BLUE, Some(GeometryKind::Point)),
            &StyleOptions::default(),
        ))
        .unwrap();
        assert_eq!(json["fillColor"], BLUE);
        assert_eq!(json["fillOpacity"], 0.7);
        assert_eq!(json["weight"], 2);
    }
}
