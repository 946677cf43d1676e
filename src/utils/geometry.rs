use geo::{Coord, Rect};

/// Axis-aligned extent of every coordinate seen so far.
///
/// Coordinates are in the source space of the layers (in practice longitude
/// and latitude). `min_x <= max_x` and `min_y <= max_y` always hold.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox(Rect<f64>);

impl BoundingBox {
    /// Construct a bounding box from its four edges.
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self(Rect::new(
            Coord { x: min_x, y: min_y },
            Coord { x: max_x, y: max_y },
        ))
    }

    /// A degenerate box covering a single coordinate.
    pub fn from_coord(coord: Coord<f64>) -> Self {
        Self(Rect::new(coord, coord))
    }

    /// Grow the box so that it contains `coord`.
    pub fn include(&mut self, coord: Coord<f64>) {
        let min = self.0.min();
        let max = self.0.max();
        self.0 = Rect::new(
            Coord {
                x: min.x.min(coord.x),
                y: min.y.min(coord.y),
            },
            Coord {
                x: max.x.max(coord.x),
                y: max.y.max(coord.y),
            },
        );
    }

    /// Smallest box containing both `self` and `other`.
    pub fn union(&self, other: &BoundingBox) -> BoundingBox {
        let mut merged = *self;
        merged.include(other.0.min());
        merged.include(other.0.max());
        merged
    }

    pub fn min_x(&self) -> f64 {
        self.0.min().x
    }

    pub fn min_y(&self) -> f64 {
        self.0.min().y
    }

    pub fn max_x(&self) -> f64 {
        self.0.max().x
    }

    pub fn max_y(&self) -> f64 {
        self.0.max().y
    }

    /// `[min_x, min_y, max_x, max_y]`, the GeoJSON bbox member order.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_x(), self.min_y(), self.max_x(), self.max_y()]
    }

    /// Midpoint of the box.
    pub fn center(&self) -> Coord<f64> {
        self.0.center()
    }
}

/// The standard GeoJSON geometry kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GeometryKind {
    Point,
    MultiPoint,
    LineString,
    MultiLineString,
    Polygon,
    MultiPolygon,
    GeometryCollection,
}

impl GeometryKind {
    pub const ALL: [GeometryKind; 7] = [
        GeometryKind::Point,
        GeometryKind::MultiPoint,
        GeometryKind::LineString,
        GeometryKind::MultiLineString,
        GeometryKind::Polygon,
        GeometryKind::MultiPolygon,
        GeometryKind::GeometryCollection,
    ];

    /// Point-like kinds are drawn as markers rather than filled areas.
    pub fn is_point(&self) -> bool {
        matches!(self, GeometryKind::Point | GeometryKind::MultiPoint)
    }

    /// The `type` member as it appears in a GeoJSON document.
    pub fn type_name(&self) -> &'static str {
        match self {
            GeometryKind::Point => "Point",
            GeometryKind::MultiPoint => "MultiPoint",
            GeometryKind::LineString => "LineString",
            GeometryKind::MultiLineString => "MultiLineString",
            GeometryKind::Polygon => "Polygon",
            GeometryKind::MultiPolygon => "MultiPolygon",
            GeometryKind::GeometryCollection => "GeometryCollection",
        }
    }

    /// Look up a kind by its GeoJSON `type` name. Unknown names yield `None`.
    pub fn from_type_name(name: &str) -> Option<GeometryKind> {
        GeometryKind::ALL
            .into_iter()
            .find(|kind| kind.type_name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_grows_box() {
        let mut bbox = BoundingBox::from_coord(Coord { x: 0.0, y: 0.0 });
        bbox.include(Coord { x: 10.0, y: 5.0 });
        bbox.include(Coord { x: -3.0, y: 8.0 });

        assert_eq!(bbox.to_array(), [-3.0, 0.0, 10.0, 8.0]);
    }

    #[test]
    fn test_union_is_symmetric() {
        let a = BoundingBox::new(0.0, 0.0, 1.0, 1.0);
        let b = BoundingBox::new(-2.0, 0.5, 0.5, 4.0);

        assert_eq!(a.union(&b), b.union(&a));
        assert_eq!(a.union(&b).to_array(), [-2.0, 0.0, 1.0, 4.0]);
    }

    #[test]
    fn test_center_is_midpoint() {
        let bbox = BoundingBox::new(-3.0, 0.0, 10.0, 8.0);
        assert_eq!(bbox.center(), Coord { x: 3.5, y: 4.0 });
    }

    #[test]
    fn test_kind_names_round_trip() {
        for kind in GeometryKind::ALL {
            assert_eq!(GeometryKind::from_type_name(kind.type_name()), Some(kind));
        }
        assert_eq!(GeometryKind::from_type_name("Circle"), None);
    }

    #[test]
    fn test_point_kinds() {
        assert!(GeometryKind::Point.is_point());
        assert!(GeometryKind::MultiPoint.is_point());
        assert!(!GeometryKind::Polygon.is_point());
        assert!(!GeometryKind::GeometryCollection.is_point());
    }
}
