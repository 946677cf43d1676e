use geo::Coord;
use geojson::{Geometry, Position, Value};
use std::slice::Iter;

use crate::utils::error::Error;

/// A pending level of the traversal. Each frame holds the unvisited remainder
/// of one nesting level of a geometry's coordinate arrays.
enum Frame<'a> {
    Positions(Iter<'a, Position>),
    Lines(Iter<'a, Vec<Position>>),
    Polygons(Iter<'a, Vec<Vec<Position>>>),
    Geometries {
        geometries: Iter<'a, Geometry>,
        depth: usize,
    },
}

enum Step<'a> {
    Emit(&'a Position),
    Push(Frame<'a>),
    Descend(&'a Value, usize),
    Pop,
}

/// Lazy iterator over every vertex of a geometry, in document order.
///
/// Uses an explicit stack so that nested geometry collections never recurse
/// on the call stack. After the first error the iterator is exhausted.
pub struct Coordinates<'a> {
    stack: Vec<Frame<'a>>,
    max_depth: usize,
}

impl<'a> Coordinates<'a> {
    fn new(value: &'a Value, max_depth: usize) -> Self {
        let mut coordinates = Coordinates {
            stack: Vec::with_capacity(4),
            max_depth,
        };
        coordinates.push_value(value, 0);
        coordinates
    }

    fn push_value(&mut self, value: &'a Value, depth: usize) {
        let frame = match value {
            Value::Point(position) => Frame::Positions(std::slice::from_ref(position).iter()),
            Value::MultiPoint(positions) | Value::LineString(positions) => {
                Frame::Positions(positions.iter())
            }
            Value::MultiLineString(lines) | Value::Polygon(lines) => Frame::Lines(lines.iter()),
            Value::MultiPolygon(polygons) => Frame::Polygons(polygons.iter()),
            Value::GeometryCollection(geometries) => Frame::Geometries {
                geometries: geometries.iter(),
                depth,
            },
        };
        self.stack.push(frame);
    }

    fn fail(&mut self, error: Error) -> Option<Result<Coord<f64>, Error>> {
        self.stack.clear();
        Some(Err(error))
    }
}

impl<'a> Iterator for Coordinates<'a> {
    type Item = Result<Coord<f64>, Error>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let step = match self.stack.last_mut()? {
                Frame::Positions(positions) => positions.next().map_or(Step::Pop, Step::Emit),
                Frame::Lines(lines) => lines
                    .next()
                    .map_or(Step::Pop, |line| Step::Push(Frame::Positions(line.iter()))),
                Frame::Polygons(polygons) => polygons
                    .next()
                    .map_or(Step::Pop, |rings| Step::Push(Frame::Lines(rings.iter()))),
                Frame::Geometries { geometries, depth } => match geometries.next() {
                    Some(geometry) => Step::Descend(&geometry.value, *depth + 1),
                    None => Step::Pop,
                },
            };

            match step {
                Step::Emit(position) => {
                    return match to_coord(position) {
                        Ok(coord) => Some(Ok(coord)),
                        Err(error) => self.fail(error),
                    };
                }
                Step::Push(frame) => self.stack.push(frame),
                Step::Descend(value, depth) => {
                    if depth > self.max_depth {
                        let max_depth = self.max_depth;
                        return self.fail(Error::NestingTooDeep { max_depth });
                    }
                    self.push_value(value, depth);
                }
                Step::Pop => {
                    self.stack.pop();
                }
            }
        }
    }
}

/**
 * Iterates over every coordinate vertex of a geometry.
 *
 * # Arguments
 * `geometry` - The geometry to walk. Geometry collections are walked child by child.
 * `max_depth` - How many levels of nested geometry collections are allowed.
 *
 * # Returns
 * A lazy iterator of `(x, y)` coordinates in document order. Yields
 * `Error::InvalidCoordinate` for a position with fewer than two finite
 * components and `Error::NestingTooDeep` when the nesting limit is exceeded.
 */
pub fn coordinates(geometry: &Geometry, max_depth: usize) -> Coordinates<'_> {
    Coordinates::new(&geometry.value, max_depth)
}

/// Only the first two components are used; elevation and measures are ignored.
fn to_coord(position: &[f64]) -> Result<Coord<f64>, Error> {
    match position {
        [x, y, ..] if x.is_finite() && y.is_finite() => Ok(Coord { x: *x, y: *y }),
        _ => Err(Error::InvalidCoordinate {
            components: position.len(),
        }),
    }
}
