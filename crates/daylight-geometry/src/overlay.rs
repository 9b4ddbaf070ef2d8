// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Polygon booleans and predicates in angle space
//!
//! Booleans run through `i_overlay` on raw contours; predicates run through
//! `geo`'s DE-9IM [`Relate`]. A [`Region`] caches its bounding rectangle so
//! that most cell tests are rejected without building an intersection matrix.

use crate::error::{Error, Result};
use daylight_model::PolygonData;
use geo::orient::Direction;
use geo::{
    Area, BoundingRect, Coord, Intersects, Line, LineString, MultiPolygon, Orient, Polygon, Rect,
    Relate,
};
use i_overlay::core::fill_rule::FillRule;
use i_overlay::core::overlay_rule::OverlayRule;
use i_overlay::float::single::SingleFloatOverlay;

/// Open ring of points, last point not repeated
pub type Contour = Vec<[f64; 2]>;

type Shapes = Vec<Vec<Contour>>;

/// Signed shoelace area, positive for counter-clockwise rings
pub fn signed_area(contour: &[[f64; 2]]) -> f64 {
    let n = contour.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let a = contour[i];
        let b = contour[(i + 1) % n];
        twice += a[0] * b[1] - b[0] * a[1];
    }
    twice / 2.0
}

/// Check whether any two non-adjacent edges of a ring cross or touch
pub fn is_self_intersecting(contour: &[[f64; 2]]) -> bool {
    let n = contour.len();
    if n < 4 {
        return false;
    }
    let lines: Vec<Line<f64>> = (0..n)
        .map(|i| {
            let a = contour[i];
            let b = contour[(i + 1) % n];
            Line::new(Coord { x: a[0], y: a[1] }, Coord { x: b[0], y: b[1] })
        })
        .collect();

    for i in 0..n {
        for j in (i + 2)..n {
            // first and last edges share the closing vertex
            if i == 0 && j == n - 1 {
                continue;
            }
            if lines[i].intersects(&lines[j]) {
                return true;
            }
        }
    }
    false
}

/// Reverse a ring in place if it runs clockwise
pub fn normalize_ccw(contour: &mut Contour) {
    if signed_area(contour) < 0.0 {
        contour.reverse();
    }
}

fn ring(points: &[[f64; 2]]) -> LineString<f64> {
    points.iter().map(|p| (p[0], p[1])).collect()
}

fn open_ring(ls: &LineString<f64>) -> Contour {
    let mut points: Contour = ls.coords().map(|c| [c.x, c.y]).collect();
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }
    points
}

fn to_shapes(shape: &MultiPolygon<f64>) -> Shapes {
    shape
        .iter()
        .map(|poly| {
            let oriented = poly.orient(Direction::Default);
            std::iter::once(open_ring(oriented.exterior()))
                .chain(oriented.interiors().iter().map(open_ring))
                .collect()
        })
        .collect()
}

fn from_shapes(shapes: Shapes) -> MultiPolygon<f64> {
    let polygons = shapes
        .into_iter()
        .filter_map(|shape| {
            let mut contours = shape.into_iter();
            let exterior = contours.next()?;
            let holes = contours.map(|c| ring(&c)).collect();
            Some(Polygon::new(ring(&exterior), holes).orient(Direction::Default))
        })
        .collect();
    MultiPolygon::new(polygons)
}

/// Union of rings under the nonzero fill rule
///
/// Fails only when non-empty input produces no area at all.
pub fn union_all(contours: Vec<Contour>) -> Result<MultiPolygon<f64>> {
    if contours.is_empty() {
        return Ok(MultiPolygon::new(Vec::new()));
    }
    let count = contours.len();
    let clip: Vec<Contour> = Vec::new();
    let shapes = contours.overlay(&clip, OverlayRule::Union, FillRule::NonZero);
    if shapes.is_empty() {
        return Err(Error::overlay(format!("union of {count} polygons is empty")));
    }
    Ok(from_shapes(shapes))
}

/// Intersection of a region with one ring
pub fn intersection(shape: &MultiPolygon<f64>, clip: &[[f64; 2]]) -> MultiPolygon<f64> {
    if shape.0.is_empty() || clip.len() < 3 {
        return MultiPolygon::new(Vec::new());
    }
    let mut clip = clip.to_vec();
    normalize_ccw(&mut clip);
    let subject = to_shapes(shape);
    from_shapes(subject.overlay(&clip, OverlayRule::Intersect, FillRule::NonZero))
}

/// Plain coordinate form for reports
pub fn polygon_data(shape: &MultiPolygon<f64>) -> Vec<PolygonData> {
    shape
        .iter()
        .map(|poly| PolygonData {
            exterior: open_ring(poly.exterior()),
            holes: poly.interiors().iter().map(open_ring).collect(),
        })
        .collect()
}

/// A region of angle space with cached bounds
#[derive(Debug, Clone)]
pub struct Region {
    shape: MultiPolygon<f64>,
    bounds: Option<Rect<f64>>,
}

impl Region {
    pub fn new(shape: MultiPolygon<f64>) -> Self {
        let bounds = shape.bounding_rect();
        Self { shape, bounds }
    }

    pub fn empty() -> Self {
        Self::new(MultiPolygon::new(Vec::new()))
    }

    pub fn shape(&self) -> &MultiPolygon<f64> {
        &self.shape
    }

    pub fn is_empty(&self) -> bool {
        self.shape.0.is_empty()
    }

    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    fn may_overlap(&self, rect: &Rect<f64>) -> bool {
        self.bounds.is_some_and(|b| b.intersects(rect))
    }

    /// Interiors of the region and the rectangle share area
    pub fn interior_intersects(&self, rect: &Rect<f64>) -> bool {
        if !self.may_overlap(rect) {
            return false;
        }
        let matrix = self.shape.relate(&rect.to_polygon());
        matrix.is_intersects() && !matrix.is_touches()
    }

    /// The rectangle lies entirely inside the region
    pub fn contains(&self, rect: &Rect<f64>) -> bool {
        if !self.may_overlap(rect) {
            return false;
        }
        self.shape.relate(&rect.to_polygon()).is_contains()
    }
}
