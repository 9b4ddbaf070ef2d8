// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Vantage point resolution
//!
//! Each vantage street is resolved against the site's bounding rectangle into
//! a front lot line, a centerline and two or three vantage points. Every point
//! gets its own frame, lot lines and daylight boundary.

use crate::error::{Error, Result};
use crate::grid::Interval;
use crate::projection::{plan_angle, VantageFrame};
use crate::settings::{
    LONG_CENTERLINE_FT, MAX_BOUNDARY_PUSH_FT, MODEL_EPSILON, VANTAGE_POINT_DISTANCE_FT,
};
use daylight_model::{feet_to_meters, LineSegment, Site, VantageStreet};
use nalgebra::{Point3, Vector3};

/// A straight segment in model space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segment {
    pub start: Point3<f64>,
    pub end: Point3<f64>,
}

impl Segment {
    pub fn new(start: Point3<f64>, end: Point3<f64>) -> Self {
        Self { start, end }
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).norm()
    }

    pub fn midpoint(&self) -> Point3<f64> {
        nalgebra::center(&self.start, &self.end)
    }

    /// Unit direction from start to end, `None` for a zero-length segment
    pub fn direction(&self) -> Option<Vector3<f64>> {
        (self.end - self.start).try_normalize(MODEL_EPSILON)
    }

    pub fn translated(&self, by: &Vector3<f64>) -> Self {
        Self::new(self.start + by, self.end + by)
    }

    /// Plan distance from `p` to the closest point of the segment
    pub fn plan_distance_to(&self, p: &Point3<f64>) -> f64 {
        let a = self.start.xy();
        let ab = self.end.xy() - a;
        let ap = p.xy() - a;
        let len_sq = ab.norm_squared();
        let t = if len_sq > 0.0 {
            (ap.dot(&ab) / len_sq).clamp(0.0, 1.0)
        } else {
            0.0
        };
        (ap - ab * t).norm()
    }
}

impl From<LineSegment> for Segment {
    fn from(line: LineSegment) -> Self {
        Self::new(Point3::from(line.start), Point3::from(line.end))
    }
}

fn plan_distance(a: &Point3<f64>, b: &Point3<f64>) -> f64 {
    (a.xy() - b.xy()).norm()
}

/// Lot lines as seen from one vantage point
#[derive(Debug, Clone, Copy)]
pub struct LotLines {
    pub front: Segment,
    /// Side lot line closer to the vantage point
    pub near: Segment,
    pub far: Segment,
    pub rear: Segment,
}

/// A resolved vantage point
#[derive(Debug, Clone)]
pub struct VantagePoint {
    /// `"{street}: VP {n}"`
    pub name: String,
    pub frame: VantageFrame,
    pub lot_lines: LotLines,
    /// Scored interval of plan angles
    pub domain: Interval,
    /// Distance from the front lot line to the centerline, model units
    pub centerline_offset: f64,
    pub street_wall_continuity: bool,
}

/// A vantage street after resolution against the site
#[derive(Debug, Clone)]
pub struct ResolvedStreet {
    pub name: String,
    pub front_lot_line: Segment,
    pub centerline: Segment,
    pub centerline_offset: f64,
    pub vantage_points: Vec<VantagePoint>,
}

impl ResolvedStreet {
    /// Weight of the street in the overall score
    pub fn length(&self) -> f64 {
        self.front_lot_line.length()
    }
}

/// Number of vantage points for a centerline of `length` model units
pub fn vantage_point_count(length: f64) -> usize {
    if length > feet_to_meters(LONG_CENTERLINE_FT) {
        3
    } else {
        2
    }
}

/// Edges of the site's bounding rectangle, counter-clockwise from the minimum
/// corner
fn rectangle_edges(site: &Site) -> Result<[Segment; 4]> {
    let (min, max) = site
        .bounds()
        .ok_or_else(|| Error::invalid_input("site perimeter is empty"))?;
    if max[0] - min[0] <= MODEL_EPSILON || max[1] - min[1] <= MODEL_EPSILON {
        return Err(Error::invalid_input("site bounding rectangle has no area"));
    }
    let z = site.perimeter.first().map_or(0.0, |p| p[2]);
    let corners = [
        Point3::new(min[0], min[1], z),
        Point3::new(max[0], min[1], z),
        Point3::new(max[0], max[1], z),
        Point3::new(min[0], max[1], z),
    ];
    Ok([
        Segment::new(corners[0], corners[1]),
        Segment::new(corners[1], corners[2]),
        Segment::new(corners[2], corners[3]),
        Segment::new(corners[3], corners[0]),
    ])
}

/// Index of the edge whose midpoint lies nearest `target`
fn nearest_edge(edges: &[Segment; 4], target: &Point3<f64>) -> usize {
    (0..4)
        .min_by(|&a, &b| {
            plan_distance(&edges[a].midpoint(), target)
                .total_cmp(&plan_distance(&edges[b].midpoint(), target))
        })
        .unwrap_or(0)
}

/// Plan angle of the point `reach` along the street and `offset` toward the site
fn far_boundary(frame: &VantageFrame, reach: f64, offset: f64) -> f64 {
    frame
        .angles(&(frame.origin + frame.start * reach + frame.front * offset))
        .0
}

/// Resolve a street into its vantage points
pub fn resolve_street(site: &Site, street: &VantageStreet) -> Result<ResolvedStreet> {
    let edges = rectangle_edges(site)?;

    let (front, front_index) = match street.front_lot_line_override {
        Some(line) => {
            let front = Segment::from(line);
            (front, nearest_edge(&edges, &front.midpoint()))
        }
        None => {
            let line = street.line.ok_or_else(|| {
                Error::invalid_input(format!("street '{}' has no locating line", street.name))
            })?;
            let index = nearest_edge(&edges, &Segment::from(line).midpoint());
            (edges[index], index)
        }
    };

    let center = nalgebra::center(&edges[0].start, &edges[1].end);
    let mut outward = front.midpoint() - center;
    outward.z = 0.0;
    let outward = outward.try_normalize(MODEL_EPSILON).ok_or_else(|| {
        Error::invalid_input(format!(
            "front lot line of street '{}' passes through the site center",
            street.name
        ))
    })?;

    let offset = street.width.centerline_offset();
    let centerline = front.translated(&(outward * offset));
    let front_direction = -outward;
    let along = centerline.direction().ok_or_else(|| {
        Error::invalid_input(format!("front lot line of street '{}' has no length", street.name))
    })?;

    let count = vantage_point_count(centerline.length());
    let reach = feet_to_meters(VANTAGE_POINT_DISTANCE_FT);
    let vp1 = centerline.start + along * reach;
    let vp2 = centerline.end - along * reach;

    let mut frames = vec![
        VantageFrame::new(vp1, -along, front_direction),
        VantageFrame::new(vp2, along, front_direction),
    ];
    match count {
        2 => {}
        3 => frames.push(VantageFrame::new(
            nalgebra::center(&vp1, &vp2),
            -along,
            front_direction,
        )),
        other => {
            return Err(Error::VantageCount {
                street: street.name.clone(),
                count: other,
            })
        }
    }

    // Rear is the rectangle edge opposite the front; the other two are sides
    let rear = edges[(front_index + 2) % 4];
    let side_a = edges[(front_index + 1) % 4];
    let side_b = edges[(front_index + 3) % 4];

    let push = feet_to_meters(MAX_BOUNDARY_PUSH_FT.min(street.block_depth_ft / 2.0));
    let long = frames.len() == 3;

    let vantage_points = frames
        .iter()
        .enumerate()
        .map(|(i, frame)| {
            let (near, far) = if side_a.plan_distance_to(&frame.origin)
                <= side_b.plan_distance_to(&frame.origin)
            {
                (side_a, side_b)
            } else {
                (side_b, side_a)
            };
            let lot_lines = LotLines {
                front,
                near,
                far,
                rear,
            };

            let domain = if long {
                if i < 2 {
                    let far_edge = far_boundary(frame, reach, offset);
                    Interval::new(0.0, far_edge)
                } else {
                    // Middle point spans the end points' projections on the front lot line
                    let d1 = (frames[0].origin - frame.origin).dot(&frame.start);
                    let d2 = (frames[1].origin - frame.origin).dot(&frame.start);
                    Interval::new(plan_angle(offset, d1), plan_angle(offset, d2))
                }
            } else {
                let corner = if front.plan_distance_to(&near.start) <= front.plan_distance_to(&near.end)
                {
                    near.start
                } else {
                    near.end
                };
                let near_edge = frame.angles(&(corner + frame.front * push)).0;
                Interval::new(near_edge, far_boundary(frame, reach, offset))
            };

            VantagePoint {
                name: format!("{}: VP {}", street.name, i + 1),
                frame: *frame,
                lot_lines,
                domain,
                centerline_offset: offset,
                street_wall_continuity: street.street_wall_continuity,
            }
        })
        .collect::<Vec<_>>();

    for vp in &vantage_points {
        log::debug!(
            "{} at ({:.2}, {:.2}, {:.2}), daylight boundaries [{:.4}, {:.4}]",
            vp.name,
            vp.frame.origin.x,
            vp.frame.origin.y,
            vp.frame.origin.z,
            vp.domain.min,
            vp.domain.max
        );
    }

    Ok(ResolvedStreet {
        name: street.name.clone(),
        front_lot_line: front,
        centerline,
        centerline_offset: offset,
        vantage_points,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use daylight_model::StreetWidth;

    /// Lot `width_ft` along a street running east at y < 0, `depth_ft` deep
    fn lot(width_ft: f64, depth_ft: f64) -> Site {
        let w = feet_to_meters(width_ft);
        let d = feet_to_meters(depth_ft);
        Site::new(vec![
            [0.0, 0.0, 0.0],
            [w, 0.0, 0.0],
            [w, d, 0.0],
            [0.0, d, 0.0],
        ])
    }

    fn south_street(width_ft: f64) -> VantageStreet {
        let w = feet_to_meters(width_ft);
        VantageStreet::new(
            "South Street",
            StreetWidth::Ft100,
            LineSegment::new([-5.0, -10.0, 0.0], [w + 5.0, -12.0, 0.0]),
        )
    }

    #[test]
    fn test_segment_distance() {
        let seg = Segment::new(Point3::new(0.0, 0.0, 0.0), Point3::new(10.0, 0.0, 0.0));
        assert_relative_eq!(seg.plan_distance_to(&Point3::new(5.0, 3.0, 9.0)), 3.0);
        assert_relative_eq!(seg.plan_distance_to(&Point3::new(-4.0, 3.0, 0.0)), 5.0);
        assert_eq!(seg.midpoint(), Point3::new(5.0, 0.0, 0.0));
    }

    #[test]
    fn test_front_and_centerline() {
        let resolved = resolve_street(&lot(200.0, 100.0), &south_street(200.0)).unwrap();
        let front = resolved.front_lot_line;
        assert_relative_eq!(front.start.y, 0.0);
        assert_relative_eq!(front.end.y, 0.0);
        assert_relative_eq!(resolved.length(), feet_to_meters(200.0), epsilon = 1e-9);
        assert_relative_eq!(resolved.centerline.start.y, -feet_to_meters(50.0), epsilon = 1e-9);
        assert_relative_eq!(resolved.centerline_offset, feet_to_meters(50.0));
    }

    #[test]
    fn test_two_vantage_points() {
        let resolved = resolve_street(&lot(200.0, 100.0), &south_street(200.0)).unwrap();
        assert_eq!(resolved.vantage_points.len(), 2);

        let vp1 = &resolved.vantage_points[0];
        let vp2 = &resolved.vantage_points[1];
        assert_eq!(vp1.name, "South Street: VP 1");
        assert_eq!(vp2.name, "South Street: VP 2");
        assert_relative_eq!(vp1.frame.origin.x, feet_to_meters(250.0), epsilon = 1e-9);
        assert_relative_eq!(vp2.frame.origin.x, feet_to_meters(-50.0), epsilon = 1e-9);
        assert_relative_eq!(vp1.frame.start.x, -1.0, epsilon = 1e-12);
        assert_relative_eq!(vp2.frame.start.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(vp1.frame.front.y, 1.0, epsilon = 1e-12);

        for vp in &resolved.vantage_points {
            assert!(vp.domain.min <= vp.domain.max);
            assert!(vp.domain.min >= -90.0 && vp.domain.max <= 90.0);
            assert_relative_eq!(vp.domain.max, plan_angle(feet_to_meters(50.0), feet_to_meters(250.0)), epsilon = 1e-9);
        }

        // Near side lot line is the one closer to the point
        assert_relative_eq!(vp1.lot_lines.near.start.x, feet_to_meters(200.0), epsilon = 1e-9);
        assert_relative_eq!(vp2.lot_lines.near.start.x, 0.0, epsilon = 1e-9);
        assert_relative_eq!(vp1.lot_lines.rear.midpoint().y, feet_to_meters(100.0), epsilon = 1e-9);
    }

    #[test]
    fn test_mirrored_domains() {
        let resolved = resolve_street(&lot(200.0, 100.0), &south_street(200.0)).unwrap();
        let a = resolved.vantage_points[0].domain;
        let b = resolved.vantage_points[1].domain;
        assert_relative_eq!(a.min, b.min, epsilon = 1e-9);
        assert_relative_eq!(a.max, b.max, epsilon = 1e-9);
    }

    #[test]
    fn test_wide_lot_rear_and_sides() {
        // Half the width exceeds the depth, so side midpoints lie farther
        // from the front midpoint than the rear midpoint does
        let resolved = resolve_street(&lot(300.0, 100.0), &south_street(300.0)).unwrap();
        assert_eq!(resolved.vantage_points.len(), 2);

        for vp in &resolved.vantage_points {
            let rear = vp.lot_lines.rear;
            assert_relative_eq!(rear.start.y, feet_to_meters(100.0), epsilon = 1e-9);
            assert_relative_eq!(rear.end.y, feet_to_meters(100.0), epsilon = 1e-9);
            for side in [vp.lot_lines.near, vp.lot_lines.far] {
                assert_relative_eq!(side.start.x, side.end.x, epsilon = 1e-9);
            }
        }

        let vp1 = &resolved.vantage_points[0];
        let vp2 = &resolved.vantage_points[1];
        assert_relative_eq!(vp1.lot_lines.near.start.x, feet_to_meters(300.0), epsilon = 1e-9);
        assert_relative_eq!(vp2.lot_lines.near.start.x, 0.0, epsilon = 1e-9);

        // Mirrored points see mirrored lots
        assert_relative_eq!(vp1.domain.min, vp2.domain.min, epsilon = 1e-9);
        assert_relative_eq!(vp1.domain.max, vp2.domain.max, epsilon = 1e-9);
        let expected = plan_angle(feet_to_meters(150.0), feet_to_meters(50.0));
        assert_relative_eq!(vp1.domain.min, expected, epsilon = 1e-9);
    }

    #[test]
    fn test_three_vantage_points() {
        let resolved = resolve_street(&lot(600.0, 100.0), &south_street(600.0)).unwrap();
        assert_eq!(resolved.vantage_points.len(), 3);

        let vp3 = &resolved.vantage_points[2];
        assert_eq!(vp3.name, "South Street: VP 3");
        assert_relative_eq!(vp3.frame.origin.x, feet_to_meters(300.0), epsilon = 1e-9);

        for vp in &resolved.vantage_points[..2] {
            assert!(vp.domain.min <= 0.0 && vp.domain.max >= 0.0);
            assert!(vp.domain.min == 0.0 || vp.domain.max == 0.0);
        }
        assert!(vp3.domain.min < 0.0 && vp3.domain.max > 0.0);
        assert_relative_eq!(vp3.domain.min, -vp3.domain.max, epsilon = 1e-9);
    }

    #[test]
    fn test_exactly_five_hundred_feet_has_two_points() {
        assert_eq!(vantage_point_count(feet_to_meters(500.0)), 2);
        assert_eq!(vantage_point_count(feet_to_meters(500.5)), 3);
    }

    #[test]
    fn test_override_front_lot_line() {
        let mut street = south_street(200.0);
        street.line = None;
        street.front_lot_line_override = Some(LineSegment::new(
            [0.0, 0.0, 0.0],
            [feet_to_meters(200.0), 0.0, 0.0],
        ));
        let resolved = resolve_street(&lot(200.0, 100.0), &street).unwrap();
        assert_relative_eq!(resolved.front_lot_line.end.x, feet_to_meters(200.0));
    }

    #[test]
    fn test_missing_locating_line() {
        let mut street = south_street(200.0);
        street.line = None;
        let err = resolve_street(&lot(200.0, 100.0), &street).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn test_empty_site() {
        let err = resolve_street(&Site::new(Vec::new()), &south_street(200.0)).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }
}
