// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Section and plan partitions of angle space

use crate::projection::plan_angle;
use crate::settings::{
    ANGLE_EPSILON, PLAN_EXTENT_FT, PLAN_MINORS_PER_MAJOR, PLAN_STEP_FT, SECTION_BANDS,
    SECTION_CUTOFF, SUB_MULTIPLIER,
};
use daylight_model::feet_to_meters;

/// Closed interval of angles
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Interval {
    pub min: f64,
    pub max: f64,
}

impl Interval {
    /// Interval between two values in either order
    pub fn new(a: f64, b: f64) -> Self {
        if a <= b {
            Self { min: a, max: b }
        } else {
            Self { min: b, max: a }
        }
    }

    #[inline]
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Overlap with `other`, `None` unless it has positive width
    pub fn overlap(&self, other: &Interval) -> Option<Interval> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        if max - min > ANGLE_EPSILON {
            Some(Interval { min, max })
        } else {
            None
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min - ANGLE_EPSILON && value <= self.max + ANGLE_EPSILON
    }

    pub fn as_array(&self) -> [f64; 2] {
        [self.min, self.max]
    }
}

/// One major section band with its minors
#[derive(Debug, Clone)]
pub struct SectionCell {
    pub interval: Interval,
    pub minors: Vec<Interval>,
}

impl SectionCell {
    /// Lower bound of the band, its identifier
    #[inline]
    pub fn id(&self) -> f64 {
        self.interval.min
    }

    /// Band lies in the blockage zone
    #[inline]
    pub fn is_above_cutoff(&self) -> bool {
        self.interval.min >= SECTION_CUTOFF - ANGLE_EPSILON
    }
}

/// Fixed partition of [0, 90] section degrees
#[derive(Debug, Clone)]
pub struct SectionGrid {
    pub cells: Vec<SectionCell>,
}

impl SectionGrid {
    pub fn new() -> Self {
        let mut cells = Vec::new();
        for &(start, end, major, minor) in &SECTION_BANDS {
            let count = ((end - start) / major).round() as usize;
            let per_major = (major / minor).round() as usize;
            for i in 0..count {
                let lo = start + major * i as f64;
                let minors = (0..per_major)
                    .map(|k| Interval::new(lo + minor * k as f64, lo + minor * (k + 1) as f64))
                    .collect();
                cells.push(SectionCell {
                    interval: Interval::new(lo, lo + major),
                    minors,
                });
            }
        }
        Self { cells }
    }

    /// Minor boundaries that are not also major boundaries
    pub fn minor_lines(&self) -> Vec<f64> {
        self.cells
            .iter()
            .flat_map(|c| c.minors.iter().skip(1).map(|m| m.min))
            .collect()
    }

    /// Major boundaries including both ends
    pub fn major_lines(&self) -> Vec<f64> {
        let mut lines: Vec<f64> = self.cells.iter().map(|c| c.interval.min).collect();
        if let Some(last) = self.cells.last() {
            lines.push(last.interval.max);
        }
        lines
    }
}

impl Default for SectionGrid {
    fn default() -> Self {
        Self::new()
    }
}

/// A plan minor after clipping to the daylight boundary
#[derive(Debug, Clone, Copy)]
pub struct PlanMinor {
    pub interval: Interval,
    /// Share of the parent weight, at most one fifth
    pub multiplier: f64,
}

/// A plan major overlapping the daylight boundary
#[derive(Debug, Clone)]
pub struct PlanCell {
    /// 1 at the outer ends, 10 next to the line of sight
    pub id: u8,
    /// Clipped extent
    pub interval: Interval,
    pub minors: Vec<PlanMinor>,
    pub multiplier: f64,
}

/// Per vantage point partition of plan angles
#[derive(Debug, Clone)]
pub struct PlanGrid {
    /// Every 5 ft boundary in ascending plan order
    pub boundaries: Vec<f64>,
    /// Majors with positive overlap with the domain
    pub cells: Vec<PlanCell>,
}

impl PlanGrid {
    /// Build the plan grid for a point `offset` (model units) from the front
    /// lot line, clipped to `domain`
    pub fn new(offset: f64, domain: Interval) -> Self {
        let steps = (2.0 * PLAN_EXTENT_FT / PLAN_STEP_FT).round() as usize;
        let boundaries: Vec<f64> = (0..=steps)
            .map(|i| {
                let d = feet_to_meters(-PLAN_EXTENT_FT + PLAN_STEP_FT * i as f64);
                plan_angle(offset, d)
            })
            .collect();

        let majors = steps / PLAN_MINORS_PER_MAJOR;
        let half = majors / 2;
        let mut cells = Vec::new();

        for j in 0..majors {
            let first = j * PLAN_MINORS_PER_MAJOR;
            let major = Interval::new(boundaries[first], boundaries[first + PLAN_MINORS_PER_MAJOR]);
            let Some(clipped) = major.overlap(&domain) else {
                continue;
            };

            let minors: Vec<PlanMinor> = (first..first + PLAN_MINORS_PER_MAJOR)
                .filter_map(|k| {
                    let original = Interval::new(boundaries[k], boundaries[k + 1]);
                    let interval = original.overlap(&domain)?;
                    let multiplier = if (interval.width() - original.width()).abs() <= ANGLE_EPSILON
                    {
                        SUB_MULTIPLIER
                    } else {
                        interval.width() / original.width() * SUB_MULTIPLIER
                    };
                    Some(PlanMinor {
                        interval,
                        multiplier,
                    })
                })
                .collect();

            let multiplier = minors.iter().map(|m| m.multiplier).sum();
            let id = if j < half { j + 1 } else { majors - j };
            cells.push(PlanCell {
                id: id as u8,
                interval: clipped,
                minors,
                multiplier,
            });
        }

        Self { boundaries, cells }
    }

    /// Boundaries that start a major cell, plus the last one
    pub fn major_boundaries(&self) -> Vec<f64> {
        self.boundaries
            .iter()
            .step_by(PLAN_MINORS_PER_MAJOR)
            .copied()
            .collect()
    }

    /// Boundaries strictly inside major cells
    pub fn minor_boundaries(&self) -> Vec<f64> {
        self.boundaries
            .iter()
            .enumerate()
            .filter(|(i, _)| i % PLAN_MINORS_PER_MAJOR != 0)
            .map(|(_, b)| *b)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn full_domain() -> Interval {
        Interval::new(-90.0, 90.0)
    }

    #[test]
    fn test_interval_overlap() {
        let a = Interval::new(10.0, 0.0);
        assert_eq!(a.min, 0.0);
        let b = Interval::new(5.0, 20.0);
        assert_eq!(a.overlap(&b), Some(Interval::new(5.0, 10.0)));
        assert_eq!(a.overlap(&Interval::new(10.0, 20.0)), None);
        assert!(a.contains(10.0));
        assert!(!a.contains(10.1));
    }

    #[test]
    fn test_section_grid_layout() {
        let grid = SectionGrid::new();
        assert_eq!(grid.cells.len(), 7 + 10);
        assert_eq!(grid.cells[0].interval, Interval::new(0.0, 10.0));
        assert_eq!(grid.cells[6].interval, Interval::new(60.0, 70.0));
        assert_eq!(grid.cells[7].interval, Interval::new(70.0, 72.0));
        assert_eq!(grid.cells[16].interval, Interval::new(88.0, 90.0));
        assert!(grid.cells.iter().all(|c| c.minors.len() == 2));
        assert!(!grid.cells[6].is_above_cutoff());
        assert!(grid.cells[7].is_above_cutoff());
        assert_eq!(grid.major_lines().len(), 18);
        assert_eq!(grid.minor_lines().len(), 17);
    }

    #[test]
    fn test_plan_grid_full_domain() {
        let offset = feet_to_meters(50.0);
        let grid = PlanGrid::new(offset, full_domain());
        assert_eq!(grid.boundaries.len(), 101);
        assert!(grid.boundaries.windows(2).all(|w| w[1] > w[0]));
        assert_eq!(grid.cells.len(), 20);
        assert!(grid.cells.iter().all(|c| (c.multiplier - 1.0).abs() < 1e-9));

        let ids: Vec<u8> = grid.cells.iter().map(|c| c.id).collect();
        assert_eq!(ids[0], 1);
        assert_eq!(ids[9], 10);
        assert_eq!(ids[10], 10);
        assert_eq!(ids[19], 1);

        // Mirrored about the line of sight
        for (a, b) in grid.boundaries.iter().zip(grid.boundaries.iter().rev()) {
            assert_relative_eq!(*a, -*b, epsilon = 1e-9);
        }
        assert_eq!(grid.major_boundaries().len(), 21);
        assert_eq!(grid.minor_boundaries().len(), 80);
    }

    #[test]
    fn test_plan_grid_clipping() {
        let offset = feet_to_meters(50.0);
        let full = PlanGrid::new(offset, full_domain());
        let cut = full.boundaries[52] + 0.25 * (full.boundaries[53] - full.boundaries[52]);
        let grid = PlanGrid::new(offset, Interval::new(-90.0, cut));

        assert_eq!(grid.cells.len(), 11);
        let last = grid.cells.last().unwrap();
        assert_eq!(last.id, 10);
        assert_eq!(last.minors.len(), 3);
        assert_relative_eq!(last.minors[0].multiplier, 0.2, epsilon = 1e-12);
        assert_relative_eq!(last.minors[2].multiplier, 0.05, epsilon = 1e-9);
        assert_relative_eq!(last.multiplier, 0.45, epsilon = 1e-9);
        assert_relative_eq!(last.interval.max, cut);

        for cell in &grid.cells {
            assert!(cell.multiplier <= 1.0 + 1e-12);
            assert!(cell.minors.iter().all(|m| m.multiplier <= 0.2 + 1e-12));
        }
    }
}
