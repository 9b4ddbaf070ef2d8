// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Massing solids handed to the evaluation
//!
//! A solid is either a plain list of face loops (the common case for envelopes
//! and imported meshes) or an explicit half-edge B-rep whose ids the caller
//! already owns.

use serde::{Deserialize, Serialize};

/// Column-major 4x4 identity matrix
pub const IDENTITY_TRANSFORM: [f64; 16] = [
    1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0, 1.0,
];

/// A vertex of a B-rep solid
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BrepVertex {
    pub id: u64,
    pub position: [f64; 3],
}

/// An edge of a B-rep solid, from `start` to `end` vertex ids
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrepEdge {
    pub id: u64,
    pub start: u64,
    pub end: u64,
}

/// Use of an edge inside a face loop
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeUse {
    pub edge: u64,
    /// Traversed from `end` to `start`
    #[serde(default)]
    pub reversed: bool,
}

/// A face of a B-rep solid: its outer loop as edge uses
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrepFace {
    pub edges: Vec<EdgeUse>,
}

/// Half-edge boundary representation
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct BrepSolid {
    pub vertices: Vec<BrepVertex>,
    pub edges: Vec<BrepEdge>,
    pub faces: Vec<BrepFace>,
}

/// Geometry of a massing solid
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SolidGeometry {
    /// Outer loops of each face, last point not repeated
    FaceLoops { faces: Vec<Vec<[f64; 3]>> },
    /// Explicit half-edge representation
    Brep(BrepSolid),
}

/// A massing solid with its placement
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MassingSolid {
    #[serde(default)]
    pub name: String,
    /// 4x4 placement transform (column-major order)
    #[serde(default = "identity")]
    pub transform: [f64; 16],
    pub geometry: SolidGeometry,
}

fn identity() -> [f64; 16] {
    IDENTITY_TRANSFORM
}

impl MassingSolid {
    /// Create a solid from face loops with identity placement
    pub fn from_faces(name: impl Into<String>, faces: Vec<Vec<[f64; 3]>>) -> Self {
        Self {
            name: name.into(),
            transform: IDENTITY_TRANSFORM,
            geometry: SolidGeometry::FaceLoops { faces },
        }
    }

    /// Create a solid from a B-rep with identity placement
    pub fn from_brep(name: impl Into<String>, brep: BrepSolid) -> Self {
        Self {
            name: name.into(),
            transform: IDENTITY_TRANSFORM,
            geometry: SolidGeometry::Brep(brep),
        }
    }

    /// Vertical extrusion of a plan profile
    ///
    /// The profile is a closed loop (last point not repeated). Produces bottom,
    /// top and one side face per profile edge.
    pub fn extrusion(
        name: impl Into<String>,
        profile: &[[f64; 2]],
        elevation: f64,
        height: f64,
    ) -> Self {
        let top_z = elevation + height;
        let n = profile.len();
        let mut faces = Vec::with_capacity(n + 2);

        faces.push(
            profile
                .iter()
                .rev()
                .map(|p| [p[0], p[1], elevation])
                .collect(),
        );
        faces.push(profile.iter().map(|p| [p[0], p[1], top_z]).collect());

        for i in 0..n {
            let a = profile[i];
            let b = profile[(i + 1) % n];
            faces.push(vec![
                [a[0], a[1], elevation],
                [b[0], b[1], elevation],
                [b[0], b[1], top_z],
                [a[0], a[1], top_z],
            ]);
        }

        Self::from_faces(name, faces)
    }

    /// Builder-style placement
    pub fn with_transform(mut self, transform: [f64; 16]) -> Self {
        self.transform = transform;
        self
    }

    /// Apply the placement transform to a local point
    pub fn transform_point(&self, p: [f64; 3]) -> [f64; 3] {
        let m = &self.transform;
        let w = m[3] * p[0] + m[7] * p[1] + m[11] * p[2] + m[15];
        let w = if w.abs() > f64::EPSILON { w } else { 1.0 };
        [
            (m[0] * p[0] + m[4] * p[1] + m[8] * p[2] + m[12]) / w,
            (m[1] * p[0] + m[5] * p[1] + m[9] * p[2] + m[13]) / w,
            (m[2] * p[0] + m[6] * p[1] + m[10] * p[2] + m[14]) / w,
        ]
    }

    /// Global (min, max) elevation of the solid, `None` if it has no points
    pub fn elevation_range(&self) -> Option<(f64, f64)> {
        let points: Box<dyn Iterator<Item = &[f64; 3]>> = match &self.geometry {
            SolidGeometry::FaceLoops { faces } => Box::new(faces.iter().flatten()),
            SolidGeometry::Brep(brep) => Box::new(brep.vertices.iter().map(|v| &v.position)),
        };

        points.map(|p| self.transform_point(*p)[2]).fold(None, |acc, z| {
            Some(match acc {
                None => (z, z),
                Some((lo, hi)) => (lo.min(z), hi.max(z)),
            })
        })
    }

    /// Check if the solid carries no faces
    pub fn is_empty(&self) -> bool {
        match &self.geometry {
            SolidGeometry::FaceLoops { faces } => faces.is_empty(),
            SolidGeometry::Brep(brep) => brep.faces.is_empty(),
        }
    }
}

/// Column-major translation matrix
pub fn translation(x: f64, y: f64, z: f64) -> [f64; 16] {
    let mut m = IDENTITY_TRANSFORM;
    m[12] = x;
    m[13] = y;
    m[14] = z;
    m
}
