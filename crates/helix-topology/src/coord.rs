//! Torus coordinates.
//!
//! A coordinate keeps both the two surface angles and the embedded Cartesian
//! point. Angles are not wrapped into `[0, 2π)`; they grow with the node id so
//! that placement stays a single multiplication per axis.

use std::f64::consts::PI;

use helix_pattern::{golden_ratio_constant, GOLDEN_ANGLE_DEGREES, PATTERN_LENGTH};

use crate::{NodeId, MAJOR_RADIUS, MINOR_RADIUS};

/// A position on the torus surface.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TorusCoord {
    /// Toroidal angle (around the central axis)
    pub phi: f64,
    /// Poloidal angle (around the tube)
    pub theta: f64,
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl TorusCoord {
    /// Place a point from its two angles.
    pub fn from_angles(phi: f64, theta: f64) -> Self {
        let ring = MAJOR_RADIUS + MINOR_RADIUS * theta.cos();
        Self {
            phi,
            theta,
            x: ring * phi.cos(),
            y: ring * phi.sin(),
            z: MINOR_RADIUS * theta.sin(),
        }
    }

    /// Distance from the central axis, `sqrt(x² + y²)`.
    pub fn radius(&self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Euclidean distance in ℝ³.
    pub fn distance(&self, other: &Self) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        let dz = self.z - other.z;
        (dx * dx + dy * dy + dz * dz).sqrt()
    }

    /// The Cartesian point.
    pub const fn xyz(&self) -> (f64, f64, f64) {
        (self.x, self.y, self.z)
    }
}

impl std::fmt::Display for TorusCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.6}, {:.6}, {:.6})", self.x, self.y, self.z)
    }
}

/// Coordinate of a node. Pure function of the id.
pub fn coordinate_of(id: NodeId) -> TorusCoord {
    let n = id.value() as f64;
    let phi = n * 2.0 * PI / PATTERN_LENGTH as f64;
    let theta = n * GOLDEN_ANGLE_DEGREES * PI / 180.0;
    TorusCoord::from_angles(phi, theta)
}

/// Scalar energy of a coordinate, used by schedulers to bias selection:
/// `|sin φ · cos θ + sin(2π · radius) + frac(φ · golden ratio)|`.
pub fn energy_field(coord: &TorusCoord) -> f64 {
    let harmonic = coord.phi.sin() * coord.theta.cos();
    let radial = (coord.radius() * 2.0 * PI).sin();
    let golden = (coord.phi * golden_ratio_constant()).fract();
    (harmonic + radial + golden).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn origin_node_sits_on_outer_equator() {
        let c = coordinate_of(NodeId(0));
        assert_eq!(c.xyz(), (1.5, 0.0, 0.0));
        assert_eq!(c.phi, 0.0);
        assert_eq!(c.theta, 0.0);
    }

    #[test]
    fn phi_advances_one_sixth_turn() {
        for id in 0..12u64 {
            let c = coordinate_of(NodeId(id));
            assert!((c.phi - id as f64 * PI / 3.0).abs() < 1e-9);
        }
    }

    #[test]
    fn theta_is_golden_angle() {
        let c = coordinate_of(NodeId(1));
        assert!((c.theta - 137.508f64.to_radians()).abs() < 1e-12);
    }

    #[test]
    fn node_one_position() {
        let c = coordinate_of(NodeId(1));
        let theta = 137.508 * PI / 180.0;
        let ring = 1.0 + 0.5 * theta.cos();
        assert!((c.x - ring * (PI / 3.0).cos()).abs() < EPS);
        assert!((c.y - ring * (PI / 3.0).sin()).abs() < EPS);
        assert!((c.z - 0.5 * theta.sin()).abs() < EPS);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = coordinate_of(NodeId(4));
        let b = coordinate_of(NodeId(9));
        assert_eq!(a.distance(&b), b.distance(&a));
        assert_eq!(a.distance(&a), 0.0);
    }

    #[test]
    fn origin_energy() {
        // phi = 0, theta = 0, radius = 1.5: |0 + sin(3π) + 0| ≈ 0
        assert!(energy_field(&coordinate_of(NodeId(0))) < 1e-12);
    }

    #[test]
    fn energy_matches_formula() {
        let c = coordinate_of(NodeId(5));
        let expected = (c.phi.sin() * c.theta.cos()
            + (c.radius() * 2.0 * PI).sin()
            + (c.phi * 1.618033988749).fract())
        .abs();
        assert_eq!(energy_field(&c), expected);
    }

    proptest! {
        #[test]
        fn placement_stays_on_torus(id in 0u64..10_000_000) {
            let c = coordinate_of(NodeId(id));
            prop_assert!(c.radius() <= 1.5 + EPS);
            prop_assert!(c.radius() >= 0.5 - EPS);
            prop_assert!(c.z.abs() <= 0.5 + EPS);
            prop_assert_eq!(c, coordinate_of(NodeId(id)));
        }

        #[test]
        fn energy_is_non_negative_and_bounded(id in 0u64..10_000_000) {
            let e = energy_field(&coordinate_of(NodeId(id)));
            prop_assert!(e >= 0.0);
            prop_assert!(e < 3.0);
        }
    }
}
