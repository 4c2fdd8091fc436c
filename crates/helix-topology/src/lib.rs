//! Helix Torus Topology
//!
//! Places network nodes on the surface of a torus and routes between them
//! over a prioritised ring adjacency.
//!
//! # Placement
//!
//! A node's position is a pure function of its id:
//!
//! ```text
//! phi   = id · 2π / 6              (toroidal angle, one vortex cycle per turn)
//! theta = id · 137.508°            (poloidal angle, the golden angle)
//! x = (1 + 0.5·cos θ)·cos φ
//! y = (1 + 0.5·cos θ)·sin φ
//! z = 0.5·sin θ
//! ```
//!
//! Major radius 1, minor radius 0.5, so `x² + y² ≤ 1.5²` and `z ∈ [-0.5, 0.5]`.
//!
//! # Adjacency
//!
//! Every node keeps two ordered neighbour lists: the **ring** list, explored
//! first by routing, and the **general** list. List order is insertion order,
//! which makes path tie-breaking reproducible from the mutation history.
//!
//! # Concurrency
//!
//! The topology is a sequence of immutable [`TopologySnapshot`]s. Writers
//! build the next snapshot and swap it in under a write lock; readers take an
//! `Arc` to the current one and never see a half-applied join or leave.

mod config;
mod coord;
mod error;
mod links;
mod node;
mod snapshot;
mod topology;

pub use config::TopologyConfig;
pub use coord::{coordinate_of, energy_field, TorusCoord};
pub use error::{Error, Result};
pub use links::{fractal_aligned, LinkPolicy};
pub use node::NodeId;
pub use snapshot::{TopologySnapshot, TopologyStats};
pub use topology::TorusTopology;

/// Distance from the torus centre to the centre of the tube.
pub const MAJOR_RADIUS: f64 = 1.0;

/// Radius of the tube.
pub const MINOR_RADIUS: f64 = 0.5;

/// Outer bound of `sqrt(x² + y²)` for any placed node.
pub const MAX_PLANAR_RADIUS: f64 = MAJOR_RADIUS + MINOR_RADIUS;

/// Default Euclidean radius within which joining nodes become ring neighbours.
pub const DEFAULT_LINK_RADIUS: f64 = 0.75;
