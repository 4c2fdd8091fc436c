//! Neighbour selection for joining nodes.
//!
//! Under [`LinkPolicy::Proximity`] a joining node links to every existing
//! node within the Euclidean radius (ring links), and to every node whose
//! toroidal angle lines up with a Sierpinski sector boundary (general links).

use std::f64::consts::PI;

use crate::coord::TorusCoord;
use crate::NodeId;

/// Angular width of one Sierpinski sector, a third of a turn.
pub const SIERPINSKI_SECTOR: f64 = 2.0 * PI / 3.0;

/// Maximum angular offset from a sector boundary for a general link.
pub const SECTOR_TOLERANCE: f64 = 0.1;

/// How a plain `join` chooses neighbours.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LinkPolicy {
    /// No automatic links; callers wire the graph explicitly.
    Manual,
    /// Ring links within `radius`, general links on sector alignment.
    Proximity { radius: f64 },
}

impl Default for LinkPolicy {
    fn default() -> Self {
        LinkPolicy::Proximity {
            radius: crate::DEFAULT_LINK_RADIUS,
        }
    }
}

/// Whether two coordinates are angularly aligned on a sector boundary.
pub fn fractal_aligned(a: &TorusCoord, b: &TorusCoord) -> bool {
    let offset = (a.phi - b.phi).abs() % SIERPINSKI_SECTOR;
    offset.min(SIERPINSKI_SECTOR - offset) < SECTOR_TOLERANCE
}

/// Ring and general neighbour lists chosen for a joining node.
#[derive(Debug, Default, PartialEq, Eq)]
pub(crate) struct LinkPlan {
    pub ring: Vec<NodeId>,
    pub general: Vec<NodeId>,
}

impl LinkPolicy {
    /// Choose neighbours among `existing`, visited in the given order.
    ///
    /// A node never appears in both lists; ring wins.
    pub(crate) fn plan<'a, I>(&self, coord: &TorusCoord, existing: I) -> LinkPlan
    where
        I: IntoIterator<Item = (NodeId, &'a TorusCoord)>,
    {
        let radius = match *self {
            LinkPolicy::Manual => return LinkPlan::default(),
            LinkPolicy::Proximity { radius } => radius,
        };

        let mut plan = LinkPlan::default();
        for (id, other) in existing {
            if coord.distance(other) <= radius {
                plan.ring.push(id);
            } else if fractal_aligned(coord, other) {
                plan.general.push(id);
            }
        }
        plan
    }
}
