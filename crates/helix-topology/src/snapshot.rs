//! Immutable, versioned view of the topology.
//!
//! Every query runs against one snapshot, so a path search can never mix
//! adjacency from before and after a concurrent join or leave.

use std::collections::{BTreeMap, HashMap, HashSet, VecDeque};

use crate::coord::{energy_field, TorusCoord};
use crate::error::{Error, Result};
use crate::NodeId;

/// Per-node state: position and both ordered neighbour lists.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NodeEntry {
    pub coord: TorusCoord,
    pub ring: Vec<NodeId>,
    pub general: Vec<NodeId>,
}

impl NodeEntry {
    pub fn new(coord: TorusCoord) -> Self {
        Self {
            coord,
            ring: Vec::new(),
            general: Vec::new(),
        }
    }
}

/// Aggregate figures for monitoring.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TopologyStats {
    pub node_count: usize,
    /// Undirected ring links
    pub ring_links: usize,
    /// Undirected general links
    pub general_links: usize,
    /// Mean of ring + general degree
    pub mean_degree: f64,
    /// Mean energy field over all nodes
    pub mean_energy: f64,
    pub diameter: u32,
    pub version: u64,
}

/// One consistent state of the topology.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TopologySnapshot {
    pub(crate) version: u64,
    pub(crate) nodes: BTreeMap<NodeId, NodeEntry>,
}

impl TopologySnapshot {
    /// Monotonic counter, bumped by every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Member ids in ascending order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    pub(crate) fn entry(&self, id: NodeId) -> Result<&NodeEntry> {
        self.nodes.get(&id).ok_or(Error::UnknownNode(id))
    }

    pub(crate) fn entry_mut(&mut self, id: NodeId) -> Result<&mut NodeEntry> {
        self.nodes.get_mut(&id).ok_or(Error::UnknownNode(id))
    }

    /// Stored coordinate of a member.
    pub fn coordinate(&self, id: NodeId) -> Result<TorusCoord> {
        self.entry(id).map(|e| e.coord)
    }

    /// Ring neighbours in insertion order.
    pub fn ring_neighbors(&self, id: NodeId) -> Result<&[NodeId]> {
        self.entry(id).map(|e| e.ring.as_slice())
    }

    /// General neighbours in insertion order.
    pub fn general_neighbors(&self, id: NodeId) -> Result<&[NodeId]> {
        self.entry(id).map(|e| e.general.as_slice())
    }

    /// Breadth-first path from `from` to `to`.
    ///
    /// Each node's ring list is expanded before its general list, so among
    /// equal-length paths the one reached through earlier-inserted ring links
    /// wins. Returns `Ok(None)` when `to` is unreachable.
    pub fn find_path(&self, from: NodeId, to: NodeId) -> Result<Option<Vec<NodeId>>> {
        self.entry(from)?;
        self.entry(to)?;

        let mut visited = HashSet::from([from]);
        let mut parent: HashMap<NodeId, NodeId> = HashMap::new();
        let mut queue = VecDeque::from([from]);

        while let Some(current) = queue.pop_front() {
            if current == to {
                return Ok(Some(reconstruct_path(&parent, from, to)));
            }

            let entry = self.entry(current)?;
            for &next in entry.ring.iter().chain(&entry.general) {
                if visited.insert(next) {
                    parent.insert(next, current);
                    queue.push_back(next);
                }
            }
        }

        tracing::trace!(%from, %to, version = self.version, "no path");
        Ok(None)
    }

    /// The `count` members closest to `id` by Euclidean distance, ties by id.
    pub fn nearest_neighbors(&self, id: NodeId, count: usize) -> Result<Vec<NodeId>> {
        let origin = self.entry(id)?.coord;
        let mut others: Vec<(f64, NodeId)> = self
            .nodes
            .iter()
            .filter(|(other, _)| **other != id)
            .map(|(other, entry)| (origin.distance(&entry.coord), *other))
            .collect();
        others.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)));
        Ok(others.into_iter().take(count).map(|(_, other)| other).collect())
    }

    /// Expected hop bound: `ceil(log2(n))`, zero for one node or fewer.
    pub fn diameter(&self) -> u32 {
        match self.nodes.len() {
            0 | 1 => 0,
            n => usize::BITS - (n - 1).leading_zeros(),
        }
    }

    pub fn stats(&self) -> TopologyStats {
        let node_count = self.nodes.len();
        let ring_degree: usize = self.nodes.values().map(|e| e.ring.len()).sum();
        let general_degree: usize = self.nodes.values().map(|e| e.general.len()).sum();
        let total_energy: f64 = self.nodes.values().map(|e| energy_field(&e.coord)).sum();

        let (mean_degree, mean_energy) = if node_count == 0 {
            (0.0, 0.0)
        } else {
            let n = node_count as f64;
            ((ring_degree + general_degree) as f64 / n, total_energy / n)
        };

        TopologyStats {
            node_count,
            ring_links: ring_degree / 2,
            general_links: general_degree / 2,
            mean_degree,
            mean_energy,
            diameter: self.diameter(),
            version: self.version,
        }
    }
}

fn reconstruct_path(parent: &HashMap<NodeId, NodeId>, from: NodeId, to: NodeId) -> Vec<NodeId> {
    let mut path = vec![to];
    let mut current = to;
    while current != from {
        // every discovered node except `from` has a parent
        match parent.get(&current) {
            Some(&prev) => {
                path.push(prev);
                current = prev;
            }
            None => break,
        }
    }
    path.reverse();
    path
}
