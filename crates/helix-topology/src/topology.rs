//! Shared, concurrently readable topology store.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::config::TopologyConfig;
use crate::coord::{coordinate_of, TorusCoord};
use crate::error::{Error, Result};
use crate::snapshot::{NodeEntry, TopologySnapshot, TopologyStats};
use crate::NodeId;

/// Which adjacency list a link lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LinkKind {
    Ring,
    General,
}

/// Torus topology with snapshot-swap updates.
///
/// Writers are serialised by the write lock and publish a whole new
/// [`TopologySnapshot`]; readers clone the current `Arc` and query it without
/// holding any lock.
#[derive(Debug)]
pub struct TorusTopology {
    config: TopologyConfig,
    current: RwLock<Arc<TopologySnapshot>>,
}

impl Default for TorusTopology {
    fn default() -> Self {
        Self::new(TopologyConfig::default())
    }
}

impl TorusTopology {
    pub fn new(config: TopologyConfig) -> Self {
        Self {
            config,
            current: RwLock::new(Arc::new(TopologySnapshot::default())),
        }
    }

    pub fn config(&self) -> &TopologyConfig {
        &self.config
    }

    /// The current state. Later mutations do not affect the returned value.
    pub fn snapshot(&self) -> Arc<TopologySnapshot> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    pub fn len(&self) -> usize {
        self.snapshot().len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshot().is_empty()
    }

    /// Add `id`, linking it according to the configured [`crate::LinkPolicy`].
    pub fn join(&self, id: NodeId) -> Result<TorusCoord> {
        let policy = self.config.link_policy;
        self.mutate(|snap| {
            if snap.contains(id) {
                return Err(Error::DuplicateNode(id));
            }
            let coord = coordinate_of(id);
            let plan = policy.plan(&coord, snap.nodes.iter().map(|(&n, e)| (n, &e.coord)));
            insert_linked(snap, id, coord, &plan.ring, &plan.general)?;
            debug!(node = %id, ring = plan.ring.len(), general = plan.general.len(), "node joined");
            Ok(coord)
        })
    }

    /// Add `id` with explicit neighbour lists, applied in the given order.
    ///
    /// Fails without changing anything if a neighbour is unknown.
    pub fn join_linked(&self, id: NodeId, ring: &[NodeId], general: &[NodeId]) -> Result<TorusCoord> {
        self.mutate(|snap| {
            if snap.contains(id) {
                return Err(Error::DuplicateNode(id));
            }
            let coord = coordinate_of(id);
            insert_linked(snap, id, coord, ring, general)?;
            debug!(node = %id, ring = ring.len(), general = general.len(), "node joined");
            Ok(coord)
        })
    }

    /// Symmetric ring link between two members. Linking twice is a no-op.
    pub fn link_ring(&self, a: NodeId, b: NodeId) -> Result<()> {
        self.mutate(|snap| link(snap, a, b, LinkKind::Ring))
    }

    /// Symmetric general link between two members. Linking twice is a no-op.
    pub fn link_general(&self, a: NodeId, b: NodeId) -> Result<()> {
        self.mutate(|snap| link(snap, a, b, LinkKind::General))
    }

    /// Remove `id` and every reference to it.
    pub fn leave(&self, id: NodeId) -> Result<()> {
        self.mutate(|snap| {
            let entry = snap.nodes.remove(&id).ok_or(Error::UnknownNode(id))?;
            for neighbour in entry.ring.iter().chain(&entry.general) {
                if let Some(other) = snap.nodes.get_mut(neighbour) {
                    other.ring.retain(|&n| n != id);
                    other.general.retain(|&n| n != id);
                }
            }
            debug!(node = %id, "node left");
            Ok(())
        })
    }

    pub fn coordinate(&self, id: NodeId) -> Result<TorusCoord> {
        self.snapshot().coordinate(id)
    }

    /// See [`TopologySnapshot::find_path`].
    pub fn find_path(&self, from: NodeId, to: NodeId) -> Result<Option<Vec<NodeId>>> {
        self.snapshot().find_path(from, to)
    }

    pub fn stats(&self) -> TopologyStats {
        self.snapshot().stats()
    }

    /// Apply `f` to a private copy and publish it only if `f` succeeds.
    fn mutate<T>(&self, f: impl FnOnce(&mut TopologySnapshot) -> Result<T>) -> Result<T> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        let mut next = TopologySnapshot::clone(&guard);
        let out = f(&mut next)?;
        next.version += 1;
        debug!(version = next.version, nodes = next.len(), "topology updated");
        *guard = Arc::new(next);
        Ok(out)
    }
}

fn insert_linked(
    snap: &mut TopologySnapshot,
    id: NodeId,
    coord: TorusCoord,
    ring: &[NodeId],
    general: &[NodeId],
) -> Result<()> {
    if let Some(&missing) = ring.iter().chain(general).find(|&&n| n == id || !snap.contains(n)) {
        return Err(if missing == id {
            Error::InvalidInput(format!("node {id} cannot link to itself"))
        } else {
            Error::UnknownNode(missing)
        });
    }

    snap.nodes.insert(id, NodeEntry::new(coord));
    for &n in ring {
        link(snap, id, n, LinkKind::Ring)?;
    }
    for &n in general {
        link(snap, id, n, LinkKind::General)?;
    }
    Ok(())
}

/// Append `b` to `a`'s list and `a` to `b`'s, skipping pairs already linked.
fn link(snap: &mut TopologySnapshot, a: NodeId, b: NodeId, kind: LinkKind) -> Result<()> {
    snap.entry(a)?;
    snap.entry(b)?;
    if a == b {
        return Ok(());
    }
    let already = {
        let entry = snap.entry(a)?;
        entry.ring.contains(&b) || entry.general.contains(&b)
    };
    if already {
        return Ok(());
    }
    for (from, to) in [(a, b), (b, a)] {
        let entry = snap.entry_mut(from)?;
        match kind {
            LinkKind::Ring => entry.ring.push(to),
            LinkKind::General => entry.general.push(to),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::LinkPolicy;
    use proptest::prelude::*;
    use std::thread;

    fn manual() -> TorusTopology {
        TorusTopology::new(TopologyConfig {
            link_policy: LinkPolicy::Manual,
        })
    }

    fn ids(path: &[u64]) -> Vec<NodeId> {
        path.iter().copied().map(NodeId).collect()
    }

    /// Nodes 0..4 joined in order, ring 0-1, 1-2, 2-3.
    fn line() -> TorusTopology {
        let topo = manual();
        topo.join(NodeId(0)).unwrap();
        topo.join_linked(NodeId(1), &[NodeId(0)], &[]).unwrap();
        topo.join_linked(NodeId(2), &[NodeId(1)], &[]).unwrap();
        topo.join_linked(NodeId(3), &[NodeId(2)], &[]).unwrap();
        topo
    }

    #[test]
    fn line_of_four() {
        let topo = line();
        assert_eq!(topo.find_path(NodeId(0), NodeId(3)), Ok(Some(ids(&[0, 1, 2, 3]))));
        assert_eq!(topo.snapshot().version(), 4);
    }

    #[test]
    fn unknown_endpoint() {
        let topo = line();
        assert_eq!(topo.find_path(NodeId(0), NodeId(99)), Err(Error::UnknownNode(NodeId(99))));
    }

    #[test]
    fn duplicate_join_rejected() {
        let topo = line();
        let before = topo.snapshot();
        assert_eq!(topo.join(NodeId(2)), Err(Error::DuplicateNode(NodeId(2))));
        assert!(Arc::ptr_eq(&before, &topo.snapshot()));
    }

    #[test]
    fn failed_join_linked_applies_nothing() {
        let topo = line();
        let err = topo.join_linked(NodeId(4), &[NodeId(3)], &[NodeId(42)]);
        assert_eq!(err, Err(Error::UnknownNode(NodeId(42))));
        let snap = topo.snapshot();
        assert!(!snap.contains(NodeId(4)));
        assert_eq!(snap.ring_neighbors(NodeId(3)), Ok(&[NodeId(2)][..]));
        assert_eq!(snap.version(), 4);

        assert!(matches!(
            topo.join_linked(NodeId(5), &[NodeId(5)], &[]),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn links_are_symmetric_and_idempotent() {
        let topo = line();
        topo.link_general(NodeId(0), NodeId(3)).unwrap();
        topo.link_general(NodeId(3), NodeId(0)).unwrap();
        topo.link_ring(NodeId(0), NodeId(1)).unwrap();
        topo.link_ring(NodeId(2), NodeId(2)).unwrap();
        let snap = topo.snapshot();
        assert_eq!(snap.general_neighbors(NodeId(0)), Ok(&[NodeId(3)][..]));
        assert_eq!(snap.general_neighbors(NodeId(3)), Ok(&[NodeId(0)][..]));
        assert_eq!(snap.ring_neighbors(NodeId(1)), Ok(&[NodeId(0), NodeId(2)][..]));
        assert_eq!(snap.ring_neighbors(NodeId(2)), Ok(&[NodeId(1), NodeId(3)][..]));
        assert_eq!(topo.find_path(NodeId(0), NodeId(3)), Ok(Some(ids(&[0, 3]))));
        assert_eq!(topo.link_ring(NodeId(0), NodeId(7)), Err(Error::UnknownNode(NodeId(7))));
    }

    #[test]
    fn leave_removes_every_reference() {
        let topo = line();
        topo.link_general(NodeId(0), NodeId(2)).unwrap();
        topo.leave(NodeId(1)).unwrap();

        let snap = topo.snapshot();
        assert!(!snap.contains(NodeId(1)));
        assert_eq!(snap.ring_neighbors(NodeId(0)), Ok(&[][..]));
        assert_eq!(snap.ring_neighbors(NodeId(2)), Ok(&[NodeId(3)][..]));
        assert_eq!(snap.find_path(NodeId(0), NodeId(3)), Ok(Some(ids(&[0, 2, 3]))));
        assert_eq!(topo.leave(NodeId(1)), Err(Error::UnknownNode(NodeId(1))));
    }

    #[test]
    fn leave_splits_graph() {
        let topo = line();
        topo.leave(NodeId(2)).unwrap();
        assert_eq!(topo.find_path(NodeId(0), NodeId(3)), Ok(None));
    }

    #[test]
    fn snapshots_are_isolated() {
        let topo = line();
        let before = topo.snapshot();
        topo.leave(NodeId(3)).unwrap();
        assert!(before.contains(NodeId(3)));
        assert_eq!(before.find_path(NodeId(0), NodeId(3)), Ok(Some(ids(&[0, 1, 2, 3]))));
        assert_eq!(topo.snapshot().version(), before.version() + 1);
    }

    #[test]
    fn proximity_join_links_close_nodes() {
        let topo = TorusTopology::new(TopologyConfig {
            link_policy: LinkPolicy::Proximity { radius: 10.0 },
        });
        for id in 0..5 {
            topo.join(NodeId(id)).unwrap();
        }
        let snap = topo.snapshot();
        // every pair lies within 10 units, so the ring is complete
        assert_eq!(snap.ring_neighbors(NodeId(4)), Ok(&ids(&[0, 1, 2, 3])[..]));
        assert_eq!(snap.ring_neighbors(NodeId(0)), Ok(&ids(&[1, 2, 3, 4])[..]));
        assert_eq!(snap.stats().ring_links, 10);
    }

    #[test]
    fn join_returns_placed_coordinate() {
        let topo = TorusTopology::default();
        let coord = topo.join(NodeId(7)).unwrap();
        assert_eq!(coord, coordinate_of(NodeId(7)));
        assert_eq!(topo.coordinate(NodeId(7)), Ok(coord));
        assert_eq!(topo.coordinate(NodeId(8)), Err(Error::UnknownNode(NodeId(8))));
    }

    #[test]
    fn concurrent_readers_see_whole_snapshots() {
        let topo = Arc::new(line());

        thread::scope(|s| {
            let writer = {
                let topo = Arc::clone(&topo);
                s.spawn(move || {
                    for id in 4..200u64 {
                        topo.join_linked(NodeId(id), &[NodeId(id - 1)], &[]).unwrap();
                        if id % 3 == 0 {
                            topo.leave(NodeId(id)).unwrap();
                            topo.join_linked(NodeId(id), &[NodeId(id - 1)], &[]).unwrap();
                        }
                    }
                })
            };

            for _ in 0..4 {
                let topo = Arc::clone(&topo);
                s.spawn(move || {
                    let mut last = 0;
                    for _ in 0..200 {
                        let snap = topo.snapshot();
                        assert!(snap.version() >= last);
                        last = snap.version();
                        // a line is always fully connected
                        let end = snap.node_ids().last().unwrap();
                        let path = snap.find_path(NodeId(0), end).unwrap().unwrap();
                        assert_eq!(path.len(), snap.len());
                    }
                });
            }

            writer.join().unwrap();
        });

        assert_eq!(topo.len(), 200);
    }

    proptest! {
        #[test]
        fn paths_are_simple_and_linked(
            edges in prop::collection::vec((0u64..24, 0u64..24), 0..60),
            from in 0u64..24,
            to in 0u64..24,
        ) {
            let topo = manual();
            for id in 0..24 {
                topo.join(NodeId(id)).unwrap();
            }
            for (i, &(a, b)) in edges.iter().enumerate() {
                if i % 2 == 0 {
                    topo.link_ring(NodeId(a), NodeId(b)).unwrap();
                } else {
                    topo.link_general(NodeId(a), NodeId(b)).unwrap();
                }
            }

            let snap = topo.snapshot();
            if let Some(path) = snap.find_path(NodeId(from), NodeId(to)).unwrap() {
                prop_assert_eq!(path.first(), Some(&NodeId(from)));
                prop_assert_eq!(path.last(), Some(&NodeId(to)));
                let mut seen = std::collections::HashSet::new();
                prop_assert!(path.iter().all(|n| seen.insert(*n)));
                for pair in path.windows(2) {
                    let ring = snap.ring_neighbors(pair[0]).unwrap();
                    let general = snap.general_neighbors(pair[0]).unwrap();
                    prop_assert!(ring.contains(&pair[1]) || general.contains(&pair[1]));
                }
            }
        }

        #[test]
        fn same_history_same_path(
            edges in prop::collection::vec((0u64..16, 0u64..16), 0..40),
        ) {
            let build = || {
                let topo = manual();
                for id in 0..16 {
                    topo.join(NodeId(id)).unwrap();
                }
                for &(a, b) in &edges {
                    topo.link_ring(NodeId(a), NodeId(b)).unwrap();
                }
                topo
            };
            let (a, b) = (build(), build());
            prop_assert_eq!(a.find_path(NodeId(0), NodeId(15)), b.find_path(NodeId(0), NodeId(15)));
        }
    }
}
