//! Merkle tree over fractal hashes.
//!
//! Leaves are the committed hashes of the raw leaf data. Each parent is the
//! committed hash of its children's concatenation; an unpaired node at the
//! end of a level is re-hashed on its own.

use crate::hasher::FractalHasher;
use crate::Digest;

/// One step of an inclusion proof, bottom-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ProofStep {
    /// Sibling sits to the left: parent = H(sibling ‖ node)
    Left(Digest),
    /// Sibling sits to the right: parent = H(node ‖ sibling)
    Right(Digest),
    /// No sibling: parent = H(node)
    Alone,
}

/// Merkle tree built bottom-up with a [`FractalHasher`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FractalMerkleTree {
    levels: Vec<Vec<Digest>>,
}

impl FractalMerkleTree {
    /// Build a tree. An empty leaf set yields an empty tree with no root.
    pub fn build<L: AsRef<[u8]>>(hasher: &FractalHasher<'_>, leaves: &[L]) -> Self {
        if leaves.is_empty() {
            return Self::default();
        }

        let mut current: Vec<Digest> = leaves
            .iter()
            .map(|leaf| hasher.hash(leaf.as_ref()).hash)
            .collect();
        let mut levels = Vec::new();

        while current.len() > 1 {
            let next = current
                .chunks(2)
                .map(|pair| hasher.hash(&pair.concat()).hash)
                .collect();
            levels.push(std::mem::replace(&mut current, next));
        }
        levels.push(current);

        Self { levels }
    }

    /// The top node, if any leaves were given.
    pub fn root(&self) -> Option<Digest> {
        self.levels.last().and_then(|top| top.first().copied())
    }

    /// Number of leaves.
    pub fn leaf_count(&self) -> usize {
        self.levels.first().map_or(0, Vec::len)
    }

    /// Number of levels including leaves and root.
    pub fn depth(&self) -> usize {
        self.levels.len()
    }

    /// Inclusion proof for a leaf, or `None` if the index is out of range.
    pub fn proof(&self, leaf_index: usize) -> Option<Vec<ProofStep>> {
        if leaf_index >= self.leaf_count() {
            return None;
        }

        let mut index = leaf_index;
        let mut steps = Vec::with_capacity(self.levels.len().saturating_sub(1));
        for level in &self.levels[..self.levels.len() - 1] {
            let sibling = index ^ 1;
            let step = match level.get(sibling) {
                Some(&digest) if index % 2 == 1 => ProofStep::Left(digest),
                Some(&digest) => ProofStep::Right(digest),
                None => ProofStep::Alone,
            };
            steps.push(step);
            index /= 2;
        }
        Some(steps)
    }

    /// Check that `leaf` is included under `root`.
    pub fn verify_proof(
        hasher: &FractalHasher<'_>,
        leaf: &[u8],
        proof: &[ProofStep],
        root: &Digest,
    ) -> bool {
        let computed = proof.iter().fold(hasher.hash(leaf).hash, |node, step| {
            let combined = match step {
                ProofStep::Left(sibling) => [sibling.as_slice(), node.as_slice()].concat(),
                ProofStep::Right(sibling) => [node.as_slice(), sibling.as_slice()].concat(),
                ProofStep::Alone => node.to_vec(),
            };
            hasher.hash(&combined).hash
        });
        computed == *root
    }
}
