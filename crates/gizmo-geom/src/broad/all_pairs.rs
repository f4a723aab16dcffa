// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
use crate::types::aabb::Aabb;
use std::collections::BTreeMap;

/// Broad-phase interface for inserting proxies and querying overlapping pairs.
///
/// Implementations must return pairs deterministically: the pair `(a, b)` is
/// canonicalized such that `a < b`, and the full list is sorted ascending by
/// `(a, b)`.
pub trait BroadPhase {
    /// Inserts or updates the proxy with the given `id` and `aabb`.
    fn upsert(&mut self, id: usize, aabb: Aabb);
    /// Removes a proxy if present.
    fn remove(&mut self, id: usize);
    /// Drops every proxy.
    fn clear(&mut self);
    /// Returns a canonical, deterministically-ordered list of overlapping pairs.
    fn pairs(&self) -> Vec<(usize, usize)>;
}

/// `O(n^2)` broad phase over proxies keyed by id.
///
/// Scenes here hold tens of bodies, so a sweep is not worth its bookkeeping.
#[derive(Debug, Default, Clone)]
pub struct AllPairs {
    items: BTreeMap<usize, Aabb>,
}

impl AllPairs {
    /// Creates an empty broad phase.
    #[must_use]
    pub fn new() -> Self {
        Self { items: BTreeMap::new() }
    }

    /// Number of proxies.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// `true` when no proxies are present.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl BroadPhase for AllPairs {
    fn upsert(&mut self, id: usize, aabb: Aabb) {
        self.items.insert(id, aabb);
    }

    fn remove(&mut self, id: usize) {
        self.items.remove(&id);
    }

    fn clear(&mut self) {
        self.items.clear();
    }

    fn pairs(&self) -> Vec<(usize, usize)> {
        // BTreeMap iteration is sorted by key, so emitting in nested order is
        // already canonical and lexicographic.
        let items: Vec<(usize, Aabb)> = self.items.iter().map(|(id, aabb)| (*id, *aabb)).collect();
        let mut out: Vec<(usize, usize)> = Vec::new();
        for (i, (a_id, a_bb)) in items.iter().enumerate() {
            for (b_id, b_bb) in items.iter().skip(i + 1) {
                if a_bb.overlaps(b_bb) {
                    out.push((*a_id, *b_id));
                }
            }
        }
        out
    }
}
