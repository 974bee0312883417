// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::*;

/// A broken invariant found by [`LoopTopology::validate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TopologyError {
    /// A usable polygon of the source has no loop ring.
    MissingPolygon(PolygonId),
    /// Following `next` from the first loop doesn't come back to it.
    RingNotClosed(PolygonId),
    RingLengthMismatch {
        poly: PolygonId,
        expected: usize,
        found: usize,
    },
    /// The loop doesn't match the vertex pair, corner or polygon it was
    /// created for.
    WindingMismatch(LoopId),
    BrokenPrevLink(LoopId),
    LoopCountMismatch {
        expected: usize,
        found: usize,
    },
    AsymmetricTwin(LoopId),
    TwinNotReversed(LoopId),
    TwinOnAmbiguousEdge(LoopId),
    /// Two reversed loops share this loop's edge, but they are not twins.
    MissingTwin(LoopId),
}
impl std::fmt::Display for TopologyError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{self:?}"))
    }
}
impl std::error::Error for TopologyError {}

impl LoopTopology {
    /// Checks the built arrays against `source`. A topology built from
    /// `source` is always valid: an error here means the source changed
    /// since the last build, or the topology is corrupted.
    #[profiling::function]
    pub fn validate<S: MeshSnapshot + ?Sized>(&self, source: &S) -> Result<(), TopologyError> {
        let mut seen = HashSet::new();
        let mut expected_loops = 0;

        for p in source.polygon_ids() {
            if !seen.insert(p) {
                continue;
            }
            let ring = match usable_ring(source, p) {
                Some(ring) => ring,
                None => continue,
            };
            let first = self
                .poly_first_loop(p)
                .ok_or(TopologyError::MissingPolygon(p))?;
            let n = ring.len();
            expected_loops += n;

            let found = self.poly_loops(p).len();
            if found != n {
                return Err(TopologyError::RingLengthMismatch {
                    poly: p,
                    expected: n,
                    found,
                });
            }

            let mut l = first;
            for (i, &v) in ring.iter().enumerate() {
                if self.loop_poly(l) != Some(p)
                    || self.loop_corner(l) != Some(i)
                    || self.loop_from(l) != Some(v)
                    || self.loop_to(l) != Some(ring[(i + 1) % n])
                {
                    return Err(TopologyError::WindingMismatch(l));
                }
                let next = self
                    .loop_next(l)
                    .ok_or(TopologyError::RingNotClosed(p))?;
                if self.loop_prev(next) != Some(l) {
                    return Err(TopologyError::BrokenPrevLink(next));
                }
                l = next;
            }
            if l != first {
                return Err(TopologyError::RingNotClosed(p));
            }
        }

        if expected_loops != self.num_loops() {
            return Err(TopologyError::LoopCountMismatch {
                expected: expected_loops,
                found: self.num_loops(),
            });
        }

        for l in self.iter_loops() {
            let (from, to) = (self.from[l.idx()], self.to[l.idx()]);
            let sharers = self.loops_on_edge(from, to);
            match self.loop_twin(l) {
                Some(t) => {
                    if self.loop_twin(t) != Some(l) {
                        return Err(TopologyError::AsymmetricTwin(l));
                    }
                    if self.loop_from(t) != Some(to) || self.loop_to(t) != Some(from) {
                        return Err(TopologyError::TwinNotReversed(l));
                    }
                    if sharers.len() != 2 {
                        return Err(TopologyError::TwinOnAmbiguousEdge(l));
                    }
                }
                None => {
                    if let [l0, l1] = sharers {
                        let other = if *l0 == l { *l1 } else { *l0 };
                        if self.loop_from(other) == Some(to) && self.loop_to(other) == Some(from)
                        {
                            return Err(TopologyError::MissingTwin(l));
                        }
                    }
                }
            }
        }

        Ok(())
    }
}
