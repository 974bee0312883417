// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use smallvec::SmallVec;

/// Inline storage sized for quads, the common case for polygon rings and
/// vertex fans.
pub type SVec<T> = SmallVec<[T; 4]>;

pub trait IteratorUtils: Iterator {
    fn collect_svec(self) -> SVec<Self::Item>
    where
        Self: Sized,
    {
        self.collect()
    }
}

impl<T: ?Sized> IteratorUtils for T where T: Iterator {}

/// How a [`bounded_cycle`] walk came to an end.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CycleEnd {
    /// The walk came back to its starting element.
    Closed,
    /// The step function returned `None`.
    Open,
    /// The iteration ceiling was reached first.
    Ceiling,
}

/// Walks `start` through `step` until the walk comes back to `start`, `step`
/// returns `None`, or `max_steps` elements have been produced.
///
/// This is the bounded counterpart of a `while h != h0 { h = step(h) }`
/// cycle, which never terminates on malformed connectivity.
pub fn bounded_cycle<T: Copy + PartialEq>(
    start: T,
    max_steps: usize,
    mut step: impl FnMut(T) -> Option<T>,
) -> (SVec<T>, CycleEnd) {
    let mut visited = SVec::new();
    let mut current = start;
    while visited.len() < max_steps {
        visited.push(current);
        match step(current) {
            Some(next) if next == start => return (visited, CycleEnd::Closed),
            Some(next) => current = next,
            None => return (visited, CycleEnd::Open),
        }
    }
    (visited, CycleEnd::Ceiling)
}
