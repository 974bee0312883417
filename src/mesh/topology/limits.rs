// Copyright (C) 2023 setzer22 and contributors
//
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Loops over a malformed topology may never close. To make sure no walk
/// turns into an infinite loop, every walk gives up after a fixed number of
/// steps. Cycle detection is what ends walks in practice: these ceilings
/// only matter for corrupted or unexpectedly large structures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TraversalLimits {
    /// Maximum number of loops enumerated around a single polygon. Polygons
    /// with more vertices than this get truncated rings.
    pub max_ring_len: usize,
    /// Maximum number of loops visited when rotating around a vertex fan.
    pub max_fan_len: usize,
    /// Maximum number of steps taken by each side of an edge loop or edge
    /// ring walk.
    pub max_walk_len: usize,
}

impl Default for TraversalLimits {
    fn default() -> Self {
        Self {
            max_ring_len: 1024,
            max_fan_len: 64,
            max_walk_len: 4096,
        }
    }
}

impl TraversalLimits {
    /// Parses limits from a RON document such as `(max_fan_len: 128)`.
    /// Fields not present keep their default value.
    pub fn from_ron_str(input: &str) -> Result<Self> {
        let limits: TraversalLimits =
            ron::from_str(input).context("Error parsing traversal limits")?;
        limits.check()?;
        Ok(limits)
    }

    pub fn to_ron_string(&self) -> Result<String> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Rejects zero ceilings.
    pub fn check(&self) -> Result<()> {
        for (name, value) in [
            ("max_ring_len", self.max_ring_len),
            ("max_fan_len", self.max_fan_len),
            ("max_walk_len", self.max_walk_len),
        ] {
            if value == 0 {
                bail!("Traversal limit '{name}' must be greater than zero")
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn defaults() {
        let limits = TraversalLimits::default();
        assert_eq!(limits.max_ring_len, 1024);
        assert_eq!(limits.max_fan_len, 64);
        assert_eq!(limits.max_walk_len, 4096);
        assert!(limits.check().is_ok());
    }

    #[test]
    fn parse_partial_ron() {
        let limits = TraversalLimits::from_ron_str("(max_fan_len: 128)").unwrap();
        assert_eq!(limits.max_fan_len, 128);
        assert_eq!(limits.max_ring_len, 1024);
        assert_eq!(limits.max_walk_len, 4096);

        let limits = TraversalLimits::from_ron_str("()").unwrap();
        assert_eq!(limits, TraversalLimits::default());
    }

    #[test]
    fn parse_errors() {
        assert!(TraversalLimits::from_ron_str("(max_walk_len: 0)").is_err());
        assert!(TraversalLimits::from_ron_str("(max_walk_len: -3)").is_err());
        assert!(TraversalLimits::from_ron_str("not ron at all").is_err());
    }

    #[test]
    fn ron_roundtrip_of_custom_limits() {
        let limits = TraversalLimits {
            max_ring_len: 16,
            max_fan_len: 8,
            max_walk_len: 32,
        };
        let text = limits.to_ron_string().unwrap();
        assert_eq!(TraversalLimits::from_ron_str(&text).unwrap(), limits);
    }
}
