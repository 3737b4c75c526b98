// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Display implementations

use crate::control::{LevelDb, TargetLevel};
use std::fmt::Display;

macro_rules! TARGET_FMT {
    () => {
        "{:<12} {:>40} │ {:>6} │ {}"
    };
}

impl Display for TargetLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tags: Vec<_> = self.tags.iter().filter(|t| **t != self.name).copied().collect();
        write!(
            f,
            TARGET_FMT!(),
            self.name,
            self.target,
            self.level,
            tags.join(",")
        )
    }
}

impl Display for LevelDb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, TARGET_FMT!(), "NAME", "TARGET", "LEVEL", "TAGS")?;
        for target in self.targets.values() {
            writeln!(f, "{target}")?;
        }
        write!(f, TARGET_FMT!(), "default", "(other targets)", self.default, "")
    }
}

/// The targets grouped under each of their tags. A target's name counts as a tag.
pub(crate) struct LevelDbByTag<'a>(pub(crate) &'a LevelDb);
impl Display for LevelDbByTag<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let db = self.0;
        for tag in db.tags() {
            writeln!(f, "{tag}:")?;
            for target in db.targets.values().filter(|t| t.tags.contains(&tag)) {
                writeln!(f, "    {:<40} {}", target.target, target.level)?;
            }
        }
        Ok(())
    }
}
