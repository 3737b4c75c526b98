// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Tracing runtime control.

use ordermap::OrderMap;
use std::str::FromStr;
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};
use thiserror::Error;
use tracing::{error, warn};
use tracing_subscriber::{EnvFilter, Registry, filter::LevelFilter, prelude::*, reload};

use crate::display::LevelDbByTag;
use crate::targets::{LOG_TARGETS, LogTarget};
use crate::{DEFAULT_LOGLEVEL, trace_target};

trace_target!("tracectl", LevelFilter::INFO, &[]);

/// Errors when parsing a tracing configuration string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TracingConfigError {
    #[error("Invalid syntax '{0}': it should be tag=level")]
    Syntax(String),
    #[error("Invalid level '{level}' for '{tag}'")]
    Level { tag: String, level: String },
    #[error("No tracing target or tag is named '{0}'")]
    UnknownTag(String),
}

/// The current level of a registered target
#[derive(Debug, Clone)]
pub(crate) struct TargetLevel {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: Vec<&'static str>,
}
impl TargetLevel {
    fn from_static(decl: &LogTarget) -> Self {
        let mut tags = decl.tags.to_vec();
        if !tags.contains(&decl.name) {
            tags.push(decl.name);
        }
        Self {
            target: decl.target,
            name: decl.name,
            level: decl.level,
            tags,
        }
    }
    fn matches(&self, key: &str) -> bool {
        self.target == key || self.tags.contains(&key)
    }
}

#[derive(Debug)]
pub(crate) struct LevelDb {
    pub(crate) default: LevelFilter,
    pub(crate) targets: OrderMap<&'static str, TargetLevel>,
}
impl LevelDb {
    fn load(default: LevelFilter) -> Self {
        let mut db = Self {
            default,
            targets: OrderMap::new(),
        };
        for decl in LOG_TARGETS {
            let tlevel = TargetLevel::from_static(decl);
            if db.targets.insert(decl.target, tlevel).is_some() {
                warn!("Tracing target {} is declared more than once", decl.target);
            }
        }
        db
    }
    pub(crate) fn tags(&self) -> Vec<&'static str> {
        let mut tags: Vec<&'static str> = Vec::new();
        for target in self.targets.values() {
            for tag in &target.tags {
                if !tags.contains(tag) {
                    tags.push(tag);
                }
            }
        }
        tags
    }
    fn set_level(&mut self, key: &str, level: LevelFilter) -> usize {
        let mut matched = 0;
        for t in self.targets.values_mut().filter(|t| t.matches(key)) {
            t.level = level;
            matched += 1;
        }
        matched
    }
    fn env_filter(&self) -> EnvFilter {
        let mut filter = EnvFilter::new(self.default.to_string());
        for t in self.targets.values() {
            match format!("{}={}", t.target, t.level).parse() {
                Ok(directive) => filter = filter.add_directive(directive),
                Err(e) => warn!("Skipping tracing target {}: {e}", t.target),
            }
        }
        filter
    }
    #[cfg(test)]
    fn as_config_string(&self) -> String {
        let mut out = format!("default={}", self.default);
        for t in self.targets.values() {
            out += format!(",{}={}", t.name, t.level).as_str();
        }
        out
    }
}

/// Owner of the global subscriber and of the per-target levels
#[derive(Debug)]
pub struct TracingControl {
    db: Mutex<LevelDb>,
    reload_filter: reload::Handle<EnvFilter, Registry>,
}

static TRACE_CTL: OnceLock<TracingControl> = OnceLock::new();

/// Get a reference to the static [`TracingControl`], installing the subscriber on first use
pub fn get_trace_ctl() -> &'static TracingControl {
    TRACE_CTL.get_or_init(TracingControl::new)
}

impl TracingControl {
    fn new() -> Self {
        let db = LevelDb::load(DEFAULT_LOGLEVEL);
        let (filter, reload_filter) = reload::Layer::new(db.env_filter());

        // stdout is reserved for the radio dialogue
        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_line_number(true)
            .with_thread_names(false)
            .with_level(true);

        // fails if a subscriber was installed before us, e.g. by a test harness
        let _ = tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .try_init();

        Self {
            db: Mutex::new(db),
            reload_filter,
        }
    }
    fn lock(&self) -> MutexGuard<'_, LevelDb> {
        self.db.lock().unwrap_or_else(PoisonError::into_inner)
    }
    fn reload(&self, db: &LevelDb) {
        if let Err(e) = self.reload_filter.reload(db.env_filter()) {
            error!("Failed to reload tracing filter: {e}");
        }
    }

    /// Parse a string made of comma-separated tag=level, where level is one of
    /// off, error, warn, info, debug or trace.
    fn parse_tracing_config(
        input: &str,
    ) -> Result<OrderMap<String, LevelFilter>, TracingConfigError> {
        let mut result = OrderMap::new();
        for item in input.split(',').map(str::trim).filter(|i| !i.is_empty()) {
            let Some((tag, level)) = item.split_once('=') else {
                return Err(TracingConfigError::Syntax(item.to_string()));
            };
            let (tag, level) = (tag.trim(), level.trim());
            let level = LevelFilter::from_str(level).map_err(|_| TracingConfigError::Level {
                tag: tag.to_string(),
                level: level.to_string(),
            })?;
            result.insert(tag.to_string(), level);
        }
        Ok(result)
    }

    /// Apply a tracing configuration string. `default=level` sets the level of undeclared
    /// targets, `all=level` that of every declared target, and any other tag overrides those.
    ///
    /// # Errors
    ///
    /// Fails if the string is malformed or names a tag that no target carries. Nothing
    /// is applied in that case.
    pub fn setup_from_string(&self, input: &str) -> Result<(), TracingConfigError> {
        let config = Self::parse_tracing_config(input)?;
        let mut db = self.lock();
        let known = db.tags();
        if let Some(unknown) = config
            .keys()
            .find(|k| *k != "default" && *k != "all" && !known.contains(&k.as_str()))
        {
            return Err(TracingConfigError::UnknownTag(unknown.clone()));
        }
        if let Some(level) = config.get("default") {
            db.default = *level;
        }
        if let Some(level) = config.get("all") {
            db.targets.values_mut().for_each(|t| t.level = *level);
        }
        for (tag, level) in config.iter().filter(|(k, _)| *k != "default" && *k != "all") {
            db.set_level(tag, *level);
        }
        self.reload(&db);
        Ok(())
    }

    pub fn dump(&self) {
        let db = self.lock();
        println!("{db}");
    }
    pub fn dump_targets_by_tag(&self) {
        let db = self.lock();
        println!("{}", LevelDbByTag(&db));
    }
}

// inspection helpers for the tests below
#[cfg(test)]
impl TracingControl {
    fn set_tag_level(&self, tag: &str, level: LevelFilter) -> usize {
        let mut db = self.lock();
        let matched = db.set_level(tag, level);
        if matched > 0 {
            self.reload(&db);
        }
        matched
    }
    fn get_default_level(&self) -> LevelFilter {
        self.lock().default
    }
    fn level_of(&self, target: &str) -> Option<LevelFilter> {
        self.lock().targets.get(target).map(|t| t.level)
    }
    fn levels_by_tag(&self, tag: &str) -> Vec<LevelFilter> {
        self.lock()
            .targets
            .values()
            .filter(|t| t.matches(tag))
            .map(|t| t.level)
            .collect()
    }
    fn as_config_string(&self) -> String {
        self.lock().as_config_string()
    }
}
