// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Link-time registry of the tracing targets declared by every crate in the binary

use crate::LevelFilter;
use linkme::distributed_slice;

/// A tracing target declared with [`trace_target!`] or [`custom_target!`]
pub struct LogTarget {
    pub(crate) target: &'static str,
    pub(crate) name: &'static str,
    pub(crate) level: LevelFilter,
    pub(crate) tags: &'static [&'static str],
}
impl LogTarget {
    pub const fn new(
        target: &'static str,
        name: &'static str,
        level: LevelFilter,
        tags: &'static [&'static str],
    ) -> Self {
        Self {
            target,
            name,
            level,
            tags,
        }
    }
}

#[distributed_slice]
pub static LOG_TARGETS: [LogTarget];

#[doc(hidden)]
#[macro_export]
macro_rules! log_target_deps {
    () => {
        use linkme::distributed_slice;
        use $crate::LevelFilter;
        use $crate::targets::{LOG_TARGETS, LogTarget};
    };
}

/// Declare the tracing target of the calling module, with a short name, a default level and tags.
/// The target can then be configured with `<name>=<level>` or `<tag>=<level>`.
#[macro_export]
macro_rules! trace_target {
    // The anonymous const scope lets the macro be invoked several times per crate
    // without clashing statics and without requiring imports from the caller.
    ($name:expr, $level:expr, $tags:expr) => {
        const _: () = {
            use $crate::log_target_deps;
            log_target_deps!();

            #[distributed_slice(LOG_TARGETS)]
            static LOG_TGT: LogTarget = LogTarget::new(module_path!(), $name, $level, $tags);
        };
    };
}

/// Declare a tracing target that is not a module path (e.g. that of a dependency)
#[macro_export]
macro_rules! custom_target {
    ($target:expr, $level:expr, $tags:expr) => {
        const _: () = {
            use $crate::log_target_deps;
            log_target_deps!();

            #[distributed_slice(LOG_TARGETS)]
            static LOG_TGT: LogTarget = LogTarget::new($target, $target, $level, $tags);
        };
    };
}
