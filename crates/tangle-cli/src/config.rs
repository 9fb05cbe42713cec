//! Option loading for the CLI.
//!
//! Options come from an optional TOML file and are then overridden by
//! command-line flags.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tangle_merge::{AfterPolicy, CyclePolicy, MergeOptions, DEFAULT_MAX_DEPTH};
use tangle_walk::WalkOptions;

use crate::cli::{MergeArgs, WalkArgs};

/// Contents of a `tangle.toml` file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    pub merge: MergeOptions,
    pub walk: WalkOptions,
}

impl CliConfig {
    /// Load a config file, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::parse(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn parse(text: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Merge options with command-line overrides applied.
    pub fn merge_options(&self, args: &MergeArgs) -> MergeOptions {
        let mut options = self.merge.clone();
        if args.literal_after {
            options.after_policy = AfterPolicy::Literal;
        }
        if args.root_only_cycles {
            options.cycle_policy = CyclePolicy::RootOnly;
            options.max_depth.get_or_insert(DEFAULT_MAX_DEPTH);
        }
        if args.unbounded {
            options.max_depth = None;
        } else if args.max_depth.is_some() {
            options.max_depth = args.max_depth;
        }
        options
    }

    /// Walk options with command-line overrides applied.
    pub fn walk_options(&self, args: &WalkArgs) -> WalkOptions {
        let mut options = self.walk.clone();
        if args.max_depth.is_some() {
            options.max_depth = args.max_depth;
        }
        options
    }
}
