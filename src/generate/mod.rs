//! Documents produced by driving [`crate::Builder`].
//!
//! - [`changelog`]: `CHANGELOG.md` (or JSON) from recorded change entries
//! - [`rules`]: agent rule files describing the project tools

pub mod changelog;
pub mod rules;

pub use changelog::{
    ChangelogEntry, changelog_builder, changelog_json, parse_entries, render_changelog,
};
pub use rules::{RuleFile, rule_files, write_rule_files};
