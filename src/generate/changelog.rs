use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::Builder;
use crate::config::ChangelogConfig;
use crate::error::{Error, Result};

/// One recorded change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChangelogEntry {
    #[serde(default)]
    pub id: u64,
    pub summary: String,
    /// Comma separated list of touched files.
    #[serde(default)]
    pub files: String,
    pub created_at: DateTime<Utc>,
}

impl ChangelogEntry {
    pub fn file_list(&self) -> Vec<&str> {
        self.files
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .collect()
    }
}

/// Newest first, truncated to `limit` when set.
fn select(entries: &[ChangelogEntry], limit: Option<usize>) -> Result<Vec<&ChangelogEntry>> {
    let mut selected: Vec<&ChangelogEntry> = entries.iter().collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    if let Some(limit) = limit.filter(|&l| l > 0) {
        selected.truncate(limit);
    }
    if selected.is_empty() {
        return Err(Error::NoEntries);
    }
    Ok(selected)
}

/// Build the markdown changelog.
pub fn changelog_builder(entries: &[ChangelogEntry], config: &ChangelogConfig) -> Result<Builder> {
    let selected = select(entries, config.limit)?;
    debug!(entries = selected.len(), "building changelog");

    let mut b = Builder::new();
    b.add_header(1, config.title.as_str())
        .add_paragraph(config.intro.as_str());

    for entry in selected {
        b.add_header(2, entry.created_at.format("%Y-%m-%d").to_string())
            .add_paragraph(entry.summary.as_str());

        let files = entry.file_list();
        if !files.is_empty() {
            b.add_header(3, "Files")
                .add_wrapped_list(files, config.list_width);
        }
    }

    Ok(b)
}

/// Render the markdown changelog.
pub fn render_changelog(entries: &[ChangelogEntry], config: &ChangelogConfig) -> Result<String> {
    Ok(changelog_builder(entries, config)?.render())
}

/// Render the changelog as `{"changelog": [...]}` JSON.
pub fn changelog_json(entries: &[ChangelogEntry], limit: Option<usize>) -> Result<String> {
    #[derive(Serialize)]
    struct Changelog<'a> {
        changelog: Vec<&'a ChangelogEntry>,
    }

    let changelog = select(entries, limit)?;
    Ok(serde_json::to_string_pretty(&Changelog { changelog })?)
}

/// Decode entries from a JSON array.
pub fn parse_entries(json: &str) -> Result<Vec<ChangelogEntry>> {
    Ok(serde_json::from_str(json)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use pretty_assertions::assert_eq;

    fn entry(id: u64, day: u32, summary: &str, files: &str) -> ChangelogEntry {
        ChangelogEntry {
            id,
            summary: summary.to_string(),
            files: files.to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 3, day, 12, 0, 0).unwrap(),
        }
    }

    #[test]
    fn newest_entry_first_with_files() {
        let entries = vec![
            entry(1, 1, "Initial import", ""),
            entry(2, 5, "Add renderer", "src/render.rs, src/node.rs"),
        ];

        let out = render_changelog(&entries, &ChangelogConfig::default()).unwrap();
        assert_eq!(
            out,
            "# Changelog\n\n\
             All notable changes to this project are documented in this file.\n\n\
             ## 2024-03-05\n\n\
             Add renderer\n\n\
             ### Files\n\n\
             - src/render.rs\n\
             - src/node.rs\n\
             ## 2024-03-01\n\n\
             Initial import\n\n"
        );
    }

    #[test]
    fn limit_keeps_newest() {
        let entries = vec![entry(1, 1, "old", ""), entry(2, 2, "new", "")];
        let config = ChangelogConfig {
            limit: Some(1),
            ..ChangelogConfig::default()
        };

        let out = render_changelog(&entries, &config).unwrap();
        assert!(out.contains("new"));
        assert!(!out.contains("old"));
    }

    #[test]
    fn empty_input_is_an_error() {
        assert!(matches!(
            render_changelog(&[], &ChangelogConfig::default()),
            Err(Error::NoEntries)
        ));
        assert!(matches!(changelog_json(&[], None), Err(Error::NoEntries)));
    }

    #[test]
    fn long_file_names_wrap_without_splitting() {
        let path = "a/very/long/path/to/some/file/that/keeps/going.rs";
        let entries = vec![entry(1, 1, "Long", path)];
        let config = ChangelogConfig {
            list_width: 10,
            ..ChangelogConfig::default()
        };

        let out = render_changelog(&entries, &config).unwrap();
        assert!(out.contains("- a/very/long/path/to/some/file/that/keeps/going.rs\n"));
    }

    #[test]
    fn rendered_changelog_validates() {
        let entries = vec![entry(1, 1, "One", "a.rs, b.rs"), entry(2, 2, "Two", "")];
        let b = changelog_builder(&entries, &ChangelogConfig::default()).unwrap();
        assert_eq!(b.validate(), Ok(()));
    }

    #[test]
    fn entries_round_trip_through_json() {
        let json = r#"[
            {"id": 7, "summary": "Fix", "files": "x.rs", "created_at": "2024-03-09T10:00:00Z"},
            {"summary": "Docs", "created_at": "2024-03-10T10:00:00Z"}
        ]"#;

        let entries = parse_entries(json).unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].files, "");
        assert_eq!(entries[0].file_list(), vec!["x.rs"]);

        let out = changelog_json(&entries, None).unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["changelog"][0]["summary"], "Docs");
        assert_eq!(value["changelog"][1]["id"], 7);
    }
}
