//! Agent rule files describing the project-management tools.

use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use tracing::info;

use crate::Builder;
use crate::config::RulesConfig;
use crate::error::Result;
use crate::output::write_document;

/// A generated rule file, ready to be written.
#[derive(Debug, Clone)]
pub struct RuleFile {
    pub file_name: &'static str,
    pub builder: Builder,
}

/// All rule files, in the order they are written.
pub fn rule_files(config: &RulesConfig, date: NaiveDate) -> Vec<RuleFile> {
    vec![
        RuleFile {
            file_name: "project-tools.mdc",
            builder: tools_rule(config, date),
        },
        RuleFile {
            file_name: "project-tools-usage.mdc",
            builder: usage_guide(config, date),
        },
        RuleFile {
            file_name: "project-tools-troubleshooting.mdc",
            builder: troubleshooting_guide(config, date),
        },
    ]
}

/// Write every rule file under `<project_dir>/<rules_dir>` and return the
/// paths written.
pub fn write_rule_files(
    project_dir: &Path,
    config: &RulesConfig,
    date: NaiveDate,
) -> Result<Vec<PathBuf>> {
    let rules_dir = project_dir.join(&config.rules_dir);
    let mut written = Vec::new();

    for rule in rule_files(config, date) {
        let path = rules_dir.join(rule.file_name);
        write_document(&path, &rule.builder)?;
        written.push(path);
    }

    info!(count = written.len(), dir = %rules_dir.display(), "wrote rule files");
    Ok(written)
}

fn front_matter(b: &mut Builder, description: &str, always_apply: bool) {
    b.add_front_matter([
        ("description", description),
        ("globs", "[\"**/*\"]"),
        ("alwaysApply", if always_apply { "true" } else { "false" }),
    ]);
}

fn footer(b: &mut Builder, date: NaiveDate) {
    b.add_horizontal_rule()
        .add_paragraph(format!("**Last Updated**: {}", date.format("%Y-%m-%d")))
        .add_paragraph("**Status**: Production Ready");
}

/// Overview of every tool, always applied.
pub fn tools_rule(config: &RulesConfig, date: NaiveDate) -> Builder {
    let t = |name: &str| config.tool(name);
    let mut b = Builder::new();

    front_matter(&mut b, "Project tools for planning and development assistance", true);
    b.add_header(1, "Project Tools");

    b.add_section(2, "Available Tools", |b| {
        b.add_paragraph(
            "This project exposes tool calls for tracking goals, rules, decisions and CI state.",
        );
        b.add_section(3, "Goals", |b| {
            b.add_definition_list([
                (format!("{}()", t("goals_list")), "List active project goals".to_string()),
                (
                    format!("{}({{title: \"Goal Title\"}})", t("goals_add")),
                    "Add a new goal".to_string(),
                ),
                (
                    format!("{}({{id: 1, status: \"done\"}})", t("goals_update")),
                    "Update goal status".to_string(),
                ),
            ]);
        });
        b.add_section(3, "Rules", |b| {
            b.add_definition_list([
                (format!("{}()", t("cursor_rules_list")), "List active rules".to_string()),
                (
                    format!("{}({{name, category, content}})", t("cursor_rules_add")),
                    "Add a new rule".to_string(),
                ),
            ]);
        });
        b.add_section(3, "Documentation", |b| {
            b.add_definition_list([
                (format!("{}()", t("adrs_list")), "List architecture decision records".to_string()),
                (format!("{}({{id: \"ADR-001\"}})", t("adrs_get")), "Read one record".to_string()),
                (format!("{}()", t("template_list")), "List documentation templates".to_string()),
                (
                    format!("{}({{template_id, variables}})", t("template_apply")),
                    "Generate a document from a template".to_string(),
                ),
            ]);
        });
        b.add_section(3, "Repository and CI", |b| {
            b.add_definition_list([
                (
                    format!("{}({{q: \"pattern\"}})", t("repo_search")),
                    "Search the codebase".to_string(),
                ),
                (
                    format!("{}({{path: \"docs/\"}})", t("markdown_lint")),
                    "Lint markdown files".to_string(),
                ),
                (format!("{}({{scope: \"./...\"}})", t("ci_run_tests")), "Run tests".to_string()),
                (format!("{}()", t("ci_last_failure")), "Show the last test failure".to_string()),
            ]);
        });
    });

    b.add_section(2, "Getting Started", |b| {
        b.add_paragraph("Seed the project data first:");
        b.add_code_block(
            "javascript",
            format!(
                "{}({{\n  title: \"Project Setup Complete\"\n}})\n\n{}()",
                t("goals_add"),
                t("goals_list")
            ),
        );
        b.add_list([
            "Track project goals and milestones",
            "Maintain development rules and guidelines",
            "Document architecture decisions",
            "Log significant changes",
        ]);
    });

    b.add_section(2, "Documentation", |b| {
        b.add_list([
            "**Usage Guide**: see project-tools-usage.mdc".to_string(),
            "**Troubleshooting**: see project-tools-troubleshooting.mdc".to_string(),
            format!("**Full Documentation**: {}/docs/", config.server_path),
        ]);
    });

    footer(&mut b, date);
    b
}

/// Workflows and habits for using the tools.
pub fn usage_guide(config: &RulesConfig, date: NaiveDate) -> Builder {
    let t = |name: &str| config.tool(name);
    let mut b = Builder::new();

    front_matter(&mut b, "Guide for using the project tools effectively", false);
    b.add_header(1, "Project Tools Usage Guide");

    b.add_section(2, "Purpose", |b| {
        b.add_paragraph("The tools give agents project management capabilities:");
        b.add_list([
            "Track goals and milestones",
            "Maintain development rules",
            "Document architecture decisions",
            "Search and analyze code",
            "Generate documentation",
        ]);
    });

    b.add_section(2, "Core Workflows", |b| {
        b.add_section(3, "Goal Management", |b| {
            b.add_code_block(
                "javascript",
                format!(
                    "{add}({{title: \"Phase 1: Core Features\"}})\n\
                     {add}({{title: \"Phase 2: Performance\"}})\n\n\
                     {update}({{\n  id: 1,\n  status: \"done\"\n}})\n\n\
                     {list}()",
                    add = t("goals_add"),
                    update = t("goals_update"),
                    list = t("goals_list"),
                ),
            );
        });
        b.add_section(3, "Rule Management", |b| {
            b.add_code_block(
                "javascript",
                format!(
                    "{}({{\n  name: \"Code Quality Standards\",\n  \
                     category: \"quality\",\n  content: \"...\"\n}})",
                    t("cursor_rules_add")
                ),
            );
        });
    });

    b.add_section(2, "Best Practices", |b| {
        b.add_section(3, "1. Always Initialize First", |b| {
            b.add_list([
                "Add test data before using list operations",
                "Verify tools work with simple operations",
            ]);
        });
        b.add_section(3, "2. Use Required Parameters Only", |b| {
            b.add_list(["Avoid optional parameters initially", "Add complexity gradually"]);
        });
        b.add_section(3, "3. Regular Maintenance", |b| {
            b.add_list([
                "Update goals as the project progresses",
                "Keep rules and guidelines current",
                "Log significant changes",
            ]);
        });
    });

    footer(&mut b, date);
    b
}

/// Known failure modes and how to get out of them.
pub fn troubleshooting_guide(config: &RulesConfig, date: NaiveDate) -> Builder {
    let mut b = Builder::new();

    front_matter(&mut b, "Troubleshooting guide for the project tools", false);
    b.add_header(1, "Project Tools Troubleshooting");

    b.add_section(2, "Common Issues", |b| {
        b.add_section(3, "\"Not connected\" Error", |b| {
            b.add_code_block("", r#"{"error":"Not connected"}"#)
                .add_paragraph("**Cause**: tool server not configured in the editor")
                .add_paragraph("**Solution**:")
                .add_list([
                    "Check the editor's tool server configuration",
                    "Restart the editor completely",
                    "Verify the server binary exists",
                ]);
        });
        b.add_section(3, "Schema Validation Errors", |b| {
            b.add_paragraph("**Cause**: empty database state")
                .add_paragraph("**Solution**: initialize with test data first");
        });
    });

    b.add_section(2, "Quick Fixes", |b| {
        b.add_section(3, "1. Initialize Database", |b| {
            b.add_code_block(
                "javascript",
                format!(
                    "{}({{\n  title: \"Test Goal\"\n}})\n\n{}()",
                    config.tool("goals_add"),
                    config.tool("goals_list")
                ),
            );
        });
        b.add_section(3, "2. Check Configuration", |b| {
            b.add_list([
                "Verify the server path in the editor settings".to_string(),
                "Ensure the server binary exists and is executable".to_string(),
                format!("Check the database file exists: {}", config.database_path),
            ]);
        });
    });

    b.add_section(2, "Diagnostic Checklist", |b| {
        b.add_checklist(
            [
                "Tool server configured",
                "No duplicate server processes running",
                "Database file exists and has content",
                "Server binary is up to date",
                "Editor restarted after configuration",
            ],
            &[],
        );
    });

    b.add_section(2, "Support", |b| {
        b.add_table(
            ["Resource", "Location"],
            [
                vec!["Documentation".to_string(), format!("{}/docs/", config.server_path)],
                vec!["Server".to_string(), format!("{}/build/", config.server_path)],
                vec!["Database".to_string(), config.database_path.clone()],
            ],
        );
    });

    footer(&mut b, date);
    b
}
