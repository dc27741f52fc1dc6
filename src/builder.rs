//! Fluent construction of a [`Document`].
//!
//! Every `add_*` call appends to the root of the document and returns the
//! builder, so calls chain. None of them fail: any string is accepted and
//! empty inputs simply produce empty output.

use std::fmt;

use tracing::{debug, warn};

use crate::node::{Document, ItemRole, ListKind, NodeId, NodeKind};
use crate::render::render;
use crate::validate::{ValidationError, validate};
use crate::wrap::wrap_text;

const MIN_HEADING_LEVEL: u8 = 1;
const MAX_HEADING_LEVEL: u8 = 6;

/// Markdown document builder.
#[derive(Debug, Default, Clone)]
pub struct Builder {
    doc: Document,
}

impl Builder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a heading. Levels outside 1..=6 are clamped into range.
    pub fn add_header(&mut self, level: u8, text: impl Into<String>) -> &mut Self {
        let clamped = level.clamp(MIN_HEADING_LEVEL, MAX_HEADING_LEVEL);
        if clamped != level {
            warn!(level, clamped, "heading level out of range");
        }
        self.push(NodeKind::Heading {
            level: clamped,
            text: text.into(),
        });
        self
    }

    pub fn add_paragraph(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(paragraph(text.into(), false));
        self
    }

    /// Add an empty spacer paragraph.
    pub fn add_line_break(&mut self) -> &mut Self {
        self.push(paragraph("\n".to_string(), false));
        self
    }

    pub fn add_horizontal_rule(&mut self) -> &mut Self {
        self.push(NodeKind::HorizontalRule);
        self
    }

    pub fn add_link(&mut self, text: impl Into<String>, url: impl Into<String>) -> &mut Self {
        self.push(NodeKind::Link {
            text: text.into(),
            url: url.into(),
        });
        self
    }

    pub fn add_bold(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(NodeKind::Strong { text: text.into() });
        self
    }

    pub fn add_inline_code(&mut self, text: impl Into<String>) -> &mut Self {
        self.push(NodeKind::InlineCode { text: text.into() });
        self
    }

    /// Add a fenced code block; `language` may be empty.
    pub fn add_code_block(
        &mut self,
        language: impl Into<String>,
        code: impl Into<String>,
    ) -> &mut Self {
        self.push(NodeKind::CodeBlock {
            language: language.into(),
            code: code.into(),
        });
        self
    }

    /// Add a bullet list with one item per entry.
    pub fn add_list<I>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let list = self.push(NodeKind::List {
            kind: ListKind::Bullet,
        });
        for item in items {
            self.push_item(list, ItemRole::Bullet, item.into());
        }
        self
    }

    /// Add a bullet list whose items are word-wrapped to `width`.
    ///
    /// The first wrapped line carries the bullet; later lines are stored as
    /// continuation paragraphs of the same item.
    pub fn add_wrapped_list<I>(&mut self, items: I, width: usize) -> &mut Self
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let list = self.push(NodeKind::List {
            kind: ListKind::Bullet,
        });
        for item in items {
            let lines = wrap_text(item.as_ref(), width);
            let mut lines = lines.into_iter();
            let Some(first) = lines.next() else {
                continue;
            };
            let list_item = self.doc.append(
                list,
                NodeKind::ListItem {
                    role: ItemRole::Bullet,
                },
            );
            self.doc.append(list_item, paragraph(first, false));
            for line in lines {
                self.doc.append(list_item, paragraph(line, true));
            }
        }
        self
    }

    /// Add a definition list, emitting a term then its definition for each
    /// pair in iteration order. Pass an ordered collection (a `Vec` of pairs,
    /// an `IndexMap`, a `BTreeMap`) for stable output.
    pub fn add_definition_list<I, K, V>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let list = self.push(NodeKind::List {
            kind: ListKind::Definition,
        });
        for (term, definition) in items {
            self.push_item(list, ItemRole::Term, term.into());
            self.push_item(list, ItemRole::Definition, definition.into());
        }
        self
    }

    /// Add a task list. `checked[i]` applies to `items[i]`; items without a
    /// flag are unchecked.
    pub fn add_checklist<I>(&mut self, items: I, checked: &[bool]) -> &mut Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let list = self.push(NodeKind::List {
            kind: ListKind::Bullet,
        });
        for (i, item) in items.into_iter().enumerate() {
            let checked = checked.get(i).copied().unwrap_or(false);
            self.push_item(list, ItemRole::Task { checked }, item.into());
        }
        self
    }

    /// Add a pipe table. Tables are not tree nodes: the table is built as
    /// literal text and stored in a single paragraph.
    pub fn add_table<H, R>(&mut self, headers: H, rows: R) -> &mut Self
    where
        H: IntoIterator,
        H::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: IntoIterator,
        <R::Item as IntoIterator>::Item: AsRef<str>,
    {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|h| h.as_ref().to_string())
            .collect();
        if headers.is_empty() {
            debug!("skipping table without headers");
            return self;
        }

        let mut lines = vec![table_row(&headers), table_row(&vec!["---"; headers.len()])];
        for row in rows {
            let cells: Vec<String> = row.into_iter().map(|c| c.as_ref().to_string()).collect();
            lines.push(table_row(&cells));
        }

        self.push(paragraph(lines.join("\n"), false));
        self
    }

    /// Add a YAML front matter block. Like tables, it is stored as a literal
    /// paragraph.
    pub fn add_front_matter<I, K, V>(&mut self, fields: I) -> &mut Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut text = String::from("---\n");
        for (key, value) in fields {
            text.push_str(key.as_ref());
            text.push_str(": ");
            text.push_str(value.as_ref());
            text.push('\n');
        }
        text.push_str("---");
        self.push(paragraph(text, false));
        self
    }

    /// Add a heading followed by whatever `content` appends. The content is a
    /// sibling of the heading, not its child.
    pub fn add_section<F>(
        &mut self,
        level: u8,
        title: impl Into<String>,
        content: F,
    ) -> &mut Self
    where
        F: FnOnce(&mut Self),
    {
        self.add_header(level, title);
        content(self);
        self
    }

    pub fn document(&self) -> &Document {
        &self.doc
    }

    pub fn into_document(self) -> Document {
        self.doc
    }

    /// Render the document to markdown.
    pub fn render(&self) -> String {
        render(&self.doc)
    }

    /// Render, then check that the output parses cleanly.
    pub fn validate(&self) -> Result<(), ValidationError> {
        validate(&self.render())
    }

    fn push(&mut self, kind: NodeKind) -> NodeId {
        self.doc.append(NodeId::ROOT, kind)
    }

    fn push_item(&mut self, list: NodeId, role: ItemRole, text: String) {
        let item = self.doc.append(list, NodeKind::ListItem { role });
        self.doc.append(item, paragraph(text, false));
    }
}

impl fmt::Display for Builder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

fn paragraph(text: String, continuation: bool) -> NodeKind {
    NodeKind::Paragraph { text, continuation }
}

fn table_row<S: AsRef<str>>(cells: &[S]) -> String {
    let cells: Vec<&str> = cells.iter().map(AsRef::as_ref).collect();
    format!("| {} |", cells.join(" | "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    /// Name, whether the node is inline, and one representative call.
    type Step = (&'static str, bool, fn(&mut Builder));

    /// One representative call per `add_*` operation.
    fn steps() -> Vec<Step> {
        let steps: [Step; 16] = [
            ("header", false, |b| {
                b.add_header(2, "Title");
            }),
            ("paragraph", false, |b| {
                b.add_paragraph("Some text");
            }),
            ("line_break", false, |b| {
                b.add_line_break();
            }),
            ("horizontal_rule", false, |b| {
                b.add_horizontal_rule();
            }),
            ("link", true, |b| {
                b.add_link("docs", "https://example.com/docs");
            }),
            ("bold", true, |b| {
                b.add_bold("important");
            }),
            ("inline_code", true, |b| {
                b.add_inline_code("cargo test");
            }),
            ("code_block", false, |b| {
                b.add_code_block("rust", "fn main() {\n    println!(\"hi\");\n}");
            }),
            ("code_block_no_language", false, |b| {
                b.add_code_block("", "plain text");
            }),
            ("list", false, |b| {
                b.add_list(["one", "two", "three"]);
            }),
            ("wrapped_list", false, |b| {
                b.add_wrapped_list(["a long entry that has to wrap over several lines"], 12);
            }),
            ("definition_list", false, |b| {
                b.add_definition_list([("term", "meaning"), ("other", "value")]);
            }),
            ("checklist", false, |b| {
                b.add_checklist(["done", "open"], &[true]);
            }),
            ("table", false, |b| {
                b.add_table(["A", "B"], [["1", "2"], ["3", "4"]]);
            }),
            ("front_matter", false, |b| {
                b.add_front_matter([("description", "Rules"), ("alwaysApply", "false")]);
            }),
            ("section", false, |b| {
                b.add_section(2, "Section", |b| {
                    b.add_paragraph("body").add_list(["item"]);
                });
            }),
        ];
        steps.to_vec()
    }

    #[test]
    fn new_builder_is_empty() {
        let b = Builder::new();
        assert!(b.document().is_empty());
        assert_eq!(b.render(), "");
    }

    #[test]
    fn calls_chain_in_order() {
        let mut b = Builder::new();
        b.add_header(1, "Title")
            .add_paragraph("Intro")
            .add_horizontal_rule()
            .add_paragraph("Outro");

        assert_eq!(b.to_string(), "# Title\n\nIntro\n\n---\n\nOutro\n\n");
    }

    #[test]
    fn heading_level_is_clamped() {
        let mut b = Builder::new();
        b.add_header(0, "low").add_header(9, "high");
        assert_eq!(b.render(), "# low\n\n###### high\n\n");
    }

    #[test]
    fn definition_list_pairs_follow_iteration_order() {
        let mut items = IndexMap::new();
        items.insert("B", "2");
        items.insert("A", "1");

        let mut b = Builder::new();
        b.add_definition_list(items);

        assert_eq!(b.render(), "B\n: 2\nA\n: 1\n");
    }

    #[test]
    fn definition_list_from_pairs() {
        let mut b = Builder::new();
        b.add_definition_list([("Term 1", "Definition 1"), ("Term 2", "Definition 2")]);
        let out = b.render();

        let term = out.find("Term 1\n").unwrap();
        let def = out.find(": Definition 1\n").unwrap();
        assert!(term < def);
        assert!(out.contains("Term 2\n: Definition 2\n"));
    }

    #[test]
    fn checklist_defaults_missing_flags_to_unchecked() {
        let mut b = Builder::new();
        b.add_checklist(["x", "y"], &[true]);
        assert_eq!(b.render(), "- [x] x\n- [ ] y\n");
    }

    #[test]
    fn table_is_a_literal_paragraph() {
        let mut b = Builder::new();
        b.add_table(["A", "B"], [["1", "2"]]);

        assert_eq!(b.render(), "| A | B |\n| --- | --- |\n| 1 | 2 |\n\n");
        let root_children = b.document().children(NodeId::ROOT);
        assert_eq!(root_children.len(), 1);
        assert!(matches!(
            b.document().kind(root_children[0]),
            Some(NodeKind::Paragraph { .. })
        ));
    }

    #[test]
    fn table_without_headers_is_skipped() {
        let mut b = Builder::new();
        b.add_table(Vec::<String>::new(), Vec::<Vec<String>>::new());
        assert!(b.document().is_empty());
    }

    #[test]
    fn empty_lists_render_nothing() {
        let mut b = Builder::new();
        b.add_list(Vec::<String>::new())
            .add_wrapped_list(Vec::<String>::new(), 10)
            .add_checklist(Vec::<String>::new(), &[true])
            .add_definition_list(Vec::<(String, String)>::new());
        assert_eq!(b.render(), "");
    }

    #[test]
    fn wrapped_list_records_continuations() {
        let mut b = Builder::new();
        b.add_wrapped_list(["alpha beta gamma", "", "delta"], 11);
        let doc = b.document();

        let list = doc.children(NodeId::ROOT)[0];
        let items = doc.children(list);
        // The blank entry produces no item
        assert_eq!(items.len(), 2);

        let flags: Vec<bool> = doc
            .children(items[0])
            .iter()
            .filter_map(|&id| match doc.kind(id) {
                Some(NodeKind::Paragraph { continuation, .. }) => Some(*continuation),
                _ => None,
            })
            .collect();
        assert_eq!(flags, vec![false, true]);
        assert_eq!(b.render(), "- alpha beta\n  gamma\n- delta\n");
    }

    #[test]
    fn section_content_is_a_sibling() {
        let mut b = Builder::new();
        b.add_section(2, "Section", |b| {
            b.add_paragraph("body");
            b.add_section(3, "Nested", |b| {
                b.add_list(["item"]);
            });
        });

        let doc = b.document();
        assert_eq!(doc.children(NodeId::ROOT).len(), 4);
        assert_eq!(b.render(), "## Section\n\nbody\n\n### Nested\n\n- item\n");
    }

    #[test]
    fn front_matter_block() {
        let mut b = Builder::new();
        b.add_front_matter([("description", "Rules"), ("alwaysApply", "true")])
            .add_header(1, "Body");
        assert_eq!(
            b.render(),
            "---\ndescription: Rules\nalwaysApply: true\n---\n\n# Body\n\n"
        );
    }

    #[test]
    fn line_break_is_blank() {
        let mut b = Builder::new();
        b.add_paragraph("a").add_line_break().add_paragraph("b");
        assert_eq!(b.render(), "a\n\n\n\n\nb\n\n");
    }

    #[test]
    fn each_combinator_validates_alone() {
        for (name, _, step) in steps() {
            let mut b = Builder::new();
            step(&mut b);
            assert!(!b.document().is_empty(), "{name} appended nothing");
            assert_eq!(b.validate(), Ok(()), "{name}");
        }
    }

    // Inline nodes carry no trailing newline, so a fence appended right after
    // one would not start a line; sequences only mix block-level calls.
    proptest! {
        #[test]
        fn block_combinator_sequences_validate(picks in prop::collection::vec(0usize..64, 0..24)) {
            let steps: Vec<Step> = steps().into_iter().filter(|(_, inline, _)| !inline).collect();
            let mut b = Builder::new();
            for pick in picks {
                (steps[pick % steps.len()].2)(&mut b);
            }
            prop_assert_eq!(b.validate(), Ok(()));
        }
    }

    #[test]
    fn every_combinator_validates() {
        let mut b = Builder::new();
        b.add_front_matter([("title", "All")])
            .add_header(1, "All")
            .add_paragraph("Text")
            .add_list(["a", "b"])
            .add_wrapped_list(["some long wrapped text for the list"], 10)
            .add_definition_list([("k", "v")])
            .add_checklist(["todo"], &[false])
            .add_table(["H"], [["c"]])
            .add_code_block("sh", "echo hi")
            .add_bold("bold")
            .add_inline_code("code")
            .add_link("link", "https://example.com")
            .add_line_break()
            .add_horizontal_rule()
            .add_section(2, "End", |b| {
                b.add_paragraph("done");
            });

        assert_eq!(b.validate(), Ok(()));
    }

    #[test]
    fn into_document_keeps_tree() {
        let mut b = Builder::new();
        b.add_paragraph("kept");
        let doc = b.into_document();
        assert_eq!(crate::render(&doc), "kept\n\n");
    }
}
