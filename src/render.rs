use tracing::debug;

use crate::node::{Document, ItemRole, NodeId, NodeKind};

/// Serialize a document tree to markdown text.
///
/// A single pre-order walk; output order is insertion order.
pub fn render(doc: &Document) -> String {
    let mut out = String::new();
    emit_node(doc, doc.root(), &mut out);
    debug!(nodes = doc.len(), bytes = out.len(), "rendered document");
    out
}

fn emit_node(doc: &Document, id: NodeId, out: &mut String) {
    let Some(kind) = doc.kind(id) else {
        return;
    };

    match kind {
        NodeKind::Document => {}
        NodeKind::Heading { level, text } => {
            for _ in 0..*level {
                out.push('#');
            }
            out.push(' ');
            out.push_str(text);
            out.push_str("\n\n");
        }
        NodeKind::Paragraph { text, .. } => {
            // List items print their own paragraphs
            if !under_list_item(doc, id) {
                out.push_str(text);
                out.push_str("\n\n");
            }
        }
        NodeKind::List { .. } => {}
        NodeKind::ListItem { role } => emit_list_item(doc, id, *role, out),
        NodeKind::CodeBlock { language, code } => {
            out.push_str("```");
            out.push_str(language);
            out.push('\n');
            out.push_str(code);
            out.push_str("\n```\n\n");
        }
        NodeKind::InlineCode { text } => {
            out.push('`');
            out.push_str(text);
            out.push('`');
        }
        NodeKind::Strong { text } => {
            out.push_str("**");
            out.push_str(text);
            out.push_str("**");
        }
        NodeKind::Link { text, url } => {
            out.push('[');
            out.push_str(text);
            out.push_str("](");
            out.push_str(url);
            out.push(')');
        }
        NodeKind::HorizontalRule => {
            out.push_str("---\n\n");
        }
    }

    for &child in doc.children(id) {
        emit_node(doc, child, out);
    }
}

fn under_list_item(doc: &Document, id: NodeId) -> bool {
    doc.parent(id)
        .and_then(|parent| doc.kind(parent))
        .is_some_and(|kind| matches!(kind, NodeKind::ListItem { .. }))
}

fn emit_list_item(doc: &Document, id: NodeId, role: ItemRole, out: &mut String) {
    let children = doc.children(id);
    let Some(NodeKind::Paragraph { text, .. }) = children.first().and_then(|&c| doc.kind(c)) else {
        return;
    };

    match role {
        ItemRole::Bullet => out.push_str("- "),
        ItemRole::Term => {}
        ItemRole::Definition => out.push_str(": "),
        ItemRole::Task { checked: true } => out.push_str("- [x] "),
        ItemRole::Task { checked: false } => out.push_str("- [ ] "),
    }
    out.push_str(text);
    out.push('\n');

    for &child in &children[1..] {
        if let Some(NodeKind::Paragraph {
            text,
            continuation: true,
        }) = doc.kind(child)
        {
            out.push_str("  ");
            out.push_str(text);
            out.push('\n');
        }
    }
}
