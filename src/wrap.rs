//! Greedy word wrapping.

/// Wrap `text` into lines of at most `width` characters.
///
/// Words are split on runs of whitespace and packed greedily. A word longer
/// than `width` is never broken; it gets a line of its own. Empty or
/// whitespace-only input yields no lines.
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();

        if current_len == 0 {
            current.push_str(word);
            current_len = word_len;
        } else if current_len + 1 + word_len <= width {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_len = word_len;
        }
    }

    if current_len > 0 {
        lines.push(current);
    }

    lines
}

/// Re-wrap long prose lines of an already rendered markdown document.
///
/// Only lines longer than `width` are touched. Headings, list items, table
/// rows, indented lines and anything inside a fenced code block pass through
/// unchanged.
pub fn wrap_markdown(content: &str, width: usize) -> String {
    let mut out: Vec<String> = Vec::new();
    let mut in_fence = false;

    for line in content.split('\n') {
        if is_fence(line) {
            in_fence = !in_fence;
            out.push(line.to_string());
            continue;
        }

        if in_fence || is_structural(line) || line.chars().count() <= width {
            out.push(line.to_string());
            continue;
        }

        out.extend(wrap_text(line, width));
    }

    out.join("\n")
}

fn is_fence(line: &str) -> bool {
    line.starts_with("```") || line.starts_with("~~~")
}

fn is_structural(line: &str) -> bool {
    line.starts_with('#')
        || line.starts_with('|')
        || line.starts_with('\t')
        || line.starts_with("- ")
        || line.starts_with("* ")
        || line.starts_with("  ")
}
