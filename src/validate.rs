use pulldown_cmark::{CodeBlockKind, Event, Options, Parser, Tag, TagEnd};
use thiserror::Error;
use tracing::debug;

/// Structural problems found when re-parsing rendered markdown.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("code fence opened on line {line} is never closed")]
    UnterminatedFence { line: usize },

    #[error("unbalanced markdown structure: {open} opened, {close} closed")]
    UnbalancedTags { open: usize, close: usize },
}

/// Parse `markdown` and report constructs that did not come out the way a
/// well-formed render would produce them.
///
/// This is a smoke test: passing means the text parses cleanly, not that it
/// means what the builder intended.
pub fn validate(markdown: &str) -> Result<(), ValidationError> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_TASKLISTS);
    let parser = Parser::new_ext(markdown, options).into_offset_iter();

    let mut stack: Vec<TagEnd> = Vec::new();
    let mut open = 0;
    let mut close = 0;

    for (event, range) in parser {
        match event {
            Event::Start(tag) => {
                if let Tag::CodeBlock(CodeBlockKind::Fenced(_)) = &tag {
                    let block = &markdown[range.clone()];
                    if !has_closing_fence(block) {
                        return Err(ValidationError::UnterminatedFence {
                            line: line_of(markdown, range.start),
                        });
                    }
                }
                open += 1;
                stack.push(tag.to_end());
            }
            Event::End(end) => {
                close += 1;
                if stack.pop() != Some(end) {
                    return Err(ValidationError::UnbalancedTags { open, close });
                }
            }
            _ => {}
        }
    }

    if !stack.is_empty() {
        return Err(ValidationError::UnbalancedTags { open, close });
    }

    debug!(blocks = open, "markdown validated");
    Ok(())
}

/// A fenced block's source span ends with its closing fence, if it has one.
///
/// Lines inside block quotes and list items carry container prefixes, so
/// those are stripped before comparing fence runs.
fn has_closing_fence(block: &str) -> bool {
    let mut lines = block.trim_end_matches(['\n', '\r']).lines();
    let Some(opening) = lines.next() else {
        return false;
    };
    let opening = strip_container(opening);
    let Some(fence_char) = opening.chars().next() else {
        return false;
    };
    let fence_len = opening.chars().take_while(|&c| c == fence_char).count();

    match lines.last() {
        Some(last) => {
            let last = strip_container(last).trim_end();
            last.chars().count() >= fence_len && last.chars().all(|c| c == fence_char)
        }
        None => false,
    }
}

fn strip_container(line: &str) -> &str {
    line.trim_start_matches(|c: char| c == '>' || c == ' ' || c == '\t')
}

fn line_of(text: &str, offset: usize) -> usize {
    text[..offset].matches('\n').count() + 1
}
