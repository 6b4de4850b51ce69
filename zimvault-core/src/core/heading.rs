//! Title extraction and setext-to-ATX heading normalization.
//!
//! Zim writes the page title as a level-1 ATX heading on the first line and
//! uses setext underlines (`===` / `---`) for headings inside the page.
//! [`normalize_note`] turns such a page into a title plus an ATX-only body.

use crate::core::markup::MarkupConverter;
use crate::ConvertOptions;

const TITLE_PREFIX: &str = "# ";

/// Result of normalizing one note's lines.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedNote {
    /// Sanitized title taken from the first line, if it was a level-1 heading.
    pub title: Option<String>,
    /// Body lines with the title line removed and setext headings converted.
    pub lines: Vec<String>,
}

/// Returns the trimmed heading text if `first_line` is a level-1 ATX heading.
pub fn extract_title(first_line: &str) -> Option<String> {
    first_line
        .strip_prefix(TITLE_PREFIX)
        .map(|title| title.trim().to_string())
}

/// Deletes every forbidden character from `candidate`. No trimming afterwards.
pub fn sanitize_file_name(candidate: &str, forbidden: &[char]) -> String {
    candidate.chars().filter(|c| !forbidden.contains(c)).collect()
}

/// Splits off the title line and normalizes the remaining body.
pub fn normalize_note(lines: &[String], options: &ConvertOptions) -> NormalizedNote {
    let title = lines
        .first()
        .and_then(|first| extract_title(first))
        .map(|t| sanitize_file_name(&t, &options.forbidden_characters));
    let body = if title.is_some() { &lines[1..] } else { lines };
    let mut markup = options.convert_markup.then(MarkupConverter::new);
    NormalizedNote {
        title,
        lines: convert_setext_headings(body, markup.as_mut()),
    }
}

fn is_underline(line: &str, marker: char) -> bool {
    !line.is_empty() && line.chars().all(|c| c == marker)
}

/// Converts setext headings to ATX headings in a single forward scan.
///
/// One line is held back at a time because the line after it decides
/// whether it is a heading. An underline is only recognised when a line is
/// held; it is consumed and never emitted.
///
/// When a [`MarkupConverter`] is supplied, `***` rulers become `---` and
/// every emitted line goes through the converter's inline rewriting.
pub fn convert_setext_headings(
    lines: &[String],
    mut markup: Option<&mut MarkupConverter>,
) -> Vec<String> {
    let mut output = Vec::with_capacity(lines.len());
    let mut rest = lines.iter();

    let mut held: Option<String> = rest.next().map(|first| match markup.as_deref_mut() {
        Some(m) if is_underline(first, '*') => m.ruler(),
        Some(m) => m.convert_line(first),
        None => first.clone(),
    });

    for line in rest {
        held = match held.take() {
            Some(text) if is_underline(line, '=') => {
                log::debug!("Converting 1st level heading \"{text}\"");
                Some(format!("# {text}"))
            }
            Some(text) if is_underline(line, '-') => {
                log::debug!("Converting 2nd level heading \"{text}\"");
                Some(format!("## {text}"))
            }
            previous => {
                output.extend(previous);
                Some(match markup.as_deref_mut() {
                    Some(m) if is_underline(line, '*') => m.ruler(),
                    Some(m) => m.convert_line(line),
                    None => line.clone(),
                })
            }
        };
    }

    output.extend(held);
    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::note::split_lines;

    fn lines(text: &str) -> Vec<String> {
        split_lines(text)
    }

    fn convert(text: &str) -> Vec<String> {
        convert_setext_headings(&lines(text), None)
    }

    #[test]
    fn test_extract_title() {
        assert_eq!(extract_title("# Home"), Some("Home".to_string()));
        assert_eq!(extract_title("#   Spaced Out  "), Some("Spaced Out".to_string()));
        assert_eq!(extract_title("## Second"), None);
        assert_eq!(extract_title("#NoSpace"), None);
        assert_eq!(extract_title("Plain text"), None);
    }

    #[test]
    fn test_sanitize_file_name_deletes_forbidden_characters() {
        let forbidden = ConvertOptions::default().forbidden_characters;
        assert_eq!(
            sanitize_file_name("What's \"new\"? *Everything*", &forbidden),
            "Whats new Everything"
        );
        // No second trim after deletion.
        assert_eq!(sanitize_file_name("Why ?", &forbidden), "Why ");
    }

    #[test]
    fn test_setext_level_one_and_two() {
        assert_eq!(
            convert("Title\n=====\ntext\nSub\n---\nmore"),
            vec!["# Title", "text", "## Sub", "more"]
        );
    }

    #[test]
    fn test_single_dash_line_passes_through() {
        assert_eq!(convert("-"), vec!["-"]);
        assert_eq!(convert("="), vec!["="]);
    }

    #[test]
    fn test_dash_after_first_line_is_underline() {
        assert_eq!(convert("-\n-"), vec!["## -"]);
    }

    #[test]
    fn test_empty_body_produces_nothing() {
        assert!(convert_setext_headings(&[], None).is_empty());
    }

    #[test]
    fn test_trailing_empty_line_round_trips() {
        assert_eq!(convert("a\nb\n"), vec!["a", "b", ""]);
    }

    #[test]
    fn test_plain_body_is_untouched() {
        let text = "just\n\nsome lines\n- a list item\n";
        assert_eq!(convert(text), lines(text));
    }

    #[test]
    fn test_normalize_note_with_title() {
        let options = ConvertOptions::default();
        let note = normalize_note(&lines("# Home\n\nWelcome\n=======\nSee it.\n"), &options);
        assert_eq!(note.title.as_deref(), Some("Home"));
        assert_eq!(note.lines, vec!["", "# Welcome", "See it.", ""]);
    }

    #[test]
    fn test_normalize_note_without_title_keeps_first_line() {
        let options = ConvertOptions::default();
        let note = normalize_note(&lines("## Not a title\nbody"), &options);
        assert_eq!(note.title, None);
        assert_eq!(note.lines, vec!["## Not a title", "body"]);
    }

    #[test]
    fn test_normalize_heading_only_note() {
        let options = ConvertOptions::default();
        let note = normalize_note(&lines("# Only"), &options);
        assert_eq!(note.title.as_deref(), Some("Only"));
        assert!(note.lines.is_empty());
    }

    #[test]
    fn test_normalize_empty_note() {
        let options = ConvertOptions::default();
        let note = normalize_note(&lines(""), &options);
        assert_eq!(note.title, None);
        assert_eq!(note.lines, vec![""]);
    }

    #[test]
    fn test_normalize_sanitizes_title() {
        let options = ConvertOptions::default();
        let note = normalize_note(&lines("# \"Quoted\" *Title*?\nx"), &options);
        assert_eq!(note.title.as_deref(), Some("Quoted Title"));
    }

    #[test]
    fn test_markup_rulers_when_enabled() {
        let mut markup = MarkupConverter::new();
        let out = convert_setext_headings(&lines("text\n***\nmore"), Some(&mut markup));
        assert_eq!(out, vec!["text", "---", "more"]);
    }

    #[test]
    fn test_stars_untouched_without_markup() {
        assert_eq!(convert("text\n***\nmore"), vec!["text", "***", "more"]);
    }
}
