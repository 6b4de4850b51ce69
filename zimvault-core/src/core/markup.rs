//! Optional rewriting of Zim-specific inline markup into Obsidian syntax.
//!
//! Enabled with [`ConvertOptions::convert_markup`](crate::ConvertOptions).
//! Fenced code blocks and inline code spans are left alone.

use regex::Regex;
use std::sync::LazyLock;

const CODE_BLOCK_MARKER: &str = "```";
const INLINE_CODE_MARKER: char = '`';
const RULER: &str = "---";

/// Zim checkbox glyph and the Obsidian task marker it becomes.
const CHECKBOXES: [(char, &str); 5] = [
    ('☐', "[ ]"),
    ('☑', "[x]"),
    ('☒', "[c]"),
    ('▷', "[>]"),
    ('◁', "[<]"),
];

static CHECKBOX_RES: LazyLock<Vec<(Regex, String)>> = LazyLock::new(|| {
    CHECKBOXES
        .iter()
        .map(|(glyph, task)| {
            let re = Regex::new(&format!(r"(?:\* )*{glyph}")).expect("valid checkbox regex");
            (re, format!("- {task}"))
        })
        .collect()
});

static HIGHLIGHT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"__(.+?)__").expect("valid highlight regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"@(\S)").expect("valid tag regex"));

/// Line-by-line markup converter. Tracks whether the scan is inside a fenced
/// code block, so one instance must see the lines of a note in order.
#[derive(Debug, Default)]
pub struct MarkupConverter {
    in_code_block: bool,
}

impl MarkupConverter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replacement for a line made only of `*`.
    pub fn ruler(&self) -> String {
        log::debug!("Converting horizontal ruler");
        RULER.to_string()
    }

    pub fn convert_line(&mut self, line: &str) -> String {
        if line.starts_with(CODE_BLOCK_MARKER) {
            self.in_code_block = !self.in_code_block;
        }
        if self.in_code_block {
            return line.to_string();
        }

        // Odd chunks sit between backticks and are inline code.
        line.split(INLINE_CODE_MARKER)
            .enumerate()
            .map(|(i, chunk)| {
                if i % 2 == 1 {
                    chunk.to_string()
                } else {
                    convert_text(chunk)
                }
            })
            .collect::<Vec<_>>()
            .join(&INLINE_CODE_MARKER.to_string())
    }
}

/// Applies checkbox, highlighting and tag conversion to plain text.
pub fn convert_text(text: &str) -> String {
    let mut text = text.to_string();
    for (re, task) in CHECKBOX_RES.iter() {
        text = re.replace_all(&text, task.as_str()).into_owned();
    }
    text = HIGHLIGHT_RE.replace_all(&text, "==${1}==").into_owned();
    if text.contains('@') {
        log::debug!("Converting tags");
        text = TAG_RE.replace_all(&text, "#${1}").into_owned();
    }
    text
}
