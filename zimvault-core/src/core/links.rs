//! Rewriting of Markdown links to renamed notes into wikilinks.

use crate::RenameTable;
use regex::Regex;
use std::sync::LazyLock;

/// `[display](target)`, shortest match, never crossing a line break.
static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[(.*?)\]\((.*?)\)").expect("valid link regex"));

const RELATIVE_PREFIX: &str = "./";

/// Outcome of [`rewrite_links`] on one document.
#[derive(Debug, Clone, PartialEq)]
pub struct LinkRewrite {
    pub content: String,
    /// Number of link occurrences replaced in the document.
    pub rewritten: usize,
}

/// Builds the wikilink for a link `target`, or `None` if no old name occurs in it.
///
/// Every table key found in the target is replaced by its new name, in table
/// order, each replacement seeing the result of the previous ones.
pub fn wikilink_for_target(target: &str, table: &RenameTable) -> Option<String> {
    let mut new_target = target.to_string();
    let mut matched = false;
    for (old_name, new_name) in table.iter() {
        if new_target.contains(old_name) {
            new_target = new_target.replace(old_name, new_name);
            matched = true;
        }
    }
    if !matched {
        return None;
    }
    let new_target = new_target
        .strip_prefix(RELATIVE_PREFIX)
        .unwrap_or(&new_target);
    Some(format!("[[{new_target}]]"))
}

/// Replaces links that point at renamed notes with `[[new name]]` wikilinks.
///
/// The display text is dropped. Each rewritten link text is replaced
/// everywhere it occurs in the document. Links whose target contains no old
/// name are left untouched.
pub fn rewrite_links(content: &str, table: &RenameTable) -> LinkRewrite {
    let mut replacements: Vec<(&str, String)> = Vec::new();
    if !table.is_empty() {
        for caps in LINK_RE.captures_iter(content) {
            let (Some(link), Some(target)) = (caps.get(0), caps.get(2)) else {
                continue;
            };
            let link = link.as_str();
            if replacements.iter().any(|(seen, _)| *seen == link) {
                continue;
            }
            if let Some(wikilink) = wikilink_for_target(target.as_str(), table) {
                replacements.push((link, wikilink));
            }
        }
    }

    let mut page = content.to_string();
    let mut rewritten = 0;
    for (link, wikilink) in replacements {
        let count = page.matches(link).count();
        if count > 0 {
            log::debug!("Replacing {link} with {wikilink}");
            page = page.replace(link, &wikilink);
            rewritten += count;
        }
    }
    LinkRewrite {
        content: page,
        rewritten,
    }
}
