//! Core library for zimvault: turns a Zim Markdown export into an Obsidian vault.
//!
//! The primary entry point is [`Converter`], which runs the rename pass
//! (titles become file names, setext headings become ATX headings) and then
//! the link pass (links to renamed notes become `[[wikilinks]]`).
//!
//! Types are re-exported from their respective sub-modules for convenience;
//! consumers should import from the crate root rather than the `core` module.

pub mod core;

// Re-export commonly used types.
#[doc(inline)]
pub use core::{
    converter::Converter,
    error::{Result, ZimvaultError},
    heading::{
        convert_setext_headings, extract_title, normalize_note, sanitize_file_name,
        NormalizedNote,
    },
    links::{rewrite_links, wikilink_for_target, LinkRewrite},
    markup::MarkupConverter,
    note::NoteFile,
    options::{CollisionPolicy, ConvertOptions, DEFAULT_OPTIONS_FILE},
    preprocess::{normalize_extensions, restore_indentation},
    rename_table::RenameTable,
    report::{Collision, ConversionReport, RenameRecord},
    tree::list_note_files,
};
