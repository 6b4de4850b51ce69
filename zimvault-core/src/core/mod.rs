//! Internal domain modules for the zimvault core library.
//!
//! All public types from these modules are re-exported at the crate root
//! with `#[doc(inline)]`; import from there in preference to this module.

pub mod converter;
pub mod error;
pub mod heading;
pub mod links;
pub mod markup;
pub mod note;
pub mod options;
pub mod preprocess;
pub mod rename_table;
pub mod report;
pub mod tree;

#[doc(inline)]
pub use converter::Converter;
#[doc(inline)]
pub use error::{Result, ZimvaultError};
#[doc(inline)]
pub use heading::{
    convert_setext_headings, extract_title, normalize_note, sanitize_file_name, NormalizedNote,
};
#[doc(inline)]
pub use links::{rewrite_links, wikilink_for_target, LinkRewrite};
#[doc(inline)]
pub use markup::MarkupConverter;
#[doc(inline)]
pub use note::NoteFile;
#[doc(inline)]
pub use options::{CollisionPolicy, ConvertOptions, DEFAULT_OPTIONS_FILE};
#[doc(inline)]
pub use preprocess::{normalize_extensions, restore_indentation};
#[doc(inline)]
pub use rename_table::RenameTable;
#[doc(inline)]
pub use report::{Collision, ConversionReport, RenameRecord};
#[doc(inline)]
pub use tree::list_note_files;
