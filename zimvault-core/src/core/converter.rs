//! Two-pass conversion of a Zim Markdown export into an Obsidian vault.

use crate::core::heading::normalize_note;
use crate::core::links::rewrite_links;
use crate::core::note::{join_lines, write_text, NoteFile};
use crate::core::tree::list_note_files;
use crate::{
    Collision, CollisionPolicy, ConversionReport, ConvertOptions, RenameRecord, RenameTable,
    Result, ZimvaultError,
};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

/// A conversion job over one note tree.
///
/// [`run`](Self::run) executes the rename pass followed by the link pass.
/// The [`RenameTable`] built by the first pass is handed to the second; the
/// passes can also be driven one at a time.
#[derive(Debug, Clone)]
pub struct Converter {
    root: PathBuf,
    options: ConvertOptions,
}

impl Converter {
    pub fn new<P: AsRef<Path>>(root: P, options: ConvertOptions) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            options,
        }
    }

    /// Converts the whole tree and returns what was done.
    ///
    /// # Errors
    ///
    /// Stops at the first [`ZimvaultError::Io`] or [`ZimvaultError::Walk`];
    /// files handled before the failure stay converted.
    pub fn run(&self) -> Result<ConversionReport> {
        log::info!("Converting Zim export in {}", self.root.display());
        let mut report = ConversionReport::default();
        let table = self.rename_pass(&mut report)?;
        self.link_pass(&table, &mut report)?;
        log::info!(
            "Done: {} notes, {} renamed, {} links rewritten",
            report.files_scanned,
            report.renames.len(),
            report.links_rewritten
        );
        Ok(report)
    }

    /// Renames every note after its level-1 title and normalizes its headings.
    ///
    /// The list of notes is taken before anything is renamed. A listed note
    /// that was replaced by an earlier rename in the same pass is not visited.
    pub fn rename_pass(&self, report: &mut ConversionReport) -> Result<RenameTable> {
        let mut table = RenameTable::new();
        let mut written = HashSet::new();
        for path in list_note_files(&self.root, &self.options.extension)? {
            if written.contains(&path) {
                log::debug!("Skipping \"{}\", it already holds a renamed note", path.display());
                continue;
            }
            if let Some(dest) = self.convert_note(&path, &mut table, report)? {
                written.insert(dest);
            }
        }
        Ok(table)
    }

    /// Converts one note and returns its new path if it was renamed.
    fn convert_note(
        &self,
        path: &Path,
        table: &mut RenameTable,
        report: &mut ConversionReport,
    ) -> Result<Option<PathBuf>> {
        log::info!("Reformatting \"{}\"", path.display());
        let note = NoteFile::read(path)?;
        report.files_scanned += 1;

        let normalized = normalize_note(&note.lines, &self.options);
        let content = join_lines(&normalized.lines);

        let destination = match normalized.title.as_deref() {
            Some("") => {
                log::warn!(
                    "\"{}\" has an empty title after sanitizing, keeping its name",
                    path.display()
                );
                None
            }
            Some(title) => Some(note.sibling_with_stem(title)).filter(|dest| dest != path),
            None => None,
        };

        match destination {
            Some(dest) if self.accept_destination(path, &dest, report) => {
                let old_name = note.file_name();
                let new_name = file_name_of(&dest);
                log::info!("Renaming \"{}\" to \"{}\"", path.display(), dest.display());
                fs::rename(path, &dest).map_err(|e| ZimvaultError::io(path, e))?;
                write_text(&dest, &content)?;
                report.files_written += 1;
                if !table.insert(old_name.clone(), new_name) {
                    log::warn!(
                        "A note named \"{old_name}\" was already renamed; \
                         links keep pointing at the first one"
                    );
                }
                report.renames.push(RenameRecord {
                    from: path.to_path_buf(),
                    to: dest.clone(),
                });
                Ok(Some(dest))
            }
            _ => {
                if content != note.content() {
                    write_text(path, &content)?;
                    report.files_written += 1;
                }
                Ok(None)
            }
        }
    }

    /// Checks `dest` for a collision and decides whether the rename goes ahead.
    fn accept_destination(
        &self,
        source: &Path,
        dest: &Path,
        report: &mut ConversionReport,
    ) -> bool {
        if !dest.exists() || is_same_file(source, dest) {
            return true;
        }
        let policy = self.options.on_collision;
        match policy {
            CollisionPolicy::Overwrite => log::warn!(
                "\"{}\" already exists and is replaced by \"{}\"",
                dest.display(),
                source.display()
            ),
            CollisionPolicy::Skip => log::warn!(
                "Cannot rename \"{}\" to \"{}\": file exists",
                source.display(),
                dest.display()
            ),
        }
        report.collisions.push(Collision {
            source: source.to_path_buf(),
            destination: dest.to_path_buf(),
            resolution: policy,
        });
        policy == CollisionPolicy::Overwrite
    }

    /// Rewrites links to renamed notes in every note of the tree.
    pub fn link_pass(&self, table: &RenameTable, report: &mut ConversionReport) -> Result<()> {
        for path in list_note_files(&self.root, &self.options.extension)? {
            log::info!("Adjusting links in \"{}\"", path.display());
            let content = fs::read_to_string(&path).map_err(|e| ZimvaultError::io(&path, e))?;
            let rewrite = rewrite_links(&content, table);
            if rewrite.rewritten > 0 {
                write_text(&path, &rewrite.content)?;
                report.files_written += 1;
                report.links_rewritten += rewrite.rewritten;
            }
        }
        Ok(())
    }
}

/// Whether both paths name the same file, e.g. `home.md` and `Home.md` on a
/// case-insensitive filesystem.
#[cfg(unix)]
fn is_same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn is_same_file(a: &Path, b: &Path) -> bool {
    matches!((fs::canonicalize(a), fs::canonicalize(b)), (Ok(a), Ok(b)) if a == b)
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    fn read(dir: &TempDir, name: &str) -> String {
        fs::read_to_string(dir.path().join(name)).unwrap()
    }

    fn run(dir: &TempDir) -> ConversionReport {
        Converter::new(dir.path(), ConvertOptions::default()).run().unwrap()
    }

    #[test]
    fn test_home_and_projects_scenario() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "Home.md",
            "# Home\n\nWelcome\n=======\nSee [Projects](./Projects.md).\n",
        );
        write(&dir, "Projects.md", "# My Projects\n\nList\n----\n- one\n");

        let report = run(&dir);

        assert_eq!(read(&dir, "Home.md"), "\n# Welcome\nSee [[My Projects.md]].\n");
        assert!(!dir.path().join("Projects.md").exists());
        assert_eq!(read(&dir, "My Projects.md"), "\n## List\n- one\n");
        assert_eq!(report.files_scanned, 2);
        assert_eq!(report.renames.len(), 1);
        assert_eq!(report.links_rewritten, 1);
        assert!(report.collisions.is_empty());
    }

    #[test]
    fn test_rename_pass_builds_table() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "# Alpha\nx");
        write(&dir, "b.md", "# b\ny");
        write(&dir, "c.md", "no title");

        let converter = Converter::new(dir.path(), ConvertOptions::default());
        let mut report = ConversionReport::default();
        let table = converter.rename_pass(&mut report).unwrap();

        assert_eq!(table.len(), 1);
        assert_eq!(table.get("a.md"), Some("Alpha.md"));
        assert_eq!(read(&dir, "Alpha.md"), "x");
        assert_eq!(read(&dir, "b.md"), "y");
        assert_eq!(read(&dir, "c.md"), "no title");
    }

    #[test]
    fn test_single_dash_file_is_unchanged() {
        let dir = TempDir::new().unwrap();
        write(&dir, "dash.md", "-");
        let report = run(&dir);
        assert_eq!(read(&dir, "dash.md"), "-");
        assert_eq!(report.files_written, 0);
    }

    #[test]
    fn test_plain_file_round_trips() {
        let dir = TempDir::new().unwrap();
        let text = "first line\n\n* item\n  text [link](https://example.com)\n";
        write(&dir, "plain.md", text);
        run(&dir);
        assert_eq!(read(&dir, "plain.md"), text);
    }

    #[test]
    fn test_edge_case_files_do_not_fail() {
        let dir = TempDir::new().unwrap();
        write(&dir, "empty.md", "");
        write(&dir, "heading.md", "# Only");
        write(&dir, "underline.md", "# Title\n===\ntext");

        run(&dir);

        assert_eq!(read(&dir, "empty.md"), "");
        assert_eq!(read(&dir, "Only.md"), "");
        assert!(!dir.path().join("heading.md").exists());
        assert_eq!(read(&dir, "Title.md"), "===\ntext");
    }

    #[test]
    fn test_renamed_file_names_are_sanitized() {
        let dir = TempDir::new().unwrap();
        write(&dir, "q.md", "# What's \"up\"?*\nbody");
        run(&dir);
        assert_eq!(read(&dir, "Whats up.md"), "body");
    }

    #[test]
    fn test_subdirectories_are_converted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Home.md", "# Home\n[child](./Home/child.md)");
        write(&dir, "Home/child.md", "# The Child\ntext");

        run(&dir);

        assert_eq!(read(&dir, "Home/The Child.md"), "text");
        assert_eq!(read(&dir, "Home.md"), "[[Home/The Child.md]]");
    }

    #[test]
    fn test_collision_overwrites_by_default() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "# Same\nfrom a");
        write(&dir, "b.md", "# Same\nfrom b");

        let report = run(&dir);

        assert_eq!(read(&dir, "Same.md"), "from b");
        assert!(!dir.path().join("a.md").exists());
        assert!(!dir.path().join("b.md").exists());
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].resolution, CollisionPolicy::Overwrite);
    }

    #[test]
    fn test_collision_skip_keeps_original() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "# Same\nfrom a");
        write(&dir, "b.md", "# Same\nfrom b\n[a](./a.md) [b](./b.md)");

        let options = ConvertOptions {
            on_collision: CollisionPolicy::Skip,
            ..ConvertOptions::default()
        };
        let report = Converter::new(dir.path(), options).run().unwrap();

        assert_eq!(read(&dir, "Same.md"), "from a");
        assert_eq!(read(&dir, "b.md"), "from b\n[[Same.md]] [b](./b.md)");
        assert_eq!(report.collisions.len(), 1);
        assert_eq!(report.collisions[0].resolution, CollisionPolicy::Skip);
    }

    #[test]
    fn test_overwritten_note_is_not_visited_again() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "# c\nIntro\n=====\ntext");
        write(&dir, "c.md", "old c");

        let report = run(&dir);

        assert_eq!(read(&dir, "c.md"), "# Intro\ntext");
        assert!(!dir.path().join("a.md").exists());
        assert!(!dir.path().join("Intro.md").exists());
        assert_eq!(report.files_scanned, 1);
        assert_eq!(report.renames.len(), 1);
        assert_eq!(report.collisions.len(), 1);
    }

    #[test]
    fn test_crlf_note_is_converted() {
        let dir = TempDir::new().unwrap();
        write(&dir, "n.md", "# Note\r\nWelcome\r\n=======\r\nbody\r\n");
        run(&dir);
        assert_eq!(read(&dir, "Note.md"), "# Welcome\nbody\n");
    }

    #[cfg(unix)]
    #[test]
    fn test_rename_onto_same_file_is_not_a_collision() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.md", "# same\nbody");
        fs::hard_link(dir.path().join("a.md"), dir.path().join("same.md")).unwrap();

        let options = ConvertOptions {
            on_collision: CollisionPolicy::Skip,
            ..ConvertOptions::default()
        };
        let report = Converter::new(dir.path(), options).run().unwrap();

        assert!(report.collisions.is_empty());
        assert_eq!(report.renames.len(), 1);
        assert_eq!(read(&dir, "same.md"), "body");
    }

    #[test]
    fn test_second_run_is_idempotent() {
        let dir = TempDir::new().unwrap();
        write(&dir, "Home.md", "# Home\n\nIntro\n=====\n[p](./p.md)\n");
        write(&dir, "p.md", "# Plans\n\nSteps\n-----\n");

        run(&dir);
        let home = read(&dir, "Home.md");
        let plans = read(&dir, "Plans.md");

        let report = run(&dir);
        assert_eq!(read(&dir, "Home.md"), home);
        assert_eq!(read(&dir, "Plans.md"), plans);
        assert!(report.renames.is_empty());
        assert_eq!(report.files_written, 0);
    }

    #[test]
    fn test_markup_conversion_when_enabled() {
        let dir = TempDir::new().unwrap();
        write(&dir, "t.md", "# Tasks\n☐ buy __milk__ @shop\n***\n```\n@raw\n```\n");
        let options = ConvertOptions {
            convert_markup: true,
            ..ConvertOptions::default()
        };
        Converter::new(dir.path(), options).run().unwrap();
        assert_eq!(
            read(&dir, "Tasks.md"),
            "- [ ] buy ==milk== #shop\n---\n```\n@raw\n```\n"
        );
    }

    #[test]
    fn test_invalid_root_fails() {
        let dir = TempDir::new().unwrap();
        let result = Converter::new(dir.path().join("missing"), ConvertOptions::default()).run();
        assert!(matches!(result, Err(ZimvaultError::InvalidRoot(_))));
    }
}
