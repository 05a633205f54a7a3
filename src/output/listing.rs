//! Colored listing formatter
//!
//! `ListingFormatter` implements `ListingOutput`: it writes each entry as
//! an ANSI-styled line straight to its writer, and skipped-entry
//! diagnostics to a separate error stream.

use std::io::{self, Write};

use termcolor::WriteColor;

use crate::classify::Classification;
use crate::entry::Entry;
use crate::error::ListError;
use crate::format::{format_mode, format_mtime, human_size};
use crate::walk::{Line, ListingOutput, RunConfig};

use super::identity::Identities;
use super::layout::{RowLayout, tree_prefix};

/// Prefix for diagnostics written to the error stream.
pub const DIAGNOSTIC_PREFIX: &str = "colorls";

/// Streaming formatter for short, long and tree listings.
pub struct ListingFormatter<'a, W: WriteColor, E: Write> {
    out: W,
    err: E,
    config: &'a RunConfig,
    identities: Identities,
    rows: RowLayout,
    skipped: usize,
}

impl<'a, W: WriteColor, E: Write> ListingFormatter<'a, W, E> {
    pub fn new(out: W, err: E, config: &'a RunConfig) -> Self {
        Self {
            out,
            err,
            config,
            identities: Identities::new(),
            rows: RowLayout::default(),
            skipped: 0,
        }
    }

    /// Number of entries or directories reported as skipped so far.
    pub fn skipped_count(&self) -> usize {
        self.skipped
    }

    /// Direct access to the output stream, e.g. for the closing report.
    pub fn out_mut(&mut self) -> &mut W {
        &mut self.out
    }

    pub fn into_parts(self) -> (W, E) {
        (self.out, self.err)
    }

    /// Write ` <glyph> <name>` in the entry's color, padded to `width`
    /// (or the name's length plus one), then `terminator` uncolored.
    fn write_name(
        &mut self,
        entry: &Entry,
        class: &Classification,
        expand: bool,
        width: Option<usize>,
        terminator: &str,
    ) -> io::Result<()> {
        let mut name = entry.name.clone();
        if self.config.classify {
            if let Some(c) = indicator(entry) {
                name.push(c);
            }
        }
        if expand && entry.is_symlink {
            if let Some(target) = &entry.link_target {
                name.push_str(" -> ");
                name.push_str(&target.display().to_string());
            }
        }

        let width = width.unwrap_or_else(|| name.chars().count() + 1);
        let glyph = self.config.theme.glyph(&class.glyph);

        self.out.set_color(&class.color.color())?;
        write!(self.out, " {} {:<width$}", glyph, name, width = width)?;
        self.out.reset()?;
        write!(self.out, "{}", terminator)
    }

    /// `mode nlink owner group size mtime` for long listings.
    fn long_fields(&self, entry: &Entry) -> String {
        let (owner, group) = if self.config.numeric_ids {
            (entry.uid.to_string(), entry.gid.to_string())
        } else {
            (
                self.identities.owner(entry.uid),
                self.identities.group(entry.gid),
            )
        };
        format!(
            "{} {:3} {:4} {:4} {} {}",
            format_mode(entry.mode),
            entry.nlink,
            owner,
            group,
            human_size(entry.size),
            format_mtime(entry.modified)
        )
    }
}

impl<W: WriteColor, E: Write> ListingOutput for ListingFormatter<'_, W, E> {
    fn heading(&mut self, dir: &Entry) -> io::Result<()> {
        let this = Classification::this();
        writeln!(self.out)?;
        self.out.set_color(&this.color.color())?;
        write!(
            self.out,
            " {} {}",
            self.config.theme.glyph(&this.glyph),
            dir.path.display()
        )?;
        self.out.reset()?;
        writeln!(self.out, ":")
    }

    fn start_rows(&mut self, longest_name: Option<usize>) -> io::Result<()> {
        self.rows = RowLayout::new(self.config.packing_width(), longest_name);
        Ok(())
    }

    fn entry(&mut self, entry: &Entry, class: &Classification, line: Line) -> io::Result<()> {
        match line {
            Line::Short => {
                let width = self.rows.column_width();
                self.write_name(entry, class, false, width, self.config.separator())?;
                if self.rows.place() {
                    writeln!(self.out)?;
                }
                Ok(())
            }
            Line::Long => {
                let fields = self.long_fields(entry);
                write!(self.out, "{} ", fields)?;
                self.write_name(entry, class, true, None, "\n")
            }
            Line::Tree { depth } => {
                write!(self.out, "{}", tree_prefix(depth))?;
                self.write_name(entry, class, true, None, "\n")
            }
        }
    }

    fn finish_rows(&mut self) -> io::Result<()> {
        if self.rows.row_open() && !self.config.one_per_line {
            writeln!(self.out)?;
        }
        self.rows = RowLayout::default();
        Ok(())
    }

    fn skipped(&mut self, error: &ListError) {
        self.skipped += 1;
        // A broken error stream must not stop the listing.
        let _ = writeln!(self.err, "{}: {}", DIAGNOSTIC_PREFIX, error);
    }
}

/// `-F` suffix: `@` link, `/` directory, `*` executable file.
fn indicator(entry: &Entry) -> Option<char> {
    if entry.is_symlink {
        Some('@')
    } else if entry.is_dir {
        Some('/')
    } else if entry.is_executable() {
        Some('*')
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use termcolor::Buffer;

    use super::*;
    use crate::classify::{Category, GlyphKey, classify};
    use crate::walk::DisplayMode;

    fn file(name: &str) -> Entry {
        Entry {
            path: PathBuf::from("/data").join(name),
            name: name.to_string(),
            is_dir: false,
            is_file: true,
            is_symlink: false,
            is_mount: false,
            size: 2048,
            modified: None,
            mode: 0o100644,
            uid: 4_000_000_001,
            gid: 4_000_000_002,
            nlink: 1,
            link_target: None,
        }
    }

    fn dir(name: &str) -> Entry {
        Entry {
            is_dir: true,
            is_file: false,
            mode: 0o040755,
            size: 4096,
            nlink: 2,
            ..file(name)
        }
    }

    fn render<F>(config: &RunConfig, f: F) -> (String, String)
    where
        F: FnOnce(&mut ListingFormatter<'_, Buffer, Vec<u8>>),
    {
        let mut fmt = ListingFormatter::new(Buffer::no_color(), Vec::new(), config);
        f(&mut fmt);
        let (out, err) = fmt.into_parts();
        (
            String::from_utf8(out.into_inner()).unwrap(),
            String::from_utf8(err).unwrap(),
        )
    }

    fn short(fmt: &mut ListingFormatter<'_, Buffer, Vec<u8>>, config: &RunConfig, e: &Entry) {
        fmt.entry(e, &classify(e, &config.theme), Line::Short).unwrap();
    }

    #[test]
    fn test_short_entry_is_glyph_then_padded_name() {
        let config = RunConfig::default();
        let (out, _) = render(&config, |fmt| {
            fmt.start_rows(Some(8)).unwrap();
            short(fmt, &config, &file("a.txt"));
            fmt.finish_rows().unwrap();
        });
        assert_eq!(out, format!(" {} a.txt   \t\n", Category::File.glyph()));
    }

    #[test]
    fn test_short_rows_break_at_max_per_row() {
        let config = RunConfig {
            terminal_width: Some(22),
            ..Default::default()
        };
        // width 22 / (1 + 10) = 2 per row
        let (out, _) = render(&config, |fmt| {
            fmt.start_rows(Some(1)).unwrap();
            for name in ["a", "b", "c", "d", "e"] {
                short(fmt, &config, &file(name));
            }
            fmt.finish_rows().unwrap();
        });
        let rows: Vec<&str> = out.lines().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].matches('\t').count(), 2);
        assert_eq!(rows[2].matches('\t').count(), 1);
    }

    #[test]
    fn test_one_per_line() {
        let config = RunConfig {
            one_per_line: true,
            terminal_width: Some(200),
            ..Default::default()
        };
        let (out, _) = render(&config, |fmt| {
            fmt.start_rows(Some(1)).unwrap();
            short(fmt, &config, &file("a"));
            short(fmt, &config, &file("b"));
            fmt.finish_rows().unwrap();
        });
        assert_eq!(out.lines().count(), 2);
        assert!(!out.contains('\t'));
        assert!(!out.contains("\n\n"));
    }

    #[test]
    fn test_classify_suffixes() {
        let config = RunConfig {
            classify: true,
            ..Default::default()
        };
        let mut exe = file("run");
        exe.mode = 0o100755;
        let mut link = file("ln");
        link.is_symlink = true;

        let (out, _) = render(&config, |fmt| {
            fmt.start_rows(None).unwrap();
            for e in [&dir("src"), &exe, &link, &file("plain")] {
                short(fmt, &config, e);
            }
            fmt.finish_rows().unwrap();
        });
        assert!(out.contains("src/"));
        assert!(out.contains("run*"));
        assert!(out.contains("ln@"));
        assert!(out.contains("plain \t"));
    }

    #[test]
    fn test_long_line_with_numeric_ids() {
        let config = RunConfig {
            mode: DisplayMode::Long,
            numeric_ids: true,
            ..Default::default()
        };
        let e = file("data.bin");
        let (out, _) = render(&config, |fmt| {
            fmt.entry(&e, &classify(&e, &config.theme), Line::Long).unwrap();
        });
        assert!(out.starts_with("-rw-r--r--   1 4000000001 4000000002    2K "), "{out}");
        assert!(out.ends_with("data.bin \n"), "{out}");
    }

    #[test]
    fn test_long_line_unresolvable_ids_fall_back() {
        let config = RunConfig {
            mode: DisplayMode::Long,
            ..Default::default()
        };
        let e = dir("src");
        let (out, _) = render(&config, |fmt| {
            fmt.entry(&e, &classify(&e, &config.theme), Line::Long).unwrap();
        });
        assert!(out.starts_with("drwxr-xr-x   2 4000000001 4000000002    4K "), "{out}");
    }

    #[test]
    fn test_long_and_tree_expand_symlinks() {
        let config = RunConfig::default();
        let mut link = file("current");
        link.is_symlink = true;
        link.link_target = Some(PathBuf::from("/data/v2"));

        let (out, _) = render(&config, |fmt| {
            let class = classify(&link, &config.theme);
            fmt.entry(&link, &class, Line::Tree { depth: 1 }).unwrap();
            fmt.start_rows(None).unwrap();
            fmt.entry(&link, &class, Line::Short).unwrap();
            fmt.finish_rows().unwrap();
        });
        let lines: Vec<&str> = out.lines().collect();
        assert!(lines[0].starts_with(&tree_prefix(1)));
        assert!(lines[0].contains("current -> /data/v2"));
        assert!(!lines[1].contains("->"));
    }

    #[test]
    fn test_glyph_key_differs_from_color_key() {
        let config = RunConfig::default();
        let e = file("notes.md");
        let class = classify(&e, &config.theme);
        assert_eq!(class.glyph, GlyphKey::Literal(".md".to_string()));

        let (out, _) = render(&config, |fmt| {
            fmt.entry(&e, &class, Line::Tree { depth: 0 }).unwrap();
        });
        assert!(out.contains(&format!(" \u{f48a} notes.md")));
    }

    #[test]
    fn test_heading_shows_full_path() {
        let config = RunConfig::default();
        let (out, _) = render(&config, |fmt| fmt.heading(&dir("proj")).unwrap());
        assert_eq!(out, format!("\n {} /data/proj:\n", Category::This.glyph()));
    }

    #[test]
    fn test_ansi_color_sequences() {
        let config = RunConfig::default();
        let mut fmt = ListingFormatter::new(Buffer::ansi(), Vec::new(), &config);
        let e = dir("src");
        fmt.entry(&e, &classify(&e, &config.theme), Line::Tree { depth: 0 })
            .unwrap();
        let (out, _) = fmt.into_parts();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert!(text.contains("\x1b[34m"), "{text:?}");
        assert!(text.contains("\x1b[0m"), "{text:?}");
    }

    #[test]
    fn test_skipped_goes_to_error_stream() {
        let config = RunConfig::default();
        let (out, err) = render(&config, |fmt| {
            fmt.skipped(&ListError::VanishedEntry(PathBuf::from("/data/tmp")));
            assert_eq!(fmt.skipped_count(), 1);
        });
        assert!(out.is_empty());
        assert!(err.starts_with("colorls: cannot access '/data/tmp'"));
    }
}
