//! Entry classification
//!
//! Maps an entry snapshot to the category that picks its color and to the
//! key that picks its glyph. The two are resolved independently: a `.md`
//! file is colored as a plain file but drawn with the markdown glyph.

use std::path::Path;

use serde::Deserialize;
use termcolor::{Color, ColorSpec};

use crate::entry::Entry;
use crate::theme::Theme;

/// Visual category of an entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    /// The directory being listed (used for headings).
    This,
    Dir,
    File,
    Link,
    Mount,
    None,
    Archive,
    Image,
    Video,
    Audio,
    Document,
    Spreadsheet,
    Presentation,
}

impl Category {
    /// Terminal style for this category.
    pub fn color(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Category::This => spec.set_bold(true),
            Category::Dir => spec.set_fg(Some(Color::Blue)),
            Category::File => spec.set_fg(Some(Color::Green)),
            Category::Link => spec.set_fg(Some(Color::Cyan)),
            Category::Mount => spec.set_fg(Some(Color::White)),
            Category::None => &mut spec,
            Category::Archive => spec.set_fg(Some(Color::Red)),
            Category::Image => spec.set_fg(Some(Color::Magenta)),
            Category::Video | Category::Audio => spec.set_fg(Some(Color::Yellow)),
            Category::Document => spec.set_fg(Some(Color::Blue)).set_intense(true),
            Category::Spreadsheet => spec.set_fg(Some(Color::Green)).set_intense(true),
            Category::Presentation => spec.set_fg(Some(Color::Red)).set_intense(true),
        };
        spec
    }

    /// Nerd Font glyph for this category.
    pub fn glyph(self) -> &'static str {
        match self {
            Category::This => "\u{f07c}",
            Category::Dir => "\u{f07b}",
            Category::File => "\u{f016}",
            Category::Link => "\u{f838}",
            Category::Mount => "\u{f0a0}",
            Category::None => "\u{f445}",
            Category::Archive => "\u{f1c6}",
            Category::Image => "\u{f1c5}",
            Category::Video => "\u{f1c8}",
            Category::Audio => "\u{f1c7}",
            Category::Document => "\u{f1c2}",
            Category::Spreadsheet => "\u{f1c3}",
            Category::Presentation => "\u{f1c4}",
        }
    }
}

/// Key used to pick a glyph: a literal table key or a category fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GlyphKey {
    Literal(String),
    Category(Category),
}

/// Result of classifying one entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub color: Category,
    pub glyph: GlyphKey,
}

impl Classification {
    /// Classification used for directory headings.
    pub fn this() -> Self {
        Self {
            color: Category::This,
            glyph: GlyphKey::Category(Category::This),
        }
    }
}

/// Case-folded lookup keys of a file name: `.ext` and stem.
///
/// # Examples
///
/// ```
/// use colorls::classify::lookup_keys;
///
/// assert_eq!(lookup_keys("Report.PDF"), (Some(".pdf".to_string()), "report".to_string()));
/// assert_eq!(lookup_keys(".gitignore"), (None, ".gitignore".to_string()));
/// assert_eq!(lookup_keys("README"), (None, "readme".to_string()));
/// ```
pub fn lookup_keys(name: &str) -> (Option<String>, String) {
    let path = Path::new(name);
    let ext = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()));
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| name.to_lowercase());
    (ext, stem)
}

/// Classify an entry. Total and deterministic; first matching rule wins.
pub fn classify(entry: &Entry, theme: &Theme) -> Classification {
    let (ext, stem) = lookup_keys(&entry.name);
    let ext = ext.as_deref();

    let color = ext
        .and_then(|e| theme.color_override(e))
        .or_else(|| theme.color_override(&stem))
        .or_else(|| ext.and_then(|e| theme.list_category(e)))
        .unwrap_or_else(|| kind_category(entry));

    let glyph = ext
        .filter(|e| theme.glyph_override(e).is_some())
        .or_else(|| Some(stem.as_str()).filter(|s| theme.glyph_override(s).is_some()))
        .map(|key| GlyphKey::Literal(key.to_string()))
        .unwrap_or(GlyphKey::Category(color));

    Classification { color, glyph }
}

fn kind_category(entry: &Entry) -> Category {
    if entry.is_symlink {
        Category::Link
    } else if entry.is_dir {
        Category::Dir
    } else if entry.is_file {
        Category::File
    } else if entry.is_mount {
        Category::Mount
    } else {
        Category::None
    }
}
