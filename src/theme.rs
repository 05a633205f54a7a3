//! Color and glyph tables
//!
//! A `Theme` holds the data the classifier consults: literal overrides for
//! colors and glyphs (keyed by `.ext` or by stem, always lowercase) and the
//! extension lists that define the media and document categories. The
//! compiled-in defaults can be extended from a TOML file.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::{Category, GlyphKey};
use crate::error::ListError;

/// Environment variable naming a theme file.
pub const CONFIG_ENV: &str = "COLORLS_CONFIG";

/// Theme file looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".colorls.toml";

const COLOR_OVERRIDES: &[(&str, Category)] = &[
    ("readme", Category::Document),
    ("license", Category::Document),
];

const GLYPH_OVERRIDES: &[(&str, &str)] = &[
    (".py", "\u{f81f}"),
    (".pyc", "\u{f820}"),
    (".doc", "\u{f1c2}"),
    (".docx", "\u{f1c2}"),
    (".docm", "\u{f1c2}"),
    (".odt", "\u{f1c2}"),
    (".c", "\u{e61e}"),
    (".cpp", "\u{e61d}"),
    (".vscode", "\u{e70c}"),
    (".vim", "\u{e7c5}"),
    (".pdf", "\u{f1c1}"),
    (".zip", "\u{f1c6}"),
    (".tar", "\u{f1c6}"),
    (".gz", "\u{f1c6}"),
    (".7z", "\u{f1c6}"),
    (".key", "\u{f80a}"),
    (".cur", "\u{f245}"),
    (".md", "\u{f48a}"),
    (".gitignore", "\u{e702}"),
    (".git", "\u{e5fb}"),
    (".appimage", "\u{f992}"),
    (".exe", "\u{e62a}"),
    (".xml", "\u{fabf}"),
    (".html", "\u{f121}"),
    (".r", "\u{f4f7}"),
    ("readme", "\u{e28b}"),
    (".js", "\u{e74e}"),
    (".php", "\u{f81e}"),
    (".json", "\u{e60b}"),
    (".yml", "\u{e60b}"),
    (".sh", "\u{f120}"),
    (".java", "\u{e738}"),
    (".jar", "\u{f53b}"),
    (".img", "\u{faed}"),
    (".iso", "\u{faed}"),
    (".rs", "\u{e7a8}"),
    (".toml", "\u{e615}"),
];

const ARCHIVE_FORMATS: &[&str] = &[".zip", ".tar", ".tgz", ".gz", ".bz2", ".xz", ".7z"];
const IMAGE_FORMATS: &[&str] = &[".png", ".tif", ".tiff", ".jpg", ".jpeg", ".gif", ".bmp", ".svg"];
const VIDEO_FORMATS: &[&str] = &[".wmv", ".mpg", ".mpeg", ".divx", ".xvid", ".mp4", ".mkv"];
const AUDIO_FORMATS: &[&str] = &[".mp3", ".wma", ".m4a"];
const DOC_FORMATS: &[&str] = &[".doc", ".docx", ".docm", ".odt"];
const SPREADSHEET_FORMATS: &[&str] = &[".xls", ".xlsx", ".xlsm", ".ods"];
const PRESENTATION_FORMATS: &[&str] = &[".ppt", ".pps", ".pptx", ".odp"];

/// Injectable lookup tables for classification and glyph selection.
#[derive(Debug, Clone)]
pub struct Theme {
    colors: HashMap<String, Category>,
    glyphs: HashMap<String, String>,
    lists: Vec<(Category, Vec<String>)>,
}

impl Default for Theme {
    fn default() -> Self {
        let lists = [
            (Category::Archive, ARCHIVE_FORMATS),
            (Category::Image, IMAGE_FORMATS),
            (Category::Video, VIDEO_FORMATS),
            (Category::Audio, AUDIO_FORMATS),
            (Category::Document, DOC_FORMATS),
            (Category::Spreadsheet, SPREADSHEET_FORMATS),
            (Category::Presentation, PRESENTATION_FORMATS),
        ]
        .into_iter()
        .map(|(cat, exts)| (cat, exts.iter().map(|e| e.to_string()).collect()))
        .collect();

        let theme = Self {
            colors: HashMap::new(),
            glyphs: HashMap::new(),
            lists,
        };
        let theme = COLOR_OVERRIDES
            .iter()
            .fold(theme, |t, (key, cat)| t.with_color(key, *cat));
        GLYPH_OVERRIDES
            .iter()
            .fold(theme, |t, (key, glyph)| t.with_glyph(key, glyph))
    }
}

/// On-disk shape of a theme file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ThemeFile {
    #[serde(default)]
    colors: HashMap<String, Category>,
    #[serde(default)]
    glyphs: HashMap<String, String>,
}

impl Theme {
    /// Theme without overrides or category lists; every entry falls back to
    /// its kind.
    pub fn empty() -> Self {
        Self {
            colors: HashMap::new(),
            glyphs: HashMap::new(),
            lists: Vec::new(),
        }
    }

    pub fn with_color(mut self, key: &str, category: Category) -> Self {
        self.colors.insert(key.to_lowercase(), category);
        self
    }

    pub fn with_glyph(mut self, key: &str, glyph: &str) -> Self {
        self.glyphs.insert(key.to_lowercase(), glyph.to_string());
        self
    }

    pub fn with_list(mut self, category: Category, extensions: &[&str]) -> Self {
        self.lists.push((
            category,
            extensions.iter().map(|e| e.to_lowercase()).collect(),
        ));
        self
    }

    /// Color override for a lowercase `.ext` or stem key.
    pub fn color_override(&self, key: &str) -> Option<Category> {
        self.colors.get(key).copied()
    }

    /// Glyph override for a lowercase `.ext` or stem key.
    pub fn glyph_override(&self, key: &str) -> Option<&str> {
        self.glyphs.get(key).map(String::as_str)
    }

    /// First category list containing the lowercase `.ext`.
    pub fn list_category(&self, ext: &str) -> Option<Category> {
        self.lists
            .iter()
            .find(|(_, exts)| exts.iter().any(|e| e == ext))
            .map(|(cat, _)| *cat)
    }

    /// Glyph for a resolved key. Literal keys missing from the table fall
    /// back to the generic file glyph.
    pub fn glyph(&self, key: &GlyphKey) -> &str {
        match key {
            GlyphKey::Literal(k) => self
                .glyph_override(k)
                .unwrap_or_else(|| Category::File.glyph()),
            GlyphKey::Category(cat) => cat.glyph(),
        }
    }

    /// Extend this theme with the overrides in a TOML document.
    pub fn merge_toml(self, text: &str, origin: &Path) -> Result<Self, ListError> {
        let file: ThemeFile = toml::from_str(text).map_err(|e| ListError::Config {
            path: origin.to_path_buf(),
            message: e.message().to_string(),
        })?;

        if let Some((key, _)) = file.glyphs.iter().find(|(_, g)| g.is_empty()) {
            return Err(ListError::Config {
                path: origin.to_path_buf(),
                message: format!("empty glyph for '{}'", key),
            });
        }

        let theme = file
            .colors
            .iter()
            .fold(self, |t, (key, cat)| t.with_color(key, *cat));
        Ok(file
            .glyphs
            .iter()
            .fold(theme, |t, (key, glyph)| t.with_glyph(key, glyph)))
    }

    /// Default theme extended from the file at `path`.
    pub fn load(path: &Path) -> Result<Self, ListError> {
        let text = fs::read_to_string(path).map_err(|e| ListError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Theme::default().merge_toml(&text, path)
    }

    /// Resolve and load the theme for a run.
    ///
    /// An explicit path or `$COLORLS_CONFIG` must exist; `~/.colorls.toml` is
    /// only read when present.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ListError> {
        let env = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let home = std::env::var_os("HOME").map(PathBuf::from);
        match config_location(explicit, env, home) {
            Some(ConfigLocation::Required(path)) => Theme::load(&path),
            Some(ConfigLocation::Optional(path)) if path.is_file() => Theme::load(&path),
            _ => Ok(Theme::default()),
        }
    }
}

/// Where a theme file is expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLocation {
    Required(PathBuf),
    Optional(PathBuf),
}

/// Precedence: explicit flag, then environment, then home directory.
pub fn config_location(
    explicit: Option<&Path>,
    env: Option<PathBuf>,
    home: Option<PathBuf>,
) -> Option<ConfigLocation> {
    if let Some(path) = explicit {
        return Some(ConfigLocation::Required(path.to_path_buf()));
    }
    if let Some(path) = env.filter(|p| !p.as_os_str().is_empty()) {
        return Some(ConfigLocation::Required(path));
    }
    home.map(|h| ConfigLocation::Optional(h.join(CONFIG_FILE_NAME)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::TestDir;

    #[test]
    fn test_default_lists() {
        let theme = Theme::default();
        assert_eq!(theme.list_category(".png"), Some(Category::Image));
        assert_eq!(theme.list_category(".xlsx"), Some(Category::Spreadsheet));
        assert_eq!(theme.list_category(".rs"), None);
    }

    #[test]
    fn test_keys_are_lowercased() {
        let theme = Theme::empty()
            .with_glyph(".AppImage", "A")
            .with_color("Makefile", Category::File);
        assert_eq!(theme.glyph_override(".appimage"), Some("A"));
        assert_eq!(theme.color_override("makefile"), Some(Category::File));
    }

    #[test]
    fn test_glyph_lookup_falls_back() {
        let theme = Theme::empty();
        assert_eq!(
            theme.glyph(&GlyphKey::Literal(".nope".to_string())),
            Category::File.glyph()
        );
        assert_eq!(theme.glyph(&GlyphKey::Category(Category::Dir)), Category::Dir.glyph());
    }

    #[test]
    fn test_merge_toml() {
        let text = r#"
[colors]
".iso" = "archive"
"Makefile" = "file"

[glyphs]
".lock" = "L"
"#;
        let theme = Theme::default()
            .merge_toml(text, Path::new("inline.toml"))
            .unwrap();
        assert_eq!(theme.color_override(".iso"), Some(Category::Archive));
        assert_eq!(theme.color_override("makefile"), Some(Category::File));
        assert_eq!(theme.glyph_override(".lock"), Some("L"));
        // defaults survive
        assert_eq!(theme.glyph_override(".md"), Some("\u{f48a}"));
    }

    #[test]
    fn test_merge_toml_rejects_unknown_category() {
        let err = Theme::default()
            .merge_toml("[colors]\n\".x\" = \"sparkly\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(matches!(err, ListError::Config { .. }));
        assert!(err.to_string().contains("bad.toml"));
    }

    #[test]
    fn test_merge_toml_rejects_empty_glyph() {
        let err = Theme::default()
            .merge_toml("[glyphs]\n\".x\" = \"\"\n", Path::new("bad.toml"))
            .unwrap_err();
        assert!(err.to_string().contains("empty glyph"));
    }

    #[test]
    fn test_load_from_file() {
        let dir = TestDir::new();
        let path = dir.add_file("theme.toml", "[glyphs]\n\"notes\" = \"N\"\n");
        let theme = Theme::load(&path).unwrap();
        assert_eq!(theme.glyph_override("notes"), Some("N"));
    }

    #[test]
    fn test_load_missing_file_is_config_error() {
        let dir = TestDir::new();
        let err = Theme::load(&dir.path().join("missing.toml")).unwrap_err();
        assert!(matches!(err, ListError::Config { .. }));
    }

    #[test]
    fn test_config_location_precedence() {
        let explicit = PathBuf::from("/etc/flag.toml");
        let env = Some(PathBuf::from("/env.toml"));
        let home = Some(PathBuf::from("/home/u"));

        assert_eq!(
            config_location(Some(&explicit), env.clone(), home.clone()),
            Some(ConfigLocation::Required(explicit.clone()))
        );
        assert_eq!(
            config_location(None, env, home.clone()),
            Some(ConfigLocation::Required(PathBuf::from("/env.toml")))
        );
        assert_eq!(
            config_location(None, Some(PathBuf::new()), home),
            Some(ConfigLocation::Optional(PathBuf::from("/home/u/.colorls.toml")))
        );
        assert_eq!(config_location(None, None, None), None);
    }
}
