//! Color configuration loading: format detection (RON/JSON/TOML), file
//! discovery and conversion into a [`Palette`].

use crate::schema::PaletteFile;
use rangerscope_core::palette::{Color, Palette};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Base name of the color configuration file, without extension.
pub const PALETTE_BASE_NAME: &str = "map_colors";

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that can occur while loading a color configuration.
#[derive(Debug, thiserror::Error)]
pub enum PaletteLoadError {
    /// The file has an extension we don't support.
    #[error("unsupported format for file: {file}")]
    UnsupportedFormat { file: PathBuf },

    /// Two files with the same base name but different formats exist.
    #[error("conflicting formats: {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// A deserialization error occurred.
    #[error("parse error in {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    /// A color string is neither hex nor a known color name.
    #[error("bad color for '{key}' in {file}: {detail}")]
    Color {
        file: PathBuf,
        key: String,
        detail: String,
    },

    /// An I/O error occurred.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

/// Detect the format of a file based on its extension.
pub fn detect_format(path: &Path) -> Result<Format, PaletteLoadError> {
    match path.extension().and_then(|e| e.to_str()) {
        Some("ron") => Ok(Format::Ron),
        Some("toml") => Ok(Format::Toml),
        Some("json") => Ok(Format::Json),
        _ => Err(PaletteLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        }),
    }
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Scan `dir` for `map_colors.{ron,toml,json}`.
///
/// Returns `Ok(None)` if no file is found, or `Err(ConflictingFormats)` if
/// more than one format exists.
pub fn find_palette_file(dir: &Path) -> Result<Option<PathBuf>, PaletteLoadError> {
    let mut found: Option<PathBuf> = None;

    for ext in ["ron", "toml", "json"] {
        let candidate = dir.join(format!("{PALETTE_BASE_NAME}.{ext}"));
        if candidate.exists() {
            if let Some(existing) = found {
                return Err(PaletteLoadError::ConflictingFormats {
                    a: existing,
                    b: candidate,
                });
            }
            found = Some(candidate);
        }
    }

    Ok(found)
}

// ===========================================================================
// Deserialization
// ===========================================================================

/// Read a file and deserialize it according to its format.
pub fn deserialize_file<T: DeserializeOwned>(path: &Path) -> Result<T, PaletteLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;

    let parse_error = |detail: String| PaletteLoadError::Parse {
        file: path.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(&content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(&content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Parses every entry of `file` and lays it over the default palette.
pub fn resolve_palette(file: &PaletteFile, path: &Path) -> Result<Palette, PaletteLoadError> {
    let overrides = file
        .colors
        .iter()
        .map(|(key, value)| {
            let color = value
                .parse::<Color>()
                .map_err(|e| PaletteLoadError::Color {
                    file: path.to_path_buf(),
                    key: key.clone(),
                    detail: e.to_string(),
                })?;
            Ok((key.clone(), color))
        })
        .collect::<Result<Vec<_>, PaletteLoadError>>()?;
    Ok(Palette::with_overrides(overrides))
}

/// Like [`resolve_palette`], but an entry with a bad color is logged and
/// skipped while the other entries still apply.
pub fn resolve_palette_lenient(file: &PaletteFile, path: &Path) -> Palette {
    let overrides = file.colors.iter().filter_map(|(key, value)| {
        match value.parse::<Color>() {
            Ok(color) => Some((key.clone(), color)),
            Err(err) => {
                warn!(file = %path.display(), %key, error = %err, "skipping color entry");
                None
            }
        }
    });
    Palette::with_overrides(overrides)
}

// ===========================================================================
// Loading
// ===========================================================================

/// Loads a color configuration file. Entries override the defaults; every
/// default not named in the file is kept.
pub fn load_palette(path: &Path) -> Result<Palette, PaletteLoadError> {
    let file: PaletteFile = deserialize_file(path)?;
    let palette = resolve_palette(&file, path)?;
    debug!(file = %path.display(), entries = file.colors.len(), "loaded palette");
    Ok(palette)
}

/// Like [`load_palette`], but never fails. A file that cannot be read or
/// parsed yields the default palette; bad color entries are skipped one by
/// one and the rest of the file still applies.
pub fn load_palette_or_default(path: &Path) -> Palette {
    match deserialize_file::<PaletteFile>(path) {
        Ok(file) => {
            debug!(file = %path.display(), entries = file.colors.len(), "loaded palette");
            resolve_palette_lenient(&file, path)
        }
        Err(err) => {
            warn!(file = %path.display(), error = %err, "using default palette");
            Palette::default()
        }
    }
}

/// Loads `map_colors.*` from `dir`, or the defaults when there is none or it
/// cannot be used.
pub fn load_palette_from_dir(dir: &Path) -> Palette {
    match find_palette_file(dir) {
        Ok(Some(path)) => load_palette_or_default(&path),
        Ok(None) => Palette::default(),
        Err(err) => {
            warn!(dir = %dir.display(), error = %err, "using default palette");
            Palette::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    /// Create a temporary directory with a unique name for test isolation.
    fn make_test_dir(suffix: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "rangerscope_data_test_{suffix}_{}",
            std::process::id()
        ));
        let _ = fs::remove_dir_all(&dir);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    fn cleanup(dir: &Path) {
        let _ = fs::remove_dir_all(dir);
    }

    // -----------------------------------------------------------------------
    // detect_format
    // -----------------------------------------------------------------------

    #[test]
    fn detect_format_by_extension() {
        assert_eq!(detect_format(Path::new("c.ron")).unwrap(), Format::Ron);
        assert_eq!(detect_format(Path::new("c.toml")).unwrap(), Format::Toml);
        assert_eq!(detect_format(Path::new("c.json")).unwrap(), Format::Json);
    }

    #[test]
    fn detect_format_unsupported() {
        for name in ["c.yaml", "c"] {
            assert!(matches!(
                detect_format(Path::new(name)),
                Err(PaletteLoadError::UnsupportedFormat { .. })
            ));
        }
    }

    // -----------------------------------------------------------------------
    // find_palette_file
    // -----------------------------------------------------------------------

    #[test]
    fn find_palette_file_found_and_missing() {
        let dir = make_test_dir("find");
        assert_eq!(find_palette_file(&dir).unwrap(), None);

        fs::write(dir.join("map_colors.toml"), "").unwrap();
        assert_eq!(
            find_palette_file(&dir).unwrap(),
            Some(dir.join("map_colors.toml"))
        );

        cleanup(&dir);
    }

    #[test]
    fn find_palette_file_conflict() {
        let dir = make_test_dir("conflict");
        fs::write(dir.join("map_colors.ron"), "{}").unwrap();
        fs::write(dir.join("map_colors.json"), "{}").unwrap();

        assert!(matches!(
            find_palette_file(&dir),
            Err(PaletteLoadError::ConflictingFormats { .. })
        ));
        assert_eq!(load_palette_from_dir(&dir), Palette::default());

        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // load_palette
    // -----------------------------------------------------------------------

    #[test]
    fn load_palette_ron() {
        let dir = make_test_dir("load_ron");
        let path = dir.join("map_colors.ron");
        fs::write(&path, r##"{"Maloc": "#102030", "Xaltec": "deepskyblue"}"##).unwrap();

        let palette = load_palette(&path).unwrap();
        assert_eq!(palette.fill("Maloc"), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(palette.get("Xaltec"), Color::named("deepskyblue"));
        // Untouched defaults survive.
        assert_eq!(palette.get("lineMaloc"), Palette::default().get("lineMaloc"));
        assert_eq!(palette.len(), Palette::default().len() + 1);

        cleanup(&dir);
    }

    #[test]
    fn load_palette_json() {
        let dir = make_test_dir("load_json");
        let path = dir.join("map_colors.json");
        fs::write(&path, r##"{"linePeople": "#80ffffff"}"##).unwrap();

        let palette = load_palette(&path).unwrap();
        assert_eq!(palette.line("People"), Color::rgba(255, 255, 255, 0x80));

        cleanup(&dir);
    }

    #[test]
    fn load_palette_toml() {
        let dir = make_test_dir("load_toml");
        let path = dir.join("map_colors.toml");
        fs::write(&path, "Gaal = \"black\"\nlineGaal = \"white\"\n").unwrap();

        let palette = load_palette(&path).unwrap();
        assert_eq!(palette.fill("Gaal"), Color::BLACK);
        assert_eq!(palette.line("Gaal"), Color::WHITE);

        cleanup(&dir);
    }

    #[test]
    fn load_palette_parse_error() {
        let dir = make_test_dir("parse_err");
        let path = dir.join("map_colors.ron");
        fs::write(&path, "this is not valid RON {{{").unwrap();

        assert!(matches!(
            load_palette(&path),
            Err(PaletteLoadError::Parse { .. })
        ));

        cleanup(&dir);
    }

    #[test]
    fn load_palette_bad_color_names_the_key() {
        let dir = make_test_dir("bad_color");
        let path = dir.join("map_colors.json");
        fs::write(&path, r#"{"Fei": "chartreuse-ish"}"#).unwrap();

        match load_palette(&path) {
            Err(PaletteLoadError::Color { key, .. }) => assert_eq!(key, "Fei"),
            other => panic!("expected Color error, got: {other:?}"),
        }

        cleanup(&dir);
    }

    #[test]
    fn load_palette_missing_file_is_io() {
        let dir = make_test_dir("missing");
        assert!(matches!(
            load_palette(&dir.join("map_colors.ron")),
            Err(PaletteLoadError::Io(_))
        ));
        cleanup(&dir);
    }

    // -----------------------------------------------------------------------
    // Fallback
    // -----------------------------------------------------------------------

    #[test]
    fn failures_fall_back_to_defaults() {
        let dir = make_test_dir("fallback");
        let bad = dir.join("map_colors.toml");
        fs::write(&bad, "Maloc = 12").unwrap();

        assert_eq!(load_palette_or_default(&bad), Palette::default());
        assert_eq!(
            load_palette_or_default(&dir.join("absent.json")),
            Palette::default()
        );
        assert_eq!(
            load_palette_or_default(&dir.join("map_colors.yaml")),
            Palette::default()
        );

        cleanup(&dir);
    }

    #[test]
    fn css_names_and_short_hex_load() {
        let dir = make_test_dir("css_names");
        let path = dir.join("map_colors.json");
        fs::write(&path, r##"{"Maloc": "#102030", "Fei": "cyan", "Gaal": "#fc0"}"##).unwrap();

        let palette = load_palette(&path).unwrap();
        assert_eq!(palette.fill("Maloc"), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(palette.fill("Fei"), Color::rgb(0, 255, 255));
        assert_eq!(palette.fill("Gaal"), Color::rgb(0xff, 0xcc, 0x00));
        assert_eq!(load_palette_or_default(&path), palette);

        cleanup(&dir);
    }

    #[test]
    fn bad_entries_are_skipped_one_by_one() {
        let dir = make_test_dir("skip_bad");
        let path = dir.join("map_colors.json");
        fs::write(
            &path,
            r##"{"Maloc": "#102030", "Fei": "not-a-color", "lineGaal": "darkred"}"##,
        )
        .unwrap();

        assert!(matches!(
            load_palette(&path),
            Err(PaletteLoadError::Color { .. })
        ));

        let palette = load_palette_or_default(&path);
        assert_eq!(palette.fill("Maloc"), Color::rgb(0x10, 0x20, 0x30));
        assert_eq!(palette.line("Gaal"), Color::rgb(0x8b, 0, 0));
        assert_eq!(palette.get("Fei"), Palette::default().get("Fei"));
        assert_ne!(palette, Palette::default());

        cleanup(&dir);
    }

    #[test]
    fn load_from_dir_without_file_gives_defaults() {
        let dir = make_test_dir("empty_dir");
        assert_eq!(load_palette_from_dir(&dir), Palette::default());
        cleanup(&dir);
    }

    #[test]
    fn error_display_messages() {
        let err = PaletteLoadError::Color {
            file: PathBuf::from("map_colors.ron"),
            key: "Fei".to_string(),
            detail: "unknown color 'x'".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "bad color for 'Fei' in map_colors.ron: unknown color 'x'"
        );

        let err = PaletteLoadError::UnsupportedFormat {
            file: PathBuf::from("c.yaml"),
        };
        assert_eq!(err.to_string(), "unsupported format for file: c.yaml");
    }
}
