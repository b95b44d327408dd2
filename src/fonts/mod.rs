//! Font loading for the ranking renderer.
//!
//! Player names can be written in any script, so the renderer uses DejaVu Sans instead of one of
//! the built-in PDF fonts.  Only the regular and bold faces are required and embedded; the italic slots of
//! the `genpdf` family point at built-in obliques because the ranking layout never asks for italics.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{FontData, FontFamily};
use log::{debug, warn};
use printpdf::BuiltinFont;

/// Name of the font family used for every page.
pub const FONT_FAMILY_NAME: &str = "DejaVu Sans";

/// Environment variable pointing at a directory that contains the DejaVu Sans files.
pub const FONTS_DIR_ENV: &str = "RANKING_PDF_FONTS_DIR";

const REGULAR_FILE: &str = "DejaVuSans.ttf";
const BOLD_FILE: &str = "DejaVuSans-Bold.ttf";
const FONT_FILES: &[&str] = &[REGULAR_FILE, BOLD_FILE];

const SYSTEM_FONT_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
];

/// Where the renderer looks for the font files.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum FontSource {
    /// Search the override variable, the executable and working directories, the crate's
    /// `assets/fonts` and finally the usual system locations.
    #[default]
    Search,
    /// Load from this directory only.
    Directory(PathBuf),
}

impl FontSource {
    /// Loads the font family described by this source.
    pub fn load(&self) -> Result<FontFamily<FontData>, Error> {
        match self {
            Self::Search => default_font_family(),
            Self::Directory(directory) => load_font_family(directory),
        }
    }

    /// Indicates whether [`FontSource::load`] would find every required file.
    pub fn is_available(&self) -> bool {
        match self {
            Self::Search => default_fonts_available(),
            Self::Directory(directory) => missing_font_files(directory).is_empty(),
        }
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    env::var_os(var).and_then(|value| {
        let path = PathBuf::from(value);
        if path.as_os_str().is_empty() {
            None
        } else {
            Some(path)
        }
    })
}

fn push_unique(candidates: &mut Vec<PathBuf>, candidate: PathBuf) {
    if !candidates.iter().any(|existing| existing == &candidate) {
        candidates.push(candidate);
    }
}

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            push_unique(&mut candidates, bin_dir.join("assets/fonts"));
        }
    }

    if let Ok(current_dir) = env::current_dir() {
        push_unique(&mut candidates, current_dir);
    }

    push_unique(
        &mut candidates,
        PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts"),
    );

    candidates
}

fn missing_font_files(path: &Path) -> Vec<PathBuf> {
    FONT_FILES
        .iter()
        .map(|name| path.join(name))
        .filter(|candidate| !candidate.is_file())
        .collect()
}

fn resolve_font_directory() -> Result<PathBuf, Error> {
    let mut attempts = Vec::new();

    for candidate in font_directory_candidates() {
        let missing = missing_font_files(&candidate);
        if candidate.is_dir() && missing.is_empty() {
            return Ok(candidate);
        }
        attempts.push(describe_attempt(&candidate, &missing));
    }

    let summary = if attempts.is_empty() {
        "no search paths were available".to_owned()
    } else {
        attempts.join(", ")
    };

    Err(Error::new(
        format!(
            "Unable to locate {} fonts. Checked: {}. See assets/fonts/README.md or set {}.",
            FONT_FAMILY_NAME, summary, FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "font directory not found"),
    ))
}

fn describe_attempt(candidate: &Path, missing: &[PathBuf]) -> String {
    let reason = if !candidate.is_dir() {
        "directory missing".to_owned()
    } else {
        let missing_list = missing
            .iter()
            .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
            .collect::<Vec<_>>()
            .join(", ");
        format!("missing files [{}]", missing_list)
    };
    format!("{} ({})", candidate.display(), reason)
}

fn load_font_bytes(directory: &Path, file: &str, style: &str) -> Result<Vec<u8>, Error> {
    let path = directory.join(file);
    fs::read(&path).map_err(|err| {
        Error::new(
            format!(
                "Failed to load {} {} font at {}: {}",
                FONT_FAMILY_NAME,
                style,
                path.display(),
                err
            ),
            err,
        )
    })
}

fn parse_font(
    data: Vec<u8>,
    builtin: Option<BuiltinFont>,
    file: &str,
    style: &str,
) -> Result<FontData, Error> {
    FontData::new(data, builtin).map_err(|err| {
        Error::new(
            format!(
                "Failed to parse {} {} font {}: {}",
                FONT_FAMILY_NAME, style, file, err
            ),
            io::Error::new(io::ErrorKind::InvalidData, err.to_string()),
        )
    })
}

/// Loads one face twice: embedded for upright text, and as metrics behind the built-in `slanted`
/// font for the italic slot.
fn load_face(
    directory: &Path,
    file: &str,
    style: &str,
    slanted: BuiltinFont,
) -> Result<(FontData, FontData), Error> {
    let bytes = load_font_bytes(directory, file, style)?;
    let upright = parse_font(bytes.clone(), None, file, style)?;
    let italic = parse_font(bytes, Some(slanted), file, style)?;
    Ok((upright, italic))
}

/// Loads the family from `directory`, which must contain both DejaVu Sans faces.
///
/// Only the regular and bold faces are embedded.  The italic slots map to the built-in Helvetica
/// obliques, so the PDF carries each TrueType file once.
pub fn load_font_family(directory: &Path) -> Result<FontFamily<FontData>, Error> {
    debug!("Loading {} from {}", FONT_FAMILY_NAME, directory.display());
    let (regular, italic) = load_face(
        directory,
        REGULAR_FILE,
        "regular",
        BuiltinFont::HelveticaOblique,
    )?;
    let (bold, bold_italic) = load_face(
        directory,
        BOLD_FILE,
        "bold",
        BuiltinFont::HelveticaBoldOblique,
    )?;

    Ok(FontFamily {
        regular,
        bold,
        italic,
        bold_italic,
    })
}

fn system_font_directory() -> Option<PathBuf> {
    SYSTEM_FONT_DIRECTORIES
        .iter()
        .map(PathBuf::from)
        .find(|candidate| candidate.is_dir() && missing_font_files(candidate).is_empty())
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the DejaVu Sans family from the search path, falling back to a system installation.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    let err = match resolve_font_directory() {
        Ok(directory) => return load_font_family(&directory),
        Err(err) => err,
    };

    if !fonts_missing(&err) {
        return Err(err);
    }

    match system_font_directory() {
        Some(directory) => {
            warn!(
                "{} not found on the search path ({}); using system fonts in {}",
                FONT_FAMILY_NAME,
                err,
                directory.display()
            );
            load_font_family(&directory)
        }
        None => Err(err),
    }
}

/// Indicates whether [`default_font_family`] can find both required files.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok() || system_font_directory().is_some()
}
