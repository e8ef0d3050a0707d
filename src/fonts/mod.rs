//! Font loading for the profile renderer.
//!
//! `genpdf` lays text out with TrueType metrics, so a font family has to be found on disk before a
//! document can be created.  The bundled Roboto family is searched first; when it is missing the
//! loader falls back to a metric-compatible system family.

use std::env;
use std::io;
use std::path::{Path, PathBuf};

use genpdf::error::{Error, ErrorKind};
use genpdf::fonts::{self, FontData, FontFamily};
use log::{debug, warn};

/// Name of the bundled font family.
pub const DEFAULT_FONT_FAMILY_NAME: &str = "Roboto";

/// Environment variable pointing at a directory holding the bundled family.
pub const FONTS_DIR_ENV: &str = "NORTHPATH_FONTS_DIR";

/// Environment variable pointing at a Windows fonts directory.
pub const WINDOWS_FONTS_DIR_ENV: &str = "NORTHPATH_WINDOWS_FONTS_DIR";

const FONT_FILES: &[&str] = &[
    "Roboto-Regular.ttf",
    "Roboto-Bold.ttf",
    "Roboto-Italic.ttf",
    "Roboto-BoldItalic.ttf",
];

/// File names of a system font family whose files do not follow the `<family>-<Style>.ttf`
/// naming `genpdf::fonts::from_files` expects.
struct SystemFontFiles {
    family: &'static str,
    regular: &'static str,
    bold: &'static str,
    italic: &'static str,
    bold_italic: &'static str,
}

impl SystemFontFiles {
    fn present_in(&self, directory: &Path) -> bool {
        [self.regular, self.bold, self.italic, self.bold_italic]
            .iter()
            .all(|file| directory.join(file).is_file())
    }
}

const LIBERATION_FONT_FILES: SystemFontFiles = SystemFontFiles {
    family: "LiberationSans",
    regular: "LiberationSans-Regular.ttf",
    bold: "LiberationSans-Bold.ttf",
    italic: "LiberationSans-Italic.ttf",
    bold_italic: "LiberationSans-BoldItalic.ttf",
};

const DEJAVU_FONT_FILES: SystemFontFiles = SystemFontFiles {
    family: "DejaVuSans",
    regular: "DejaVuSans.ttf",
    bold: "DejaVuSans-Bold.ttf",
    italic: "DejaVuSans-Oblique.ttf",
    bold_italic: "DejaVuSans-BoldOblique.ttf",
};

const WINDOWS_FONT_FILES: SystemFontFiles = SystemFontFiles {
    family: "Arial",
    regular: "arial.ttf",
    bold: "arialbd.ttf",
    italic: "ariali.ttf",
    bold_italic: "arialbi.ttf",
};

const LIBERATION_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/liberation",
    "/usr/share/fonts/truetype/liberation2",
    "/usr/share/fonts/liberation-sans",
    "/usr/share/fonts/liberation",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
];

const DEJAVU_DIRECTORIES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu-sans-fonts",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
];

/// Directory holding the fonts shipped next to the crate manifest.
pub fn bundled_fonts_source_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("assets/fonts")
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

fn font_directory_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if let Some(path) = env_path(FONTS_DIR_ENV) {
        candidates.push(path);
    }

    if let Ok(current_exe) = env::current_exe() {
        if let Some(bin_dir) = current_exe.parent() {
            let candidate = bin_dir.join("assets/fonts");
            if !candidates.contains(&candidate) {
                candidates.push(candidate);
            }
        }
    }

    let manifest_candidate = bundled_fonts_source_dir();
    if !candidates.contains(&manifest_candidate) {
        candidates.push(manifest_candidate);
    }

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
        let exists = candidate.is_dir();
        let missing = missing_font_files(&candidate);

        if exists && missing.is_empty() {
            return Ok(candidate);
        }

        let reason = if !exists {
            format!("directory missing at {}", candidate.display())
        } else {
            let missing_list = missing
                .iter()
                .map(|path| path.file_name().unwrap_or_default().to_string_lossy())
                .collect::<Vec<_>>()
                .join(", ");
            format!("missing files [{}]", missing_list)
        };

        attempts.push(format!("{} ({})", candidate.display(), reason));
    }

    Err(Error::new(
        format!(
            "Unable to locate bundled font directory. Checked: {}. See assets/fonts/README.md or set {}.",
            attempts.join(", "),
            FONTS_DIR_ENV
        ),
        io::Error::new(io::ErrorKind::NotFound, "bundled fonts directory not found"),
    ))
}

fn load_bundled_font_family() -> Result<FontFamily<FontData>, Error> {
    let directory = resolve_font_directory()?;
    debug!("Loading '{}' fonts from {}", DEFAULT_FONT_FAMILY_NAME, directory.display());

    fonts::from_files(&directory, DEFAULT_FONT_FAMILY_NAME, None).map_err(|err| {
        Error::new(
            format!(
                "Failed to load default font family '{}' from {}: {}",
                DEFAULT_FONT_FAMILY_NAME,
                directory.display(),
                err
            ),
            io::Error::new(io::ErrorKind::Other, err.to_string()),
        )
    })
}

fn find_font_directory<I>(candidates: I, files: &SystemFontFiles) -> Option<PathBuf>
where
    I: IntoIterator<Item = PathBuf>,
{
    candidates
        .into_iter()
        .find(|directory| files.present_in(directory))
}

fn unix_font_directory(directories: &[&str], files: &SystemFontFiles) -> Option<PathBuf> {
    find_font_directory(directories.iter().map(PathBuf::from), files)
}

fn windows_font_directory() -> Option<PathBuf> {
    if let Some(path) = env_path(WINDOWS_FONTS_DIR_ENV) {
        return Some(path);
    }

    #[cfg(windows)]
    {
        for var in ["WINDIR", "SystemRoot"] {
            if let Some(root) = env_path(var) {
                let candidate = root.join("Fonts");
                if candidate.is_dir() {
                    return Some(candidate);
                }
            }
        }
    }

    None
}

fn load_system_font(
    directory: &Path,
    file: &str,
    style: &str,
    family: &str,
) -> Result<FontData, Error> {
    let path = directory.join(file);
    FontData::load(&path, None).map_err(|err| {
        let io_kind = if path.is_file() {
            io::ErrorKind::Other
        } else {
            io::ErrorKind::NotFound
        };
        Error::new(
            format!(
                "Failed to load fallback {} {} font at {}: {}",
                family,
                style,
                path.display(),
                err
            ),
            io::Error::new(io_kind, err.to_string()),
        )
    })
}

fn load_system_family(
    directory: Option<PathBuf>,
    files: &SystemFontFiles,
) -> Result<FontFamily<FontData>, Error> {
    let directory = directory.ok_or_else(|| {
        Error::new(
            format!("{} fonts not found on this system", files.family),
            io::Error::new(io::ErrorKind::NotFound, "system fonts directory not found"),
        )
    })?;

    Ok(FontFamily {
        regular: load_system_font(&directory, files.regular, "regular", files.family)?,
        bold: load_system_font(&directory, files.bold, "bold", files.family)?,
        italic: load_system_font(&directory, files.italic, "italic", files.family)?,
        bold_italic: load_system_font(&directory, files.bold_italic, "bold italic", files.family)?,
    })
}

/// System families in fallback order, each paired with the directory holding it, if any.
fn system_fallbacks() -> [(&'static SystemFontFiles, Option<PathBuf>); 3] {
    [
        (
            &LIBERATION_FONT_FILES,
            unix_font_directory(LIBERATION_DIRECTORIES, &LIBERATION_FONT_FILES),
        ),
        (
            &WINDOWS_FONT_FILES,
            windows_font_directory().filter(|dir| WINDOWS_FONT_FILES.present_in(dir)),
        ),
        (
            &DEJAVU_FONT_FILES,
            unix_font_directory(DEJAVU_DIRECTORIES, &DEJAVU_FONT_FILES),
        ),
    ]
}

fn system_fallback_font_family() -> Result<(FontFamily<FontData>, &'static str), Error> {
    let mut failures = Vec::new();

    for (files, directory) in system_fallbacks() {
        match load_system_family(directory, files) {
            Ok(family) => return Ok((family, files.family)),
            Err(err) => failures.push(err.to_string()),
        }
    }

    Err(Error::new(
        failures.join("; "),
        io::Error::new(io::ErrorKind::NotFound, "system fonts not found"),
    ))
}

fn fonts_missing(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::IoError(io_err)
            if io_err.kind() == io::ErrorKind::NotFound
                || io_err.kind() == io::ErrorKind::PermissionDenied
    )
}

/// Returns the bundled Roboto family, falling back to a system family when it is missing.
pub fn default_font_family() -> Result<FontFamily<FontData>, Error> {
    match load_bundled_font_family() {
        Ok(family) => Ok(family),
        Err(err) if fonts_missing(&err) => match system_fallback_font_family() {
            Ok((fallback, name)) => {
                warn!(
                    "Bundled fonts unavailable ({}); falling back to system '{}' family.",
                    err, name
                );
                Ok(fallback)
            }
            Err(fallback_err) => Err(Error::new(
                format!(
                    "Bundled fonts unavailable ({}) and system fallback failed: {}",
                    err, fallback_err
                ),
                io::Error::new(io::ErrorKind::NotFound, "default fonts are not available"),
            )),
        },
        Err(err) => Err(err),
    }
}

/// Indicates whether a font family can be found without loading it.
pub fn default_fonts_available() -> bool {
    resolve_font_directory().is_ok()
        || system_fallbacks()
            .iter()
            .any(|(_, directory)| directory.is_some())
}
