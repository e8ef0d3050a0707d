//! Filesystem locations used by the profile renderer.

use std::env;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Logo location relative to the project root.
pub const LOGO_RELATIVE_PATH: [&str; 3] = ["public", "images", "optimized-hero-logo-60.jpg"];

/// Output location relative to the project root.
pub const OUTPUT_RELATIVE_PATH: [&str; 3] =
    ["public", "downloads", "NorthPath_Strategies_Profile.pdf"];

const CARGO_TARGET_DIR_NAME: &str = "target";
const CARGO_DEPS_DIR_NAME: &str = "deps";

/// Resolved input and output paths for one render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ProfilePaths {
    root: PathBuf,
    logo: PathBuf,
    output: PathBuf,
}

impl ProfilePaths {
    /// Resolves the logo and output paths below `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        let logo = LOGO_RELATIVE_PATH
            .iter()
            .fold(root.clone(), |path, part| path.join(part));
        let output = OUTPUT_RELATIVE_PATH
            .iter()
            .fold(root.clone(), |path, part| path.join(part));
        Self { root, logo, output }
    }

    /// Resolves the paths against the project root derived from the running executable.
    pub fn from_current_exe() -> io::Result<Self> {
        let exe = env::current_exe()?;
        Ok(Self::from_root(project_root_for_executable(&exe)))
    }

    /// Project root anchor.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Optional logo image.
    pub fn logo(&self) -> &Path {
        &self.logo
    }

    /// Rendered PDF.
    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Directory that receives the rendered PDF.
    pub fn output_dir(&self) -> &Path {
        self.output.parent().unwrap_or(&self.root)
    }

    /// Creates the output directory and any missing parents.  Succeeds if it already exists.
    pub fn ensure_output_dir(&self) -> io::Result<()> {
        fs::create_dir_all(self.output_dir())
    }
}

/// Derives the project root from the location of an executable.
///
/// The root is the parent of the directory holding the executable.  Binaries built by cargo live
/// in `<root>/target/<profile>/` (test harnesses in `<root>/target/<profile>/deps/`); only those
/// two layouts skip past `target`.
pub fn project_root_for_executable(exe: &Path) -> PathBuf {
    let bin_dir = exe.parent().unwrap_or_else(|| Path::new("."));
    let profile_dir = if has_name(bin_dir, CARGO_DEPS_DIR_NAME) {
        bin_dir.parent()
    } else {
        Some(bin_dir)
    };

    if let Some(target_dir) = profile_dir
        .and_then(Path::parent)
        .filter(|dir| has_name(dir, CARGO_TARGET_DIR_NAME))
    {
        if let Some(root) = target_dir.parent() {
            return root.to_path_buf();
        }
    }

    bin_dir
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| bin_dir.to_path_buf())
}

fn has_name(dir: &Path, name: &str) -> bool {
    dir.file_name().map_or(false, |file_name| file_name == name)
}

#[cfg(test)]
mod tests {
    use super::{project_root_for_executable, ProfilePaths};
    use std::fs;
    use std::path::{Path, PathBuf};

    #[test]
    fn paths_are_resolved_below_root() {
        let paths = ProfilePaths::from_root("/srv/site");
        assert_eq!(
            paths.logo(),
            Path::new("/srv/site/public/images/optimized-hero-logo-60.jpg")
        );
        assert_eq!(
            paths.output(),
            Path::new("/srv/site/public/downloads/NorthPath_Strategies_Profile.pdf")
        );
        assert_eq!(paths.output_dir(), Path::new("/srv/site/public/downloads"));
    }

    #[test]
    fn root_is_parent_of_binary_directory() {
        assert_eq!(
            project_root_for_executable(Path::new("/srv/site/scripts/northpath-profile")),
            PathBuf::from("/srv/site")
        );
    }

    #[test]
    fn cargo_target_directory_is_skipped() {
        assert_eq!(
            project_root_for_executable(Path::new("/work/repo/target/release/northpath-profile")),
            PathBuf::from("/work/repo")
        );
        assert_eq!(
            project_root_for_executable(Path::new(
                "/work/repo/target/debug/deps/rendering-0123abcd"
            )),
            PathBuf::from("/work/repo")
        );
    }

    #[test]
    fn target_further_up_is_an_ordinary_directory() {
        assert_eq!(
            project_root_for_executable(Path::new("/srv/target/site/bin/northpath-profile")),
            PathBuf::from("/srv/target/site")
        );
        assert_eq!(
            project_root_for_executable(Path::new("/target/site/scripts/northpath-profile")),
            PathBuf::from("/target/site")
        );
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let temp = tempfile::tempdir().expect("create temp dir");
        let paths = ProfilePaths::from_root(temp.path());

        paths.ensure_output_dir().expect("first create");
        let unrelated = paths.output_dir().join("brochure.txt");
        fs::write(&unrelated, b"keep me").expect("write unrelated file");
        paths.ensure_output_dir().expect("second create");

        assert!(paths.output_dir().is_dir());
        assert_eq!(fs::read(&unrelated).expect("read unrelated"), b"keep me");
    }
}
