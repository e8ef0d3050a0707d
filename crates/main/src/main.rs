use std::error::Error;
use std::path::PathBuf;

use clap::Parser;
use northpath_profile::{ProfilePaths, ProfileRenderer};

/// Renders the NorthPath Strategies company profile PDF.
///
/// Output goes to `public/downloads/NorthPath_Strategies_Profile.pdf` below the project root; the
/// logo is read from `public/images/optimized-hero-logo-60.jpg` when present.  Fonts are looked up
/// in `NORTHPATH_FONTS_DIR`, next to the binary, or among the system fonts.
#[derive(Parser)]
#[command(author, version, about = "Render the NorthPath Strategies company profile PDF")]
struct Cli {
    /// Project root; defaults to the directory derived from the executable's location.
    #[arg(long, value_name = "DIR")]
    root: Option<PathBuf>,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    if let Err(err) = run(cli) {
        eprintln!("Error: {}", err);
        print_error_sources(err.as_ref());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    let paths = match cli.root {
        Some(root) => ProfilePaths::from_root(root),
        None => ProfilePaths::from_current_exe()?,
    };
    log::debug!("Resolved project root {}", paths.root().display());

    let report = ProfileRenderer::new().render(&paths)?;
    println!("{}", report);
    Ok(())
}

fn print_error_sources(mut error: &(dyn Error + 'static)) {
    while let Some(source) = error.source() {
        eprintln!("  caused by: {}", source);
        error = source;
    }
}
