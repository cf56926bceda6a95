use anyhow::{bail, Context};
use pointplot::{init_logging, DirectorySink, GenerationSettings, Session};
use std::path::PathBuf;
use tracing::{debug, info};

const USAGE: &str = "usage: pointplot [--spiral] <image> [settings.toml|settings.json] [out-dir]";

fn main() -> anyhow::Result<()> {
    // Initialize logging
    init_logging()?;

    let mut spiral = false;
    let mut positional = Vec::new();
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--spiral" => spiral = true,
            "-h" | "--help" => {
                println!("{}", USAGE);
                return Ok(());
            }
            _ => positional.push(PathBuf::from(arg)),
        }
    }

    let Some(image_path) = positional.first() else {
        bail!(USAGE);
    };

    let out_dir = positional
        .get(2)
        .cloned()
        .unwrap_or_else(|| PathBuf::from("."));

    let mut session = Session::new(GenerationSettings::default());
    if let Some(path) = positional.get(1) {
        session
            .load_settings_file(path)
            .with_context(|| format!("Failed to load settings from {}", path.display()))?;
    }
    session
        .load_image_file(image_path)
        .with_context(|| format!("Failed to load image {}", image_path.display()))?;

    if spiral {
        session.apply_filter()?;
        info!("Applied spiral filter");
    }

    for file in session.generate()? {
        debug!("{}:\n{}", file.name, file.preview());
    }

    let mut sink = DirectorySink::new(&out_dir);
    session.download_all(&mut sink)?;
    info!(
        "Wrote {} layer files to {}",
        session.files().len(),
        sink.dir().display()
    );

    Ok(())
}
