use anyhow::Context;
use clap::Parser;
use serde::Deserialize;
use shoptools::{
    init_json_logging, init_logging, ConfigurationProfile, GcodeRenderer, TrackBuilder,
    WorkpieceInfo,
};
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "shoptools")]
#[command(version, about = "Render a ShopTools job to G-code files", long_about = None)]
struct Opts {
    /// Job document: `{ "configuration": ..., "workpiece": ... }`
    job: PathBuf,

    /// Output directory
    #[arg(long, default_value = ".")]
    out: PathBuf,

    /// Base file name, defaults to a timestamp
    #[arg(long, value_name = "NAME")]
    base: Option<String>,

    /// File extension
    #[arg(long, value_name = "EXT")]
    extension: Option<String>,

    /// Log as JSON lines
    #[arg(long)]
    json_log: bool,
}

#[derive(Deserialize)]
struct Job {
    #[serde(default)]
    configuration: ConfigurationProfile,
    workpiece: WorkpieceInfo,
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::parse();

    if opts.json_log {
        init_json_logging()?;
    } else {
        init_logging()?;
    }
    info!("ShopTools {} (built {})", shoptools::VERSION, shoptools::BUILD_DATE);

    let text = fs::read_to_string(&opts.job)
        .with_context(|| format!("reading {}", opts.job.display()))?;
    let Job {
        configuration,
        mut workpiece,
    } = serde_json::from_str(&text).with_context(|| format!("parsing {}", opts.job.display()))?;

    for issue in configuration.issues() {
        warn!("Configuration: {}", issue);
    }
    workpiece.configure_from_user_values(&configuration);

    let build = TrackBuilder::new(&configuration).build(&workpiece);
    let files = GcodeRenderer::new(&configuration).render_build(
        &workpiece,
        &build,
        opts.base.as_deref(),
        opts.extension.as_deref(),
    );
    if files.is_empty() {
        warn!("Nothing to cut, no files written");
        return Ok(());
    }

    fs::create_dir_all(&opts.out)
        .with_context(|| format!("creating {}", opts.out.display()))?;
    for file in &files {
        file.write_to(&opts.out)?;
    }
    info!(
        "Wrote {} file(s), {} operation(s) skipped",
        files.len(),
        build.diagnostics.len()
    );

    Ok(())
}
