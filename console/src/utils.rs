use std::fs::File;
use std::io::BufWriter;
use std::path::{
    Path,
    PathBuf,
};
use std::time::Duration;

use anyhow::Context;
use clap::Args;
use console::style;
use indicatif::{
    ProgressBar,
    ProgressStyle,
};
use log::LevelFilter;

#[derive(Args, Debug, Clone)]
pub(crate) struct UtilsArgs {
    #[arg(
        short,
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Verbose (debug) logging."
    )]
    pub verbose:  bool,
    #[arg(
        long,
        default_value_t = false,
        help_heading = "UTILS",
        help = "Display a progress spinner."
    )]
    pub progress: bool,
}

impl UtilsArgs {
    /// Initializes the logger. `RUST_LOG` overrides the level chosen by
    /// `--verbose`.
    pub fn setup(&self) -> anyhow::Result<()> {
        let level = if self.verbose {
            LevelFilter::Debug
        }
        else {
            LevelFilter::Info
        };
        let mut builder = pretty_env_logger::formatted_builder();
        builder.filter_level(level);
        if let Ok(filters) = std::env::var("RUST_LOG") {
            builder.parse_filters(&filters);
        }
        builder
            .try_init()
            .context("Failed to set up logger")?;
        Ok(())
    }

    pub fn spinner(
        &self,
        message: &str,
    ) -> anyhow::Result<ProgressBar> {
        if self.progress {
            init_spinner(message)
        }
        else {
            Ok(ProgressBar::hidden())
        }
    }
}

pub fn init_spinner(message: &str) -> anyhow::Result<ProgressBar> {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::default_spinner()
            .template("{spinner:.green} [{elapsed_precise}] {msg}")?,
    );
    spinner.set_message(message.to_string());
    spinner.enable_steady_tick(Duration::from_millis(120));
    Ok(spinner)
}

/// Fails early with a readable message if `path` is not an existing file.
pub fn check_input(path: &Path) -> anyhow::Result<()> {
    if !path.exists() {
        anyhow::bail!("Path {} does not exist.", style(path.display()).red());
    }
    if !path.is_file() {
        anyhow::bail!("Path {} is not a file.", style(path.display()).red());
    }
    Ok(())
}

pub fn create_output(
    dir: &Path,
    file_name: &str,
) -> anyhow::Result<(PathBuf, BufWriter<File>)> {
    let path = dir.join(file_name);
    let file = File::create(&path)
        .with_context(|| format!("Failed to create output file {}", path.display()))?;
    Ok((path, BufWriter::new(file)))
}
