use std::fs::File;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use methcomp::prelude::*;

use crate::utils::{
    check_input,
    create_output,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct ReloadArgs {
    #[arg(
        short = 'a',
        long = "array",
        required = true,
        help = "Raw joint array CSV written by `compare`."
    )]
    array:  PathBuf,
    #[arg(
        short = 'n',
        long = "name",
        required = true,
        help = "Name used in the generated output files."
    )]
    name:   String,
    #[arg(
        short = 'o',
        long = "outdir",
        default_value = ".",
        help = "Directory for the generated output files."
    )]
    outdir: PathBuf,
}

impl ReloadArgs {
    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        check_input(&self.array)?;
        let spinner = utils.spinner("Reading array...")?;

        let file = File::open(&self.array)
            .with_context(|| format!("Failed to open {}", self.array.display()))?;
        let counts = read_array(file)?;
        let reloaded = ReloadedArray::from_counts(&counts);

        let (log_path, sink) =
            create_output(&self.outdir, &format!("log.{}.csv", self.name))?;
        write_array(&reloaded.log_counts, sink)?;
        let (corr_path, sink) =
            create_output(&self.outdir, &format!("{}.corrcoef.csv", self.name))?;
        write_array(&reloaded.correlation_matrix, sink)?;

        spinner.finish_and_clear();
        let (rows, cols) = counts.dim();
        println!(
            "[{}] Input array shape {}x{}",
            style("V").green(),
            style(rows).green(),
            style(cols).green()
        );
        println!(
            "Written:\n\t{}\n\t{}",
            log_path.display(),
            corr_path.display()
        );
        Ok(())
    }
}
