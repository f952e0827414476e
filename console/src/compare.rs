use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use console::style;
use itertools::Itertools;
use log::info;
use methcomp::data_structs::typedef::{
    CountType,
    ScoreType,
};
use methcomp::prelude::*;

use crate::utils::{
    check_input,
    create_output,
    UtilsArgs,
};

#[derive(Args, Debug, Clone)]
pub(crate) struct CompareArgs {
    #[arg(
        short = 'i',
        long = "nanopore",
        required = true,
        help = "Input ONT bedMethyl file."
    )]
    nanopore:  PathBuf,
    #[arg(
        short = 'b',
        long = "bisulfite",
        required = true,
        help = "Input bisulfite coverage file (may be gzipped)."
    )]
    bisulfite: PathBuf,
    #[arg(
        short = 'n',
        long = "name",
        required = true,
        help = "Name used in the generated output files."
    )]
    name:      String,
    #[arg(
        short = 'o',
        long = "outdir",
        default_value = ".",
        help = "Directory for the generated output files."
    )]
    outdir:    PathBuf,
    #[arg(
        long,
        required = false,
        help = "Write run statistics as JSON to this path."
    )]
    stats:     Option<PathBuf>,

    #[arg(
        short = 'c',
        long,
        default_value = "all",
        help_heading = "FILTER ARGS",
        help = "Chromosome to build arrays from (e.g. chr1 or all)."
    )]
    chromosome:        ChromosomeSelector,
    #[arg(
        short = 's',
        long = "score",
        default_value_t = 1000,
        value_parser = clap::value_parser!(u16).range(0..=1000),
        help_heading = "FILTER ARGS",
        help = "ONT bedMethyl minimum score cutoff (0-1000)."
    )]
    score_cutoff:      ScoreType,
    #[arg(
        short = 'r',
        long = "reads",
        default_value_t = 20,
        help_heading = "FILTER ARGS",
        help = "Read coverage cutoff for any CpG site to be included."
    )]
    read_count_cutoff: CountType,
}

impl CompareArgs {
    pub fn config(&self) -> ComparisonConfig {
        ComparisonConfig::new(&self.nanopore, &self.bisulfite)
            .with_score_cutoff(self.score_cutoff)
            .with_read_count_cutoff(self.read_count_cutoff)
            .with_chromosome(self.chromosome.clone())
    }

    pub fn run(
        &self,
        utils: &UtilsArgs,
    ) -> anyhow::Result<()> {
        check_input(&self.nanopore)?;
        check_input(&self.bisulfite)?;
        if !self.outdir.is_dir() {
            anyhow::bail!(
                "Output path {} is not a directory.",
                style(self.outdir.display()).red()
            );
        }

        let config = self.config();
        let spinner = utils.spinner("Joining methylation calls...")?;
        let comparison = config.run().context("Comparison failed")?;
        spinner.set_message("Writing outputs...");

        let prefix = config.output_prefix(&self.name);
        let mut written = Vec::new();

        let (path, sink) = create_output(&self.outdir, &format!("{prefix}.bed"))?;
        let paired = write_paired_sites(&comparison.store, &config.chromosome, sink)?;
        info!("{} paired sites written", paired);
        written.push(path);

        let summary = &comparison.summary;
        let (path, sink) =
            create_output(&self.outdir, &format!("raw.{prefix}.hm_array.csv"))?;
        write_array(&summary.histograms.joint, sink)?;
        written.push(path);

        let (path, sink) = create_output(&self.outdir, &format!("log.{}.csv", self.name))?;
        write_array(&summary.log_joint, sink)?;
        written.push(path);

        let (path, sink) =
            create_output(&self.outdir, &format!("log.bin2.{}.csv", self.name))?;
        write_array(&summary.half_log_joint, sink)?;
        written.push(path);

        let (path, sink) = create_output(
            &self.outdir,
            &format!("{prefix}.{}.marginals.csv", config.chromosome),
        )?;
        write_marginals(
            &summary.histograms.ont_marginal,
            &summary.histograms.bis_marginal,
            sink,
        )?;
        written.push(path);

        if let Some(stats_path) = &self.stats {
            let file = std::fs::File::create(stats_path).with_context(|| {
                format!("Failed to create stats file {}", stats_path.display())
            })?;
            methcomp::exports::serde_json::to_writer_pretty(file, &comparison.report())?;
            written.push(stats_path.clone());
        }

        spinner.finish_and_clear();

        println!(
            "[{}] {} sites stored, {} joint ({})",
            style("V").green(),
            style(comparison.store.len()).green(),
            style(summary.histograms.joint_sites()).green(),
            config.chromosome
        );
        println!(
            "Low coverage ONT: {}, low coverage BiS: {}",
            style(comparison.nanopore_stats.low_coverage).yellow(),
            style(comparison.bisulfite_stats.low_coverage).yellow()
        );
        println!(
            "Marginal correlation: {}",
            style(format!("{:.4}", summary.correlation.coefficient)).cyan()
        );
        println!(
            "Written:\n\t{}",
            written.iter().map(|p| p.display()).join("\n\t")
        );
        Ok(())
    }
}
