//! End-to-end comparison: nanopore pass, bisulfite pass, binning and
//! derived statistics.

mod config;

use log::{
    debug,
    info,
};
use ndarray::Array2;
use serde::Serialize;

pub use config::ComparisonConfig;

use super::histogram::{
    build_histograms,
    MethylationHistograms,
};
use super::ingest::{
    ingest_bisulfite,
    ingest_nanopore,
    BisulfiteIngestStats,
    NanoporeIngestStats,
};
use super::transform::{
    add_pseudo_counts,
    block_average,
    correlation_matrix,
    log_transform,
    marginal_correlation,
    MarginalCorrelation,
};
use crate::data_structs::PositionalStore;
use crate::error::Result;
use crate::io::report::{
    CoverageRecord,
    NanoporeRecord,
};

/// Histograms of one scope together with the statistics derived from them.
#[derive(Debug, Clone)]
pub struct HistogramSummary {
    pub histograms:     MethylationHistograms,
    /// Joint histogram with one pseudo count per cell.
    pub smoothed:       Array2<u64>,
    /// Natural log of `smoothed`.
    pub log_joint:      Array2<f64>,
    /// `log_joint` block averaged to half resolution.
    pub half_log_joint: Array2<f64>,
    pub correlation:    MarginalCorrelation,
}

impl HistogramSummary {
    pub fn from_histograms(histograms: MethylationHistograms) -> Result<Self> {
        debug!("Adding pseudo counts");
        let smoothed = add_pseudo_counts(&histograms.joint);
        debug!("Log transform");
        let log_joint = log_transform(&smoothed);
        let half_log_joint = block_average(&log_joint)?;
        let correlation =
            marginal_correlation(&histograms.ont_marginal, &histograms.bis_marginal);
        info!(
            "Marginal correlation: {:.4} ({} joint sites)",
            correlation.coefficient,
            histograms.joint_sites()
        );
        Ok(Self {
            histograms,
            smoothed,
            log_joint,
            half_log_joint,
            correlation,
        })
    }
}

/// Everything a comparison run produces.
#[derive(Debug, Clone)]
pub struct MethylComparison {
    pub config:          ComparisonConfig,
    pub store:           PositionalStore,
    pub nanopore_stats:  NanoporeIngestStats,
    pub bisulfite_stats: BisulfiteIngestStats,
    pub summary:         HistogramSummary,
}

/// Serializable digest of a run: parameters, pass diagnostics and the
/// correlation.
#[derive(Debug, Serialize)]
pub struct ComparisonReport<'a> {
    pub config:      &'a ComparisonConfig,
    pub nanopore:    &'a NanoporeIngestStats,
    pub bisulfite:   &'a BisulfiteIngestStats,
    pub sites:       usize,
    pub joint_sites: u64,
    pub correlation: &'a MarginalCorrelation,
}

impl MethylComparison {
    pub fn report(&self) -> ComparisonReport<'_> {
        ComparisonReport {
            config:      &self.config,
            nanopore:    &self.nanopore_stats,
            bisulfite:   &self.bisulfite_stats,
            sites:       self.store.len(),
            joint_sites: self.summary.histograms.joint_sites(),
            correlation: &self.summary.correlation,
        }
    }
}

/// Runs the comparison over already opened record streams.
pub fn compare_records<N, B>(
    config: &ComparisonConfig,
    nanopore: N,
    bisulfite: B,
) -> Result<MethylComparison>
where
    N: IntoIterator<Item = Result<NanoporeRecord>>,
    B: IntoIterator<Item = Result<CoverageRecord>>, {
    info!("Reading ONT records");
    let nanopore = ingest_nanopore(nanopore, config.score_cutoff, config.read_count_cutoff)?;
    info!("Reading BiS records");
    let bisulfite = ingest_bisulfite(bisulfite, nanopore.store, config.read_count_cutoff)?;

    info!("Filling arrays");
    let histograms = build_histograms(&bisulfite.store, &config.chromosome)?;
    let summary = HistogramSummary::from_histograms(histograms)?;
    info!(
        "Low coverage ONT: {}, low coverage BiS: {}",
        nanopore.stats.low_coverage, bisulfite.stats.low_coverage
    );

    Ok(MethylComparison {
        config: config.clone(),
        store: bisulfite.store,
        nanopore_stats: nanopore.stats,
        bisulfite_stats: bisulfite.stats,
        summary,
    })
}

/// Re-analysis of a previously dumped raw joint histogram.
#[derive(Debug, Clone)]
pub struct ReloadedArray {
    pub smoothed:           Array2<u64>,
    pub log_counts:         Array2<f64>,
    /// Row-wise correlation of the smoothed counts.
    pub correlation_matrix: Array2<f64>,
}

impl ReloadedArray {
    pub fn from_counts(counts: &Array2<u64>) -> Self {
        debug!("Reloaded array shape {:?}", counts.dim());
        let smoothed = add_pseudo_counts(counts);
        let log_counts = log_transform(&smoothed);
        let correlation_matrix = correlation_matrix(&smoothed);
        Self {
            smoothed,
            log_counts,
            correlation_matrix,
        }
    }
}
