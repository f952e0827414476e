use log::debug;
use ndarray::{
    Array1,
    Array2,
};

use crate::data_structs::typedef::{
    DensityType,
    PosType,
    JOINT_SIDE,
    PERCENT_BUCKETS,
};
use crate::data_structs::{
    ChromosomeSelector,
    PositionalStore,
};
use crate::error::{
    MethCompError,
    Result,
};

/// Rounds a percentage (half to even) to its bucket, or `None` if the
/// result falls outside 0..=100.
pub fn percent_bucket(value: DensityType) -> Option<usize> {
    let rounded = value.round_ties_even();
    if (0.0..=100.0).contains(&rounded) {
        Some(rounded as usize)
    }
    else {
        None
    }
}

fn checked_bucket(
    chromosome: &str,
    start: PosType,
    value: DensityType,
) -> Result<usize> {
    percent_bucket(value).ok_or_else(|| {
        MethCompError::BucketOutOfRange {
            chromosome: chromosome.to_string(),
            start,
            value,
            bucket: value.round_ties_even(),
        }
    })
}

/// Joint and marginal methylation frequency distributions.
///
/// `joint[[ont, bis]]` counts sites; the marginals are weighted by read
/// depth of the respective technology.
#[derive(Debug, Clone, PartialEq)]
pub struct MethylationHistograms {
    pub joint:        Array2<u64>,
    pub ont_marginal: Array1<u64>,
    pub bis_marginal: Array1<u64>,
}

impl Default for MethylationHistograms {
    fn default() -> Self {
        Self {
            joint:        Array2::zeros((JOINT_SIDE, JOINT_SIDE)),
            ont_marginal: Array1::zeros(PERCENT_BUCKETS),
            bis_marginal: Array1::zeros(PERCENT_BUCKETS),
        }
    }
}

impl MethylationHistograms {
    /// Number of sites counted in the joint histogram.
    pub fn joint_sites(&self) -> u64 {
        self.joint.sum()
    }
}

/// Bins the sites selected by `selector`.
///
/// Every site adds its nanopore read depth to `ont_marginal`. Joint sites
/// additionally add their bisulfite depth to `bis_marginal` and one count to
/// `joint`. A percentage rounding outside 0..=100 fails with
/// [`MethCompError::BucketOutOfRange`].
pub fn build_histograms(
    store: &PositionalStore,
    selector: &ChromosomeSelector,
) -> Result<MethylationHistograms> {
    let mut histograms = MethylationHistograms::default();

    for (chr, start, site) in store.select(selector)? {
        let ont = site.nanopore();
        let ont_bucket = checked_bucket(chr, start, ont.percent)?;
        histograms.ont_marginal[ont_bucket] += ont.total_reads as u64;

        if let Some(bis) = site.bisulfite() {
            let bis_bucket = checked_bucket(chr, start, bis.percent)?;
            histograms.bis_marginal[bis_bucket] += bis.total_reads as u64;
            histograms.joint[[ont_bucket, bis_bucket]] += 1;
        }
    }

    debug!(
        "Histograms for {}: {} joint sites",
        selector,
        histograms.joint_sites()
    );
    Ok(histograms)
}
