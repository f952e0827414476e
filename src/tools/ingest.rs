//! Two-pass join of nanopore and bisulfite calls into a [`PositionalStore`].
//!
//! The nanopore pass is the only way to create sites. The bisulfite pass
//! consumes the store it produced and can only augment existing sites, so
//! the nanopore-before-bisulfite order is carried by the types.

use std::collections::BTreeMap;

use hashbrown::HashMap;
use log::{
    debug,
    info,
};
use serde::{
    Serialize,
    Serializer,
};

use super::histogram::percent_bucket;
use crate::data_structs::typedef::{
    CountType,
    ScoreType,
    MAX_CHROMOSOME_NAME_LEN,
    MAX_SCORE,
    PERCENT_BUCKETS,
};
use crate::data_structs::PositionalStore;
use crate::error::Result;
use crate::io::report::{
    CoverageRecord,
    MethylRecord,
    NanoporeRecord,
};

/// Progress is logged once per this many records.
pub const PROGRESS_INTERVAL: usize = 10_000_000;

/// Serializes a HashMap in deterministic order.
fn serialize_sorted_map<S, K: Ord + Serialize, V: Serialize>(
    map: &HashMap<K, V>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error>
where
    S: Serializer, {
    let sorted_map: BTreeMap<_, _> = map.iter().collect();
    sorted_map.serialize(serializer)
}

fn percent_of(
    part: usize,
    total: usize,
) -> f64 {
    if total == 0 {
        0.0
    }
    else {
        part as f64 / total as f64 * 100.0
    }
}

/// Diagnostics of the nanopore pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NanoporeIngestStats {
    /// Records parsed.
    pub records:              usize,
    /// Records written into the store, overwrites included.
    pub stored:               usize,
    /// Stored records that replaced an earlier record at the same key.
    pub overwritten:          usize,
    /// Records with `mod + canonical` below the read count cutoff.
    pub low_coverage:         usize,
    /// Records with a score below the score cutoff.
    pub low_score:            usize,
    /// Records on chromosomes with non-standard (long) names.
    pub other_chromosome:     usize,
    /// Score frequency over all parsed records, indexed by score.
    pub score_distribution:   Vec<u64>,
    /// Rounded percent frequency over all parsed records.
    pub percent_distribution: Vec<u64>,
    /// Records whose percent rounds outside 0..=100.
    pub out_of_range_percent: usize,
    /// Frequency of `mod + canonical` over all parsed records.
    #[serde(serialize_with = "serialize_sorted_map")]
    pub coverage_distribution: HashMap<CountType, u64>,
    /// Frequency of `mod + canonical` over records passing both cutoffs.
    #[serde(serialize_with = "serialize_sorted_map")]
    pub pass_filter_coverage: HashMap<CountType, u64>,
}

impl Default for NanoporeIngestStats {
    fn default() -> Self {
        Self {
            records:               0,
            stored:                0,
            overwritten:           0,
            low_coverage:          0,
            low_score:             0,
            other_chromosome:      0,
            score_distribution:    vec![0; MAX_SCORE as usize + 1],
            percent_distribution:  vec![0; PERCENT_BUCKETS],
            out_of_range_percent:  0,
            coverage_distribution: HashMap::new(),
            pass_filter_coverage:  HashMap::new(),
        }
    }
}

impl NanoporeIngestStats {
    pub fn summary(&self) -> String {
        let total = self.records;
        format!(
            "ONT records: {}. Stored {} ({:.2}%), overwritten {}. Non-standard \
             chromosomes {} ({:.2}%). Low score {} ({:.2}%). Low coverage {} \
             ({:.2}%). Percent out of range {}.",
            total,
            self.stored,
            percent_of(self.stored, total),
            self.overwritten,
            self.other_chromosome,
            percent_of(self.other_chromosome, total),
            self.low_score,
            percent_of(self.low_score, total),
            self.low_coverage,
            percent_of(self.low_coverage, total),
            self.out_of_range_percent,
        )
    }
}

/// Diagnostics of the bisulfite pass.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BisulfiteIngestStats {
    /// Records parsed.
    pub records:      usize,
    /// Records attached to an existing site.
    pub stored:       usize,
    /// Records with no nanopore site at their key.
    pub not_stored:   usize,
    /// Records with `mod + canonical` below the read count cutoff.
    pub low_coverage: usize,
}

impl BisulfiteIngestStats {
    pub fn summary(&self) -> String {
        let total = self.records;
        format!(
            "BiS records: {}. Stored {} ({:.2}%). Not stored {} ({:.2}%). Low \
             coverage {} ({:.2}%).",
            total,
            self.stored,
            percent_of(self.stored, total),
            self.not_stored,
            percent_of(self.not_stored, total),
            self.low_coverage,
            percent_of(self.low_coverage, total),
        )
    }
}

/// Output of [`ingest_nanopore`].
#[derive(Debug, Clone)]
pub struct NanoporeIngest {
    pub store: PositionalStore,
    pub stats: NanoporeIngestStats,
}

impl NanoporeIngest {
    /// Number of records dropped for low coverage.
    pub fn low_coverage(&self) -> usize {
        self.stats.low_coverage
    }
}

/// Output of [`ingest_bisulfite`].
#[derive(Debug, Clone)]
pub struct BisulfiteIngest {
    pub store: PositionalStore,
    pub stats: BisulfiteIngestStats,
}

impl BisulfiteIngest {
    /// Number of records dropped for low coverage.
    pub fn low_coverage(&self) -> usize {
        self.stats.low_coverage
    }
}

fn record_nanopore(
    record: &NanoporeRecord,
    score_cutoff: ScoreType,
    read_count_cutoff: CountType,
    store: &mut PositionalStore,
    stats: &mut NanoporeIngestStats,
) {
    let total_called = record.total_called();

    stats.score_distribution[record.score as usize] += 1;
    match percent_bucket(record.percent) {
        Some(bucket) => stats.percent_distribution[bucket] += 1,
        None => stats.out_of_range_percent += 1,
    }
    *stats.coverage_distribution.entry(total_called).or_default() += 1;

    if total_called < read_count_cutoff {
        stats.low_coverage += 1;
    }
    else if record.score < score_cutoff {
        stats.low_score += 1;
    }
    else {
        *stats.pass_filter_coverage.entry(total_called).or_default() += 1;
        if record.chromosome.chars().count() >= MAX_CHROMOSOME_NAME_LEN {
            stats.other_chromosome += 1;
        }
        else {
            if store.insert_nanopore(&record.chromosome, record.start, record.to_call()) {
                stats.overwritten += 1;
            }
            stats.stored += 1;
        }
    }
}

/// Builds a fresh store from nanopore records.
///
/// A record is stored only if `mod + canonical >= read_count_cutoff`,
/// `score >= score_cutoff`, and its chromosome name is shorter than six
/// characters. A later record at an existing key replaces the earlier one.
///
/// Percents that round outside 0..=100 are counted in
/// `out_of_range_percent` and do not stop the pass. Stored sites with such a
/// percent are rejected later by histogram building.
///
/// The first error from `records` aborts the pass after the counts
/// gathered so far have been logged.
pub fn ingest_nanopore<I>(
    records: I,
    score_cutoff: ScoreType,
    read_count_cutoff: CountType,
) -> Result<NanoporeIngest>
where
    I: IntoIterator<Item = Result<NanoporeRecord>>, {
    debug!(
        "Nanopore pass: score_cutoff={}, read_count_cutoff={}",
        score_cutoff, read_count_cutoff
    );
    let mut store = PositionalStore::new();
    let mut stats = NanoporeIngestStats::default();

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                info!("{} (aborted)", stats.summary());
                return Err(e);
            },
        };
        record_nanopore(
            &record,
            score_cutoff,
            read_count_cutoff,
            &mut store,
            &mut stats,
        );
        stats.records += 1;
        if stats.records % PROGRESS_INTERVAL == 0 {
            info!("ONT records: {}", stats.records);
        }
    }

    info!("{}", stats.summary());
    Ok(NanoporeIngest { store, stats })
}

/// Attaches bisulfite calls to the sites of `store`.
///
/// Records below `read_count_cutoff` are skipped, and records whose key is
/// not already in the store are counted as not stored. Bisulfite records
/// never create sites.
pub fn ingest_bisulfite<I>(
    records: I,
    mut store: PositionalStore,
    read_count_cutoff: CountType,
) -> Result<BisulfiteIngest>
where
    I: IntoIterator<Item = Result<CoverageRecord>>, {
    debug!(
        "Bisulfite pass over {} chromosomes: read_count_cutoff={}",
        store.chromosomes().count(),
        read_count_cutoff
    );
    let mut stats = BisulfiteIngestStats::default();

    for record in records {
        let record = match record {
            Ok(record) => record,
            Err(e) => {
                info!("{} (aborted)", stats.summary());
                return Err(e);
            },
        };
        stats.records += 1;

        if record.total_called() < read_count_cutoff {
            stats.low_coverage += 1;
        }
        else if store.attach_bisulfite(&record.chromosome, record.start, record.to_call())
        {
            stats.stored += 1;
        }
        else {
            stats.not_stored += 1;
        }

        if stats.records % PROGRESS_INTERVAL == 0 {
            info!("BiS records: {}", stats.records);
        }
    }

    info!("{}", stats.summary());
    Ok(BisulfiteIngest { store, stats })
}
