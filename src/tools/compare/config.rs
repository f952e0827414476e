use std::path::{
    Path,
    PathBuf,
};

use log::info;
use serde::{
    Deserialize,
    Serialize,
};

use super::{
    compare_records,
    MethylComparison,
};
use crate::data_structs::typedef::{
    CountType,
    ScoreType,
    MAX_SCORE,
};
use crate::data_structs::ChromosomeSelector;
use crate::error::Result;
use crate::io::open_input;
use crate::io::report::{
    CoverageReader,
    NanoporeReader,
};

/// Parameters of one comparison run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonConfig {
    pub nanopore_path:     PathBuf,
    pub bisulfite_path:    PathBuf,
    /// Minimum bedMethyl score, 0..=1000.
    pub score_cutoff:      ScoreType,
    /// Minimum `mod + canonical` depth, applied to both technologies.
    pub read_count_cutoff: CountType,
    pub chromosome:        ChromosomeSelector,
}

impl Default for ComparisonConfig {
    fn default() -> Self {
        Self {
            nanopore_path:     PathBuf::new(),
            bisulfite_path:    PathBuf::new(),
            score_cutoff:      MAX_SCORE,
            read_count_cutoff: 20,
            chromosome:        ChromosomeSelector::All,
        }
    }
}

impl ComparisonConfig {
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        nanopore_path: P,
        bisulfite_path: Q,
    ) -> Self {
        Self {
            nanopore_path: nanopore_path.as_ref().to_path_buf(),
            bisulfite_path: bisulfite_path.as_ref().to_path_buf(),
            ..Default::default()
        }
    }

    pub fn with_score_cutoff(
        mut self,
        score_cutoff: ScoreType,
    ) -> Self {
        self.score_cutoff = score_cutoff.min(MAX_SCORE);
        self
    }

    pub fn with_read_count_cutoff(
        mut self,
        read_count_cutoff: CountType,
    ) -> Self {
        self.read_count_cutoff = read_count_cutoff;
        self
    }

    pub fn with_chromosome(
        mut self,
        chromosome: ChromosomeSelector,
    ) -> Self {
        self.chromosome = chromosome;
        self
    }

    /// Output file prefix, `{score_cutoff}.{read_count_cutoff}.{name}`.
    pub fn output_prefix(
        &self,
        name: &str,
    ) -> String {
        format!("{}.{}.{}", self.score_cutoff, self.read_count_cutoff, name)
    }

    /// Reads both inputs and runs the full comparison.
    pub fn run(&self) -> Result<MethylComparison> {
        info!(
            "ONT bed {}, bisulfite coverage {}",
            self.nanopore_path.display(),
            self.bisulfite_path.display()
        );
        info!(
            "score_cutoff: {}, read_count_cutoff: {}, chromosome: {}",
            self.score_cutoff, self.read_count_cutoff, self.chromosome
        );

        let nanopore = NanoporeReader::new(
            self.nanopore_path.to_string_lossy(),
            open_input(&self.nanopore_path)?,
        );
        let bisulfite = CoverageReader::new(
            self.bisulfite_path.to_string_lossy(),
            open_input(&self.bisulfite_path)?,
        );
        compare_records(self, nanopore, bisulfite)
    }
}
