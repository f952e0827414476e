//! # methcomp
//!
//! `methcomp` compares DNA methylation frequency calls from nanopore
//! sequencing (modkit bedMethyl files) and bisulfite sequencing (Bismark
//! coverage reports) at matching CpG sites.
//!
//! Both inputs are streamed once. Nanopore calls passing the score, read
//! count and chromosome name filters populate a [`PositionalStore`] keyed by
//! chromosome and start position; bisulfite calls are then attached to the
//! sites that already exist. The joined sites are binned into a 102×102
//! joint histogram of rounded percentages and two read-depth weighted
//! marginals, from which pseudo-count smoothed, log-transformed and
//! block-averaged arrays and a Pearson correlation are derived.
//!
//! ## Structure
//!
//! * [`data_structs`]: the two-state [`SiteRecord`] and the
//!   [`PositionalStore`].
//! * [`io`]: line parsers for both formats, gzip-aware input opening, and
//!   writers for the paired-site table and array dumps.
//! * [`tools`]: the two ingest passes, histogram construction, array
//!   transforms, and the [`ComparisonConfig`] that runs them end to end.
//! * [`utils`]: statistics helpers.
//!
//! ## Usage
//!
//! ```no_run
//! use methcomp::prelude::*;
//!
//! fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
//!     let comparison = ComparisonConfig::new("sample.bed", "sample.cov.gz")
//!         .with_score_cutoff(1000)
//!         .with_read_count_cutoff(20)
//!         .with_chromosome(ChromosomeSelector::All)
//!         .run()?;
//!
//!     println!(
//!         "{} joint sites, r = {:.3}",
//!         comparison.summary.histograms.joint_sites(),
//!         comparison.summary.correlation.coefficient
//!     );
//!     Ok(())
//! }
//! ```
//!
//! [`PositionalStore`]: data_structs::PositionalStore
//! [`SiteRecord`]: data_structs::SiteRecord
//! [`ComparisonConfig`]: tools::compare::ComparisonConfig

pub mod data_structs;
pub mod error;
pub mod exports;
pub mod io;
pub mod tools;
pub mod utils;

pub mod prelude {
    pub use crate::data_structs::{
        BisulfiteCall,
        ChromosomeSelector,
        NanoporeCall,
        PositionalStore,
        SiteRecord,
        SiteState,
    };
    pub use crate::error::{
        MethCompError,
        Result,
    };
    pub use crate::io::open_input;
    pub use crate::io::report::{
        read_array,
        write_array,
        write_marginals,
        write_paired_sites,
        CoverageReader,
        CoverageRecord,
        NanoporeReader,
        NanoporeRecord,
    };
    pub use crate::tools::compare::{
        compare_records,
        ComparisonConfig,
        ComparisonReport,
        HistogramSummary,
        MethylComparison,
        ReloadedArray,
    };
    pub use crate::tools::histogram::{
        build_histograms,
        MethylationHistograms,
    };
    pub use crate::tools::ingest::{
        ingest_bisulfite,
        ingest_nanopore,
    };
}
