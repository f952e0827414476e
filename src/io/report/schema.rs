use std::fmt::Display;

/// Supported positional methylation report formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportType {
    /// Nanopore bedMethyl (modkit pileup) output
    BedMethyl,
    /// Bismark coverage report with methylated/unmethylated counts
    Coverage,
}

impl Display for ReportType {
    fn fmt(
        &self,
        f: &mut std::fmt::Formatter<'_>,
    ) -> std::fmt::Result {
        let str = match self {
            ReportType::BedMethyl => "bedmethyl",
            ReportType::Coverage => "coverage",
        };
        write!(f, "{}", str)
    }
}

impl ReportType {
    /// Returns column names for this report format.
    pub const fn col_names(&self) -> &[&'static str] {
        match self {
            Self::BedMethyl => {
                &[
                    "chr",
                    "start",
                    "end",
                    "name",
                    "score",
                    "strand",
                    "thick_start",
                    "thick_end",
                    "color",
                    "coverage",
                    "density",
                    "count_canonical",
                    "count_m",
                ]
            },
            Self::Coverage => {
                &["chr", "start", "end", "density", "count_m", "count_um"]
            },
        }
    }

    /// Minimal number of fields a line must carry.
    pub const fn min_fields(&self) -> usize {
        self.col_names().len()
    }

    /// Returns chromosome column index.
    pub const fn chr_col(&self) -> usize {
        0
    }

    /// Returns position column index.
    pub const fn position_col(&self) -> usize {
        1
    }
}
