mod read;
mod schema;
mod write;

#[cfg(test)]
mod tests;

pub use read::{
    parse_line,
    CoverageReader,
    CoverageRecord,
    FieldError,
    MethylRecord,
    NanoporeReader,
    NanoporeRecord,
    RecordReader,
};
pub use schema::ReportType;
pub use write::{
    read_array,
    write_array,
    write_marginals,
    write_paired_sites,
};
