use std::io::BufRead;
use std::marker::PhantomData;
use std::str::FromStr;

use super::schema::ReportType;
use crate::data_structs::typedef::{
    CountType,
    DensityType,
    PosType,
    ScoreType,
    MAX_SCORE,
};
use crate::data_structs::{
    BisulfiteCall,
    NanoporeCall,
};
use crate::error::{
    MethCompError,
    Result,
};

/// Why a single field could not be parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldError {
    pub field:  usize,
    pub reason: String,
}

/// A record type parsed from one line of a report.
pub trait MethylRecord: Sized {
    const REPORT_TYPE: ReportType;

    /// Builds the record from the whitespace-split fields of a line.
    fn from_fields(fields: &[&str]) -> std::result::Result<Self, FieldError>;

    fn chromosome(&self) -> &str;

    fn start(&self) -> PosType;

    /// `mod_count + canonical_count`, the depth the cutoffs apply to.
    fn total_called(&self) -> CountType;
}

fn parse_field<T: FromStr>(
    fields: &[&str],
    idx: usize,
    report_type: ReportType,
) -> std::result::Result<T, FieldError>
where
    T::Err: std::fmt::Display, {
    let name = report_type.col_names()[idx];
    let raw = fields.get(idx).ok_or_else(|| {
        FieldError {
            field:  idx,
            reason: format!(
                "missing `{name}` ({} fields found, {} expected)",
                fields.len(),
                report_type.min_fields()
            ),
        }
    })?;
    raw.parse::<T>().map_err(|e| {
        FieldError {
            field:  idx,
            reason: format!("cannot parse `{name}` from {raw:?}: {e}"),
        }
    })
}

/// One line of a nanopore bedMethyl file.
#[derive(Debug, Clone, PartialEq)]
pub struct NanoporeRecord {
    pub chromosome:      String,
    pub start:           PosType,
    pub end:             PosType,
    pub score:           ScoreType,
    pub total_reads:     CountType,
    pub percent:         DensityType,
    pub canonical_count: CountType,
    pub mod_count:       CountType,
}

impl NanoporeRecord {
    pub fn to_call(&self) -> NanoporeCall {
        NanoporeCall {
            end:             self.end,
            percent:         self.percent,
            score:           self.score,
            mod_count:       self.mod_count,
            canonical_count: self.canonical_count,
            total_reads:     self.total_reads,
        }
    }
}

impl MethylRecord for NanoporeRecord {
    const REPORT_TYPE: ReportType = ReportType::BedMethyl;

    fn from_fields(fields: &[&str]) -> std::result::Result<Self, FieldError> {
        let rt = Self::REPORT_TYPE;
        let chromosome = parse_field::<String>(fields, rt.chr_col(), rt)?;
        let score = parse_field::<ScoreType>(fields, 4, rt)?;
        if score > MAX_SCORE {
            return Err(FieldError {
                field:  4,
                reason: format!("score {score} exceeds {MAX_SCORE}"),
            });
        }
        Ok(Self {
            chromosome,
            start: parse_field(fields, rt.position_col(), rt)?,
            end: parse_field(fields, 2, rt)?,
            score,
            total_reads: parse_field(fields, 9, rt)?,
            percent: parse_field(fields, 10, rt)?,
            canonical_count: parse_field(fields, 11, rt)?,
            mod_count: parse_field(fields, 12, rt)?,
        })
    }

    fn chromosome(&self) -> &str {
        &self.chromosome
    }

    fn start(&self) -> PosType {
        self.start
    }

    fn total_called(&self) -> CountType {
        self.mod_count.saturating_add(self.canonical_count)
    }
}

/// One line of a Bismark coverage report.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageRecord {
    pub chromosome:      String,
    pub start:           PosType,
    pub percent:         DensityType,
    pub mod_count:       CountType,
    pub canonical_count: CountType,
}

impl CoverageRecord {
    pub fn to_call(&self) -> BisulfiteCall {
        BisulfiteCall::new(self.percent, self.mod_count, self.canonical_count)
    }
}

impl MethylRecord for CoverageRecord {
    const REPORT_TYPE: ReportType = ReportType::Coverage;

    fn from_fields(fields: &[&str]) -> std::result::Result<Self, FieldError> {
        let rt = Self::REPORT_TYPE;
        Ok(Self {
            chromosome:      parse_field(fields, rt.chr_col(), rt)?,
            start:           parse_field(fields, rt.position_col(), rt)?,
            percent:         parse_field(fields, 3, rt)?,
            mod_count:       parse_field(fields, 4, rt)?,
            canonical_count: parse_field(fields, 5, rt)?,
        })
    }

    fn chromosome(&self) -> &str {
        &self.chromosome
    }

    fn start(&self) -> PosType {
        self.start
    }

    fn total_called(&self) -> CountType {
        self.mod_count.saturating_add(self.canonical_count)
    }
}

/// Parses a single line. Fields are separated by any run of whitespace.
pub fn parse_line<T: MethylRecord>(line: &str) -> std::result::Result<T, FieldError> {
    let fields = line.split_ascii_whitespace().collect::<Vec<_>>();
    T::from_fields(&fields)
}

/// Locates the field holding the first invalid UTF-8 byte of a line.
fn utf8_field_error(
    line: &[u8],
    error: std::str::Utf8Error,
) -> FieldError {
    let offset = error.valid_up_to();
    let field = line[..offset]
        .split(|b| b.is_ascii_whitespace())
        .filter(|chunk| !chunk.is_empty())
        .count();
    // A field that started before the bad byte is the one containing it.
    let field = match line[..offset].last() {
        Some(b) if !b.is_ascii_whitespace() => field.saturating_sub(1),
        _ => field,
    };
    FieldError {
        field,
        reason: format!("invalid UTF-8 at byte {offset}"),
    }
}

/// Streams typed records out of a line-oriented report.
///
/// Blank lines are skipped. Any other line that fails to parse yields a
/// [`MethCompError::MalformedRecord`] carrying the source label and the
/// 1-based line number.
pub struct RecordReader<R: BufRead, T: MethylRecord> {
    source_name: String,
    handle:      R,
    buffer:      Vec<u8>,
    line_no:     usize,
    _record:     PhantomData<T>,
}

impl<R: BufRead, T: MethylRecord> RecordReader<R, T> {
    pub fn new(
        source_name: impl Into<String>,
        handle: R,
    ) -> Self {
        Self {
            source_name: source_name.into(),
            handle,
            buffer: Vec::new(),
            line_no: 0,
            _record: PhantomData,
        }
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    /// Number of lines consumed so far, blank ones included.
    pub fn lines_read(&self) -> usize {
        self.line_no
    }

    fn malformed(
        &self,
        error: FieldError,
    ) -> MethCompError {
        MethCompError::MalformedRecord {
            source_name: self.source_name.clone(),
            line:        self.line_no,
            field:       error.field,
            reason:      error.reason,
        }
    }

    fn next_record(&mut self) -> Option<Result<T>> {
        loop {
            self.buffer.clear();
            match self.handle.read_until(b'\n', &mut self.buffer) {
                Ok(0) => return None,
                Ok(_) => self.line_no += 1,
                Err(e) => return Some(Err(e.into())),
            }
            let line = match std::str::from_utf8(&self.buffer) {
                Ok(line) => line,
                Err(e) => return Some(Err(self.malformed(utf8_field_error(&self.buffer, e)))),
            };
            if line.trim().is_empty() {
                continue;
            }
            return Some(parse_line::<T>(line).map_err(|e| self.malformed(e)));
        }
    }
}

impl<R: BufRead, T: MethylRecord> Iterator for RecordReader<R, T> {
    type Item = Result<T>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_record()
    }
}

pub type NanoporeReader<R> = RecordReader<R, NanoporeRecord>;
pub type CoverageReader<R> = RecordReader<R, CoverageRecord>;
