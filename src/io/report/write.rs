use std::fmt::Display;
use std::io::{
    Read,
    Write,
};

use itertools::Itertools;
use log::debug;
use ndarray::{
    Array1,
    Array2,
};

use crate::data_structs::{
    ChromosomeSelector,
    PositionalStore,
};
use crate::error::{
    MethCompError,
    Result,
};

/// Writes the tab-delimited `chromosome, start, ont_percent, bis_percent`
/// table of joint sites in scope. Returns the number of rows written.
pub fn write_paired_sites<W: Write>(
    store: &PositionalStore,
    selector: &ChromosomeSelector,
    sink: W,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::default()
        .delimiter(b'\t')
        .has_headers(false)
        .from_writer(sink);

    let mut written = 0;
    for (chr, start, site) in store.select(selector)? {
        if let Some(bis) = site.bisulfite() {
            writer.serialize((chr, start, site.nanopore().percent, bis.percent))?;
            written += 1;
        }
    }
    writer.flush()?;
    debug!("Wrote {} paired sites", written);
    Ok(written)
}

/// Dumps a 2D array row-major, comma-separated, without header.
pub fn write_array<W: Write, T: Display>(
    array: &Array2<T>,
    sink: W,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::default()
        .has_headers(false)
        .from_writer(sink);
    for row in array.rows() {
        writer.write_record(row.iter().map(ToString::to_string))?;
    }
    writer.flush()?;
    Ok(())
}

/// Dumps both marginals side by side as `bucket,nanopore,bisulfite`.
pub fn write_marginals<W: Write>(
    ont: &Array1<u64>,
    bis: &Array1<u64>,
    sink: W,
) -> Result<()> {
    if ont.len() != bis.len() {
        return Err(MethCompError::InvalidDimension(format!(
            "marginal lengths differ: {} vs {}",
            ont.len(),
            bis.len()
        )));
    }
    let mut writer = csv::WriterBuilder::default()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(["bucket", "nanopore", "bisulfite"])?;
    for (bucket, (o, b)) in ont.iter().zip(bis.iter()).enumerate() {
        writer.serialize((bucket, o, b))?;
    }
    writer.flush()?;
    Ok(())
}

/// Loads a count array written by [`write_array`].
pub fn read_array<R: Read>(source: R) -> Result<Array2<u64>> {
    let mut reader = csv::ReaderBuilder::default()
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(source);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let row = record
            .iter()
            .enumerate()
            .map(|(col, value)| {
                value.parse::<u64>().map_err(|e| {
                    MethCompError::MalformedRecord {
                        source_name: "array".to_string(),
                        line:        rows.len() + 1,
                        field:       col,
                        reason:      format!("cannot parse count from {value:?}: {e}"),
                    }
                })
            })
            .collect::<Result<Vec<_>>>()?;
        rows.push(row);
    }

    let n_cols = rows.first().map(Vec::len).unwrap_or(0);
    if let Some((idx, row)) = rows.iter().find_position(|row| row.len() != n_cols) {
        return Err(MethCompError::InvalidDimension(format!(
            "row {} has {} columns, expected {}",
            idx + 1,
            row.len(),
            n_cols
        )));
    }
    let n_rows = rows.len();
    Array2::from_shape_vec((n_rows, n_cols), rows.into_iter().flatten().collect())
        .map_err(|e| MethCompError::InvalidDimension(e.to_string()))
}
