use std::io::Cursor;

use ndarray::{
    array,
    Array1,
};
use rstest::rstest;

use super::*;
use crate::data_structs::{
    BisulfiteCall,
    ChromosomeSelector,
    NanoporeCall,
    PositionalStore,
};
use crate::error::MethCompError;

const ONT_LINE: &str = "chr1 100 101 . 1000 . . . . 30 80.0 6 24";
const BIS_LINE: &str = "chr1 100 101 75.0 18 6";

// --- Parsing ---

#[test]
fn test_parse_nanopore_line() {
    let record = parse_line::<NanoporeRecord>(ONT_LINE).unwrap();
    assert_eq!(record, NanoporeRecord {
        chromosome:      "chr1".into(),
        start:           100,
        end:             101,
        score:           1000,
        total_reads:     30,
        percent:         80.0,
        canonical_count: 6,
        mod_count:       24,
    });
    assert_eq!(record.total_called(), 30);
}

#[test]
fn test_parse_nanopore_tab_delimited_with_extra_fields() {
    let line = "chrX\t5\t6\tm\t870\t+\t5\t6\t255,0,0\t12\t33.33\t8\t4\t1\t0\t0\t0\t0";
    let record = parse_line::<NanoporeRecord>(line).unwrap();
    assert_eq!(record.chromosome, "chrX");
    assert_eq!(record.score, 870);
    assert_eq!(record.percent, 33.33);
    assert_eq!(record.total_called(), 12);
}

#[test]
fn test_parse_coverage_line() {
    let record = parse_line::<CoverageRecord>(BIS_LINE).unwrap();
    assert_eq!(record.chromosome(), "chr1");
    assert_eq!(record.start(), 100);
    assert_eq!(record.percent, 75.0);
    assert_eq!(record.total_called(), 24);
    assert_eq!(record.to_call(), BisulfiteCall::new(75.0, 18, 6));
}

#[test]
fn test_parse_missing_field() {
    let err = parse_line::<NanoporeRecord>("chr1 100 101 . 1000 . . . . 30 80.0 6").unwrap_err();
    assert_eq!(err.field, 12);
    assert!(err.reason.contains("count_m"));
}

#[test]
fn test_parse_non_numeric_field() {
    let err = parse_line::<CoverageRecord>("chr1 100 101 NA 18 6").unwrap_err();
    assert_eq!(err.field, 3);
    assert!(err.reason.contains("density"));
}

#[test]
fn test_parse_score_above_maximum() {
    let err =
        parse_line::<NanoporeRecord>("chr1 100 101 . 1001 . . . . 30 80.0 6 24").unwrap_err();
    assert_eq!(err.field, 4);
}

// --- RecordReader ---

#[test]
fn test_reader_skips_blank_lines_and_counts_them() {
    let input = format!("{ONT_LINE}\n\n{ONT_LINE}\n");
    let mut reader = NanoporeReader::new("ont.bed", Cursor::new(input));
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().unwrap().is_ok());
    assert!(reader.next().is_none());
    assert_eq!(reader.lines_read(), 3);
}

#[test]
fn test_reader_reports_line_number() {
    let input = format!("{BIS_LINE}\n{BIS_LINE}\nchr1 7 8 x 1 1\n");
    let reader = CoverageReader::new("bis.cov", Cursor::new(input));
    let err = reader
        .collect::<Result<Vec<_>, _>>()
        .unwrap_err();
    match err {
        MethCompError::MalformedRecord {
            source_name,
            line,
            field,
            ..
        } => {
            assert_eq!(source_name, "bis.cov");
            assert_eq!(line, 3);
            assert_eq!(field, 3);
        },
        other => panic!("unexpected error {other}"),
    }
}

#[rstest]
#[case::chromosome(b"chr\xe9 100 101 . 1000 . . . . 30 80.0 6 24\n".as_slice(), 0)]
#[case::score(b"chr1 100 101 . 10\xff0 . . . . 30 80.0 6 24\n".as_slice(), 4)]
#[case::after_separator(b"chr1 100 101 . 1000 \xff . . . 30 80.0 6 24\n".as_slice(), 5)]
fn test_reader_reports_invalid_utf8(
    #[case] bad_line: &[u8],
    #[case] expected_field: usize,
) {
    let mut input = format!("{ONT_LINE}\n").into_bytes();
    input.extend_from_slice(bad_line);
    input.extend_from_slice(format!("{ONT_LINE}\n").as_bytes());

    let mut reader = NanoporeReader::new("ont.bed", Cursor::new(input));
    assert!(reader.next().unwrap().is_ok());
    match reader.next().unwrap() {
        Err(MethCompError::MalformedRecord {
            source_name,
            line,
            field,
            reason,
        }) => {
            assert_eq!(source_name, "ont.bed");
            assert_eq!(line, 2);
            assert_eq!(field, expected_field);
            assert!(reason.contains("UTF-8"));
        },
        other => panic!("unexpected result {other:?}"),
    }
    assert_eq!(reader.lines_read(), 2);
}

// --- Writers ---

fn demo_store() -> PositionalStore {
    let call = |percent| {
        NanoporeCall {
            end: 0,
            percent,
            score: 1000,
            mod_count: 10,
            canonical_count: 10,
            total_reads: 20,
        }
    };
    let mut store = PositionalStore::new();
    store.insert_nanopore("chr1", 100, call(80.0));
    store.insert_nanopore("chr1", 200, call(10.5));
    store.insert_nanopore("chr2", 50, call(1.0));
    store.attach_bisulfite("chr1", 100, BisulfiteCall::new(75.0, 18, 6));
    store.attach_bisulfite("chr2", 50, BisulfiteCall::new(0.0, 0, 20));
    store
}

#[test]
fn test_write_paired_sites_only_joint() {
    let store = demo_store();
    let mut buffer = Vec::new();
    let written = write_paired_sites(&store, &ChromosomeSelector::All, &mut buffer).unwrap();
    assert_eq!(written, 2);
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "chr1\t100\t80.0\t75.0\nchr2\t50\t1.0\t0.0\n"
    );
}

#[test]
fn test_write_paired_sites_single_chromosome() {
    let store = demo_store();
    let mut buffer = Vec::new();
    let selector = ChromosomeSelector::Single("chr2".into());
    assert_eq!(write_paired_sites(&store, &selector, &mut buffer).unwrap(), 1);
}

#[test]
fn test_write_and_read_array() {
    let array = array![[1u64, 2, 3], [4, 5, 6]];
    let mut buffer = Vec::new();
    write_array(&array, &mut buffer).unwrap();
    assert_eq!(String::from_utf8(buffer.clone()).unwrap(), "1,2,3\n4,5,6\n");
    assert_eq!(read_array(Cursor::new(buffer)).unwrap(), array);
}

#[test]
fn test_read_array_ragged() {
    let err = read_array(Cursor::new("1,2,3\n4,5\n")).unwrap_err();
    assert!(matches!(err, MethCompError::InvalidDimension(_)));
}

#[test]
fn test_read_array_non_numeric() {
    let err = read_array(Cursor::new("1,2\n4,x\n")).unwrap_err();
    assert!(matches!(
        err,
        MethCompError::MalformedRecord { line: 2, field: 1, .. }
    ));
}

#[test]
fn test_write_marginals() {
    let ont = Array1::from(vec![3u64, 0, 1]);
    let bis = Array1::from(vec![0u64, 5, 0]);
    let mut buffer = Vec::new();
    write_marginals(&ont, &bis, &mut buffer).unwrap();
    assert_eq!(
        String::from_utf8(buffer).unwrap(),
        "bucket,nanopore,bisulfite\n0,3,0\n1,0,5\n2,1,0\n"
    );
}
