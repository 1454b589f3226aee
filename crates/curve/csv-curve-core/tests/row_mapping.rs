use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use csv_curve_core::{
    ColumnSet, ConvertFailed, CsvReader, CsvRecord, MemoryResourceLoader, ReaderConfig, RowSource,
};

#[derive(Debug, Default, PartialEq)]
struct Sample {
    name: String,
    count: u32,
    weight: f64,
    flag: bool,
}

impl CsvRecord for Sample {
    fn columns() -> ColumnSet<Self> {
        // Column 1 is deliberately unmapped.
        ColumnSet::builder()
            .column(0, "name", "unnamed".to_string(), |r: &mut Self, v| r.name = v)
            .column(2, "count", 7u32, |r: &mut Self, v| r.count = v)
            .column(3, "weight", 1.5f64, |r: &mut Self, v| r.weight = v)
            .column(4, "flag", false, |r: &mut Self, v| r.flag = v)
            .build()
    }
}

fn map(line: &str) -> (Sample, Vec<ConvertFailed>) {
    let columns = Sample::columns();
    let mut failures = Vec::new();
    let record = columns.map_row(line, ',', 1, |f| failures.push(f));
    (record, failures)
}

#[test]
fn maps_registered_columns_and_skips_others() {
    let (record, failures) = map("alpha,ignored,3,0.25,true");
    assert!(failures.is_empty());
    assert_eq!(
        record,
        Sample {
            name: "alpha".into(),
            count: 3,
            weight: 0.25,
            flag: true,
        }
    );
}

#[test]
fn short_row_keeps_record_defaults() {
    let (record, failures) = map("beta,x,4");
    assert!(failures.is_empty());
    assert_eq!(record.count, 4);
    assert_eq!(record.weight, 0.0);
    assert!(!record.flag);
}

#[test]
fn failed_field_gets_declared_default_and_one_notification() {
    let (record, failures) = map("gamma,x,many,heavy,true");
    assert_eq!(record.count, 7);
    assert_eq!(record.weight, 1.5);
    assert!(record.flag);
    assert_eq!(failures.len(), 2);

    let first = &failures[0];
    assert_eq!(first.column, 2);
    assert_eq!(first.member, "count");
    assert_eq!(first.failed_value, "many");
    assert_eq!(first.replacement, "7");
    assert_eq!(failures[1].member, "weight");
}

#[test]
fn embedded_delimiter_shifts_later_columns() {
    // "a,b" in the name column pushes everything one position right.
    let (record, failures) = map("a,b,x,5,0.5,true");
    assert_eq!(record.name, "a");
    assert_eq!(record.count, 7);
    assert_eq!(record.weight, 5.0);
    assert_eq!(failures.len(), 2);
}

#[test]
fn duplicate_index_last_registration_wins() {
    #[derive(Default)]
    struct Dup {
        first: i32,
        second: i32,
    }
    let columns: ColumnSet<Dup> = ColumnSet::builder()
        .column(0, "first", 0i32, |r: &mut Dup, v| r.first = v)
        .column(0, "second", 0i32, |r: &mut Dup, v| r.second = v)
        .build();
    assert_eq!(columns.len(), 1);
    assert_eq!(columns.member(0), Some("second"));

    let record = columns.map_row("9", ',', 1, |_| {});
    assert_eq!(record.first, 0);
    assert_eq!(record.second, 9);
}

#[test]
fn column_set_introspection() {
    let columns = Sample::columns();
    assert_eq!(columns.len(), 4);
    assert_eq!(columns.max_index(), Some(4));
    assert_eq!(columns.member(1), None);
    assert!(format!("{columns:?}").contains("weight"));
}

#[test]
fn reader_notifies_once_per_failed_field_and_collects() {
    let text = "name,_,count,weight,flag\nok,_,1,1,true\nbad,_,?,?,maybe\n".to_string();
    let source = RowSource::from_text("mem", text, true);
    let seen = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&seen);
    let mut reader = CsvReader::with_columns(source, Arc::new(Sample::columns()), ',')
        .on_convert_failed(move |f| sink.borrow_mut().push((f.row, f.member)));

    let records: Vec<Sample> = reader.by_ref().collect();
    assert_eq!(records.len(), 2);
    assert_eq!(
        *seen.borrow(),
        vec![(3, "count"), (3, "weight"), (3, "flag")]
    );
    assert_eq!(reader.take_failures().len(), 3);
    assert!(reader.take_failures().is_empty());
}

#[test]
fn shared_table_is_reused_across_reads() {
    let columns = Arc::new(Sample::columns());
    for text in ["a,_,1\n", "b,_,2\nc,_,3\n"] {
        let source = RowSource::from_text("mem", text.to_string(), false);
        let outcome = CsvReader::with_columns(source, Arc::clone(&columns), ',').read_all();
        assert!(outcome.failures.is_empty());
        assert!(!outcome.records.is_empty());
    }
    assert_eq!(Arc::strong_count(&columns), 1);
}

#[test]
fn custom_delimiter() {
    let source = RowSource::from_text("mem", "x;_;12;2.5;false\n".to_string(), false);
    let outcome = CsvReader::with_columns(source, Arc::new(Sample::columns()), ';').read_all();
    assert_eq!(outcome.records[0].count, 12);
    assert_eq!(outcome.records[0].weight, 2.5);
}

#[test]
fn open_through_loader_and_close_early() {
    let loader = MemoryResourceLoader::new().with("CSV/samples", "a;_;x;1;true\nb;_;2;2;false\n");
    let cfg = ReaderConfig {
        delimiter: ';',
        skip_header: false,
        ..ReaderConfig::default()
    };
    let mut reader = CsvReader::<Sample>::open(&loader, "CSV/samples", &cfg).unwrap();
    assert!(reader.is_open());

    let first = reader.next().unwrap();
    assert_eq!(first.name, "a");
    assert_eq!(first.count, 7);
    assert!(first.flag);

    assert!(reader.close());
    assert!(!reader.close());
    assert!(!reader.is_open());
    assert!(reader.next().is_none());

    let failures = reader.take_failures();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].member, "count");
    assert_eq!(failures[0].row, 1);
}
