use filedb::commands::{self, books, checkin, checkout, members, validate};
use filedb::config::FiledbConfig;
use filedb::model::{field, record, Loan, Record, Table};
use filedb::store::csv_file;
use filedb::store::fs::FileStore;
use filedb::store::RecordStore;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use std::fs;
use tempfile::TempDir;

fn setup() -> (TempDir, FileStore) {
    let dir = TempDir::new().unwrap();
    let store = FileStore::new(dir.path().join("data"));
    (dir, store)
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
}

#[test]
fn test_write_all_then_read_all_reproduces_rows() {
    let (_dir, mut store) = setup();
    store.initialize(Table::Books).unwrap();

    let rows: Vec<Record> = vec![
        record([
            ("id", "1"),
            ("title", "Dune, Part One"),
            ("author", "Herbert"),
            ("year", "1965"),
            ("isbn", "ISBN1"),
            ("status", "OUT"),
        ]),
        record([
            ("id", "2"),
            ("title", "Line\nbreak"),
            ("author", ""),
            ("year", "x"),
            ("isbn", "\"quoted\""),
            ("status", "AVAILABLE"),
        ]),
    ];
    store.write_all(Table::Books, &rows).unwrap();

    assert_eq!(store.read_all(Table::Books).unwrap(), rows);
}

#[test]
fn test_ids_ignore_corrupt_rows_on_disk() {
    let (_dir, mut store) = setup();
    commands::bootstrap(&mut store).unwrap();
    let path = store.table_path(Table::Members);
    let mut content = fs::read_to_string(&path).unwrap();
    content.push_str("3,Ann,a@x.com,2024-01-01,ACTIVE\n");
    content.push_str("seven,Bob,b@x.com,2024-01-01,ACTIVE\n");
    fs::write(&path, content).unwrap();

    assert_eq!(store.next_id(Table::Members).unwrap(), 4);
    assert_eq!(members::add(&mut store, "Cy", "c@x.com", today()).unwrap(), 4);
}

#[test]
fn test_sequential_adds_never_collide() {
    let (_dir, mut store) = setup();
    let mut seen = BTreeSet::new();
    for i in 0..20 {
        let id = books::add(&mut store, &format!("Book {}", i), "Anon", 2000, "X").unwrap();
        assert!(seen.insert(id), "duplicate id {}", id);
    }
    assert_eq!(seen.into_iter().collect::<Vec<_>>(), (1..=20).collect::<Vec<u64>>());
}

#[test]
fn test_full_lending_cycle_on_disk() {
    let (_dir, mut store) = setup();
    let config = FiledbConfig::default();

    assert_eq!(books::add(&mut store, "Dune", "Herbert", 1965, "ISBN1").unwrap(), 1);
    assert_eq!(members::add(&mut store, "Alice", "a@x.com", today()).unwrap(), 1);
    assert_eq!(checkout::run(&mut store, 1, 1, today(), &config).unwrap(), 1);

    let book = store.find_by_id(Table::Books, 1).unwrap().unwrap();
    assert_eq!(field(&book, "status"), "OUT");

    assert!(checkin::run(&mut store, 1, today(), &config).unwrap());

    let book = store.find_by_id(Table::Books, 1).unwrap().unwrap();
    assert_eq!(field(&book, "status"), "AVAILABLE");
    let loan = store.find_by_id(Table::Loans, 1).unwrap().unwrap();
    assert_eq!(field(&loan, "status"), "RETURNED");
    assert_eq!(field(&loan, "return_date"), "2024-06-15");

    assert!(validate::run(&mut store).unwrap().is_empty());
}

#[test]
fn test_dangling_member_reported_once() {
    let (_dir, mut store) = setup();
    books::add(&mut store, "Dune", "Herbert", 1965, "ISBN1").unwrap();
    members::add(&mut store, "Alice", "a@x.com", today()).unwrap();
    store
        .append(Table::Loans, &Loan::open(1, 1, 2, today()).to_record())
        .unwrap();

    let problems = validate::run(&mut store).unwrap();
    assert_eq!(problems.len(), 1);
    assert!(problems[0].contains("missing member_id=2"), "{}", problems[0]);
}

#[test]
fn test_malformed_file_surfaces_parse_error() {
    let (_dir, mut store) = setup();
    commands::bootstrap(&mut store).unwrap();
    fs::write(
        store.table_path(Table::Books),
        "id,title,author,year,isbn,status\n1,Dune\n",
    )
    .unwrap();

    let err = books::find_by_title(&mut store, "").unwrap_err();
    assert!(matches!(err, filedb::error::FiledbError::Parse { .. }), "{:?}", err);
}

#[test]
fn test_existing_headers_are_not_revalidated() {
    let (_dir, store) = setup();
    let path = store.table_path(Table::Books);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "id,name\n1,odd\n").unwrap();

    assert!(!csv_file::ensure_file(&path, Table::Books.headers()).unwrap());
    let rows = store.read_all(Table::Books).unwrap();
    assert_eq!(rows, vec![record([("id", "1"), ("name", "odd")])]);
}
