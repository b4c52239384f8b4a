use crate::commands::bootstrap;
use crate::error::Result;
use crate::model::{field, Book, Record, Table};
use crate::store::RecordStore;
use tracing::info;

/// Append a new AVAILABLE book and return its id.
pub fn add<S: RecordStore>(
    store: &mut S,
    title: &str,
    author: &str,
    year: i32,
    isbn: &str,
) -> Result<u64> {
    bootstrap(store)?;
    let id = store.next_id(Table::Books)?;
    let book = Book::new(id, title.into(), author.into(), year, isbn.into());
    store.append(Table::Books, &book.to_record())?;

    info!(id, title, "added book");
    Ok(id)
}

/// Books whose title contains `query`, ignoring case, in file order.
pub fn find_by_title<S: RecordStore>(store: &mut S, query: &str) -> Result<Vec<Record>> {
    bootstrap(store)?;
    let needle = query.to_lowercase();
    Ok(store
        .read_all(Table::Books)?
        .into_iter()
        .filter(|row| field(row, "title").to_lowercase().contains(&needle))
        .collect())
}

pub fn list<S: RecordStore>(store: &mut S) -> Result<Vec<Record>> {
    bootstrap(store)?;
    store.read_all(Table::Books)
}
