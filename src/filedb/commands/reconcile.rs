use crate::commands::bootstrap;
use crate::error::Result;
use crate::model::{field, BookStatus, LoanStatus, Table};
use crate::store::RecordStore;
use std::collections::HashSet;
use tracing::info;

/// A book whose cached status disagreed with the loan ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusCorrection {
    pub book_id: String,
    pub was: String,
    pub now: BookStatus,
}

/// Recompute every book's status from the loan ledger: OUT when some OUT
/// loan references it, AVAILABLE otherwise. The books table is rewritten
/// once, and only if something changed.
pub fn run<S: RecordStore>(store: &mut S) -> Result<Vec<StatusCorrection>> {
    bootstrap(store)?;

    let loans = store.read_all(Table::Loans)?;
    let lent: HashSet<&str> = loans
        .iter()
        .filter(|r| field(r, "status") == LoanStatus::Out.as_str())
        .map(|r| field(r, "book_id"))
        .collect();

    let mut books = store.read_all(Table::Books)?;
    let mut corrections = Vec::new();
    for book in books.iter_mut() {
        let expected = if lent.contains(field(book, "id")) {
            BookStatus::Out
        } else {
            BookStatus::Available
        };
        if field(book, "status") == expected.as_str() {
            continue;
        }
        corrections.push(StatusCorrection {
            book_id: field(book, "id").to_string(),
            was: field(book, "status").to_string(),
            now: expected,
        });
        book.insert("status".into(), expected.as_str().into());
    }

    if !corrections.is_empty() {
        store.write_all(Table::Books, &books)?;
        info!(corrected = corrections.len(), "reconciled book status");
    }
    Ok(corrections)
}
