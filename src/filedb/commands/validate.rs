use crate::commands::bootstrap;
use crate::error::Result;
use crate::model::{field, LoanStatus, Table};
use crate::store::RecordStore;
use std::collections::{HashMap, HashSet};

/// Read-only audit of the loan ledger.
///
/// Reports every loan whose `book_id` or `member_id` has no matching record,
/// then every book with more than one OUT loan. An empty list means healthy.
pub fn run<S: RecordStore>(store: &mut S) -> Result<Vec<String>> {
    bootstrap(store)?;

    let books = store.read_all(Table::Books)?;
    let members = store.read_all(Table::Members)?;
    let loans = store.read_all(Table::Loans)?;

    let book_ids: HashSet<&str> = books.iter().map(|r| field(r, "id")).collect();
    let member_ids: HashSet<&str> = members.iter().map(|r| field(r, "id")).collect();

    let mut problems = Vec::new();
    for loan in &loans {
        let id = field(loan, "id");
        let book_id = field(loan, "book_id");
        let member_id = field(loan, "member_id");
        if !book_ids.contains(book_id) {
            problems.push(format!("Loan {} references missing book_id={}", id, book_id));
        }
        if !member_ids.contains(member_id) {
            problems.push(format!(
                "Loan {} references missing member_id={}",
                id, member_id
            ));
        }
    }

    // Tally in first-seen order so the report is stable.
    let mut order = Vec::new();
    let mut open_by_book: HashMap<&str, usize> = HashMap::new();
    for loan in loans
        .iter()
        .filter(|r| field(r, "status") == LoanStatus::Out.as_str())
    {
        let book_id = field(loan, "book_id");
        let count = open_by_book.entry(book_id).or_insert_with(|| {
            order.push(book_id);
            0
        });
        *count += 1;
    }
    for book_id in order {
        let count = open_by_book[book_id];
        if count > 1 {
            problems.push(format!(
                "Book {} has {} OUT loans (double checkout)",
                book_id, count
            ));
        }
    }

    Ok(problems)
}
