use crate::model::{field, LoanStatus, Record};

/// Ids of loans in `loans` that are still OUT for `book_id`.
pub fn open_loans_for_book<'a>(loans: &'a [Record], book_id: &str) -> Vec<&'a str> {
    loans
        .iter()
        .filter(|row| field(row, "book_id") == book_id)
        .filter(|row| field(row, "status") == LoanStatus::Out.as_str())
        .map(|row| field(row, "id"))
        .collect()
}
