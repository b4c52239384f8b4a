use crate::commands::bootstrap;
use crate::commands::helpers::open_loans_for_book;
use crate::config::FiledbConfig;
use crate::error::Result;
use crate::model::{field, format_date, record, BookStatus, LoanStatus, Table};
use crate::store::RecordStore;
use chrono::NaiveDate;
use tracing::{debug, info, warn};

/// Mark a loan RETURNED today and release its book.
///
/// Returns `false` only when the loan does not exist. Returning a loan that
/// is already RETURNED succeeds without writing anything. A loan whose
/// `book_id` does not parse is closed without touching any book.
///
/// With `check_loan_ledger` on, the book stays OUT while any other OUT loan
/// still references it; otherwise it is marked AVAILABLE unconditionally.
pub fn run<S: RecordStore>(
    store: &mut S,
    loan_id: u64,
    today: NaiveDate,
    config: &FiledbConfig,
) -> Result<bool> {
    bootstrap(store)?;

    let Some(loan) = store.find_by_id(Table::Loans, loan_id)? else {
        return Ok(false);
    };

    if field(&loan, "status") == LoanStatus::Returned.as_str() {
        debug!(loan_id, "loan already returned");
        return Ok(true);
    }

    let updated = store.update_by_id(
        Table::Loans,
        loan_id,
        &record([
            ("status", LoanStatus::Returned.as_str().to_string()),
            ("return_date", format_date(today)),
        ]),
    )?;

    let raw_book_id = field(&loan, "book_id");
    let Ok(book_id) = raw_book_id.trim().parse::<u64>() else {
        debug!(loan_id, book_id = raw_book_id, "loan has unparsable book_id, book left as is");
        return Ok(updated);
    };

    if config.check_loan_ledger {
        let loans = store.read_all(Table::Loans)?;
        let still_open = open_loans_for_book(&loans, &book_id.to_string());
        if !still_open.is_empty() {
            warn!(
                loan_id,
                book_id,
                open = ?still_open,
                "book still has open loans, leaving it OUT"
            );
            return Ok(updated);
        }
    }

    store.update_by_id(
        Table::Books,
        book_id,
        &record([("status", BookStatus::Available.as_str())]),
    )?;

    info!(loan_id, book_id, "returned");
    Ok(updated)
}
