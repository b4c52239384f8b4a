use crate::commands::bootstrap;
use crate::commands::helpers::open_loans_for_book;
use crate::config::FiledbConfig;
use crate::error::{FiledbError, Result};
use crate::model::{field, record, BookStatus, Loan, MemberStatus, Table};
use crate::store::RecordStore;
use chrono::NaiveDate;
use tracing::{info, warn};

/// Lend `book_id` to `member_id` and return the new loan id.
///
/// The loan append and the book status update are two separate writes. If
/// the second one fails the loan stays OUT while the book still reads
/// AVAILABLE; `reconcile` repairs that.
pub fn run<S: RecordStore>(
    store: &mut S,
    book_id: u64,
    member_id: u64,
    today: NaiveDate,
    config: &FiledbConfig,
) -> Result<u64> {
    bootstrap(store)?;

    let book = store
        .find_by_id(Table::Books, book_id)?
        .ok_or_else(|| FiledbError::validation(format!("Book {} not found", book_id)))?;

    let member = store
        .find_by_id(Table::Members, member_id)?
        .ok_or_else(|| FiledbError::validation(format!("Member {} not found", member_id)))?;

    if config.enforce_member_status
        && field(&member, "status") == MemberStatus::Suspended.as_str()
    {
        return Err(FiledbError::validation(format!(
            "Member {} is SUSPENDED",
            member_id
        )));
    }

    if field(&book, "status") == BookStatus::Out.as_str() {
        return Err(FiledbError::validation(format!(
            "Book {} is already OUT",
            book_id
        )));
    }

    if config.check_loan_ledger {
        let loans = store.read_all(Table::Loans)?;
        if let Some(open) = open_loans_for_book(&loans, &book_id.to_string()).first() {
            return Err(FiledbError::validation(format!(
                "Book {} already has an open loan (loan {})",
                book_id, open
            )));
        }
    }

    let loan_id = store.next_id(Table::Loans)?;
    let loan = Loan::open(loan_id, book_id, member_id, today);
    store.append(Table::Loans, &loan.to_record())?;

    let flipped = store.update_by_id(
        Table::Books,
        book_id,
        &record([("status", BookStatus::Out.as_str())]),
    )?;
    if !flipped {
        warn!(book_id, loan_id, "book vanished before its status could be set OUT");
    }

    info!(loan_id, book_id, member_id, "checked out");
    Ok(loan_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{seeded_store, today};
    use crate::commands::{books, members};

    fn naive() -> FiledbConfig {
        FiledbConfig {
            enforce_member_status: false,
            check_loan_ledger: false,
            ..Default::default()
        }
    }

    fn validation_message(err: FiledbError) -> String {
        match err {
            FiledbError::Validation(msg) => msg,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn creates_one_out_loan_and_flips_book() {
        let mut store = seeded_store();
        let loan_id = run(&mut store, 1, 1, today(), &FiledbConfig::default()).unwrap();
        assert_eq!(loan_id, 1);

        let loans = store.read_all(Table::Loans).unwrap();
        assert_eq!(loans.len(), 1);
        assert_eq!(field(&loans[0], "status"), "OUT");
        assert_eq!(field(&loans[0], "loan_date"), "2024-06-15");
        assert_eq!(field(&loans[0], "return_date"), "");

        let book = store.find_by_id(Table::Books, 1).unwrap().unwrap();
        assert_eq!(field(&book, "status"), "OUT");
    }

    #[test]
    fn second_checkout_of_same_book_fails() {
        let mut store = seeded_store();
        run(&mut store, 1, 1, today(), &FiledbConfig::default()).unwrap();

        let err = run(&mut store, 1, 1, today(), &FiledbConfig::default()).unwrap_err();
        assert_eq!(validation_message(err), "Book 1 is already OUT");
        assert_eq!(store.read_all(Table::Loans).unwrap().len(), 1);
    }

    #[test]
    fn missing_book_or_member_is_a_validation_error() {
        let mut store = seeded_store();
        let err = run(&mut store, 9, 1, today(), &FiledbConfig::default()).unwrap_err();
        assert_eq!(validation_message(err), "Book 9 not found");

        let err = run(&mut store, 1, 9, today(), &FiledbConfig::default()).unwrap_err();
        assert_eq!(validation_message(err), "Member 9 not found");
    }

    #[test]
    fn suspended_member_is_refused_when_enforced() {
        let mut store = seeded_store();
        members::set_status(&mut store, 1, MemberStatus::Suspended).unwrap();

        let err = run(&mut store, 1, 1, today(), &FiledbConfig::default()).unwrap_err();
        assert_eq!(validation_message(err), "Member 1 is SUSPENDED");

        assert_eq!(run(&mut store, 1, 1, today(), &naive()).unwrap(), 1);
    }

    #[test]
    fn ledger_check_catches_stale_available_flag() {
        let mut store = seeded_store();
        run(&mut store, 1, 1, today(), &FiledbConfig::default()).unwrap();
        // Drift the cache back to AVAILABLE behind the ledger's back.
        store
            .update_by_id(Table::Books, 1, &record([("status", "AVAILABLE")]))
            .unwrap();

        let err = run(&mut store, 1, 1, today(), &FiledbConfig::default()).unwrap_err();
        assert_eq!(
            validation_message(err),
            "Book 1 already has an open loan (loan 1)"
        );

        // Without the ledger check the cached flag alone decides.
        assert_eq!(run(&mut store, 1, 1, today(), &naive()).unwrap(), 2);
    }

    #[test]
    fn failed_book_update_leaves_loan_behind() {
        let mut store = seeded_store();
        books::add(&mut store, "Emma", "Austen", 1815, "ISBN2").unwrap();
        store.fail_rewrites_of(Some(Table::Books));

        assert!(run(&mut store, 2, 1, today(), &FiledbConfig::default()).is_err());

        let loans = store.read_all(Table::Loans).unwrap();
        assert_eq!(loans.len(), 1);
        let book = store.find_by_id(Table::Books, 2).unwrap().unwrap();
        assert_eq!(field(&book, "status"), "AVAILABLE");
    }
}
