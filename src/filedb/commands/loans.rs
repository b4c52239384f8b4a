use crate::commands::bootstrap;
use crate::error::Result;
use crate::model::{field, parse_date, LoanStatus, Record, Table};
use crate::store::RecordStore;
use chrono::{Duration, NaiveDate};
use tracing::debug;

/// Loans held by `member_id`, in file order. RETURNED loans are left out
/// unless `include_returned` is set.
pub fn member_loans<S: RecordStore>(
    store: &mut S,
    member_id: u64,
    include_returned: bool,
) -> Result<Vec<Record>> {
    bootstrap(store)?;
    let member = member_id.to_string();
    Ok(store
        .read_all(Table::Loans)?
        .into_iter()
        .filter(|row| field(row, "member_id") == member)
        .filter(|row| {
            include_returned || field(row, "status") != LoanStatus::Returned.as_str()
        })
        .collect())
}

/// OUT loans dated on or before `today - days`.
///
/// A loan whose `loan_date` cannot be parsed is reported as overdue. When
/// `today - days` falls before the earliest representable date, no parsable
/// loan date can be on or before it, so only those unparsable loans remain.
pub fn overdue<S: RecordStore>(
    store: &mut S,
    days: u32,
    today: NaiveDate,
) -> Result<Vec<Record>> {
    bootstrap(store)?;
    let cutoff = today.checked_sub_signed(Duration::days(i64::from(days)));

    Ok(store
        .read_all(Table::Loans)?
        .into_iter()
        .filter(|row| field(row, "status") == LoanStatus::Out.as_str())
        .filter(|row| match parse_date(field(row, "loan_date")) {
            Some(loan_date) => cutoff.is_some_and(|cutoff| loan_date <= cutoff),
            None => {
                debug!(
                    loan = field(row, "id"),
                    loan_date = field(row, "loan_date"),
                    "unparsable loan date, counting as overdue"
                );
                true
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::helpers::test_support::{day, seeded_store, today};
    use crate::model::Loan;
    use crate::store::memory::InMemoryStore;

    fn add_loan(
        store: &mut InMemoryStore,
        id: u64,
        member_id: u64,
        loan_date: NaiveDate,
        status: LoanStatus,
    ) {
        let mut loan = Loan::open(id, 1, member_id, loan_date);
        loan.status = status;
        if status == LoanStatus::Returned {
            loan.return_date = Some(loan_date);
        }
        store.append(Table::Loans, &loan.to_record()).unwrap();
    }

    fn ids(rows: &[Record]) -> Vec<&str> {
        rows.iter().map(|r| field(r, "id")).collect()
    }

    #[test]
    fn member_loans_filters_by_member_and_status() {
        let mut store = seeded_store();
        add_loan(&mut store, 1, 1, today(), LoanStatus::Returned);
        add_loan(&mut store, 2, 2, today(), LoanStatus::Out);
        add_loan(&mut store, 3, 1, today(), LoanStatus::Out);

        let open = member_loans(&mut store, 1, false).unwrap();
        assert_eq!(ids(&open), vec!["3"]);

        let all = member_loans(&mut store, 1, true).unwrap();
        assert_eq!(ids(&all), vec!["1", "3"]);
    }

    #[test]
    fn overdue_uses_inclusive_cutoff() {
        let mut store = seeded_store();
        add_loan(&mut store, 1, 1, today() - Duration::days(20), LoanStatus::Out);
        add_loan(&mut store, 2, 1, today() - Duration::days(5), LoanStatus::Out);
        add_loan(&mut store, 3, 1, today() - Duration::days(14), LoanStatus::Out);

        let rows = overdue(&mut store, 14, today()).unwrap();
        assert_eq!(ids(&rows), vec!["1", "3"]);
    }

    #[test]
    fn overdue_skips_returned_loans() {
        let mut store = seeded_store();
        add_loan(&mut store, 1, 1, day(2020, 1, 1), LoanStatus::Returned);
        assert!(overdue(&mut store, 14, today()).unwrap().is_empty());
    }

    #[test]
    fn corrupt_loan_date_counts_as_overdue() {
        let mut store = seeded_store();
        let mut loan = Loan::open(1, 1, 1, today()).to_record();
        loan.insert("loan_date".into(), "yesterday-ish".into());
        store.append(Table::Loans, &loan).unwrap();

        let rows = overdue(&mut store, 14, today()).unwrap();
        assert_eq!(ids(&rows), vec!["1"]);
    }

    #[test]
    fn huge_day_count_keeps_only_unparsable_dates() {
        let mut store = seeded_store();
        add_loan(&mut store, 1, 1, day(1900, 1, 1), LoanStatus::Out);
        let mut corrupt = Loan::open(2, 1, 1, today()).to_record();
        corrupt.insert("loan_date".into(), "n/a".into());
        store.append(Table::Loans, &corrupt).unwrap();

        let rows = overdue(&mut store, 200_000_000, today()).unwrap();
        assert_eq!(ids(&rows), vec!["2"]);

        let rows = overdue(&mut store, u32::MAX, today()).unwrap();
        assert_eq!(ids(&rows), vec!["2"]);
    }

    #[test]
    fn zero_days_includes_todays_loans() {
        let mut store = seeded_store();
        add_loan(&mut store, 1, 1, today(), LoanStatus::Out);
        assert_eq!(overdue(&mut store, 0, today()).unwrap().len(), 1);
    }
}
