use chrono::NaiveDate;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// One stored row: field name to raw string value.
///
/// Rows are kept untyped on the read path so that a corrupt value in one
/// field (a bad date, a non-numeric id) never makes the whole row unreadable.
pub type Record = BTreeMap<String, String>;

/// Storage date format for `joined_date`, `loan_date` and `return_date`.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

pub const BOOK_HEADERS: &[&str] = &["id", "title", "author", "year", "isbn", "status"];
pub const MEMBER_HEADERS: &[&str] = &["id", "name", "email", "joined_date", "status"];
pub const LOAN_HEADERS: &[&str] = &[
    "id",
    "book_id",
    "member_id",
    "loan_date",
    "return_date",
    "status",
];

/// The three backing tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Table {
    Books,
    Members,
    Loans,
}

impl Table {
    pub const ALL: [Table; 3] = [Table::Books, Table::Members, Table::Loans];

    pub fn headers(self) -> &'static [&'static str] {
        match self {
            Table::Books => BOOK_HEADERS,
            Table::Members => MEMBER_HEADERS,
            Table::Loans => LOAN_HEADERS,
        }
    }

    pub fn file_name(self) -> &'static str {
        match self {
            Table::Books => "books.csv",
            Table::Members => "members.csv",
            Table::Loans => "loans.csv",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Table::Books => "books",
            Table::Members => "members",
            Table::Loans => "loans",
        };
        write!(f, "{}", name)
    }
}

/// Defines a fixed status vocabulary stored as an upper-case string.
macro_rules! status_enum {
    ($name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant,)+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($text => Ok($name::$variant),)+
                    other => Err(format!(
                        "Unknown {} value: {}",
                        stringify!($name),
                        other
                    )),
                }
            }
        }
    };
}

status_enum!(BookStatus {
    Available => "AVAILABLE",
    Out => "OUT",
});

status_enum!(MemberStatus {
    Active => "ACTIVE",
    Suspended => "SUSPENDED",
});

status_enum!(LoanStatus {
    Out => "OUT",
    Returned => "RETURNED",
});

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Book {
    pub id: u64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub isbn: String,
    pub status: BookStatus,
}

impl Book {
    pub fn new(id: u64, title: String, author: String, year: i32, isbn: String) -> Self {
        Self {
            id,
            title,
            author,
            year,
            isbn,
            status: BookStatus::Available,
        }
    }

    pub fn to_record(&self) -> Record {
        record([
            ("id", self.id.to_string()),
            ("title", self.title.clone()),
            ("author", self.author.clone()),
            ("year", self.year.to_string()),
            ("isbn", self.isbn.clone()),
            ("status", self.status.to_string()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub joined_date: NaiveDate,
    pub status: MemberStatus,
}

impl Member {
    pub fn new(id: u64, name: String, email: String, joined_date: NaiveDate) -> Self {
        Self {
            id,
            name,
            email,
            joined_date,
            status: MemberStatus::Active,
        }
    }

    pub fn to_record(&self) -> Record {
        record([
            ("id", self.id.to_string()),
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("joined_date", format_date(self.joined_date)),
            ("status", self.status.to_string()),
        ])
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Loan {
    pub id: u64,
    pub book_id: u64,
    pub member_id: u64,
    pub loan_date: NaiveDate,
    /// `None` while the loan is open; stored as an empty field.
    pub return_date: Option<NaiveDate>,
    pub status: LoanStatus,
}

impl Loan {
    pub fn open(id: u64, book_id: u64, member_id: u64, loan_date: NaiveDate) -> Self {
        Self {
            id,
            book_id,
            member_id,
            loan_date,
            return_date: None,
            status: LoanStatus::Out,
        }
    }

    pub fn to_record(&self) -> Record {
        record([
            ("id", self.id.to_string()),
            ("book_id", self.book_id.to_string()),
            ("member_id", self.member_id.to_string()),
            ("loan_date", format_date(self.loan_date)),
            (
                "return_date",
                self.return_date.map(format_date).unwrap_or_default(),
            ),
            ("status", self.status.to_string()),
        ])
    }
}

pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

pub fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
}

/// Build a [`Record`] from `(field, value)` pairs.
pub fn record<I, K, V>(fields: I) -> Record
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<String>,
{
    fields
        .into_iter()
        .map(|(k, v)| (k.into(), v.into()))
        .collect()
}

/// Value of `field` in `record`, or the empty string when absent.
pub fn field<'a>(record: &'a Record, field: &str) -> &'a str {
    record.get(field).map(String::as_str).unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn open_loan_has_empty_return_date() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let rec = Loan::open(7, 1, 2, date).to_record();
        assert_eq!(field(&rec, "return_date"), "");
        assert_eq!(field(&rec, "loan_date"), "2024-03-01");
        assert_eq!(field(&rec, "status"), "OUT");
    }

    #[test]
    fn records_cover_every_header() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let book = Book::new(1, "Dune".into(), "Herbert".into(), 1965, "ISBN1".into());
        let member = Member::new(1, "Alice".into(), "a@x.com".into(), date);
        let loan = Loan::open(1, 1, 1, date);

        for (table, rec) in [
            (Table::Books, book.to_record()),
            (Table::Members, member.to_record()),
            (Table::Loans, loan.to_record()),
        ] {
            let keys: Vec<&str> = rec.keys().map(String::as_str).collect();
            let mut headers = table.headers().to_vec();
            headers.sort();
            assert_eq!(keys, headers, "fields for {}", table);
        }
    }

    #[test]
    fn status_parsing_is_exact() {
        assert_eq!("OUT".parse::<BookStatus>(), Ok(BookStatus::Out));
        assert_eq!("SUSPENDED".parse::<MemberStatus>(), Ok(MemberStatus::Suspended));
        assert!("returned".parse::<LoanStatus>().is_err());
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("not-a-date").is_none());
        assert_eq!(
            parse_date("2024-02-29"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
    }
}
