//! Typed payload for book-issue entries.
//!
//! The chain core treats payloads as opaque string maps; this module is the
//! boundary where an issue with a missing book title or borrower gets
//! rejected before it can reach [`Ledger::append`].
//!
//! [`Ledger::append`]: crate::ledger::Ledger::append

use std::collections::BTreeMap;

use crate::error::{LedgerError, Result};

/// Conventional payload keys for this domain.
pub const FIELD_BOOK_TITLE: &str = "book_title";
pub const FIELD_BORROWER: &str = "borrower";
pub const FIELD_DATE_ISSUED: &str = "date_issued";

/// One book-issue event, validated at construction.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookIssue {
    pub book_title: String,
    pub borrower: String,
    pub date_issued: String,
}

impl BookIssue {
    /// Build an issue record, rejecting a blank title or borrower.
    pub fn new(
        book_title: impl Into<String>,
        borrower: impl Into<String>,
        date_issued: impl Into<String>,
    ) -> Result<Self> {
        let book_title = book_title.into();
        let borrower = borrower.into();

        if book_title.trim().is_empty() {
            return Err(LedgerError::InvalidRecord(
                "book title must not be empty".to_string(),
            ));
        }
        if borrower.trim().is_empty() {
            return Err(LedgerError::InvalidRecord(
                "borrower name must not be empty".to_string(),
            ));
        }

        Ok(BookIssue {
            book_title,
            borrower,
            date_issued: date_issued.into(),
        })
    }

    /// Convert into the opaque payload mapping the chain core stores.
    pub fn into_payload(self) -> BTreeMap<String, String> {
        let mut data = BTreeMap::new();
        data.insert(FIELD_BOOK_TITLE.to_string(), self.book_title);
        data.insert(FIELD_BORROWER.to_string(), self.borrower);
        data.insert(FIELD_DATE_ISSUED.to_string(), self.date_issued);
        data
    }

    /// Read an issue back out of a stored payload, if the conventional keys
    /// are all present. Display-only; never consulted by hashing.
    pub fn from_payload(data: &BTreeMap<String, String>) -> Option<Self> {
        Some(BookIssue {
            book_title: data.get(FIELD_BOOK_TITLE)?.clone(),
            borrower: data.get(FIELD_BORROWER)?.clone(),
            date_issued: data.get(FIELD_DATE_ISSUED)?.clone(),
        })
    }
}
