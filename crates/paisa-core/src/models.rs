//! Domain models for Paisa

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A raw SMS record as supplied by the device message store.
///
/// Read-only input: the engine never mutates or stores these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawMessage {
    /// Full message text
    pub body: String,
    /// Sender address (e.g. "VM-HDFCBK")
    pub sender_address: String,
    /// Receive time as epoch milliseconds
    pub timestamp_millis: i64,
}

impl RawMessage {
    pub fn new(body: impl Into<String>, sender_address: impl Into<String>, timestamp_millis: i64) -> Self {
        Self {
            body: body.into(),
            sender_address: sender_address.into(),
            timestamp_millis,
        }
    }
}

/// A candidate financial transaction derived from a message, pending user
/// confirmation into an expense.
///
/// `id` is deterministic over `(body, timestamp)` so re-scanning the same
/// message yields the same id and the store can dedup by upsert.
/// `amount` is always positive: a suggestion is never created without a
/// parsed amount.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Suggestion {
    pub id: i64,
    pub amount: f64,
    /// Extracted counterparty; "Unknown" when no pattern matched
    pub paid_to: Option<String>,
    pub timestamp_millis: i64,
    /// The message body this suggestion was derived from
    pub reference_message: String,
    pub reference_message_sender: String,
    /// true = debit (money left the account), false = credit
    pub is_expense: bool,
}

impl Suggestion {
    /// Receive time as a UTC datetime
    pub fn timestamp(&self) -> DateTime<Utc> {
        Utc.timestamp_millis_opt(self.timestamp_millis)
            .single()
            .unwrap_or_else(Utc::now)
    }
}

/// Transient result of classifying one message.
///
/// Produced and consumed within the classifier/builder; never persisted.
#[derive(Debug, Clone, PartialEq)]
pub enum Verdict {
    /// Failed/reversed transaction, warning, or promotional noise
    Ignored,
    /// Money entered the account
    Credit {
        amount: f64,
        counterparty: Option<String>,
    },
    /// Money left the account
    Debit {
        amount: f64,
        counterparty: Option<String>,
    },
    /// No transaction pattern matched (or no amount found)
    Unclassifiable,
}

/// Input to the category resolution chain
#[derive(Debug, Clone)]
pub struct CategoryRequest {
    /// Cleaned merchant name (see `clean_merchant_name`)
    pub merchant: String,
    pub amount: f64,
    /// Full reference message text
    pub full_text: String,
    pub timestamp_millis: i64,
}

impl CategoryRequest {
    /// Build a request from a suggestion, cleaning the merchant name
    pub fn from_suggestion(suggestion: &Suggestion) -> Self {
        let merchant = suggestion
            .paid_to
            .as_deref()
            .map(crate::merchant::clean_merchant_name)
            .unwrap_or_default();
        Self {
            merchant,
            amount: suggestion.amount,
            full_text: suggestion.reference_message.clone(),
            timestamp_millis: suggestion.timestamp_millis,
        }
    }
}
