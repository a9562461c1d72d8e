//! Suggestion building from raw messages
//!
//! Orchestrates the classifier over one message and produces a `Suggestion`
//! entity, or nothing. Never fails: malformed or non-transactional input
//! yields `None` and the caller simply moves on.

use sha2::{Digest, Sha256};
use tracing::debug;

use crate::classifier::TransactionClassifier;
use crate::error::Result;
use crate::models::{RawMessage, Suggestion};

/// Counterparty placeholder when no extraction pattern matched
const UNKNOWN_COUNTERPARTY: &str = "Unknown";

/// Aggregator handle fragments that get a display-name rewrite at build time
const DISPLAY_GATEWAY_FRAGMENTS: &[&str] = &[".razorpay@", "paytm@"];

/// Deterministic 64-bit id over `(body, timestamp)`.
///
/// First 8 bytes of SHA-256(body) as a big-endian i64, plus the timestamp
/// with wrapping arithmetic. Identical body+timestamp always yields the same
/// id, so re-scanning a message upserts instead of duplicating.
fn suggestion_id(body: &str, timestamp_millis: i64) -> i64 {
    let digest = Sha256::digest(body.as_bytes());
    let mut prefix = [0u8; 8];
    prefix.copy_from_slice(&digest[..8]);
    i64::from_be_bytes(prefix).wrapping_add(timestamp_millis)
}

/// Builds expense/income suggestions out of raw SMS records
pub struct SuggestionBuilder {
    classifier: TransactionClassifier,
}

impl SuggestionBuilder {
    pub fn new() -> Result<Self> {
        Ok(Self {
            classifier: TransactionClassifier::new()?,
        })
    }

    /// Use an already-built classifier
    pub fn with_classifier(classifier: TransactionClassifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &TransactionClassifier {
        &self.classifier
    }

    /// Analyze one message and produce a suggestion, or `None` when the
    /// message is noise, has no parseable amount, or matches no transaction
    /// pattern.
    pub fn build(&self, message: &RawMessage) -> Option<Suggestion> {
        if self.classifier.is_ignored(&message.body) {
            debug!(sender = %message.sender_address, "ignore marker hit, dropping message");
            return None;
        }

        let is_expense = self.classifier.is_expense(&message.body);
        let is_credit = self.classifier.is_credit(&message.body);

        // Amount is mandatory: a suggestion without one is useless
        let amount = self.classifier.extract_amount(&message.body)?;

        if !is_expense && !is_credit {
            return None;
        }

        let mut paid_to = self
            .classifier
            .extract_counterparty(&message.body)
            .unwrap_or_else(|| UNKNOWN_COUNTERPARTY.to_string());

        if DISPLAY_GATEWAY_FRAGMENTS.iter().any(|f| paid_to.contains(f)) {
            paid_to = beautify_gateway_vpa(&paid_to);
        }

        debug!(
            amount,
            is_expense,
            paid_to = %paid_to,
            "message classified as transaction"
        );

        Some(Suggestion {
            id: suggestion_id(&message.body, message.timestamp_millis),
            amount,
            paid_to: Some(paid_to),
            timestamp_millis: message.timestamp_millis,
            reference_message: message.body.clone(),
            reference_message_sender: message.sender_address.clone(),
            is_expense,
        })
    }

    /// Build suggestions for a batch of messages, dropping the non-matches.
    /// No ordering requirement; each message is independent.
    pub fn scan<'a, I>(&self, messages: I) -> Vec<Suggestion>
    where
        I: IntoIterator<Item = &'a RawMessage>,
    {
        messages
            .into_iter()
            .filter_map(|m| self.build(m))
            .collect()
    }
}

/// Turn an aggregator VPA into a display name: drop the handle, dots become
/// spaces, first character uppercased ("merchant.razorpay@hdfc" ->
/// "Merchant razorpay").
fn beautify_gateway_vpa(vpa: &str) -> String {
    let prefix = vpa.split('@').next().unwrap_or(vpa).replace('.', " ");
    let mut chars = prefix.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> SuggestionBuilder {
        SuggestionBuilder::new().unwrap()
    }

    fn message(body: &str) -> RawMessage {
        RawMessage::new(body, "VM-HDFCBK", 1_715_500_800_000)
    }

    #[test]
    fn test_simple_debit_builds_suggestion() {
        let b = builder();
        let msg = message(
            "Rs.250.00 debited from your account for payment to Swiggy on 12-05-24 via UPI ref 1234",
        );
        let suggestion = b.build(&msg).expect("should build");
        assert_eq!(suggestion.amount, 250.00);
        assert!(suggestion.is_expense);
        assert_eq!(suggestion.paid_to.as_deref(), Some("Swiggy"));
        assert_eq!(suggestion.timestamp_millis, msg.timestamp_millis);
        assert_eq!(suggestion.reference_message, msg.body);
        assert_eq!(suggestion.reference_message_sender, "VM-HDFCBK");
    }

    #[test]
    fn test_simple_credit_builds_suggestion() {
        let b = builder();
        let msg = message("Rs.1000 credited to your account, received from John Doe via UPI");
        let suggestion = b.build(&msg).expect("should build");
        assert_eq!(suggestion.amount, 1000.0);
        assert!(!suggestion.is_expense);
        assert_eq!(suggestion.paid_to.as_deref(), Some("John Doe"));
    }

    #[test]
    fn test_promotional_noise_is_dropped() {
        let b = builder();
        assert!(b
            .build(&message("Get cashback of Rs.500! Apply now, limited offer"))
            .is_none());
    }

    #[test]
    fn test_failed_transaction_is_dropped() {
        let b = builder();
        assert!(b
            .build(&message(
                "Your payment of Rs.300 to Amazon has failed. Please retry."
            ))
            .is_none());
    }

    #[test]
    fn test_amount_is_mandatory() {
        let b = builder();
        // Debit verb present but no currency-marked amount
        assert!(b
            .build(&message("Money was debited from your account today"))
            .is_none());
    }

    #[test]
    fn test_no_transaction_pattern_is_dropped() {
        let b = builder();
        assert!(b
            .build(&message("Your balance is Rs.900 as of today"))
            .is_none());
    }

    #[test]
    fn test_id_is_idempotent() {
        let b = builder();
        let msg = message("INR 99 sent to foo@okaxis via UPI");
        let first = b.build(&msg).unwrap();
        let second = b.build(&msg).unwrap();
        assert_eq!(first.id, second.id);
    }

    #[test]
    fn test_id_varies_with_timestamp() {
        let b = builder();
        let body = "INR 99 sent to foo@okaxis via UPI";
        let first = b.build(&RawMessage::new(body, "AX-SBI", 1000)).unwrap();
        let second = b.build(&RawMessage::new(body, "AX-SBI", 2000)).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(first.id.wrapping_add(1000), second.id);
    }

    #[test]
    fn test_unknown_counterparty_placeholder() {
        let b = builder();
        let msg = message("Rs.500 debited from A/C and credited to merchant XYZ");
        let suggestion = b.build(&msg).unwrap();
        assert_eq!(suggestion.paid_to.as_deref(), Some("Unknown"));
    }

    #[test]
    fn test_gateway_vpa_beautified() {
        let b = builder();
        let msg = message("Rs.120 paid to merchant.razorpay@hdfcbank via UPI");
        let suggestion = b.build(&msg).unwrap();
        assert_eq!(suggestion.paid_to.as_deref(), Some("Merchant razorpay"));
    }

    #[test]
    fn test_classifier_accessor_for_display_extras() {
        let b = builder();
        // Callers reuse the builder's classifier for display-only extras
        // like the masked card suffix
        assert_eq!(
            b.classifier()
                .extract_card_suffix("Rs.430 spent on card XX1234 at CAFE on 01-02-24")
                .as_deref(),
            Some("XX1234")
        );
    }

    #[test]
    fn test_scan_filters_non_matches() {
        let b = builder();
        let messages = vec![
            message("Rs.250.00 debited from your account for payment to Swiggy on 12-05-24 via UPI ref 1234"),
            message("Get cashback of Rs.500! Apply now, limited offer"),
            message("Rs.1000 credited to your account, received from John Doe via UPI"),
            message("Hello, lunch tomorrow?"),
        ];
        let suggestions = b.scan(&messages);
        assert_eq!(suggestions.len(), 2);
        assert!(suggestions[0].is_expense);
        assert!(!suggestions[1].is_expense);
    }
}
