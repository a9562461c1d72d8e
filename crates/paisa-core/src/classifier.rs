//! Transaction classification over raw SMS text
//!
//! Decides whether a message is noise, a credit, or a debit, and extracts
//! the amount and counterparty. Rule-based and deterministic: transactional
//! SMS from financial institutions follows a small number of template
//! families, and a missed suggestion is recoverable by the user while a
//! wrongly-flagged one pollutes the ledger. So the ignore list
//! short-circuits everything, and credit/debit are strictly mutually
//! exclusive.

use tracing::debug;

use crate::error::Result;
use crate::models::Verdict;
use crate::patterns::PatternLibrary;

/// Rule-based message classifier. Pure and stateless; safe to share across
/// threads.
pub struct TransactionClassifier {
    patterns: PatternLibrary,
}

impl TransactionClassifier {
    pub fn new() -> Result<Self> {
        Ok(Self {
            patterns: PatternLibrary::new()?,
        })
    }

    /// Use an already-built pattern library
    pub fn with_patterns(patterns: PatternLibrary) -> Self {
        Self { patterns }
    }

    /// True iff the message indicates a failed transaction, an informational
    /// warning, or promotional content. Evaluated first: a hit means no
    /// further classification happens for this message.
    pub fn is_ignored(&self, message: &str) -> bool {
        self.patterns.has_ignore_marker(message)
    }

    /// Whether the message is an income/credit notification.
    ///
    /// A message saying the account was debited AND credited *to* somewhere
    /// is an expense: the credit phrase refers to the merchant receiving the
    /// payment, not the user receiving funds.
    pub fn is_credit(&self, message: &str) -> bool {
        if self.is_ignored(message) {
            return false;
        }

        let lower = message.to_lowercase();
        if lower.contains("debited") && lower.contains("credited to") {
            return false;
        }

        self.patterns.has_credit_marker(message) && self.patterns.has_amount(message)
    }

    /// Whether the message is a debit/expense notification.
    ///
    /// Credit takes precedence when both marker sets loosely match. The
    /// generic structural fallback catches phrasings the debit-verb list
    /// misses (account word + "debit" + currency marker).
    pub fn is_expense(&self, message: &str) -> bool {
        if self.is_ignored(message) || self.is_credit(message) {
            return false;
        }

        let has_debit = self.patterns.has_debit_marker(message);
        let has_amount = self.patterns.has_amount(message);

        (has_debit && has_amount) || self.patterns.matches_generic_debit(message)
    }

    /// First amount match, thousands separators stripped, parsed as f64
    pub fn extract_amount(&self, message: &str) -> Option<f64> {
        self.patterns
            .capture_amount(message)
            .and_then(|raw| raw.replace(',', "").parse::<f64>().ok())
    }

    /// First counterparty capture in priority order, trimmed
    pub fn extract_counterparty(&self, message: &str) -> Option<String> {
        self.patterns.capture_counterparty(message)
    }

    /// Masked card/account suffix token, for display only
    pub fn extract_card_suffix(&self, message: &str) -> Option<String> {
        self.patterns.capture_card_suffix(message)
    }

    /// Full classification of one message into a transient verdict
    pub fn classify(&self, message: &str) -> Verdict {
        if self.is_ignored(message) {
            debug!("Ignore marker hit, discarding message");
            return Verdict::Ignored;
        }

        let amount = match self.extract_amount(message) {
            Some(a) => a,
            None => return Verdict::Unclassifiable,
        };
        let counterparty = self.extract_counterparty(message);

        if self.is_credit(message) {
            return Verdict::Credit {
                amount,
                counterparty,
            };
        }
        if self.is_expense(message) {
            return Verdict::Debit {
                amount,
                counterparty,
            };
        }

        Verdict::Unclassifiable
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> TransactionClassifier {
        TransactionClassifier::new().unwrap()
    }

    #[test]
    fn test_ignored_short_circuits() {
        let c = classifier();
        let msg = "Your payment of Rs.300 to Amazon has failed. Please retry.";
        assert!(c.is_ignored(msg));
        assert!(!c.is_credit(msg));
        assert!(!c.is_expense(msg));
        assert_eq!(c.classify(msg), Verdict::Ignored);
    }

    #[test]
    fn test_promotional_noise_ignored() {
        let c = classifier();
        let msg = "Get cashback of Rs.500! Apply now, limited offer";
        assert_eq!(c.classify(msg), Verdict::Ignored);
    }

    #[test]
    fn test_simple_debit() {
        let c = classifier();
        let msg = "Rs.250.00 debited from your account for payment to Swiggy on 12-05-24 via UPI ref 1234";
        assert!(c.is_expense(msg));
        assert!(!c.is_credit(msg));
        assert_eq!(c.extract_amount(msg), Some(250.00));
    }

    #[test]
    fn test_simple_credit() {
        let c = classifier();
        let msg = "Rs.1000 credited to your account, received from John Doe via UPI";
        assert!(c.is_credit(msg));
        assert!(!c.is_expense(msg));
        assert_eq!(c.extract_amount(msg), Some(1000.0));
    }

    #[test]
    fn test_debited_credited_to_is_expense() {
        let c = classifier();
        let msg = "Rs.500 debited from A/C and credited to merchant XYZ";
        assert!(!c.is_credit(msg));
        assert!(c.is_expense(msg));
    }

    #[test]
    fn test_credit_requires_amount() {
        let c = classifier();
        // Credit verb but no currency-marked amount
        assert!(!c.is_credit("Amount credited to your account"));
    }

    #[test]
    fn test_expense_requires_amount_or_generic() {
        let c = classifier();
        // Debit verb, no amount, no account context
        assert!(!c.is_expense("You have paid your respects"));
        // Generic structure without a whole-word debit verb
        assert!(c.is_expense("Your a/c has a debit of INR 300"));
    }

    #[test]
    fn test_mutual_exclusivity() {
        let c = classifier();
        let messages = [
            "Rs.250.00 debited from your account for payment to Swiggy on 12-05-24 via UPI ref 1234",
            "Rs.1000 credited to your account, received from John Doe via UPI",
            "Rs.500 debited from A/C and credited to merchant XYZ",
            "INR 99 sent to foo@okaxis via UPI",
            "Rs.2,500 deposited and credited to your A/c XX1234",
        ];
        for msg in messages {
            assert!(
                !(c.is_expense(msg) && c.is_credit(msg)),
                "both expense and credit for {msg:?}"
            );
        }
    }

    #[test]
    fn test_amount_with_thousands_separator() {
        let c = classifier();
        assert_eq!(
            c.extract_amount("INR 1,23,456.78 debited from A/c"),
            Some(123456.78)
        );
    }

    #[test]
    fn test_classify_unclassifiable() {
        let c = classifier();
        // Amount present but no transaction verbs or structure
        assert_eq!(
            c.classify("Your balance is Rs.900 as of today"),
            Verdict::Unclassifiable
        );
        // No amount at all
        assert_eq!(
            c.classify("Money was debited from your account"),
            Verdict::Unclassifiable
        );
    }

    #[test]
    fn test_card_suffix_for_display() {
        let c = classifier();
        let msg = "Rs.430 spent on card XX1234 at STARBUCKS on 01-02-24";
        assert_eq!(c.extract_card_suffix(msg).as_deref(), Some("XX1234"));
    }

    #[test]
    fn test_with_injected_patterns() {
        let patterns = crate::patterns::PatternLibrary::new().unwrap();
        let c = TransactionClassifier::with_patterns(patterns);
        assert!(c.is_expense("Rs.100 debited from your account"));
    }

    #[test]
    fn test_classify_debit_verdict() {
        let c = classifier();
        let msg = "INR 99 sent to foo@okaxis via UPI";
        match c.classify(msg) {
            Verdict::Debit {
                amount,
                counterparty,
            } => {
                assert_eq!(amount, 99.0);
                assert_eq!(counterparty.as_deref(), Some("foo@okaxis"));
            }
            other => panic!("expected debit, got {other:?}"),
        }
    }
}
