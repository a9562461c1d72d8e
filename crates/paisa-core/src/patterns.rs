//! Pattern library for transactional-SMS recognition
//!
//! The fixed vocabulary of keyword/regex groups used to classify bank SMS
//! notifications: ignore markers (failures, warnings, promotions), debit and
//! credit verbs, the amount pattern, and the ordered counterparty extraction
//! patterns.
//!
//! Built once at startup and shared by reference; every matcher is a pure
//! function of the input text. All matching is case-insensitive.

use regex::Regex;

use crate::error::Result;

/// Words indicating a failed/reversed transaction, an informational warning,
/// or promotional content. A hit anywhere in the message discards it.
const IGNORE_PATTERN: &str = "fail|failed|declined|rejected|unsuccessful|bounced|reversed|\
cooling period|never share|limit is applicable|offer|loan|cashback|apply|win|reward|\
discount|otp|limit|promotional|free";

/// Verbs indicating money leaving the account. Word boundaries so that
/// e.g. "sent" does not match inside "absent".
const DEBIT_PATTERN: &str = r"\b(debited|deducted|spent|payment|paid|sent)\b";

/// Verbs indicating money entering the account
const CREDIT_PATTERN: &str = r"\b(credited|received|added|deposited|refunded)\b";

/// Currency marker followed by a numeric value with optional thousands
/// separators and up to two decimals. Group 1 is the amount.
const AMOUNT_PATTERN: &str = r"(?i)(?:rs|inr)\.?\s?(\d+(?:,\d+)*(?:\.\d{1,2})?)";

/// Account context words for the generic debit structure check
const ACCOUNT_CONTEXT_PATTERN: &str = "account|a/c|acct|card";

/// Masked card numbers ending in 3+ trailing digits (e.g. "XX1234",
/// "4532XXXXXXXX9010"). Used for display, never for classification.
const CARD_SUFFIX_PATTERN: &str = r"[0-9]*[Xx*]*[0-9]*[Xx*]+[0-9]{3,}";

/// Counterparty extraction patterns, in priority order. Each captures the
/// name/identifier immediately after a context phrase, terminated by a known
/// trailing marker. The bare-VPA pattern goes first.
const COUNTERPARTY_PATTERNS: &[&str] = &[
    // 1. Standalone VPAs (e.g. "to BHARATPEC...@yesbankltd")
    r"(?i)(?:to\s+)([A-Za-z0-9.-]+@[a-zA-Z0-9.-]+)",
    // 2. Standard adjacent patterns ("paid to XYZ on")
    r"(?i)(?:paid to|sent to|transfer to)\s+([A-Za-z0-9\s@.-]+?)(?:\s+(?:via|upi|ref|on|inr|rs|for))",
    // 3. Standard credit patterns ("received from XYZ")
    r"(?i)(?:received from|transfer from|credited by)\s+([A-Za-z0-9\s@.-]+?)(?:\s+(?:via|upi|ref|on|inr|rs|for))",
    // 4. "to vpa XYZ"
    r"(?i)(?:to\s+vpa\s+)([A-Za-z0-9@.-]+)",
    // 5. Card POS transactions ("at STARBUCKS on")
    r"(?i)(?:at\s+)([A-Za-z0-9\s]+?)(?:\s+(?:on|via|ref|inr|rs))",
    // 6. Generic info drops ("Info: XYZ via")
    r"(?i)(?:info[:\-]\s?)([A-Za-z0-9\s@.-]+?)(?:\s+(?:via|upi|ref|on|inr|rs))",
    // 7. Last resort: any "to XYZ" run with a known terminator
    //    ("for payment to Swiggy on ...")
    r"(?i)(?:to\s+)([A-Za-z0-9\s@.-]+?)(?:\s+(?:via|upi|ref|on|inr|rs|for))",
];

/// Compiled pattern set, constructed once and passed by reference into the
/// classifier. Owns no mutable state; safe to share across threads.
pub struct PatternLibrary {
    ignore: Regex,
    debit: Regex,
    credit: Regex,
    amount: Regex,
    account_context: Regex,
    card_suffix: Regex,
    counterparty: Vec<Regex>,
}

impl PatternLibrary {
    /// Compile the full pattern set
    pub fn new() -> Result<Self> {
        let counterparty = COUNTERPARTY_PATTERNS
            .iter()
            .map(|p| Regex::new(p))
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(Self {
            ignore: Regex::new(&format!("(?i){IGNORE_PATTERN}"))?,
            debit: Regex::new(&format!("(?i){DEBIT_PATTERN}"))?,
            credit: Regex::new(&format!("(?i){CREDIT_PATTERN}"))?,
            amount: Regex::new(AMOUNT_PATTERN)?,
            account_context: Regex::new(&format!("(?i){ACCOUNT_CONTEXT_PATTERN}"))?,
            card_suffix: Regex::new(CARD_SUFFIX_PATTERN)?,
            counterparty,
        })
    }

    /// True if any ignore marker occurs anywhere in the text
    pub fn has_ignore_marker(&self, text: &str) -> bool {
        self.ignore.is_match(text)
    }

    /// True if a debit verb occurs as a whole word
    pub fn has_debit_marker(&self, text: &str) -> bool {
        self.debit.is_match(text)
    }

    /// True if a credit verb occurs as a whole word
    pub fn has_credit_marker(&self, text: &str) -> bool {
        self.credit.is_match(text)
    }

    /// True if a currency marker followed by a number occurs
    pub fn has_amount(&self, text: &str) -> bool {
        self.amount.is_match(text)
    }

    /// First amount match's numeric group, as captured (separators intact)
    pub fn capture_amount<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.amount
            .captures(text)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
    }

    /// First counterparty pattern (in priority order) that captures, trimmed
    pub fn capture_counterparty(&self, text: &str) -> Option<String> {
        for pattern in &self.counterparty {
            if let Some(captures) = pattern.captures(text) {
                if let Some(m) = captures.get(1) {
                    return Some(m.as_str().trim().to_string());
                }
            }
        }
        None
    }

    /// First masked card number token, trimmed
    pub fn capture_card_suffix(&self, text: &str) -> Option<String> {
        self.card_suffix
            .find(text)
            .map(|m| m.as_str().trim().to_string())
    }

    /// Generic fallback structure: the message jointly mentions an
    /// account/card context word, a debit word, and a currency marker.
    /// Catches phrasings the debit-verb list misses.
    pub fn matches_generic_debit(&self, text: &str) -> bool {
        let lower = text.to_lowercase();
        self.account_context.is_match(&lower)
            && lower.contains("debit")
            && (lower.contains("inr") || lower.contains("rs"))
    }
}
