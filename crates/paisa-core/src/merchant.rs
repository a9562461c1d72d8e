//! Merchant display-name cleanup
//!
//! Raw counterparty strings out of SMS text are VPAs and gateway handles
//! ("blinkit3@ybl", "joe.razorpay@hdfcbank"). This turns them into a
//! human-presentable name.

/// Known payment-aggregator suffix fragments. A merchant VPA routed through
/// one of these gateways carries the fragment in its handle.
const GATEWAY_SUFFIXES: &[&str] = &[
    ".payu",
    ".razorpay",
    ".ccavenue",
    ".billdesk",
    ".pinelabs",
    ".s1hcjzo",
];

/// Clean a raw counterparty string into a presentable merchant name.
///
/// Truncates at the first `@`, then at any known gateway fragment, strips a
/// trailing digit run ("blinkit3" -> "blinkit"), and uppercases the first
/// character. Total: always returns a string, possibly empty for degenerate
/// input.
pub fn clean_merchant_name(raw: &str) -> String {
    let mut name = raw.split('@').next().unwrap_or(raw);

    for gateway in GATEWAY_SUFFIXES {
        if let Some(idx) = name.find(gateway) {
            name = &name[..idx];
        }
    }

    let name = name.trim_end_matches(|c: char| c.is_ascii_digit());

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
