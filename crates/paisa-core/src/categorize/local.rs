//! Local keyword tier: fixed merchant/keyword -> category rules
//!
//! No model, no network. Substring containment against the lowercased
//! merchant name (and for a few categories also the full message text),
//! checked in a fixed priority order. Covers the bulk of Indian
//! merchants/aggregators seen in transactional SMS.

/// One category rule: its name, keyword list, and whether the full message
/// text is also searched (some categories surface in the message body rather
/// than the merchant handle, e.g. "electricity bill").
struct Rule {
    category: &'static str,
    keywords: &'static [&'static str],
    search_full_text: bool,
}

const RULES: &[Rule] = &[
    Rule {
        category: "Food",
        keywords: &[
            "swiggy", "zomato", "kfc", "blinkit", "zepto", "instamart", "mcdonald", "dominos",
        ],
        search_full_text: false,
    },
    Rule {
        category: "Recharge",
        keywords: &["jio", "airtel", "vi", "bsnl", "recharge"],
        search_full_text: false,
    },
    Rule {
        category: "Travel",
        keywords: &["uber", "ola", "rapido", "irctc", "redbus", "makemytrip"],
        search_full_text: false,
    },
    Rule {
        category: "Entertainment",
        keywords: &[
            "netflix", "prime", "hotstar", "spotify", "bookmyshow", "pvrcinemas",
        ],
        search_full_text: false,
    },
    Rule {
        category: "Health",
        keywords: &["apollo", "pharmacy", "hospital", "clinic", "medplus", "netmeds"],
        search_full_text: true,
    },
    Rule {
        category: "Shopping",
        keywords: &[
            "amazon", "flipkart", "myntra", "ajio", "meesho", "reliance", "zudio",
        ],
        search_full_text: false,
    },
    Rule {
        category: "Bills",
        keywords: &["bescom", "electricity", "water", "bill", "broadband", "act"],
        search_full_text: true,
    },
    Rule {
        category: "Education",
        keywords: &["college", "school", "university", "udemy", "coursera", "byjus"],
        search_full_text: false,
    },
    Rule {
        category: "Investment",
        keywords: &["groww", "zerodha", "upstox", "mutual fund", "sip", "stocks"],
        search_full_text: true,
    },
];

/// Tier-1 category rules. Stateless; `predict` completes with no suspension
/// so callers can populate the UI immediately.
#[derive(Debug, Clone, Copy, Default)]
pub struct CategoryRules;

impl CategoryRules {
    pub fn new() -> Self {
        Self
    }

    /// First category (in priority order) whose keyword list hits the
    /// merchant name, or for full-text categories the message body too.
    pub fn predict(&self, merchant: &str, full_text: &str) -> Option<&'static str> {
        let merchant = merchant.to_lowercase();
        let full_text = full_text.to_lowercase();

        for rule in RULES {
            let hit = rule.keywords.iter().any(|kw| {
                merchant.contains(kw) || (rule.search_full_text && full_text.contains(kw))
            });
            if hit {
                return Some(rule.category);
            }
        }
        None
    }

    /// The predefined category names, in priority order. Merged with the
    /// user's custom categories by the consuming layer.
    pub fn categories(&self) -> Vec<&'static str> {
        RULES.iter().map(|r| r.category).collect()
    }
}
