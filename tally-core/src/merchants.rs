//! Curated merchant rules: known merchant substrings mapped to categories,
//! and the keyword set flagging recurring-billing merchants.
//!
//! Both tables are matched by case-insensitive substring containment
//! against the normalized name. Table order is authoritative: the first
//! matching rule wins.

use crate::normalize::normalize_merchant;

/// Known merchant substring -> category, checked in declared order
pub const KNOWN_MERCHANTS: &[(&str, &str)] = &[
    ("trader joe", "Food & Drink"),
    ("whole foods", "Food & Drink"),
    ("stop shop", "Food & Drink"),
    ("starbucks", "Food & Drink"),
    ("dunkin", "Food & Drink"),
    ("panera", "Food & Drink"),
    ("chipotle", "Food & Drink"),
    ("mcdonald", "Food & Drink"),
    ("sweetgreen", "Food & Drink"),
    ("subway", "Food & Drink"),
    ("amazon", "Shopping"),
    ("target", "Shopping"),
    ("walmart", "Shopping"),
    ("costco", "Shopping"),
    ("best buy", "Shopping"),
    ("urban outfitter", "Shopping"),
    ("uniqlo", "Shopping"),
    ("nike", "Shopping"),
    ("sephora", "Shopping"),
    ("home depot", "Shopping"),
    ("amc", "Entertainment"),
    ("netflix", "Entertainment"),
    ("spotify", "Entertainment"),
    ("shell", "Transportation"),
    ("exxon", "Transportation"),
    ("uber", "Transportation"),
    ("lyft", "Transportation"),
    ("cvs", "Health"),
    ("walgreens", "Health"),
    ("planet fitness", "Health"),
    ("equinox", "Health"),
    ("marriott", "Travel"),
    ("airbnb", "Travel"),
    ("delta", "Travel"),
    ("jetblue", "Travel"),
    ("hilton", "Travel"),
    ("comcast", "Services"),
    ("xfinity", "Services"),
    ("verizon", "Services"),
    ("national grid", "Services"),
];

/// Merchants billed on a recurring schedule (streaming, gyms, utilities)
pub const SUBSCRIPTION_MERCHANTS: &[&str] = &[
    "netflix",
    "spotify",
    "hulu",
    "disney+",
    "planet fitness",
    "equinox",
    "boston sports club",
    "cambridge athletic",
    "comcast",
    "xfinity",
    "verizon",
    "national grid",
    "blue cross",
    "bright horizons",
];

/// Look up a merchant name against the curated rule table.
/// Returns the category of the first rule whose pattern is contained in
/// the normalized name, or None when nothing matches.
pub fn lookup_merchant(name: &str) -> Option<&'static str> {
    let name = normalize_merchant(name);
    KNOWN_MERCHANTS
        .iter()
        .find(|(pattern, _)| name.contains(pattern))
        .map(|&(_, category)| category)
}

/// Check if a merchant name matches a known subscription or recurring
/// service. Checked once at store-creation time; has no effect on
/// category selection.
pub fn is_subscription_merchant(name: &str) -> bool {
    let name = normalize_merchant(name);
    SUBSCRIPTION_MERCHANTS
        .iter()
        .any(|keyword| name.contains(keyword))
}
