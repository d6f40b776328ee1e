//! Merchant name normalization applied before every rule, keyword, or
//! classifier lookup: lowercase plus surrounding-whitespace trim.

/// Normalize a raw merchant name for matching
pub fn normalize_merchant(name: &str) -> String {
    name.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lowercases_and_trims() {
        assert_eq!(normalize_merchant("  Trader Joe's  "), "trader joe's");
        assert_eq!(normalize_merchant("STARBUCKS #1234"), "starbucks #1234");
    }

    #[test]
    fn test_interior_whitespace_preserved() {
        assert_eq!(normalize_merchant("Whole  Foods"), "whole  foods");
    }

    #[test]
    fn test_blank_input() {
        assert_eq!(normalize_merchant(""), "");
        assert_eq!(normalize_merchant("   "), "");
    }
}
