//! Keyword signal scoring: each category carries a curated list of strong
//! and moderate keywords; a merchant name scores 3 per strong keyword and
//! 1 per moderate keyword present as a substring. A keyword contributes at
//! most once no matter how often it occurs.

use crate::normalize::normalize_merchant;

/// Points for a strong keyword hit
pub const STRONG_WEIGHT: i32 = 3;
/// Points for a moderate keyword hit
pub const MODERATE_WEIGHT: i32 = 1;

/// Per-category keyword lists, strong and moderate
#[derive(Debug, Clone, Copy)]
pub struct CategorySignal {
    pub category: &'static str,
    pub strong: &'static [&'static str],
    pub moderate: &'static [&'static str],
}

/// Signal table. Declared order doubles as the tie-break for `best_signal`:
/// the first-declared category wins an equal score.
pub const CATEGORY_SIGNALS: &[CategorySignal] = &[
    CategorySignal {
        category: "Food & Drink",
        strong: &["restaurant", "cafe", "coffee", "bakery", "pizzeria", "grocer", "market"],
        moderate: &["pizza", "sushi", "grill", "kitchen", "diner", "bar", "pub", "seafood", "deli"],
    },
    CategorySignal {
        category: "Shopping",
        strong: &["mall", "outlet", "department store", "boutique"],
        moderate: &["shop", "store", "fashion", "book", "sport", "tech", "pet"],
    },
    CategorySignal {
        category: "Entertainment",
        strong: &["cinema", "theater", "theatre", "stadium", "arena"],
        moderate: &["movie", "concert", "ticket", "arcade", "museum", "music"],
    },
    CategorySignal {
        category: "Transportation",
        strong: &["gas station", "fuel", "auto repair", "transit authority"],
        moderate: &["gas", "parking", "metro", "transit", "taxi", "auto"],
    },
    CategorySignal {
        category: "Health",
        strong: &["pharmacy", "hospital", "clinic", "medical center", "dental"],
        moderate: &["health", "fitness", "gym", "yoga", "athletic", "wellness", "vitamin"],
    },
    CategorySignal {
        category: "Travel",
        strong: &["hotel", "resort", "airline", "airways"],
        moderate: &["travel", "flight", "booking", "rental car", "cruise"],
    },
    CategorySignal {
        category: "Services",
        strong: &["utility", "insurance", "electric company"],
        moderate: &["internet", "cable", "electric", "daycare", "school", "salon"],
    },
];

/// Score a merchant name against every category, in table order
pub fn score_signals(name: &str) -> Vec<(&'static str, i32)> {
    let name = normalize_merchant(name);
    CATEGORY_SIGNALS
        .iter()
        .map(|signal| {
            let mut score = 0;
            for keyword in signal.strong {
                if name.contains(keyword) {
                    score += STRONG_WEIGHT;
                }
            }
            for keyword in signal.moderate {
                if name.contains(keyword) {
                    score += MODERATE_WEIGHT;
                }
            }
            (signal.category, score)
        })
        .collect()
}

/// The best-scoring category and its score. Ties go to the category
/// declared first in the table.
pub fn best_signal(name: &str) -> (&'static str, i32) {
    let scores = score_signals(name);
    let mut best = scores[0];
    for &entry in &scores[1..] {
        if entry.1 > best.1 {
            best = entry;
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score_for(name: &str, category: &str) -> i32 {
        score_signals(name)
            .into_iter()
            .find(|(cat, _)| *cat == category)
            .map(|(_, s)| s)
            .unwrap()
    }

    #[test]
    fn test_strong_keyword_scores_three() {
        assert_eq!(score_for("Corner Bakery", "Food & Drink"), 3);
        assert_eq!(score_for("City Pharmacy", "Health"), 3);
    }

    #[test]
    fn test_moderate_keyword_scores_one() {
        assert_eq!(score_for("Green Yoga Place", "Health"), 1);
        assert_eq!(score_for("Hilltop Parking", "Transportation"), 1);
    }

    #[test]
    fn test_signals_accumulate() {
        // "restaurant" (3) + "bakery" (3) = 6
        assert_eq!(score_for("Downtown Restaurant and Bakery", "Food & Drink"), 6);
        // "hotel" (3) + "travel" (1) = 4
        assert_eq!(score_for("Sunset Hotel Travel Desk", "Travel"), 4);
    }

    #[test]
    fn test_keyword_counts_once() {
        // repeated "pizza" still contributes a single moderate point
        assert_eq!(score_for("Pizza Pizza Pizza", "Food & Drink"), 1);
    }

    #[test]
    fn test_best_signal_picks_max() {
        let (category, score) = best_signal("Downtown Restaurant and Bakery");
        assert_eq!(category, "Food & Drink");
        assert_eq!(score, 6);
    }

    #[test]
    fn test_best_signal_tie_goes_to_first_declared() {
        // "market" (Food & Drink, strong) vs "mall" (Shopping, strong): both 3,
        // Food & Drink is declared first.
        let (category, score) = best_signal("Market Mall");
        assert_eq!(score, 3);
        assert_eq!(category, "Food & Drink");
    }

    #[test]
    fn test_no_signal_scores_zero() {
        let (category, score) = best_signal("XYZZY Corp 12345");
        assert_eq!(score, 0);
        // with an all-zero board the first-declared category surfaces;
        // callers treat score 0 as "no signal"
        assert_eq!(category, "Food & Drink");
    }

    #[test]
    fn test_table_order_is_scores_order() {
        let scores = score_signals("anything");
        let table: Vec<&str> = CATEGORY_SIGNALS.iter().map(|s| s.category).collect();
        let scored: Vec<&str> = scores.iter().map(|(c, _)| *c).collect();
        assert_eq!(table, scored);
    }
}
