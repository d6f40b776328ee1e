//! tally-core: Shared types, rule tables, and keyword scoring for the
//! merchant categorization engine.

pub mod merchants;
pub mod normalize;
pub mod signals;
pub mod verdict;

pub use merchants::{is_subscription_merchant, lookup_merchant};
pub use normalize::normalize_merchant;
pub use signals::{CategorySignal, best_signal, score_signals};
pub use verdict::{Source, Verdict};
