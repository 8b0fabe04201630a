//! # Price History
//!
//! Append-only temporal price log owned by a product.
//!
//! ## Temporal Semantics
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Price entries are appended, never edited or removed.                   │
//! │                                                                         │
//! │  history: [ 4.50 @ Jan 01 ]──[ 4.80 @ Mar 10 ]──[ 4.65 @ Feb 20 ]       │
//! │                                       ▲                                  │
//! │  current() = entry with the maximum effective timestamp                 │
//! │              (4.80 here: append order does not matter)                  │
//! │                                                                         │
//! │  Tie-break: on equal timestamps the LAST-APPENDED entry wins.           │
//! │  This keeps "record a correction with the same effective time"          │
//! │  deterministic.                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Price Entry
// =============================================================================

/// A single timestamped price record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceEntry {
    value: Money,
    effective_at: DateTime<Utc>,
}

impl PriceEntry {
    /// Creates an entry effective at the given instant.
    pub fn new(value: Money, effective_at: DateTime<Utc>) -> Self {
        PriceEntry {
            value,
            effective_at,
        }
    }

    /// The recorded price.
    #[inline]
    pub fn value(&self) -> Money {
        self.value
    }

    /// When the price takes effect.
    #[inline]
    pub fn effective_at(&self) -> DateTime<Utc> {
        self.effective_at
    }
}

// =============================================================================
// Price History
// =============================================================================

/// The append-only price log.
///
/// Entries keep their append order; derivation of the current price scans
/// for the maximum effective timestamp rather than keeping the list sorted,
/// so backdated entries are fine.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceHistory {
    entries: Vec<PriceEntry>,
}

impl PriceHistory {
    /// Creates an empty history.
    pub fn new() -> Self {
        PriceHistory {
            entries: Vec::new(),
        }
    }

    /// Appends an entry. Entries are never edited or removed.
    pub fn append(&mut self, entry: PriceEntry) {
        self.entries.push(entry);
    }

    /// The entry with the maximum effective timestamp, or `None` when the
    /// history is empty.
    ///
    /// On equal timestamps the last-appended entry wins
    /// (`Iterator::max_by_key` keeps the last maximum).
    pub fn current(&self) -> Option<&PriceEntry> {
        self.entries.iter().max_by_key(|e| e.effective_at)
    }

    /// All entries in append order.
    pub fn entries(&self) -> &[PriceEntry] {
        &self.entries
    }

    /// Checks whether any price has been recorded.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of recorded entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn money(v: rust_decimal::Decimal) -> Money {
        Money::new(v).unwrap()
    }

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_empty_history_has_no_current_price() {
        let history = PriceHistory::new();
        assert!(history.current().is_none());
        assert!(history.is_empty());
    }

    #[test]
    fn test_current_is_max_timestamp_not_append_order() {
        let mut history = PriceHistory::new();
        history.append(PriceEntry::new(money(dec!(4.50)), at(1)));
        history.append(PriceEntry::new(money(dec!(4.80)), at(10)));
        // Backdated correction appended last
        history.append(PriceEntry::new(money(dec!(4.65)), at(5)));

        let current = history.current().unwrap();
        assert_eq!(current.value().value(), dec!(4.80));
        assert_eq!(current.effective_at(), at(10));
    }

    #[test]
    fn test_equal_timestamps_resolve_to_last_appended() {
        let mut history = PriceHistory::new();
        history.append(PriceEntry::new(money(dec!(9.99)), at(3)));
        history.append(PriceEntry::new(money(dec!(10.49)), at(3)));

        assert_eq!(history.current().unwrap().value().value(), dec!(10.49));
        assert_eq!(history.len(), 2);
    }
}
