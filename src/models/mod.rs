use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ── Share price record ────────────────────────────────────────────────────────

/// One share-price observation as it appears in the uploaded CSV.
/// Wire names match the CSV header and the JSON the client consumes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SharePrice {
    #[serde(rename = "unitID")]
    pub unit_id: String,
    pub date: NaiveDate,
    #[serde(rename = "unitPrice")]
    pub unit_price: f64,
}

// ── Data check outcome ────────────────────────────────────────────────────────

/// Result of the minimum-data checks run over a whole uploaded file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataCheckResult {
    pub passed: bool,
    pub comments: String,
}

// ── Display order ─────────────────────────────────────────────────────────────

/// Requested sort/filter mode for a read query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayOrder {
    /// All rows, date descending (unitID breaks date ties).
    #[default]
    None,
    /// Top 5 rows by unit price, descending.
    MostExpensive,
    /// Top 5 rows by unit price, ascending.
    LeastExpensive,
}

impl DisplayOrder {
    /// Unrecognized values fall back to `None` — the query parameter is
    /// forgiving by contract.
    pub fn parse(s: &str) -> Self {
        match s {
            "mostExpensive" => Self::MostExpensive,
            "leastExpensive" => Self::LeastExpensive,
            _ => Self::None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_order_parse() {
        assert_eq!(DisplayOrder::parse("mostExpensive"), DisplayOrder::MostExpensive);
        assert_eq!(DisplayOrder::parse("leastExpensive"), DisplayOrder::LeastExpensive);
        assert_eq!(DisplayOrder::parse("none"), DisplayOrder::None);
        assert_eq!(DisplayOrder::parse(""), DisplayOrder::None);
        assert_eq!(DisplayOrder::parse("cheapest"), DisplayOrder::None);
    }
}
