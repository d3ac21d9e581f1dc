//! Status and filter enums shared across Freshpaw services.

use serde::{Deserialize, Serialize};

/// Purchase order lifecycle status.
///
/// A purchase order is created as a `Draft`; it becomes `Sent` only once the
/// vendor email has actually been dispatched. There is no intermediate state:
/// an email failure leaves the draft untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Sent,
}

impl std::fmt::Display for PurchaseOrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Draft => write!(f, "draft"),
            Self::Sent => write!(f, "sent"),
        }
    }
}

impl std::str::FromStr for PurchaseOrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "sent" => Ok(Self::Sent),
            _ => Err(format!("invalid purchase order status: {s}")),
        }
    }
}

/// Which customers a batch-planning aggregation covers.
///
/// Test customers (subscriptions flagged `is_test`) never leak into
/// production plans and vice versa; `All` includes both. This is a pure
/// allow-list filter with no side effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CustomerFilter {
    #[default]
    Production,
    Test,
    All,
}

impl CustomerFilter {
    /// Whether a subscription with the given test flag passes this filter.
    #[must_use]
    pub const fn includes(self, is_test: bool) -> bool {
        match self {
            Self::Production => !is_test,
            Self::Test => is_test,
            Self::All => true,
        }
    }
}

impl std::fmt::Display for CustomerFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Production => write!(f, "production"),
            Self::Test => write!(f, "test"),
            Self::All => write!(f, "all"),
        }
    }
}

impl std::str::FromStr for CustomerFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "production" => Ok(Self::Production),
            "test" => Ok(Self::Test),
            "all" => Ok(Self::All),
            _ => Err(format!("invalid customer filter: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_filter_is_an_allow_list() {
        assert!(CustomerFilter::Production.includes(false));
        assert!(!CustomerFilter::Production.includes(true));
        assert!(CustomerFilter::Test.includes(true));
        assert!(!CustomerFilter::Test.includes(false));
        assert!(CustomerFilter::All.includes(true));
        assert!(CustomerFilter::All.includes(false));
    }

    #[test]
    fn test_status_round_trips_through_str() {
        for status in [PurchaseOrderStatus::Draft, PurchaseOrderStatus::Sent] {
            let parsed: PurchaseOrderStatus = status.to_string().parse().expect("round trip");
            assert_eq!(parsed, status);
        }
        assert!("pending".parse::<PurchaseOrderStatus>().is_err());
    }
}
