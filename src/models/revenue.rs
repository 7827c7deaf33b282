use serde::{Deserialize, Serialize};
use crate::models::de::null_as_default;

/// Agregado calculado por el backend para una escuela
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RevenueSummary {
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_revenue: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub pending_payout: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub total_orders: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_totals_decode_as_zero() {
        let revenue: RevenueSummary = serde_json::from_str(
            r#"{"total_revenue": 1000, "pending_payout": null, "total_orders": null}"#,
        )
        .unwrap();

        assert_eq!(revenue.total_revenue, 1000.0);
        assert_eq!(revenue.pending_payout, 0.0);
        assert_eq!(revenue.total_orders, 0);
    }
}
