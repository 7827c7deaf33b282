use serde::{Deserialize, Serialize};
use crate::models::de::{null_as_default, string_or_number};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    #[serde(default, deserialize_with = "string_or_number")]
    pub order_number: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub amount: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_order_number_is_accepted() {
        let orders: Vec<Order> = serde_json::from_str(
            r#"[{"order_number": 1042, "amount": 12.5, "status": "paid"},
                {"order_number": "ORD-7", "amount": 3, "status": "pending"}]"#,
        )
        .unwrap();

        assert_eq!(orders[0].order_number, "1042");
        assert_eq!(orders[1].order_number, "ORD-7");
        assert_eq!(orders[1].amount, 3.0);
    }

    #[test]
    fn test_null_fields_fall_back_to_defaults() {
        let orders: Vec<Order> = serde_json::from_str(
            r#"[{"order_number": null, "amount": null, "status": null},
                {"order_number": 7, "amount": 20}]"#,
        )
        .unwrap();

        assert_eq!(orders[0], Order { order_number: String::new(), amount: 0.0, status: String::new() });
        assert_eq!(orders[1].order_number, "7");
        assert_eq!(orders[1].status, "");
    }
}
