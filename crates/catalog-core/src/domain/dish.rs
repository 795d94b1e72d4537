// ============================================================================
// Catalog Core - Dish Entity
// File: crates/catalog-core/src/domain/dish.rs
// Description: Leaf of the catalog hierarchy, carries a fixed-point price
// ============================================================================

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::price::{normalize_price, validate_price};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    pub id: Uuid,
    pub submenu_id: Uuid,
    pub title: String,
    pub description: String,
    pub price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct DishFields {
    #[validate(length(min = 1, max = 100, message = "Dish title must be between 1 and 100 characters"))]
    pub title: String,

    #[validate(length(max = 300, message = "Dish description too long"))]
    pub description: String,

    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

impl DishFields {
    pub fn new(title: impl Into<String>, description: impl Into<String>, price: Decimal) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            price: normalize_price(price),
        }
    }

    /// Same fields with the price brought to two fractional digits.
    pub fn normalized(self) -> Self {
        Self {
            price: normalize_price(self.price),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_price() {
        let fields = DishFields::new("Soup", "Tomato", Decimal::new(125, 1));
        assert_eq!(fields.price.to_string(), "12.50");
    }

    #[test]
    fn test_negative_price_is_invalid() {
        let fields = DishFields::new("Soup", "Tomato", Decimal::new(-1, 0));
        assert!(fields.validate().is_err());
    }

    #[test]
    fn test_price_serializes_as_string() {
        let dish = Dish {
            id: Uuid::nil(),
            submenu_id: Uuid::nil(),
            title: "Soup".into(),
            description: "Tomato".into(),
            price: normalize_price(Decimal::new(1250, 2)),
        };
        let json = serde_json::to_value(&dish).unwrap();
        assert_eq!(json["price"], "12.50");
    }

    #[test]
    fn test_price_accepts_string_and_number() {
        let from_str: DishFields =
            serde_json::from_str(r#"{"title":"a","description":"b","price":"12.50"}"#).unwrap();
        let from_num: DishFields =
            serde_json::from_str(r#"{"title":"a","description":"b","price":12.5}"#).unwrap();
        assert_eq!(from_str.normalized(), from_num.normalized());
    }
}
