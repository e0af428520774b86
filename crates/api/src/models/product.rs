//! Product domain types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Store-assigned identifier.
    pub id: String,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub description: Option<String>,
    /// Image URL.
    pub image: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
    pub created_at: DateTime<Utc>,
}

/// A product that has not been stored yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub price: Decimal,
    pub description: Option<String>,
    pub image: Option<String>,
    pub category: Option<String>,
    pub in_stock: bool,
}

impl NewProduct {
    /// Create an in-stock product with no optional fields.
    #[must_use]
    pub fn new(name: impl Into<String>, price: Decimal) -> Self {
        Self {
            name: name.into(),
            price,
            description: None,
            image: None,
            category: None,
            in_stock: true,
        }
    }

    /// Materialize the product with a locally assigned id and timestamp.
    #[must_use]
    pub fn into_product(self, id: String, created_at: DateTime<Utc>) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            description: self.description,
            image: self.image,
            category: self.category,
            in_stock: self.in_stock,
            created_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_json_shape() {
        let product = NewProduct::new("Minimalist Watch", Decimal::new(19999, 2))
            .into_product("42".to_string(), Utc::now());
        let json = serde_json::to_value(&product).unwrap();
        let object = json.as_object().unwrap();

        let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "category",
                "createdAt",
                "description",
                "id",
                "image",
                "inStock",
                "name",
                "price"
            ]
        );
        assert_eq!(json["price"], serde_json::json!(199.99));
        assert_eq!(json["inStock"], serde_json::json!(true));
    }
}
