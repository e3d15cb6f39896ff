use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{money_limit, DomainError, FieldError, Validator};

/// Editable fields of a product listing, as submitted by a supplier
#[derive(Debug, Clone, Deserialize)]
pub struct ProductDraft {
    pub name: String,
    pub description: Option<String>,
    pub category_id: Option<Uuid>,
    pub price: Decimal,
    pub unit: String,
    #[serde(default = "default_min_order_quantity")]
    pub min_order_quantity: i32,
    #[serde(default)]
    pub stock_quantity: i32,
    pub bulk_discount_price: Option<Decimal>,
    pub bulk_discount_threshold: Option<i32>,
    pub image_url: Option<String>,
}

fn default_min_order_quantity() -> i32 {
    1
}

impl ProductDraft {
    /// Validates the listing
    ///
    /// # Business Rules
    /// - Prices are positive whole cents below the money column limit
    /// - Minimum order quantity is at least 1; stock is never negative
    /// - A bulk discount needs both a price below the list price and a
    ///   threshold no lower than the minimum order quantity
    pub fn validate(&self) -> Result<(), DomainError> {
        let mut v = Validator::new();
        v.text(&self.name, "name", 200)
            .text(&self.unit, "unit", 32)
            .optional_text(self.description.as_deref(), "description", 2000)
            .optional_text(self.image_url.as_deref(), "image_url", 2048)
            .money(self.price, "price")
            .check(
                self.min_order_quantity >= 1,
                "min_order_quantity",
                "min_order_quantity must be at least 1",
            )
            .check(
                self.stock_quantity >= 0,
                "stock_quantity",
                "stock_quantity cannot be negative",
            );

        match (self.bulk_discount_price, self.bulk_discount_threshold) {
            (None, None) => {}
            (Some(bulk_price), Some(threshold)) => {
                v.money(bulk_price, "bulk_discount_price")
                    .check(
                        bulk_price < self.price,
                        "bulk_discount_price",
                        "bulk_discount_price must be below price",
                    )
                    .check(
                        threshold >= self.min_order_quantity,
                        "bulk_discount_threshold",
                        "bulk_discount_threshold must be at least min_order_quantity",
                    );
            }
            (Some(_), None) => {
                v.check(
                    false,
                    "bulk_discount_threshold",
                    "bulk_discount_threshold is required with bulk_discount_price",
                );
            }
            (None, Some(_)) => {
                v.check(
                    false,
                    "bulk_discount_price",
                    "bulk_discount_price is required with bulk_discount_threshold",
                );
            }
        }

        v.finish()
    }
}

/// A supplier's product listing
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Product {
    pub id: Uuid,
    pub supplier_id: Uuid,
    pub category_id: Option<Uuid>,
    pub name: String,
    pub description: Option<String>,
    pub price: Decimal,
    pub unit: String,
    pub min_order_quantity: i32,
    pub stock_quantity: i32,
    pub bulk_discount_price: Option<Decimal>,
    pub bulk_discount_threshold: Option<i32>,
    pub image_url: Option<String>,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Price of an order line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quote {
    pub unit_price: Decimal,
    pub total_amount: Decimal,
}

/// Filters for product listing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductFilter {
    pub category_id: Option<Uuid>,
    pub supplier_id: Option<Uuid>,
    pub search: Option<String>,
}

impl Product {
    /// Creates an active listing owned by `supplier_id`
    pub fn create(supplier_id: Uuid, draft: ProductDraft) -> Result<Self, DomainError> {
        draft.validate()?;
        let now = Utc::now();
        Ok(Self {
            id: Uuid::new_v4(),
            supplier_id,
            category_id: draft.category_id,
            name: draft.name.trim().to_string(),
            description: draft.description,
            price: draft.price,
            unit: draft.unit.trim().to_string(),
            min_order_quantity: draft.min_order_quantity,
            stock_quantity: draft.stock_quantity,
            bulk_discount_price: draft.bulk_discount_price,
            bulk_discount_threshold: draft.bulk_discount_threshold,
            image_url: draft.image_url,
            is_active: true,
            created_at: now,
            updated_at: now,
        })
    }

    /// Replaces the editable fields with a validated draft
    pub fn revise(&mut self, draft: ProductDraft) -> Result<(), DomainError> {
        draft.validate()?;
        self.category_id = draft.category_id;
        self.name = draft.name.trim().to_string();
        self.description = draft.description;
        self.price = draft.price;
        self.unit = draft.unit.trim().to_string();
        self.min_order_quantity = draft.min_order_quantity;
        self.stock_quantity = draft.stock_quantity;
        self.bulk_discount_price = draft.bulk_discount_price;
        self.bulk_discount_threshold = draft.bulk_discount_threshold;
        self.image_url = draft.image_url;
        self.updated_at = Utc::now();
        Ok(())
    }

    pub fn is_owned_by(&self, user_id: Uuid) -> bool {
        self.supplier_id == user_id
    }

    /// Unit price for `quantity`, applying the bulk discount once the
    /// threshold is reached
    pub fn unit_price_for(&self, quantity: i32) -> Decimal {
        match (self.bulk_discount_price, self.bulk_discount_threshold) {
            (Some(bulk_price), Some(threshold)) if quantity >= threshold => bulk_price,
            _ => self.price,
        }
    }

    /// Prices an order of `quantity` units, enforcing availability limits
    pub fn quote(&self, quantity: i32) -> Result<Quote, DomainError> {
        if !self.is_active {
            return Err(DomainError::NotFound("Product"));
        }
        if quantity < self.min_order_quantity {
            return Err(DomainError::Validation(vec![FieldError {
                field: "quantity".to_string(),
                message: format!(
                    "quantity must be at least the minimum order of {}",
                    self.min_order_quantity
                ),
            }]));
        }
        if quantity > self.stock_quantity {
            return Err(DomainError::rule(format!(
                "Only {} {} in stock",
                self.stock_quantity, self.unit
            )));
        }

        let unit_price = self.unit_price_for(quantity);
        let total_amount = unit_price
            .checked_mul(Decimal::from(quantity))
            .filter(|total| *total < money_limit())
            .ok_or_else(|| {
                DomainError::Validation(vec![FieldError {
                    field: "quantity".to_string(),
                    message: format!("order total must be less than {}", money_limit()),
                }])
            })?;

        Ok(Quote {
            unit_price,
            total_amount,
        })
    }
}
