// Supplier reviews written by vendors

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::errors::{DomainError, Validator};

#[derive(Debug, Clone, Deserialize)]
pub struct ReviewDraft {
    pub supplier_id: Uuid,
    pub rating: i32,
    pub comment: Option<String>,
    pub order_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Review {
    pub id: Uuid,
    pub reviewer_id: Uuid,
    pub supplier_id: Uuid,
    pub order_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub rating: i32,
    pub comment: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Review {
    /// Rating must be 1..=5 and nobody reviews themselves
    pub fn write(reviewer_id: Uuid, draft: ReviewDraft) -> Result<Self, DomainError> {
        Validator::new()
            .check(
                (1..=5).contains(&draft.rating),
                "rating",
                "rating must be between 1 and 5",
            )
            .optional_text(draft.comment.as_deref(), "comment", 2000)
            .finish()?;

        if reviewer_id == draft.supplier_id {
            return Err(DomainError::rule("You cannot review yourself"));
        }

        Ok(Self {
            id: Uuid::new_v4(),
            reviewer_id,
            supplier_id: draft.supplier_id,
            order_id: draft.order_id,
            product_id: draft.product_id,
            rating: draft.rating,
            comment: draft.comment,
            created_at: Utc::now(),
        })
    }
}

/// Aggregate rating of a supplier
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierRating {
    pub supplier_id: Uuid,
    /// Mean rating rounded to two decimals; `None` without reviews
    pub average_rating: Option<Decimal>,
    pub review_count: i64,
}

impl SupplierRating {
    pub fn from_totals(supplier_id: Uuid, rating_sum: i64, review_count: i64) -> Self {
        let average_rating = (review_count > 0)
            .then(|| (Decimal::from(rating_sum) / Decimal::from(review_count)).round_dp(2));
        Self {
            supplier_id,
            average_rating,
            review_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft(supplier_id: Uuid, rating: i32) -> ReviewDraft {
        ReviewDraft {
            supplier_id,
            rating,
            comment: Some("On time, well packed".to_string()),
            order_id: None,
            product_id: None,
        }
    }

    #[test]
    fn write_valid_review() {
        let supplier = Uuid::new_v4();
        let review = Review::write(Uuid::new_v4(), draft(supplier, 5)).unwrap();
        assert_eq!(review.rating, 5);
        assert_eq!(review.supplier_id, supplier);
    }

    #[test]
    fn rating_out_of_range_rejected() {
        assert!(Review::write(Uuid::new_v4(), draft(Uuid::new_v4(), 0)).is_err());
        assert!(Review::write(Uuid::new_v4(), draft(Uuid::new_v4(), 6)).is_err());
    }

    #[test]
    fn self_review_rejected() {
        let id = Uuid::new_v4();
        assert!(matches!(Review::write(id, draft(id, 4)), Err(DomainError::Rule(_))));
    }

    #[test]
    fn average_rounds_to_two_places() {
        let rating = SupplierRating::from_totals(Uuid::new_v4(), 14, 3);
        assert_eq!(rating.average_rating, Some(Decimal::new(467, 2)));
    }

    #[test]
    fn no_reviews_has_no_average() {
        let rating = SupplierRating::from_totals(Uuid::new_v4(), 0, 0);
        assert_eq!(rating.average_rating, None);
        assert_eq!(rating.review_count, 0);
    }
}
