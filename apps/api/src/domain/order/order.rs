use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use super::value_objects::OrderStatus;
use crate::domain::catalog::Product;
use crate::domain::errors::{DomainError, Validator};
use crate::domain::user::UserRole;

/// Order aggregate root
///
/// A vendor's purchase of a single product from its supplier.
///
/// # Invariants
/// - `total_amount == unit_price * quantity`, fixed at placement
/// - Only the order's own vendor or supplier may change its status
/// - Status transitions follow [`OrderStatus::can_transition_as`]
#[derive(Debug, Clone)]
pub struct Order {
    id: Uuid,
    vendor_id: Uuid,
    supplier_id: Uuid,
    product_id: Uuid,
    quantity: i32,
    unit_price: Decimal,
    total_amount: Decimal,
    status: OrderStatus,
    delivery_address: Option<String>,
    notes: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Order {
    /// Places a pending order for `quantity` units of `product`
    ///
    /// # Business Rules Enforced
    /// - Product must be active with enough stock
    /// - Quantity must meet the product's minimum order
    /// - Unit price comes from the product's bulk pricing rule
    pub fn place(
        vendor_id: Uuid,
        product: &Product,
        quantity: i32,
        delivery_address: Option<String>,
        notes: Option<String>,
    ) -> Result<Self, DomainError> {
        Validator::new()
            .check(quantity >= 1, "quantity", "quantity must be at least 1")
            .optional_text(delivery_address.as_deref(), "delivery_address", 500)
            .optional_text(notes.as_deref(), "notes", 2000)
            .finish()?;

        if product.is_owned_by(vendor_id) {
            return Err(DomainError::rule("Cannot order your own product"));
        }

        let quote = product.quote(quantity)?;
        let now = Utc::now();

        Ok(Self {
            id: Uuid::new_v4(),
            vendor_id,
            supplier_id: product.supplier_id,
            product_id: product.id,
            quantity,
            unit_price: quote.unit_price,
            total_amount: quote.total_amount,
            status: OrderStatus::Pending,
            delivery_address,
            notes,
            created_at: now,
            updated_at: now,
        })
    }

    /// True when `user_id` is the order's vendor or supplier
    pub fn is_party(&self, user_id: Uuid) -> bool {
        self.vendor_id == user_id || self.supplier_id == user_id
    }

    /// Moves the order to `next` on behalf of `actor`
    ///
    /// # Returns
    /// * `Err(DomainError::NotFound)` - actor is not this order's party in `role`
    /// * `Err(DomainError::Rule)` - transition not permitted for `role`
    pub fn change_status(
        &mut self,
        actor: Uuid,
        role: UserRole,
        next: OrderStatus,
    ) -> Result<(), DomainError> {
        let party = match role {
            UserRole::Vendor => self.vendor_id,
            UserRole::Supplier => self.supplier_id,
        };
        if party != actor {
            return Err(DomainError::NotFound("Order"));
        }

        if !self.status.can_transition_as(next, role) {
            return Err(DomainError::rule(format!(
                "Cannot change order from {} to {} as {}",
                self.status, next, role
            )));
        }

        self.status = next;
        self.updated_at = Utc::now();
        Ok(())
    }

    // ===== Getters =====

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn vendor_id(&self) -> Uuid {
        self.vendor_id
    }

    pub fn supplier_id(&self) -> Uuid {
        self.supplier_id
    }

    pub fn product_id(&self) -> Uuid {
        self.product_id
    }

    pub fn quantity(&self) -> i32 {
        self.quantity
    }

    pub fn unit_price(&self) -> Decimal {
        self.unit_price
    }

    pub fn total_amount(&self) -> Decimal {
        self.total_amount
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn delivery_address(&self) -> Option<&str> {
        self.delivery_address.as_deref()
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Reconstructs an Order from persistence layer data
    ///
    /// Only to be used by repository implementations.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persistence(
        id: Uuid,
        vendor_id: Uuid,
        supplier_id: Uuid,
        product_id: Uuid,
        quantity: i32,
        unit_price: Decimal,
        total_amount: Decimal,
        status: OrderStatus,
        delivery_address: Option<String>,
        notes: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            vendor_id,
            supplier_id,
            product_id,
            quantity,
            unit_price,
            total_amount,
            status,
            delivery_address,
            notes,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::ProductDraft;

    fn product(supplier_id: Uuid) -> Product {
        Product::create(
            supplier_id,
            ProductDraft {
                name: "Cooking oil".to_string(),
                description: None,
                category_id: None,
                price: Decimal::new(1250, 2),
                unit: "litre".to_string(),
                min_order_quantity: 1,
                stock_quantity: 50,
                bulk_discount_price: None,
                bulk_discount_threshold: None,
                image_url: None,
            },
        )
        .unwrap()
    }

    #[test]
    fn place_order_prices_and_links_parties() {
        let supplier = Uuid::new_v4();
        let vendor = Uuid::new_v4();
        let product = product(supplier);

        let order = Order::place(vendor, &product, 4, None, None).unwrap();

        assert_eq!(order.status(), OrderStatus::Pending);
        assert_eq!(order.supplier_id(), supplier);
        assert_eq!(order.vendor_id(), vendor);
        assert_eq!(order.product_id(), product.id);
        assert_eq!(order.total_amount(), Decimal::new(5000, 2));
        assert!(order.is_party(vendor));
        assert!(order.is_party(supplier));
        assert!(!order.is_party(Uuid::new_v4()));
    }

    #[test]
    fn zero_quantity_rejected() {
        let product = product(Uuid::new_v4());
        assert!(Order::place(Uuid::new_v4(), &product, 0, None, None).is_err());
    }

    #[test]
    fn supplier_cannot_order_own_product() {
        let supplier = Uuid::new_v4();
        let product = product(supplier);
        assert!(matches!(
            Order::place(supplier, &product, 1, None, None),
            Err(DomainError::Rule(_))
        ));
    }

    #[test]
    fn supplier_confirms_order() {
        let supplier = Uuid::new_v4();
        let mut order = Order::place(Uuid::new_v4(), &product(supplier), 2, None, None).unwrap();

        order
            .change_status(supplier, UserRole::Supplier, OrderStatus::Confirmed)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Confirmed);
    }

    #[test]
    fn vendor_cannot_update_another_vendors_order() {
        let mut order =
            Order::place(Uuid::new_v4(), &product(Uuid::new_v4()), 2, None, None).unwrap();

        let result = order.change_status(Uuid::new_v4(), UserRole::Vendor, OrderStatus::Cancelled);
        assert_eq!(result, Err(DomainError::NotFound("Order")));
        assert_eq!(order.status(), OrderStatus::Pending);
    }

    #[test]
    fn other_supplier_cannot_update_order() {
        let mut order =
            Order::place(Uuid::new_v4(), &product(Uuid::new_v4()), 2, None, None).unwrap();

        let result =
            order.change_status(Uuid::new_v4(), UserRole::Supplier, OrderStatus::Confirmed);
        assert_eq!(result, Err(DomainError::NotFound("Order")));
    }

    #[test]
    fn vendor_cannot_confirm_own_order() {
        let vendor = Uuid::new_v4();
        let mut order = Order::place(vendor, &product(Uuid::new_v4()), 2, None, None).unwrap();

        let result = order.change_status(vendor, UserRole::Vendor, OrderStatus::Confirmed);
        assert!(matches!(result, Err(DomainError::Rule(_))));
    }

    #[test]
    fn vendor_cancels_pending_order() {
        let vendor = Uuid::new_v4();
        let mut order = Order::place(vendor, &product(Uuid::new_v4()), 2, None, None).unwrap();

        order
            .change_status(vendor, UserRole::Vendor, OrderStatus::Cancelled)
            .unwrap();
        assert_eq!(order.status(), OrderStatus::Cancelled);
    }
}
