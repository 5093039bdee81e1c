//! # Stock Ledger
//!
//! Moves stock between `count_in_stock` and `sold` through the product actor's
//! conditional actions, one product at a time or fanned out over an order's line
//! items.
//!
//! A fan-out either applies every movement or none: when any line item fails, the
//! movements that did succeed are reversed before the failing product ids are
//! returned. Reversals that fail themselves are reported separately in
//! [`MoveFailure::uncompensated`].

use crate::model::{LineItem, Product, ProductId, StockLevel};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use docstore::CollectionClient;
use futures::future::join_all;
use tracing::{debug, error, instrument, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Movement {
    Reserve,
    Release,
}

impl Movement {
    fn action(self, quantity: u32) -> ProductAction {
        match self {
            Movement::Reserve => ProductAction::ReserveStock(quantity),
            Movement::Release => ProductAction::ReleaseStock(quantity),
        }
    }

    fn inverse(self) -> Self {
        match self {
            Movement::Reserve => Movement::Release,
            Movement::Release => Movement::Reserve,
        }
    }
}

/// Outcome of a fan-out that did not apply every movement.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoveFailure {
    /// Products whose movement failed, in line-item order.
    pub failed: Vec<ProductId>,
    /// Products whose movement succeeded but could not be reversed afterwards.
    /// Their stock is left moved.
    pub uncompensated: Vec<ProductId>,
}

impl MoveFailure {
    pub fn is_compensated(&self) -> bool {
        self.uncompensated.is_empty()
    }
}

/// Stock updater over the product collection.
#[derive(Clone)]
pub struct StockLedger {
    products: CollectionClient<Product>,
}

impl StockLedger {
    pub fn new(products: CollectionClient<Product>) -> Self {
        Self { products }
    }

    /// Takes `quantity` units out of stock and counts them as sold.
    /// Fails with `InsufficientStock` when fewer than `quantity` units are left.
    #[instrument(skip(self))]
    pub async fn reserve(&self, product: ProductId, quantity: u32) -> Result<Product, ProductError> {
        self.apply(Movement::Reserve, product, quantity).await
    }

    /// Puts `quantity` sold units back into stock.
    #[instrument(skip(self))]
    pub async fn release(&self, product: ProductId, quantity: u32) -> Result<Product, ProductError> {
        self.apply(Movement::Release, product, quantity).await
    }

    #[instrument(skip(self))]
    pub async fn check(&self, product: ProductId) -> Result<StockLevel, ProductError> {
        debug!("Sending request");
        match self
            .products
            .perform_action(product, ProductAction::CheckStock)
            .await?
        {
            ProductActionResult::CheckStock(level) => Ok(level),
            other => Err(unexpected(other)),
        }
    }

    /// Reserves every line item concurrently. On any failure the successful
    /// reservations are released and the failing product ids are returned in
    /// line-item order.
    pub async fn reserve_all(&self, items: &[LineItem]) -> Result<(), MoveFailure> {
        self.move_all(Movement::Reserve, items).await
    }

    /// Releases every line item concurrently. On any failure the successful
    /// releases are reserved again and the failing product ids are returned.
    pub async fn release_all(&self, items: &[LineItem]) -> Result<(), MoveFailure> {
        self.move_all(Movement::Release, items).await
    }

    async fn apply(
        &self,
        movement: Movement,
        product: ProductId,
        quantity: u32,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        match self
            .products
            .perform_action(product, movement.action(quantity))
            .await?
        {
            ProductActionResult::ReserveStock(updated) | ProductActionResult::ReleaseStock(updated) => {
                Ok(updated)
            }
            other => Err(unexpected(other)),
        }
    }

    async fn move_all(&self, movement: Movement, items: &[LineItem]) -> Result<(), MoveFailure> {
        let results = join_all(
            items
                .iter()
                .map(|item| self.apply(movement, item.product, item.amount)),
        )
        .await;

        let mut applied = Vec::new();
        let mut failed = Vec::new();
        for (item, result) in items.iter().zip(results) {
            match result {
                Ok(_) => applied.push(item),
                Err(e) => {
                    warn!(product = %item.product, amount = item.amount, ?movement, error = %e, "Stock movement failed");
                    failed.push(item.product);
                }
            }
        }
        if failed.is_empty() {
            return Ok(());
        }

        let undo = movement.inverse();
        let compensations = join_all(
            applied
                .iter()
                .map(|item| self.apply(undo, item.product, item.amount)),
        )
        .await;
        let mut uncompensated = Vec::new();
        for (item, result) in applied.iter().zip(compensations) {
            if let Err(e) = result {
                error!(product = %item.product, amount = item.amount, ?undo, error = %e, "Compensation failed");
                uncompensated.push(item.product);
            }
        }
        Err(MoveFailure {
            failed,
            uncompensated,
        })
    }
}

fn unexpected(result: ProductActionResult) -> ProductError {
    ProductError::ActorCommunicationError(format!("unexpected action result: {result:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use docstore::mock::{create_mock_client, expect_action};
    use docstore::mock::MockCollection;
    use docstore::StoreError;

    fn product(id: u32, count_in_stock: u32, sold: u32) -> Product {
        let now = Utc::now();
        Product {
            id: ProductId(id),
            name: format!("Product {id}"),
            slug: format!("product-{id}"),
            image: String::new(),
            product_type: Default::default(),
            price: 10.0,
            count_in_stock,
            sold,
            description: String::new(),
            discount: 0,
            discount_start_date: None,
            discount_end_date: None,
            liked_by: Vec::new(),
            total_likes: 0,
            created_at: now,
            updated_at: now,
        }
    }

    fn shortage(id: u32) -> StoreError {
        StoreError::document(ProductError::InsufficientStock {
            product: ProductId(id),
            requested: 10,
            available: 0,
        })
    }

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let ledger = StockLedger::new(client);

        let check_task = tokio::spawn(async move { ledger.check(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert!(matches!(action, ProductAction::CheckStock));

        let level = StockLevel {
            count_in_stock: 42,
            sold: 3,
        };
        responder
            .send(Ok(ProductActionResult::CheckStock(level)))
            .unwrap();

        assert_eq!(check_task.await.unwrap().unwrap(), level);
    }

    #[tokio::test]
    async fn test_reserve_surfaces_insufficient_stock() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let ledger = StockLedger::new(client);

        let reserve_task = tokio::spawn(async move { ledger.reserve(ProductId(1), 10).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert!(matches!(action, ProductAction::ReserveStock(10)));
        responder.send(Err(shortage(1))).unwrap();

        let result = reserve_task.await.unwrap();
        assert!(matches!(
            result,
            Err(ProductError::InsufficientStock { available: 0, .. })
        ));
    }

    #[tokio::test]
    async fn test_reserve_all_compensates_successful_items() {
        let mut products = MockCollection::<Product>::new();
        // join_all polls in item order and each request is sent before any reply.
        products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReserveStock(product(1, 3, 2)));
        products.expect_action(ProductId(2)).return_err(shortage(2));
        products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReleaseStock(product(1, 5, 0)));

        let ledger = StockLedger::new(products.client());
        let items = vec![
            LineItem::new(ProductId(1), "Product 1", 2, 10.0),
            LineItem::new(ProductId(2), "Product 2", 10, 10.0),
        ];

        let result = ledger.reserve_all(&items).await;
        assert_eq!(
            result,
            Err(MoveFailure {
                failed: vec![ProductId(2)],
                uncompensated: Vec::new(),
            })
        );
        products.verify();
    }

    #[tokio::test]
    async fn test_release_all_reports_failed_compensation() {
        let mut products = MockCollection::<Product>::new();
        products
            .expect_action(ProductId(1))
            .return_ok(ProductActionResult::ReleaseStock(product(1, 5, 0)));
        products
            .expect_action(ProductId(2))
            .return_err(StoreError::document(ProductError::ReleaseExceedsSold {
                product: ProductId(2),
                requested: 1,
                sold: 0,
            }));
        products.expect_action(ProductId(1)).return_err(shortage(1));

        let ledger = StockLedger::new(products.client());
        let items = vec![
            LineItem::new(ProductId(1), "Product 1", 2, 10.0),
            LineItem::new(ProductId(2), "Product 2", 1, 10.0),
        ];

        let failure = ledger.release_all(&items).await.unwrap_err();
        assert_eq!(failure.failed, vec![ProductId(2)]);
        assert_eq!(failure.uncompensated, vec![ProductId(1)]);
        assert!(!failure.is_compensated());
        products.verify();
    }

    #[tokio::test]
    async fn test_reserve_all_with_no_items_succeeds() {
        let products = MockCollection::<Product>::new();
        let ledger = StockLedger::new(products.client());
        assert_eq!(ledger.reserve_all(&[]).await, Ok(()));
        products.verify();
    }
}
