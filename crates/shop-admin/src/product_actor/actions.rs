use crate::model::{Product, StockLevel, UserId};

/// Custom actions for Product documents.
///
/// Every stock movement is a single conditional update: the precondition is checked
/// and both counters change inside one actor turn.
#[derive(Debug, Clone)]
pub enum ProductAction {
    /// Read the current stock counters.
    CheckStock,
    /// Move `n` units from `count_in_stock` to `sold`. Requires `count_in_stock >= n`.
    ReserveStock(u32),
    /// Move `n` units from `sold` back to `count_in_stock`. Requires `sold >= n`.
    ReleaseStock(u32),
    AddLike(UserId),
    RemoveLike(UserId),
}

/// Results from product actions, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    CheckStock(StockLevel),
    ReserveStock(Product),
    ReleaseStock(Product),
    AddLike(Product),
    RemoveLike(Product),
}
