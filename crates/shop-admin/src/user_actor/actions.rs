use crate::model::ProductId;

/// Custom actions for User documents.
#[derive(Debug, Clone)]
pub enum UserAction {
    /// Adds a product to the user's liked list. Fails if it is already there.
    LikeProduct(ProductId),
    /// Removes a product from the user's liked list. Fails if it is not there.
    UnlikeProduct(ProductId),
}
