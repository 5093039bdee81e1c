/// Custom actions for Order documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderAction {
    /// Marks the order as being cancelled. Fails while another cancellation holds it.
    ClaimCancellation,
    /// Gives the claim back after a cancellation that could not complete.
    ReleaseCancellation,
}
