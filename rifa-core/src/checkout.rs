//! Checkout destination for the current selection.

use crate::error::{Result, RifaError};
use crate::selection::SelectionStore;
use crate::types::LotteryId;

/// Build the purchase-data URL for the selected tickets.
///
/// An empty selection is a precondition failure; the surface must prompt the
/// buyer to select at least one ticket instead of navigating.
pub fn build_checkout_url(lottery_id: LotteryId, selection: &SelectionStore) -> Result<String> {
    if selection.is_empty() {
        return Err(RifaError::EmptySelection);
    }
    Ok(format!(
        "lottery/{}/purchase_data?{}",
        lottery_id,
        selection.checkout_fragment()
    ))
}
