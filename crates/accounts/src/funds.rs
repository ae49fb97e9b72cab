//! Guarded wallet-balance resolution.

use common::{AuthContext, Money, UserId};
use payments::PaymentsLedger;

use crate::error::AccountError;

/// Resolves a guest's wallet balance via the Payments Ledger.
///
/// The balance is sensitive, so unlike plain reference resolution this path
/// requires an authenticated caller, and the wallet owner must be the caller
/// themselves. The owner check is explicit rather than trusting that the
/// field is only ever requested for the current user.
#[tracing::instrument(skip(ledger, ctx))]
pub async fn wallet_funds<L: PaymentsLedger>(
    ledger: &L,
    user_id: &UserId,
    ctx: &AuthContext,
) -> Result<Money, AccountError> {
    ctx.require_self(user_id)?;
    let amount = ledger.get_wallet_amount(user_id).await?;
    Ok(amount)
}
