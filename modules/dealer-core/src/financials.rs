use dealer_client::{DealerClient, FinancialSummary};

use crate::error::{DeskError, Result};

/// Profit and loss overview. Non-managers are turned away before any
/// request is made.
pub async fn load(client: &DealerClient, is_manager: bool) -> Result<FinancialSummary> {
    if !is_manager {
        return Err(DeskError::AccessDenied);
    }
    let summary = client.financial_summary().await?;
    tracing::debug!(recent_sales = summary.recent_sales.len(), "Financials loaded");
    Ok(summary)
}
