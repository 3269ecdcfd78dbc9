use crate::error::Result;
use crate::types::{Analytics, CustomerProfile, DashboardStats, FinancialSummary};
use crate::DealerClient;

impl DealerClient {
    /// Customers merged across sales and service.
    pub async fn customer_profiles(&self) -> Result<Vec<CustomerProfile>> {
        self.get_json("api/customers/360/").await
    }

    pub async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_json("api/dashboard/stats/").await
    }

    pub async fn analytics(&self) -> Result<Analytics> {
        self.get_json("api/analytics/").await
    }

    pub async fn financial_summary(&self) -> Result<FinancialSummary> {
        self.get_json("api/financials/").await
    }
}
