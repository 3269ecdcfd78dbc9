use serde_json::json;

use crate::error::Result;
use crate::types::{Lead, LeadStatus, NewLead};
use crate::DealerClient;

const LEADS: &str = "api/sales/leads/";

impl DealerClient {
    pub async fn list_leads(&self) -> Result<Vec<Lead>> {
        self.get_json(LEADS).await
    }

    pub async fn create_lead(&self, lead: &NewLead) -> Result<Lead> {
        let created: Lead = self.post_json(LEADS, lead).await?;
        tracing::info!(id = created.id, status = %created.status, "Lead created");
        Ok(created)
    }

    pub async fn set_lead_status(&self, id: i64, status: LeadStatus) -> Result<()> {
        self.patch_discard(&format!("{LEADS}{id}/"), &json!({ "status": status }))
            .await
    }

    pub async fn delete_lead(&self, id: i64) -> Result<()> {
        self.delete(&format!("{LEADS}{id}/")).await
    }
}
