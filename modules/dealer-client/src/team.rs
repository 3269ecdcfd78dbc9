use crate::error::Result;
use crate::types::{NewTeamMember, TeamMember};
use crate::DealerClient;

const USERS: &str = "api/users/";

impl DealerClient {
    pub async fn list_team(&self) -> Result<Vec<TeamMember>> {
        self.get_json(USERS).await
    }

    /// The backend answers `{"message": ...}` rather than the new account.
    pub async fn create_team_member(&self, member: &NewTeamMember) -> Result<()> {
        let _: serde_json::Value = self.post_json(USERS, member).await?;
        tracing::info!(username = %member.username, "Team member created");
        Ok(())
    }

    pub async fn delete_team_member(&self, id: i64) -> Result<()> {
        self.delete(&format!("{USERS}{id}/")).await
    }
}
