//! Staff accounts. Every operation here is manager-only and is refused
//! locally, without a request, for everyone else.

use dealer_client::{DealerClient, NewMemberRole, NewTeamMember, TeamMember};

use crate::error::{DeskError, Result};

fn require_manager(is_manager: bool) -> Result<()> {
    if is_manager {
        Ok(())
    } else {
        Err(DeskError::AccessDenied)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemberDraft {
    pub username: String,
    pub password: String,
    pub role: NewMemberRole,
}

impl MemberDraft {
    pub fn validate(&self) -> Result<NewTeamMember> {
        let username = self.username.trim();
        if username.is_empty() || self.password.is_empty() {
            return Err(DeskError::missing(&["username", "password"]));
        }
        Ok(NewTeamMember {
            username: username.to_string(),
            password: self.password.clone(),
            role: self.role,
        })
    }
}

pub async fn list(client: &DealerClient, is_manager: bool) -> Result<Vec<TeamMember>> {
    require_manager(is_manager)?;
    Ok(client.list_team().await?)
}

/// Server-side refusals (duplicate username and the like) come back as
/// `DealerError::Api` carrying the server's own message.
pub async fn create(client: &DealerClient, is_manager: bool, draft: &MemberDraft) -> Result<()> {
    require_manager(is_manager)?;
    let member = draft.validate()?;
    client.create_team_member(&member).await?;
    Ok(())
}

pub async fn remove(client: &DealerClient, is_manager: bool, id: i64) -> Result<()> {
    require_manager(is_manager)?;
    client.delete_team_member(id).await?;
    tracing::info!(user_id = id, "Team member removed");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_needs_credentials() {
        let draft = MemberDraft {
            username: "  ".into(),
            password: "pw".into(),
            ..Default::default()
        };
        assert!(matches!(draft.validate(), Err(DeskError::MissingFields(_))));

        let draft = MemberDraft {
            username: " jo ".into(),
            password: "pw".into(),
            role: NewMemberRole::Service,
        };
        let member = draft.validate().unwrap();
        assert_eq!(member.username, "jo");
        assert_eq!(member.role, NewMemberRole::Service);
    }

    #[test]
    fn default_role_is_sales() {
        assert_eq!(MemberDraft::default().role, NewMemberRole::Sales);
    }
}
