use crate::error::{DealerError, Result};
use crate::types::{Credentials, Profile, TokenResponse};
use crate::DealerClient;

impl DealerClient {
    /// Exchange credentials for an opaque API token.
    ///
    /// Sent without an `Authorization` header. A 400/401 from the backend
    /// is reported as [`DealerError::InvalidCredentials`].
    pub async fn obtain_token(&self, username: &str, password: &str) -> Result<String> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        let resp = self
            .client
            .post(self.url("api-token-auth/"))
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if status.as_u16() == 400 || status.as_u16() == 401 {
            return Err(DealerError::InvalidCredentials);
        }
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(DealerError::from_body(status.as_u16(), body));
        }

        let token: TokenResponse = resp.json().await?;
        Ok(token.token)
    }

    /// The "who am I" profile of the current token's user.
    pub async fn me(&self) -> Result<Profile> {
        self.get_json("api/me/").await
    }
}
