//! Shared setup for workflow tests: a fake backend plus a client signed in
//! with a fixed token.

use std::sync::Arc;

use dealer_client::{DealerClient, MemoryTokenStore, TokenStore, Vehicle};
use fake_dealer_api::{fixtures, FakeApi};

pub const TOKEN: &str = "test-token";

pub struct Desk {
    pub api: FakeApi,
    pub client: DealerClient,
    pub tokens: Arc<MemoryTokenStore>,
}

impl Desk {
    pub async fn signed_in() -> Self {
        Self::with_store(Arc::new(MemoryTokenStore::with_token(TOKEN))).await
    }

    pub async fn signed_out() -> Self {
        Self::with_store(Arc::new(MemoryTokenStore::new())).await
    }

    async fn with_store(tokens: Arc<MemoryTokenStore>) -> Self {
        let api = FakeApi::start().await;
        let store: Arc<dyn TokenStore> = tokens.clone();
        let client = DealerClient::new(&api.url(), store).expect("client builds");
        Self { api, client, tokens }
    }

    /// Calls seen by the backend, in order.
    pub fn calls(&self) -> Vec<String> {
        self.api.calls()
    }
}

/// A vehicle as the client would have parsed it from the list endpoint.
pub fn vehicle(id: i64, status: &str) -> Vehicle {
    serde_json::from_value(fixtures::vehicle(id, status)).expect("vehicle fixture parses")
}
