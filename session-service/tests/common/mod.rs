use std::collections::HashMap;
use std::sync::atomic::AtomicI64;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use async_trait::async_trait;
use auth_core::PasswordHasher;
use auth_core::TokenCodec;
use chrono::Duration;
use session_service::domain::session::errors::UserStoreError;
use session_service::domain::session::models::EmailAddress;
use session_service::domain::session::models::UserId;
use session_service::domain::session::models::UserRecord;
use session_service::domain::session::ports::UserStore;
use session_service::domain::session::service::SessionService;
use session_service::inbound::http::router::create_router;
use tokio::sync::RwLock;

pub const TEST_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";

/// Codec configured identically to the one inside the spawned app, for
/// minting tokens directly in tests (e.g. already-expired ones).
pub fn test_codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET, "HS256", Duration::minutes(30), Duration::days(7))
        .expect("Failed to build test codec")
}

fn test_hasher() -> PasswordHasher {
    PasswordHasher::with_params(1024, 1, 1).expect("Failed to build test hasher")
}

/// In-memory user store standing in for the external persistence
/// collaborator.
pub struct InMemoryUserStore {
    users: RwLock<HashMap<i64, UserRecord>>,
    next_id: AtomicI64,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            users: RwLock::new(HashMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn insert_user(&self, email: &str, password_hash: String, is_active: bool) -> UserId {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = UserRecord {
            id: UserId(id),
            email: EmailAddress::new(email.to_string()).expect("Invalid test email"),
            password_hash,
            is_active,
        };

        self.users.write().await.insert(id, record);
        UserId(id)
    }

    pub async fn set_active(&self, id: UserId, is_active: bool) {
        if let Some(record) = self.users.write().await.get_mut(&id.0) {
            record.is_active = is_active;
        }
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_email(
        &self,
        email: &EmailAddress,
    ) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|record| record.email.as_str() == email.as_str())
            .cloned())
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<UserRecord>, UserStoreError> {
        Ok(self.users.read().await.get(&id.0).cloned())
    }
}

/// Test application that spawns the real HTTP server on a random port
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub store: Arc<InMemoryUserStore>,
    hasher: PasswordHasher,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let store = Arc::new(InMemoryUserStore::new());
        let hasher = test_hasher();
        let session_service = Arc::new(SessionService::new(
            Arc::clone(&store),
            hasher.clone(),
            test_codec(),
        ));

        let router = create_router(session_service);

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            store,
            hasher,
        }
    }

    /// Hash a password and insert a user into the backing store
    pub async fn seed_user(&self, email: &str, password: &str, is_active: bool) -> UserId {
        let hash = self.hasher.hash(password).expect("Failed to hash password");
        self.store.insert_user(email, hash, is_active).await
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }
}
