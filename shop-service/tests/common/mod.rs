#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use auth::TokenLifetime;
use chrono::DateTime;
use chrono::Utc;
use shop_service::domain::notification::errors::MailError;
use shop_service::domain::notification::errors::MailingListError;
use shop_service::domain::notification::models::Email;
use shop_service::domain::notification::ports::Mailer;
use shop_service::domain::notification::ports::MailingList;
use shop_service::domain::user::errors::UserError;
use shop_service::domain::user::models::EmailAddress;
use shop_service::domain::user::models::User;
use shop_service::domain::user::models::UserId;
use shop_service::domain::user::ports::AuthServicePort;
use shop_service::domain::user::ports::UserRepository;
use shop_service::domain::user::service::AuthService;
use shop_service::inbound::http::router::create_router;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const CLIENT_URL: &str = "http://localhost:8080";

/// Test application that spawns a real server
pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub api_client: reqwest::Client,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUserRepository>,
    pub mailer: Arc<RecordingMailer>,
    pub mailing_list: Arc<StubMailingList>,
}

impl TestApp {
    /// Spawn the application backed by in-memory adapters
    pub async fn spawn() -> Self {
        let authenticator = test_authenticator();
        let users = Arc::new(InMemoryUserRepository::default());
        let mailer = Arc::new(RecordingMailer::default());
        let mailing_list = Arc::new(StubMailingList::default());

        let auth_service = Arc::new(AuthService::new(
            Arc::clone(&users),
            Arc::clone(&mailer),
            Arc::clone(&mailing_list),
            Arc::clone(&authenticator),
            CLIENT_URL,
        ));

        Self::serve(auth_service, authenticator, users, mailer, mailing_list).await
    }

    /// Spawn the application around an arbitrary service implementation
    pub async fn spawn_with_service(auth_service: Arc<dyn AuthServicePort>) -> Self {
        Self::serve(
            auth_service,
            test_authenticator(),
            Arc::new(InMemoryUserRepository::default()),
            Arc::new(RecordingMailer::default()),
            Arc::new(StubMailingList::default()),
        )
        .await
    }

    async fn serve(
        auth_service: Arc<dyn AuthServicePort>,
        authenticator: Arc<Authenticator>,
        users: Arc<InMemoryUserRepository>,
        mailer: Arc<RecordingMailer>,
        mailing_list: Arc<StubMailingList>,
    ) -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let router = create_router(auth_service, Arc::clone(&authenticator));

        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            port,
            api_client: reqwest::Client::new(),
            authenticator,
            users,
            mailer,
            mailing_list,
        }
    }

    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(format!("{}{}", self.address, path))
    }

    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(format!("{}{}", self.address, path))
    }

    /// POST with an `Authorization` header taken verbatim (`Bearer ...`)
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path)
            .header(reqwest::header::AUTHORIZATION, token)
    }

    /// Register an account through the API and return the issued token.
    pub async fn register(&self, email: &str, password: &str) -> String {
        let response = self
            .post("/api/auth/register")
            .json(&serde_json::json!({
                "email": email,
                "firstName": "Jane",
                "lastName": "Doe",
                "password": password,
            }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: serde_json::Value = response.json().await.expect("Failed to parse response");
        body["token"]
            .as_str()
            .expect("Missing token")
            .to_string()
    }
}

fn test_authenticator() -> Arc<Authenticator> {
    Arc::new(Authenticator::new(JWT_SECRET, TokenLifetime::default()))
}

/// User storage kept in a map, with the same uniqueness rule as the database
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<HashMap<UserId, User>>,
}

impl InMemoryUserRepository {
    pub fn find_by_email_sync(&self, email: &str) -> Option<User> {
        self.users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.email.as_str() == email)
            .cloned()
    }

    pub fn insert(&self, user: User) {
        self.users.lock().unwrap().insert(user.id, user);
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|existing| existing.email == user.email) {
            return Err(UserError::EmailAlreadyExists(user.email.to_string()));
        }
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<User>, UserError> {
        Ok(self.find_by_email_sync(email.as_str()))
    }

    async fn find_by_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<Option<User>, UserError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|user| user.has_valid_reset_token(token, now))
            .cloned())
    }

    async fn update(&self, user: User) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();
        match users.get_mut(&user.id) {
            Some(existing) => {
                *existing = user.clone();
                Ok(user)
            }
            None => Err(UserError::NotFound(user.id.to_string())),
        }
    }
}

/// Mailer that keeps every message instead of sending it
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<(String, Email)>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<(String, Email)> {
        self.sent.lock().unwrap().clone()
    }

    /// Token from the last reset link sent to `recipient`
    pub fn last_reset_token(&self, recipient: &str) -> Option<String> {
        self.sent()
            .into_iter()
            .rev()
            .find_map(|(to, email)| match email {
                Email::ResetRequest { reset_url } if to == recipient => reset_url
                    .rsplit('/')
                    .next()
                    .map(str::to_string),
                _ => None,
            })
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, recipient: &EmailAddress, email: &Email) -> Result<(), MailError> {
        self.sent
            .lock()
            .unwrap()
            .push((recipient.as_str().to_string(), email.clone()));
        Ok(())
    }
}

/// Mailing list that records subscriptions and can be told to fail
#[derive(Default)]
pub struct StubMailingList {
    subscribed: Mutex<Vec<String>>,
    failing: Mutex<bool>,
}

impl StubMailingList {
    pub fn subscribed(&self) -> Vec<String> {
        self.subscribed.lock().unwrap().clone()
    }

    pub fn fail_next_requests(&self) {
        *self.failing.lock().unwrap() = true;
    }
}

#[async_trait]
impl MailingList for StubMailingList {
    async fn subscribe(&self, email: &EmailAddress) -> Result<(), MailingListError> {
        if *self.failing.lock().unwrap() {
            return Err(MailingListError::Transport("connection refused".to_string()));
        }
        self.subscribed
            .lock()
            .unwrap()
            .push(email.as_str().to_string());
        Ok(())
    }
}
