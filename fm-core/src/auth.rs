//! Mock authentication
//!
//! Every credential is accepted. The account role is derived from the email.

use crate::session::{User, UserRole};
use rand::Rng;
use std::time::Duration;
use tracing::info;

const ID_ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const ID_LEN: usize = 9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    #[default]
    Login,
    Signup,
}

#[derive(Debug, Clone, Default)]
pub struct Credentials {
    pub mode: AuthMode,
    pub email: String,
    pub password: String,
    /// Only collected on signup; may be empty.
    pub stage_name: String,
}

pub struct MockAuthenticator {
    delay: Duration,
}

impl MockAuthenticator {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Resolve credentials to a user after the configured delay.
    pub async fn authenticate(&self, credentials: Credentials) -> User {
        tokio::time::sleep(self.delay).await;
        let user = user_for(&credentials, random_id());
        info!(
            "Authenticated {} as {} ({:?})",
            user.email, user.role, credentials.mode
        );
        user
    }
}

fn user_for(credentials: &Credentials, id: String) -> User {
    let is_admin = credentials.email.contains("admin");
    let stage_name = credentials.stage_name.trim();
    let (name, stage_name) = if stage_name.is_empty() {
        let fallback = if is_admin {
            "Admin Console"
        } else {
            "Rising Star"
        };
        ("New Artist".to_string(), fallback.to_string())
    } else {
        (stage_name.to_string(), stage_name.to_string())
    };
    User {
        id,
        name,
        email: credentials.email.clone(),
        stage_name,
        role: if is_admin {
            UserRole::Admin
        } else {
            UserRole::Artist
        },
    }
}

fn random_id() -> String {
    let mut rng = rand::rng();
    (0..ID_LEN)
        .map(|_| ID_ALPHABET[rng.random_range(0..ID_ALPHABET.len())] as char)
        .collect()
}
