use async_trait::async_trait;

use super::domain::UserRecord;
use super::errors::AuthError;

/// Persistence seam for account records. The service core never touches a
/// database directly; it talks to this trait.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Create an account; `EmailExists` when the email is already taken.
    async fn create(
        &self,
        email: &str,
        password_hash: &str,
        full_name: Option<&str>,
    ) -> Result<UserRecord, AuthError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError>;

    /// Resolve an account by id; `UserNotFound` when absent.
    async fn find_by_id(&self, id: i64) -> Result<UserRecord, AuthError>;
}

/// Simple in-memory store for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::collections::HashMap;
    use std::sync::atomic::{AtomicI64, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockUserStore {
        users: Mutex<HashMap<i64, UserRecord>>, // key: user id
        next_id: AtomicI64,
    }

    impl MockUserStore {
        /// Test helper: flip the active flag on an existing account.
        pub fn set_active(&self, id: i64, active: bool) {
            let mut users = self.users.lock().unwrap();
            if let Some(user) = users.get_mut(&id) {
                user.is_active = active;
            }
        }
    }

    #[async_trait]
    impl UserStore for MockUserStore {
        async fn create(
            &self,
            email: &str,
            password_hash: &str,
            full_name: Option<&str>,
        ) -> Result<UserRecord, AuthError> {
            let mut users = self.users.lock().unwrap();
            if users.values().any(|u| u.email == email) {
                return Err(AuthError::EmailExists);
            }
            let now = Utc::now();
            let id = self.next_id.fetch_add(1, Ordering::Relaxed) + 1;
            let user = UserRecord {
                id,
                email: email.to_string(),
                password_hash: password_hash.to_string(),
                full_name: full_name.map(|n| n.to_string()),
                is_active: true,
                is_corporate: false,
                created_at: now,
                updated_at: now,
            };
            users.insert(id, user.clone());
            Ok(user)
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<UserRecord>, AuthError> {
            let users = self.users.lock().unwrap();
            Ok(users.values().find(|u| u.email == email).cloned())
        }

        async fn find_by_id(&self, id: i64) -> Result<UserRecord, AuthError> {
            let users = self.users.lock().unwrap();
            users.get(&id).cloned().ok_or(AuthError::UserNotFound)
        }
    }
}
