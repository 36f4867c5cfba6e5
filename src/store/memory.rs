//! In-memory [`UserStore`] with relational constraint semantics.
//!
//! A single [`tokio::sync::RwLock`] guards both tables, so a write is
//! atomic with respect to the uniqueness and foreign-key checks it makes.

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{StoreError, UserStore};
use crate::domain::{NewUser, Post, PostId, User, UserId, UserWithPosts, attach_posts};

#[derive(Debug, Default)]
struct Tables {
    users: Vec<User>,
    posts: Vec<Post>,
    last_user_id: i64,
    last_post_id: i64,
}

/// Process-local store. Ids start at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    tables: RwLock<Tables>,
}

impl InMemoryUserStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }
}

/// PostgreSQL `TEXT` cannot hold NUL; reject it the same way.
fn reject_nul(value: &str) -> Result<(), StoreError> {
    if value.contains('\0') {
        return Err(StoreError::ConstraintViolation(
            "invalid byte sequence for encoding \"UTF8\": 0x00".to_string(),
        ));
    }
    Ok(())
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        reject_nul(&new_user.email)?;
        if let Some(name) = &new_user.name {
            reject_nul(name)?;
        }
        let mut tables = self.tables.write().await;
        if tables.users.iter().any(|u| u.email == new_user.email) {
            return Err(StoreError::ConstraintViolation(format!(
                "duplicate key value violates unique constraint \"users_email_key\": \
                 Key (email)=({}) already exists.",
                new_user.email
            )));
        }
        tables.last_user_id = tables.last_user_id.saturating_add(1);
        let user = User {
            id: UserId::new(tables.last_user_id),
            email: new_user.email,
            name: new_user.name,
        };
        tables.users.push(user.clone());
        Ok(user)
    }

    async fn list_users_with_posts(&self) -> Result<Vec<UserWithPosts>, StoreError> {
        let tables = self.tables.read().await;
        Ok(attach_posts(tables.users.clone(), tables.posts.clone()))
    }

    async fn create_post(&self, user_id: UserId) -> Result<Post, StoreError> {
        let mut tables = self.tables.write().await;
        if !tables.users.iter().any(|u| u.id == user_id) {
            return Err(StoreError::ConstraintViolation(format!(
                "insert or update on table \"posts\" violates foreign key constraint \
                 \"posts_user_id_fkey\": Key (user_id)=({user_id}) is not present in table \"users\"."
            )));
        }
        tables.last_post_id = tables.last_post_id.saturating_add(1);
        let post = Post {
            id: PostId::new(tables.last_post_id),
            user_id,
        };
        tables.posts.push(post.clone());
        Ok(post)
    }
}
