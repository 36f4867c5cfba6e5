//! User and post entities as stored and as returned over the API.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{PostId, UserId};

/// A persisted user row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct User {
    /// Store-generated identifier.
    pub id: UserId,
    /// Email address, unique across all users.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// Input for creating a user. The id is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    /// Email address; the store rejects duplicates.
    pub email: String,
    /// Optional display name.
    pub name: Option<String>,
}

/// A persisted post row. Posts carry nothing beyond their owner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Post {
    /// Store-generated identifier.
    pub id: PostId,
    /// Owning user.
    pub user_id: UserId,
}

/// A user together with its eagerly loaded posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UserWithPosts {
    /// The user row.
    #[serde(flatten)]
    pub user: User,
    /// Posts owned by the user, possibly empty.
    pub posts: Vec<Post>,
}

/// Attaches each post to its owner, keeping `users` in the given order.
///
/// Posts whose owner is not in `users` are dropped.
#[must_use]
pub fn attach_posts(users: Vec<User>, posts: Vec<Post>) -> Vec<UserWithPosts> {
    let mut by_owner: HashMap<UserId, Vec<Post>> = HashMap::with_capacity(users.len());
    for post in posts {
        by_owner.entry(post.user_id).or_default().push(post);
    }
    users
        .into_iter()
        .map(|user| {
            let posts = by_owner.remove(&user.id).unwrap_or_default();
            UserWithPosts { user, posts }
        })
        .collect()
}
