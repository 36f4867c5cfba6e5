//! Domain layer: entities and value objects.
//!
//! [`User`] owns zero or more [`Post`]s. [`Health`] is an ephemeral value
//! computed per request.

pub mod health;
pub mod post_id;
pub mod user;
pub mod user_id;

pub use health::Health;
pub use post_id::PostId;
pub use user::{NewUser, Post, User, UserWithPosts, attach_posts};
pub use user_id::UserId;
