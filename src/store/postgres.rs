//! PostgreSQL implementation of [`UserStore`].

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::error::ErrorKind;
use sqlx::postgres::PgPoolOptions;

use super::{StoreError, UserStore};
use crate::config::AppConfig;
use crate::domain::{NewUser, Post, PostId, User, UserId, UserWithPosts, attach_posts};

/// PostgreSQL-backed store using `sqlx::PgPool`.
#[derive(Debug, Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    /// Creates a store over an existing connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool sized from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] if the database is unreachable.
    pub async fn connect(config: &AppConfig) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(&config.database_url)
            .await
            .map_err(classify)?;
        Ok(Self::new(pool))
    }

    /// Applies the embedded migrations under `migrations/`.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Internal`] if a migration fails.
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!()
            .run(&self.pool)
            .await
            .map_err(|e| StoreError::Internal(e.to_string()))
    }
}

/// Maps a `sqlx` error from a write. Any error raised by the database
/// itself is a rejection of the row and keeps the database's message;
/// pool, I/O and protocol failures stay [`StoreError::Internal`].
fn classify_write(err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::Database(db) => StoreError::ConstraintViolation(db.message().to_string()),
        other => classify(other),
    }
}

/// Maps a `sqlx` error from a read, keeping the database's own message
/// for constraint violations.
fn classify(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::Database(db) => match db.kind() {
            ErrorKind::UniqueViolation
            | ErrorKind::ForeignKeyViolation
            | ErrorKind::NotNullViolation
            | ErrorKind::CheckViolation => StoreError::ConstraintViolation(db.message().to_string()),
            _ => StoreError::Internal(err.to_string()),
        },
        sqlx::Error::RowNotFound => StoreError::NotFound(err.to_string()),
        _ => StoreError::Internal(err.to_string()),
    }
}

#[async_trait]
impl UserStore for PostgresUserStore {
    async fn create_user(&self, new_user: NewUser) -> Result<User, StoreError> {
        let (id, email, name) = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "INSERT INTO users (email, name) VALUES ($1, $2) RETURNING id, email, name",
        )
        .bind(&new_user.email)
        .bind(&new_user.name)
        .fetch_one(&self.pool)
        .await
        .map_err(classify_write)?;

        Ok(User {
            id: UserId::from(id),
            email,
            name,
        })
    }

    async fn list_users_with_posts(&self) -> Result<Vec<UserWithPosts>, StoreError> {
        let users: Vec<User> = sqlx::query_as::<_, (i64, String, Option<String>)>(
            "SELECT id, email, name FROM users ORDER BY id ASC",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?
        .into_iter()
        .map(|(id, email, name)| User {
            id: UserId::from(id),
            email,
            name,
        })
        .collect();

        if users.is_empty() {
            return Ok(Vec::new());
        }

        let owner_ids: Vec<i64> = users.iter().map(|u| i64::from(u.id)).collect();
        let posts: Vec<Post> = sqlx::query_as::<_, (i64, i64)>(
            "SELECT id, user_id FROM posts WHERE user_id = ANY($1) ORDER BY id ASC",
        )
        .bind(&owner_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(classify)?
        .into_iter()
        .map(|(id, user_id)| Post {
            id: PostId::from(id),
            user_id: UserId::from(user_id),
        })
        .collect();

        Ok(attach_posts(users, posts))
    }

    async fn create_post(&self, user_id: UserId) -> Result<Post, StoreError> {
        let (id, owner) = sqlx::query_as::<_, (i64, i64)>(
            "INSERT INTO posts (user_id) VALUES ($1) RETURNING id, user_id",
        )
        .bind(i64::from(user_id))
        .fetch_one(&self.pool)
        .await
        .map_err(classify_write)?;

        Ok(Post {
            id: PostId::from(id),
            user_id: UserId::from(owner),
        })
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use std::borrow::Cow;
    use std::error::Error as StdError;
    use std::fmt;

    use super::*;

    /// A database-raised error with a chosen kind, as the driver would
    /// surface it.
    #[derive(Debug)]
    struct RaisedByDatabase {
        message: &'static str,
        code: &'static str,
        unique: bool,
    }

    impl fmt::Display for RaisedByDatabase {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str(self.message)
        }
    }

    impl StdError for RaisedByDatabase {}

    impl sqlx::error::DatabaseError for RaisedByDatabase {
        fn message(&self) -> &str {
            self.message
        }

        fn code(&self) -> Option<Cow<'_, str>> {
            Some(Cow::Borrowed(self.code))
        }

        fn as_error(&self) -> &(dyn StdError + Send + Sync + 'static) {
            self
        }

        fn as_error_mut(&mut self) -> &mut (dyn StdError + Send + Sync + 'static) {
            self
        }

        fn into_error(self: Box<Self>) -> Box<dyn StdError + Send + Sync + 'static> {
            self
        }

        fn kind(&self) -> ErrorKind {
            if self.unique {
                ErrorKind::UniqueViolation
            } else {
                ErrorKind::Other
            }
        }
    }

    fn raised(message: &'static str, code: &'static str, unique: bool) -> sqlx::Error {
        sqlx::Error::Database(Box::new(RaisedByDatabase {
            message,
            code,
            unique,
        }))
    }

    async fn connect() -> PostgresUserStore {
        let config = AppConfig {
            database_url: std::env::var("DATABASE_URL").unwrap_or_default(),
            ..AppConfig::default()
        };
        let Ok(store) = PostgresUserStore::connect(&config).await else {
            panic!("database unreachable");
        };
        let Ok(()) = store.migrate().await else {
            panic!("migration failed");
        };
        store
    }

    fn unique_email(tag: &str) -> String {
        let nanos = chrono::Utc::now().timestamp_nanos_opt().unwrap_or_default();
        format!("{tag}-{nanos}@test.com")
    }

    #[test]
    fn row_not_found_maps_to_not_found() {
        assert!(matches!(
            classify(sqlx::Error::RowNotFound),
            StoreError::NotFound(_)
        ));
    }

    #[test]
    fn any_database_rejection_of_a_write_is_a_constraint_violation() {
        let invalid_bytes = raised(
            "invalid byte sequence for encoding \"UTF8\": 0x00",
            "22021",
            false,
        );
        let StoreError::ConstraintViolation(message) = classify_write(invalid_bytes) else {
            panic!("expected constraint violation");
        };
        assert_eq!(message, "invalid byte sequence for encoding \"UTF8\": 0x00");

        let too_large = raised(
            "index row size 3016 exceeds btree version 4 maximum 2704 for index \"users_email_key\"",
            "54000",
            false,
        );
        assert!(matches!(
            classify_write(too_large),
            StoreError::ConstraintViolation(_)
        ));

        let duplicate = raised(
            "duplicate key value violates unique constraint \"users_email_key\"",
            "23505",
            true,
        );
        assert!(matches!(
            classify_write(duplicate),
            StoreError::ConstraintViolation(_)
        ));
    }

    #[test]
    fn transport_failure_on_a_write_stays_internal() {
        assert!(matches!(
            classify_write(sqlx::Error::PoolTimedOut),
            StoreError::Internal(_)
        ));
    }

    #[test]
    fn non_constraint_database_error_on_a_read_is_internal() {
        let err = raised("canceling statement due to statement timeout", "57014", false);
        assert!(matches!(classify(err), StoreError::Internal(_)));
    }

    #[test]
    fn pool_timeout_maps_to_internal() {
        assert!(matches!(
            classify(sqlx::Error::PoolTimedOut),
            StoreError::Internal(_)
        ));
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn duplicate_email_is_a_constraint_violation() {
        let store = connect().await;
        let email = unique_email("dup");
        let new_user = NewUser {
            email: email.clone(),
            name: Some("Ann".to_string()),
        };

        let Ok(user) = store.create_user(new_user.clone()).await else {
            panic!("first create failed");
        };
        assert_eq!(user.email, email);

        let result = store.create_user(new_user).await;
        let Err(StoreError::ConstraintViolation(message)) = result else {
            panic!("expected constraint violation");
        };
        assert!(!message.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn list_includes_created_posts() {
        let store = connect().await;
        let Ok(user) = store
            .create_user(NewUser {
                email: unique_email("posts"),
                name: None,
            })
            .await
        else {
            panic!("create failed");
        };
        let Ok(post) = store.create_post(user.id).await else {
            panic!("post create failed");
        };

        let Ok(listed) = store.list_users_with_posts().await else {
            panic!("list failed");
        };
        let Some(found) = listed.iter().find(|u| u.user.id == user.id) else {
            panic!("created user missing from list");
        };
        assert_eq!(found.posts, vec![post]);
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn nul_byte_in_email_is_a_constraint_violation() {
        let store = connect().await;
        let result = store
            .create_user(NewUser {
                email: format!("nul\u{0}{}", unique_email("byte")),
                name: None,
            })
            .await;
        let Err(StoreError::ConstraintViolation(message)) = result else {
            panic!("expected constraint violation");
        };
        assert!(!message.is_empty());
    }

    #[tokio::test]
    #[ignore = "requires DATABASE_URL pointing at a PostgreSQL instance"]
    async fn post_for_unknown_user_is_a_constraint_violation() {
        let store = connect().await;
        let result = store.create_post(UserId::new(i64::MAX)).await;
        assert!(matches!(result, Err(StoreError::ConstraintViolation(_))));
    }
}
