//! User request DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::NewUser;

/// Request body for `POST /api/users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateUserRequest {
    /// Email address; must not belong to an existing user.
    #[schema(example = "a@test.com")]
    pub email: String,
    /// Optional display name; `null` and absent are equivalent.
    #[serde(default)]
    #[schema(example = "Ann")]
    pub name: Option<String>,
}

impl From<CreateUserRequest> for NewUser {
    fn from(req: CreateUserRequest) -> Self {
        Self {
            email: req.email,
            name: req.name,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn name_may_be_absent_or_null() {
        let Ok(absent) = serde_json::from_str::<CreateUserRequest>(r#"{"email":"a@test.com"}"#)
        else {
            panic!("absent name rejected");
        };
        let Ok(null) =
            serde_json::from_str::<CreateUserRequest>(r#"{"email":"a@test.com","name":null}"#)
        else {
            panic!("null name rejected");
        };
        assert_eq!(absent, null);
        assert_eq!(absent.name, None);
    }

    #[test]
    fn email_is_required() {
        assert!(serde_json::from_str::<CreateUserRequest>(r#"{"name":"Ann"}"#).is_err());
        assert!(serde_json::from_str::<CreateUserRequest>(r#"{"email":null}"#).is_err());
    }
}
