//! OpenAPI document for the REST surface.

use utoipa::OpenApi;

use crate::api::dto::CreateUserRequest;
use crate::api::handlers::{system, users};
use crate::domain::{Health, Post, PostId, User, UserId, UserWithPosts};
use crate::error::ErrorResponse;

/// Generated OpenAPI specification.
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "userboard",
        description = "Health check and user CRUD over a relational store."
    ),
    paths(system::health_handler, users::create_user, users::list_users),
    components(schemas(
        Health,
        User,
        UserId,
        PostId,
        Post,
        UserWithPosts,
        CreateUserRequest,
        ErrorResponse
    )),
    tags(
        (name = "System", description = "Service status"),
        (name = "Users", description = "User accounts and their posts")
    )
)]
pub struct ApiDoc;
