//! Dashboard client: a typed HTTP client for the REST API and the view
//! controller that drives it.

pub mod api_client;
pub mod dashboard;

pub use api_client::{ApiClient, ClientError};
pub use dashboard::{Dashboard, ViewState, generated_user};
