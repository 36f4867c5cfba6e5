//! # userboard
//!
//! A small fullstack user board: a REST API over a relational user store
//! and a dashboard client that drives it.
//!
//! ## Architecture
//!
//! ```text
//! Dashboard (client/)
//!     │  HTTP + JSON
//!     ├── REST Handlers (api/)
//!     │
//!     ├── ApiError → HTTP status (error)
//!     │
//!     └── UserStore (store/)
//!             ├── PostgreSQL (sqlx)
//!             └── in-memory
//! ```

pub mod api;
pub mod app_state;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod server;
pub mod store;
