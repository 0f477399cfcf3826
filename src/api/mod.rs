//! HTTP interface
//!
//! Public feedback forms plus a cookie-authenticated admin area with the
//! dashboard, JSON stats, chart images and export downloads.

pub mod auth;
pub mod forms;
pub mod pages;
pub mod server;

pub use auth::SessionSigner;
pub use server::{build_router, AppState, FeedbackServer};
