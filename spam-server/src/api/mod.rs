//! HTTP surface for spam-server
//!
//! The single page at `/`, a JSON endpoint at `/api/classify` and `/health`

pub mod handlers;
pub mod server;
pub mod web;

pub use server::ApiServer;
