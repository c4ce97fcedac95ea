//! HTTP interface
//!
//! - `common`: response envelope, error mapping, validated JSON extractor
//! - `modules`: one folder per resource with `dto.rs` / `handlers.rs`
//! - `router`: route table, middleware stack and Swagger UI

pub mod common;
pub mod modules;
pub mod router;

pub use router::{create_router, RouterState};
