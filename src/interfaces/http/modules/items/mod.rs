//! Item pages: landing, detail and the form flow

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
