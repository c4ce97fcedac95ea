pub mod api;
pub mod health;
pub mod items;
pub mod listing;
pub mod metrics;
pub mod request_id;
