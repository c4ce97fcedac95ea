//! Database repository implementations

pub mod item_repository;
pub mod unit_of_work;

pub use item_repository::SeaOrmItemRepository;
pub use unit_of_work::{TagIndex, UnitOfWork};
