//! Database entities module

pub mod author;
pub mod genre;
pub mod item;
pub mod item_author;
pub mod item_genre;

pub use author::Entity as Author;
pub use genre::Entity as Genre;
pub use item::Entity as Item;
pub use item_author::Entity as ItemAuthor;
pub use item_genre::Entity as ItemGenre;
