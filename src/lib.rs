pub mod cli;
pub mod config;
pub mod db;
pub mod observability;
pub mod routes;
pub mod template;
pub mod view;

pub use self::config::Config;
pub use db::{create_pool, create_read_pool, create_write_pool};
pub use routes::AppState;
