mod resolver;
mod roster;
mod sqlite;
mod store;
mod types;
mod week;

pub use resolver::*;
pub use roster::*;
pub use sqlite::*;
pub use store::*;
pub use types::*;
pub use week::*;
