pub mod date;
mod error;

pub use error::*;
