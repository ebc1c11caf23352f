pub mod category;
pub mod day;
pub mod server;
