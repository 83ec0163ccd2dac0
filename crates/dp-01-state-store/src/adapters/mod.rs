pub mod memory_db;
pub mod shared;

pub use memory_db::*;
pub use shared::*;
