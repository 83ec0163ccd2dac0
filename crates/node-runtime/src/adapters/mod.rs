//! Port implementations owned by the node binary.

pub mod file_db;

pub use file_db::FileStateDb;
