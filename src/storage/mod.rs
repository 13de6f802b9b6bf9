// storage/mod.rs
// Database connection module

pub mod pool;

// Re-export commonly used items
pub use pool::{connect, with_connection, DbPool};
