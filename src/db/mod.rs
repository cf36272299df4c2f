pub mod connection;
pub mod container;
#[cfg(test)]
pub mod memory;
pub mod models;
pub mod repositories;

pub use connection::*;
pub use container::*;
pub use models::*;
pub use repositories::*;
