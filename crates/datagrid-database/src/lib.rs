//! Database connection and seeding utilities

pub use sea_orm;
mod connection;
mod seed;

pub use connection::{establish_connection, DbConnection};
pub use seed::{demo_people, seed_people, PersonSeed};

// Export test utilities for use by other crates in their tests
pub mod test_utils;
