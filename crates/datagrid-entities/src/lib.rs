//! SeaORM entities backing the demo tables

pub mod people;
