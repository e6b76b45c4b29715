//! Database migrations for the datagrid demo schema

pub use sea_orm_migration::prelude::*;

mod migration;
pub use migration::Migrator;
