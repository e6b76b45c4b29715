//! Demo rows for the `people` table

use chrono::Utc;
use datagrid_core::{ServiceError, ServiceResult};
use datagrid_entities::people;
use sea_orm::{ActiveValue::Set, ConnectionTrait, EntityTrait};
use tracing::info;

#[derive(Debug, Clone)]
pub struct PersonSeed {
    pub name: &'static str,
    pub email: &'static str,
    pub city: Option<&'static str>,
    pub age: i32,
}

pub fn demo_people() -> Vec<PersonSeed> {
    vec![
        PersonSeed {
            name: "John Carter",
            email: "john@example.com",
            city: Some("Oslo"),
            age: 42,
        },
        PersonSeed {
            name: "Amy Pond",
            email: "amy@example.com",
            city: Some("Lima"),
            age: 29,
        },
        PersonSeed {
            name: "Joanna Reyes",
            email: "joanna@example.org",
            city: Some("Oslo"),
            age: 31,
        },
        PersonSeed {
            name: "Bert Olsen",
            email: "bert@example.org",
            city: None,
            age: 57,
        },
        PersonSeed {
            name: "Carla Diaz",
            email: "carla@example.com",
            city: Some("Rome"),
            age: 24,
        },
    ]
}

/// Insert `rows` into `people`, returning how many were written.
pub async fn seed_people<C>(db: &C, rows: &[PersonSeed]) -> ServiceResult<u64>
where
    C: ConnectionTrait,
{
    if rows.is_empty() {
        return Ok(0);
    }

    let now = Utc::now();
    let models = rows.iter().map(|row| people::ActiveModel {
        name: Set(row.name.to_string()),
        email: Set(row.email.to_string()),
        city: Set(row.city.map(str::to_string)),
        age: Set(row.age),
        created_at: Set(now),
        ..Default::default()
    });

    people::Entity::insert_many(models)
        .exec(db)
        .await
        .map_err(|e| ServiceError::Database(e.to_string()))?;

    info!("Seeded {} people", rows.len());
    Ok(rows.len() as u64)
}
