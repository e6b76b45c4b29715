use super::DatabaseArgs;
use clap::Args;
use colored::Colorize;
use datagrid_database::{demo_people, seed_people, DbConnection};
use datagrid_entities::people;
use sea_orm::{EntityTrait, PaginatorTrait};
use tracing::{debug, info};

#[derive(Args)]
pub struct SeedCommand {
    #[command(flatten)]
    pub database: DatabaseArgs,

    /// Insert the demo rows even when `people` already has data
    #[arg(long)]
    pub force: bool,
}

impl SeedCommand {
    pub fn execute(self) -> anyhow::Result<()> {
        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(async {
            debug!("Initializing database connection...");
            let db = datagrid_database::establish_connection(&self.database.config()).await?;
            let inserted = seed_demo_people(db.as_ref(), self.force).await?;

            println!();
            if inserted == 0 {
                println!(
                    "{}",
                    "   people already has rows, nothing inserted (use --force to append)"
                        .bright_yellow()
                );
            } else {
                println!(
                    "{}",
                    format!("   Seeded {} people", inserted).bright_green().bold()
                );
            }
            println!();
            Ok(())
        })
    }
}

/// Insert the demo rows unless the table already has data and `force` is off.
async fn seed_demo_people(db: &DbConnection, force: bool) -> anyhow::Result<u64> {
    let existing = people::Entity::find().count(db).await?;
    if existing > 0 && !force {
        info!("Skipping seed, people holds {} rows", existing);
        return Ok(0);
    }
    Ok(seed_people(db, &demo_people()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use datagrid_database::test_utils::TestDatabase;

    #[tokio::test]
    async fn test_seed_only_fills_empty_table() -> anyhow::Result<()> {
        let test_db = TestDatabase::new().await?;
        let db = test_db.connection();

        assert_eq!(seed_demo_people(db.as_ref(), false).await?, 5);
        assert_eq!(seed_demo_people(db.as_ref(), false).await?, 0);
        assert_eq!(people::Entity::find().count(db.as_ref()).await?, 5);
        Ok(())
    }

    #[tokio::test]
    async fn test_force_appends() -> anyhow::Result<()> {
        let test_db = TestDatabase::with_people(&demo_people()).await?;
        let db = test_db.connection();

        assert_eq!(seed_demo_people(db.as_ref(), true).await?, 5);
        assert_eq!(people::Entity::find().count(db.as_ref()).await?, 10);
        Ok(())
    }
}
