use menu_digital_api::{
    config::AppConfig,
    db::{create_orm_conn, run_migrations},
};
use sea_orm_migration::MigratorTrait;

use menu_digital_api::migration::Migrator;

/// `migrate` applies pending migrations; `migrate down` reverts the last one;
/// `migrate status` lists them.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;
    let orm = create_orm_conn(&config.database_url).await?;

    match std::env::args().nth(1).as_deref() {
        None | Some("up") => {
            run_migrations(&orm).await?;
            println!("Migrations applied");
        }
        Some("down") => {
            Migrator::down(&orm, Some(1)).await?;
            println!("Last migration reverted");
        }
        Some("status") => Migrator::status(&orm).await?,
        Some(other) => anyhow::bail!("unknown command '{other}', use up, down or status"),
    }
    Ok(())
}
