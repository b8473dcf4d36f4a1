use anyhow::{bail, Result};
use model::entities::user;
use sea_orm::Database;
use tracing::{debug, info};

pub async fn create_superuser(database_url: &str, email: &str, password: &str) -> Result<()> {
    debug!("Database URL: {}", database_url);
    let db = Database::connect(database_url).await?;

    if user::find_by_email(&db, email).await?.is_some() {
        bail!("A user with email {} already exists", email);
    }

    let created = user::create_superuser(&db, email, password).await?;
    info!("Created superuser {} ({})", created.email, created.id);

    db.close().await?;
    Ok(())
}
