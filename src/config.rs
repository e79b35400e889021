use std::env;
use std::path::PathBuf;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_expires_hours: i64,
    pub upload_dir: PathBuf,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = match env::var("DATABASE_URL") {
            Ok(url) => url,
            Err(_) => database_url_from_parts()?,
        };
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .or_else(|_| env::var("PORT"))
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let jwt_secret = env::var("JWT_SECRET").context("JWT_SECRET is not set")?;
        let jwt_expires_hours = env::var("JWT_EXPIRES_HOURS")
            .ok()
            .and_then(|h| h.parse::<i64>().ok())
            .filter(|h| *h > 0)
            .unwrap_or(24);
        let upload_dir = env::var("UPLOAD_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("uploads"));
        Ok(Self {
            port,
            database_url,
            host,
            jwt_secret,
            jwt_expires_hours,
            upload_dir,
        })
    }
}

fn database_url_from_parts() -> anyhow::Result<String> {
    let host = env::var("DB_HOST").context("set DATABASE_URL or DB_HOST")?;
    let name = env::var("DB_NAME").context("DB_NAME is not set")?;
    let user = env::var("DB_USER").context("DB_USER is not set")?;
    let password = env::var("DB_PASSWORD").unwrap_or_default();
    let port = env::var("DB_PORT").unwrap_or_else(|_| "5432".to_string());
    Ok(format!("postgres://{user}:{password}@{host}:{port}/{name}"))
}
