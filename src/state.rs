use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::{config::AppConfig, storage::ImageStore};

#[derive(Clone)]
pub struct AppState {
    pub orm: Arc<DatabaseConnection>,
    pub config: Arc<AppConfig>,
    pub images: ImageStore,
}

impl AppState {
    pub fn new(orm: DatabaseConnection, config: AppConfig) -> Self {
        let images = ImageStore::new(config.upload_dir.clone());
        Self {
            orm: Arc::new(orm),
            config: Arc::new(config),
            images,
        }
    }

    pub fn db(&self) -> &DatabaseConnection {
        &self.orm
    }
}
