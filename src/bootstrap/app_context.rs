use std::sync::Arc;

use crate::application::ports::item_repository::ItemRepository;
use crate::application::ports::user_repository::UserRepository;
use crate::bootstrap::config::Config;

#[derive(Clone)]
pub struct AppContext {
    pub cfg: Config,
    services: Arc<AppServices>,
}

pub struct AppServices {
    user_repo: Arc<dyn UserRepository>,
    item_repo: Arc<dyn ItemRepository>,
}

impl AppServices {
    pub fn new(user_repo: Arc<dyn UserRepository>, item_repo: Arc<dyn ItemRepository>) -> Self {
        Self {
            user_repo,
            item_repo,
        }
    }
}

impl AppContext {
    pub fn new(cfg: Config, services: AppServices) -> Self {
        Self {
            cfg,
            services: Arc::new(services),
        }
    }

    pub fn user_repo(&self) -> Arc<dyn UserRepository> {
        self.services.user_repo.clone()
    }

    pub fn item_repo(&self) -> Arc<dyn ItemRepository> {
        self.services.item_repo.clone()
    }
}
