use std::fmt;
use std::sync::Arc;

use hrdesk_config::{CorsConfig, JwtConfig, SchemaConfig, UpstreamConfig};
use hrdesk_core::permissions::PermissionSchema;

use crate::store::{PermissionStore, init_store};

#[derive(Clone)]
pub struct AppState {
    pub jwt_config: JwtConfig,
    pub cors_config: CorsConfig,
    pub schema: Arc<PermissionSchema>,
    pub store: Arc<dyn PermissionStore>,
}

impl fmt::Debug for AppState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppState")
            .field("jwt_config", &self.jwt_config)
            .field("cors_config", &self.cors_config)
            .field("modules", &self.schema.list_modules().len())
            .field("store", &self.store.backend_name())
            .finish()
    }
}

pub fn init_app_state() -> anyhow::Result<AppState> {
    let schema = SchemaConfig::from_env().load()?;
    let store = init_store(&UpstreamConfig::from_env())?;

    Ok(AppState {
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        schema: Arc::new(schema),
        store,
    })
}
