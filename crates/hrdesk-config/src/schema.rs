//! Permission schema location.

use std::env;
use std::path::PathBuf;

use hrdesk_core::permissions::{PermissionSchema, SchemaError};
use tracing::info;

/// # Environment Variables
///
/// - `PERMISSION_SCHEMA_PATH`: JSON schema file; the builtin schema is used when unset
#[derive(Clone, Debug, Default)]
pub struct SchemaConfig {
    pub path: Option<PathBuf>,
}

impl SchemaConfig {
    pub fn from_env() -> Self {
        Self {
            path: env::var("PERMISSION_SCHEMA_PATH")
                .ok()
                .filter(|p| !p.is_empty())
                .map(PathBuf::from),
        }
    }

    pub fn load(&self) -> Result<PermissionSchema, SchemaError> {
        let schema = match &self.path {
            Some(path) => PermissionSchema::from_file(path)?,
            None => PermissionSchema::builtin()?,
        };

        info!(
            source = %self.path.as_ref().map_or("builtin".into(), |p| p.display().to_string()),
            modules = schema.list_modules().len(),
            "Permission schema ready"
        );

        Ok(schema)
    }
}
