use std::path::{Path, PathBuf};

use ::config as config_rs;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;

/// Layered configuration: an optional file named by [`EnvConfig::FILE_VAR`],
/// then `APP_`-prefixed environment variables with `__` separating nested
/// keys (`APP_DATABASE__URL`). Later layers win.
pub trait EnvConfig: Sized + DeserializeOwned {
    const PREFIX: &'static str = "APP";
    const SEPARATOR: &'static str = "__";
    const FILE_VAR: &'static str = "RENTAL_DATA_CONFIG";

    fn load_dotenv() {
        let manifest_env = Path::new(env!("CARGO_MANIFEST_DIR")).join(".env");
        if dotenvy::from_filename(manifest_env).is_err() {
            dotenvy::dotenv().ok();
        }
    }

    fn validate(&self) -> Result<()> {
        Ok(())
    }

    fn environment() -> config_rs::Environment {
        config_rs::Environment::with_prefix(Self::PREFIX)
            .prefix_separator("_")
            .separator(Self::SEPARATOR)
            .try_parsing(true)
    }

    fn from_sources(file: Option<&Path>, environment: config_rs::Environment) -> Result<Self> {
        let mut builder = config_rs::Config::builder();
        if let Some(path) = file {
            builder = builder.add_source(config_rs::File::from(path));
        }

        let cfg = builder
            .add_source(environment)
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .with_context(|| match file {
                Some(path) => format!("failed to load config from {} and env", path.display()),
                None => "failed to load config from env".to_string(),
            })?;

        cfg.validate()?;
        Ok(cfg)
    }

    fn from_env() -> Result<Self> {
        Self::load_dotenv();
        let file = std::env::var_os(Self::FILE_VAR).map(PathBuf::from);
        Self::from_sources(file.as_deref(), Self::environment())
    }
}
