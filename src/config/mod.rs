/// Application settings loaded from `storefront.toml` and the environment
pub mod app;

pub use app::{
    AppConfig, ConsoleConfig, ServerConfig, StoreConfig, load_app_configuration, load_config,
};
