use std::env;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::str::FromStr;

use kontora_core::{AppError, ClientId};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub migrate_only: bool,
    pub database_url: String,
    pub database_max_connections: u32,
    pub frontend_url: String,
    pub api_host: String,
    pub api_port: u16,
    pub catalog_seed_path: Option<PathBuf>,
    pub seed_client_ids: Vec<ClientId>,
}

impl ApiConfig {
    pub fn load() -> Result<Self, AppError> {
        let migrate_only = env::args().nth(1).as_deref() == Some("migrate");

        let database_url = required_env("DATABASE_URL")?;
        let database_max_connections = match optional_env("DATABASE_MAX_CONNECTIONS") {
            Some(value) => value.parse::<u32>().map_err(|error| {
                AppError::Validation(format!("invalid DATABASE_MAX_CONNECTIONS: {error}"))
            })?,
            None => 10,
        };
        let frontend_url =
            env::var("FRONTEND_URL").unwrap_or_else(|_| "http://localhost:3000".to_owned());

        let api_host = env::var("API_HOST").unwrap_or_else(|_| "127.0.0.1".to_owned());
        let api_port = env::var("API_PORT")
            .ok()
            .and_then(|value| value.parse::<u16>().ok())
            .unwrap_or(3001);

        let catalog_seed_path = optional_env("CATALOG_SEED_PATH").map(PathBuf::from);
        let seed_client_ids = optional_env("SEED_CLIENT_IDS")
            .map(|value| parse_client_ids(value.as_str()))
            .transpose()?
            .unwrap_or_default();

        Ok(Self {
            migrate_only,
            database_url,
            database_max_connections,
            frontend_url,
            api_host,
            api_port,
            catalog_seed_path,
            seed_client_ids,
        })
    }

    pub fn socket_address(&self) -> Result<SocketAddr, AppError> {
        let host = IpAddr::from_str(&self.api_host).map_err(|error| {
            AppError::Internal(format!("invalid API_HOST '{}': {error}", self.api_host))
        })?;
        Ok(SocketAddr::from((host, self.api_port)))
    }
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .compact()
        .init();
}

fn parse_client_ids(value: &str) -> Result<Vec<ClientId>, AppError> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            ClientId::new(entry)
                .map_err(|error| AppError::Validation(format!("invalid SEED_CLIENT_IDS: {error}")))
        })
        .collect()
}

fn required_env(name: &str) -> Result<String, AppError> {
    env::var(name).map_err(|_| AppError::Validation(format!("{name} is required")))
}

fn optional_env(name: &str) -> Option<String> {
    env::var(name).ok().filter(|value| !value.trim().is_empty())
}
