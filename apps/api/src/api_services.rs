mod catalog_seed;
mod database;
mod state_builder;

pub use catalog_seed::{load_catalog_seed, seed_configured_clients};
pub use database::connect_and_migrate;
pub use state_builder::build_app_state;

#[cfg(test)]
pub(crate) use state_builder::compose_state;
