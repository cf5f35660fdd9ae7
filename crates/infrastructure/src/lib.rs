//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod in_memory_access_repository;
mod postgres_catalog_repository;
mod postgres_grant_repository;
mod postgres_user_directory;

pub use in_memory_access_repository::InMemoryAccessRepository;
pub use postgres_catalog_repository::PostgresCatalogRepository;
pub use postgres_grant_repository::PostgresGrantRepository;
pub use postgres_user_directory::PostgresUserDirectory;
