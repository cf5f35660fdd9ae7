mod catalog;
mod grants;
mod users;

pub use catalog::PermissionCatalogRepository;
pub use grants::GrantRepository;
pub use users::UserDirectory;
