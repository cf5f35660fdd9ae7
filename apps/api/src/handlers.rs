pub mod access;
pub mod catalog;
pub mod grants;
pub mod health;

mod transport;

#[cfg(test)]
mod tests;
