pub mod calculations;
pub mod db;
pub mod explain;
pub mod extract;
pub mod mapping;
pub mod models;

#[cfg(test)]
pub(crate) mod testing;

pub use db::repository::{PayslipRepository, RepositoryError};
pub use models::*;
