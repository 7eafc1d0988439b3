pub mod repository;

pub use repository::{PayslipRepository, RepositoryError, StoredPayslip};
