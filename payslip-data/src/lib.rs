pub mod loader;
pub mod memory;

pub use loader::{BracketLoader, BracketLoaderError, BracketRecord};
pub use memory::MemoryRepository;
