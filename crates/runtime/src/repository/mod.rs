//! Persistence of the data a pot keeps on its host item.
//!
//! Only the replicated state is stored: the content store as its canonical
//! JSON list and the use budget. Derived caches are rebuilt on load.
mod error;
mod file;
mod memory;
mod traits;

pub use error::RepositoryError;
pub use file::FilePotRepository;
pub use memory::InMemoryPotRepository;
pub use traits::{LoadedPot, PotRepository, RecordKey};
