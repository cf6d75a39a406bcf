pub mod entry_store;
pub mod memo;
pub mod moka_cache;

pub use entry_store::{EntryStore, StoredEntry};
pub use memo::Memoized;
pub use moka_cache::MokaEntryStore;
