// Storage backends for accounts and sessions

pub mod memory;

pub use memory::{InMemoryAccountStore, InMemorySessionStore};
