//! インメモリ実装

mod presence;

pub use presence::InMemoryPresenceRepository;
