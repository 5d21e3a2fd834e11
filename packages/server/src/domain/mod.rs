//! Domain layer for the chat application.
//!
//! This module contains business logic that is independent of
//! data transfer objects (DTOs) and infrastructure concerns.

pub mod entity;
pub mod error;
pub mod factory;
pub mod repository;
pub mod value_object;

pub use entity::{ChatMessage, Presence, PresenceRegistry, UserProfile};
pub use error::{RegistryError, RepositoryError, ValueObjectError};
pub use factory::{ConnectionIdFactory, DISPLAY_NAMES, ProfileFactory};
pub use repository::PresenceRepository;
pub use value_object::{ConnectionId, SentAt, Timestamp};

#[cfg(test)]
pub use repository::MockPresenceRepository;
