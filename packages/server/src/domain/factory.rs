//! Domain factories for creating domain entities and value objects.

use rand::Rng;

use super::{ConnectionId, UserProfile, error::ValueObjectError};

/// Display names a new connection may be given
pub const DISPLAY_NAMES: [&str; 8] = [
    "Alex", "Sam", "Charlie", "Jordan", "Taylor", "Morgan", "Casey", "Jamie",
];

/// Avatar image service URL template; `{id}` is replaced by the connection id
const AVATAR_URL_TEMPLATE: &str = "https://robohash.org/{id}?set=set4";

/// Factory for generating ConnectionId instances.
pub struct ConnectionIdFactory;

impl ConnectionIdFactory {
    /// Generate a new ConnectionId from a random UUID v4 (simple form, no hyphens).
    ///
    /// # Errors
    ///
    /// This method should not fail in practice, but returns Result for consistency
    /// with the domain error handling pattern.
    pub fn generate() -> Result<ConnectionId, ValueObjectError> {
        ConnectionId::new(uuid::Uuid::new_v4().simple().to_string())
    }
}

/// Factory for the profile a connection is given on connect.
///
/// Name choice and avatar derivation are pure functions; randomness comes
/// only from the `Rng` passed in.
pub struct ProfileFactory;

impl ProfileFactory {
    /// Build a profile for `id` with a uniformly chosen display name
    pub fn generate<R: Rng + ?Sized>(id: ConnectionId, rng: &mut R) -> UserProfile {
        let name = pick_name(rng).to_string();
        let avatar = avatar_url(&id);
        UserProfile::new(id, name, avatar)
    }
}

/// Pick one of [`DISPLAY_NAMES`] uniformly at random
pub fn pick_name<R: Rng + ?Sized>(rng: &mut R) -> &'static str {
    DISPLAY_NAMES[rng.random_range(0..DISPLAY_NAMES.len())]
}

/// Avatar URL for a connection id
pub fn avatar_url(id: &ConnectionId) -> String {
    AVATAR_URL_TEMPLATE.replace("{id}", id.as_str())
}
