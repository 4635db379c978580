//! Mini-app id generation

use uuid::Uuid;

/// Produces ids for new mini-apps.
///
/// Implementations must never return the same id twice; the store does not
/// check for collisions.
pub trait IdGenerator: Send {
    /// The next unused id
    fn next_id(&mut self) -> String;
}

/// Random v4 UUIDs
#[derive(Debug, Clone, Copy, Default)]
pub struct UuidIds;

impl IdGenerator for UuidIds {
    fn next_id(&mut self) -> String {
        Uuid::new_v4().to_string()
    }
}

impl<F> IdGenerator for F
where
    F: FnMut() -> String + Send,
{
    fn next_id(&mut self) -> String {
        self()
    }
}
