//! Mailbox vocabulary shared by the sweep engine and the API clients.

use serde::Deserialize;
use std::fmt;

/// API-assigned direct message identifier.
pub type MessageId = u64;

/// Path of the destroy endpoint, relative to the API base.
pub const DESTROY_PATH: &str = "direct_messages/destroy.json";

/// One of the two list views of the same mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Received,
    Sent,
}

impl Endpoint {
    /// Drain order used by the run controller.
    pub const ALL: [Endpoint; 2] = [Endpoint::Received, Endpoint::Sent];

    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::Received => "direct_messages.json",
            Endpoint::Sent => "direct_messages/sent.json",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Endpoint::Received => "received",
            Endpoint::Sent => "sent",
        }
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// High-water mark bounding how far back a page request looks.
///
/// Zero means "newest page" and is left out of the request entirely.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Cursor(pub MessageId);

impl Cursor {
    pub const NEWEST: Cursor = Cursor(0);

    pub fn max_id(&self) -> Option<MessageId> {
        (self.0 != 0).then_some(self.0)
    }
}

/// The only field of a listed message the sweeper cares about.
#[derive(Debug, Deserialize)]
pub(crate) struct ListedMessage {
    pub id_str: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_cursor_is_omitted() {
        assert_eq!(Cursor::NEWEST.max_id(), None);
        assert_eq!(Cursor(42).max_id(), Some(42));
    }

    #[test]
    fn test_endpoint_paths() {
        assert_eq!(Endpoint::Received.path(), "direct_messages.json");
        assert_eq!(Endpoint::Sent.path(), "direct_messages/sent.json");
        assert_eq!(Endpoint::ALL[0], Endpoint::Received);
    }
}
