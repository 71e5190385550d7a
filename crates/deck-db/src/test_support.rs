//! Shared test utilities for deck-db tests.

pub(crate) mod helpers {
    use crate::DeckDb;

    /// Create an in-memory store for testing.
    pub async fn test_db() -> DeckDb {
        DeckDb::open_local(":memory:").await.unwrap()
    }
}
