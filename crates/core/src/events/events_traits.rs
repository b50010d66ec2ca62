//! Event repository and service traits.
//!
//! These traits define the contract for event operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::events_model::{Event, EventUpdate};
use crate::errors::Result;

/// Trait defining the contract for Event repository operations.
///
/// Implementations load whole aggregates: every returned event carries its
/// bands, and every band carries its members.
#[async_trait]
pub trait EventRepositoryTrait: Send + Sync {
    /// Loads every event, ordered by id.
    fn find_all(&self) -> Result<Vec<Event>>;

    /// Loads one event, or `None` if no event has this id.
    fn find_by_id(&self, event_id: i64) -> Result<Option<Event>>;

    /// Persists the scalar fields (title, comment) of an existing event.
    ///
    /// Band links are not rewritten. Fails with a not-found error if the
    /// event row no longer exists.
    async fn save(&self, event: Event) -> Result<Event>;

    /// Deletes an event by its ID.
    ///
    /// Returns the number of deleted records.
    async fn delete_by_id(&self, event_id: i64) -> Result<usize>;
}

/// Trait defining the contract for Event service operations.
#[async_trait]
pub trait EventServiceTrait: Send + Sync {
    /// Lists every event, unfiltered, in persistence order.
    fn get_events(&self) -> Result<Vec<Event>>;

    /// Retrieves one event by ID.
    fn get_event(&self, event_id: i64) -> Result<Event>;

    /// Deletes an existing event.
    async fn delete_event(&self, event_id: i64) -> Result<()>;

    /// Replaces the comment of an existing event and returns the saved record.
    async fn update_event(&self, event_id: i64, update: EventUpdate) -> Result<Event>;

    /// Returns the events with at least one member whose name contains
    /// `query` (case-insensitive), decorated with band and member counts.
    fn get_filtered_events(&self, query: &str) -> Result<Vec<Event>>;
}
