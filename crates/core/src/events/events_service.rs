use log::debug;
use std::sync::Arc;

use super::events_errors::EventError;
use super::events_model::{Event, EventUpdate};
use super::events_traits::{EventRepositoryTrait, EventServiceTrait};
use crate::errors::{Error, Result, ValidationError};

/// Service for browsing and curating events.
pub struct EventService {
    repository: Arc<dyn EventRepositoryTrait>,
}

impl EventService {
    /// Creates a new EventService instance
    pub fn new(repository: Arc<dyn EventRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn find_existing(&self, event_id: i64) -> Result<Event> {
        self.repository
            .find_by_id(event_id)?
            .ok_or_else(|| EventError::NotFound(event_id).into())
    }
}

/// Keeps the events with a member matching `query` and labels them with counts.
///
/// Matching is a case-insensitive substring check, so an empty query matches
/// every member. Input order is preserved.
pub(crate) fn filter_and_label(events: Vec<Event>, query: &str) -> Vec<Event> {
    let needle = query.to_lowercase();
    events
        .into_iter()
        .filter(|event| event.has_member_matching(&needle))
        .map(Event::with_count_labels)
        .collect()
}

#[async_trait::async_trait]
impl EventServiceTrait for EventService {
    fn get_events(&self) -> Result<Vec<Event>> {
        self.repository.find_all()
    }

    fn get_event(&self, event_id: i64) -> Result<Event> {
        self.find_existing(event_id)
    }

    async fn delete_event(&self, event_id: i64) -> Result<()> {
        self.find_existing(event_id)?;

        debug!("Deleting event {}", event_id);
        let deleted = self.repository.delete_by_id(event_id).await?;
        if deleted == 0 {
            // Removed by someone else between the lookup and the delete
            return Err(EventError::NotFound(event_id).into());
        }
        Ok(())
    }

    async fn update_event(&self, event_id: i64, update: EventUpdate) -> Result<Event> {
        let comment = update
            .comment
            .ok_or_else(|| ValidationError::MissingField("comment".to_string()))?;
        let mut event = self.find_existing(event_id)?;
        event.comment = comment;

        debug!("Updating comment of event {}", event_id);
        self.repository.save(event).await.map_err(|e| {
            if e.is_not_found() {
                Error::Event(EventError::NotFound(event_id))
            } else {
                e
            }
        })
    }

    fn get_filtered_events(&self, query: &str) -> Result<Vec<Event>> {
        let events = self.repository.find_all()?;
        let total = events.len();
        let filtered = filter_and_label(events, query);
        debug!(
            "Filtered events by member query '{}': {} of {} matched",
            query,
            filtered.len(),
            total
        );
        Ok(filtered)
    }
}
