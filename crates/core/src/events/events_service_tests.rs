#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use crate::events::{
        Band, Event, EventError, EventRepositoryTrait, EventService, EventServiceTrait,
        EventUpdate, Member,
    };
    use async_trait::async_trait;
    use std::sync::{Arc, Mutex};

    // --- Mock EventRepository ---

    #[derive(Default)]
    struct Calls {
        find_all: usize,
        find_by_id: Vec<i64>,
        save: Vec<Event>,
        delete_by_id: Vec<i64>,
    }

    #[derive(Default)]
    struct MockEventRepository {
        events: Mutex<Vec<Event>>,
        calls: Mutex<Calls>,
        /// Simulates a concurrent delete landing between lookup and mutation.
        vanish_before_write: bool,
        /// Simulates a storage outage on reads.
        fail_reads: bool,
    }

    impl MockEventRepository {
        fn with_events(events: Vec<Event>) -> Self {
            Self {
                events: Mutex::new(events),
                ..Default::default()
            }
        }

        fn stored(&self, event_id: i64) -> Option<Event> {
            self.events
                .lock()
                .unwrap()
                .iter()
                .find(|e| e.id == event_id)
                .cloned()
        }

        fn remove(&self, event_id: i64) -> usize {
            let mut events = self.events.lock().unwrap();
            let before = events.len();
            events.retain(|e| e.id != event_id);
            before - events.len()
        }
    }

    #[async_trait]
    impl EventRepositoryTrait for MockEventRepository {
        fn find_all(&self) -> Result<Vec<Event>> {
            self.calls.lock().unwrap().find_all += 1;
            if self.fail_reads {
                return Err(DatabaseError::ConnectionFailed("database is locked".into()).into());
            }
            Ok(self.events.lock().unwrap().clone())
        }

        fn find_by_id(&self, event_id: i64) -> Result<Option<Event>> {
            self.calls.lock().unwrap().find_by_id.push(event_id);
            if self.fail_reads {
                return Err(DatabaseError::ConnectionFailed("database is locked".into()).into());
            }
            Ok(self.stored(event_id))
        }

        async fn save(&self, event: Event) -> Result<Event> {
            self.calls.lock().unwrap().save.push(event.clone());
            if self.vanish_before_write {
                self.remove(event.id);
            }
            let mut events = self.events.lock().unwrap();
            match events.iter_mut().find(|e| e.id == event.id) {
                Some(stored) => {
                    stored.title = event.title.clone();
                    stored.comment = event.comment.clone();
                    Ok(stored.clone())
                }
                None => Err(DatabaseError::NotFound("Record not found".into()).into()),
            }
        }

        async fn delete_by_id(&self, event_id: i64) -> Result<usize> {
            self.calls.lock().unwrap().delete_by_id.push(event_id);
            if self.vanish_before_write {
                self.remove(event_id);
                return Ok(0);
            }
            Ok(self.remove(event_id))
        }
    }

    // --- Fixtures ---

    fn member(id: i64, name: &str) -> Member {
        Member {
            id,
            name: name.to_string(),
        }
    }

    fn band(id: i64, name: &str, members: Vec<Member>) -> Band {
        Band {
            id,
            name: name.to_string(),
            members,
        }
    }

    fn event(id: i64, title: &str, bands: Vec<Band>) -> Event {
        Event {
            id,
            title: title.to_string(),
            comment: None,
            bands,
        }
    }

    /// "Rock Fest" with Metallica and Nirvana, "Jazz Night" with Nirvana only.
    fn festival_events() -> Vec<Event> {
        let metallica = band(1, "Metallica", vec![member(1, "John Doe")]);
        let nirvana = band(2, "Nirvana", vec![member(2, "Jane Smith")]);
        vec![
            event(1, "Rock Fest", vec![metallica, nirvana.clone()]),
            event(2, "Jazz Night", vec![nirvana]),
        ]
    }

    fn service_with(repo: &Arc<MockEventRepository>) -> EventService {
        EventService::new(repo.clone())
    }

    // --- get_events ---

    #[test]
    fn test_get_events_returns_everything_unfiltered() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        let events = service.get_events().unwrap();

        assert_eq!(events, festival_events());
        assert_eq!(repo.calls.lock().unwrap().find_all, 1);
    }

    #[test]
    fn test_get_events_propagates_persistence_faults() {
        let repo = Arc::new(MockEventRepository {
            fail_reads: true,
            ..Default::default()
        });
        let service = service_with(&repo);

        let err = service.get_events().unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ConnectionFailed(_))
        ));
    }

    #[test]
    fn test_get_event_not_found() {
        let repo = Arc::new(MockEventRepository::default());
        let service = service_with(&repo);

        let err = service.get_event(7).unwrap_err();
        assert!(matches!(err, Error::Event(EventError::NotFound(7))));
    }

    // --- delete_event ---

    #[tokio::test]
    async fn test_delete_event_when_event_exists() {
        let repo = Arc::new(MockEventRepository::with_events(vec![event(
            1000,
            "Rock Fest",
            vec![],
        )]));
        let service = service_with(&repo);

        service.delete_event(1000).await.unwrap();

        let calls = repo.calls.lock().unwrap();
        assert_eq!(calls.find_by_id, vec![1000]);
        assert_eq!(calls.delete_by_id, vec![1000]);
        drop(calls);
        assert!(repo.stored(1000).is_none());
    }

    #[tokio::test]
    async fn test_delete_event_fails_when_event_does_not_exist() {
        let repo = Arc::new(MockEventRepository::default());
        let service = service_with(&repo);

        let err = service.delete_event(1).await.unwrap_err();

        assert!(matches!(err, Error::Event(EventError::NotFound(1))));
        assert_eq!(err.to_string(), "Event not found with id: 1");
        let calls = repo.calls.lock().unwrap();
        assert_eq!(calls.find_by_id, vec![1]);
        assert!(calls.delete_by_id.is_empty());
    }

    #[tokio::test]
    async fn test_delete_event_twice_fails_the_second_time() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        service.delete_event(2).await.unwrap();
        let err = service.delete_event(2).await.unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(repo.calls.lock().unwrap().delete_by_id, vec![2]);
    }

    #[tokio::test]
    async fn test_delete_event_reports_concurrent_removal_as_not_found() {
        let repo = Arc::new(MockEventRepository {
            events: Mutex::new(festival_events()),
            vanish_before_write: true,
            ..Default::default()
        });
        let service = service_with(&repo);

        let err = service.delete_event(1).await.unwrap_err();
        assert!(matches!(err, Error::Event(EventError::NotFound(1))));
    }

    // --- update_event ---

    #[tokio::test]
    async fn test_update_event_replaces_only_the_comment() {
        let mut existing = festival_events().remove(0);
        existing.comment = Some("Ajouter un commentaire".to_string());
        let repo = Arc::new(MockEventRepository::with_events(vec![existing.clone()]));
        let service = service_with(&repo);

        let update = EventUpdate {
            title: Some("Renamed".to_string()),
            comment: Some(Some("Je suis un commentaire".to_string())),
            bands: Some(vec![]),
        };
        let saved = service.update_event(1, update).await.unwrap();

        assert_eq!(saved.comment.as_deref(), Some("Je suis un commentaire"));
        assert_eq!(saved.title, "Rock Fest");

        let stored = repo.stored(1).unwrap();
        assert_eq!(stored.comment.as_deref(), Some("Je suis un commentaire"));
        assert_eq!(stored.title, existing.title);
        assert_eq!(stored.bands, existing.bands);

        let calls = repo.calls.lock().unwrap();
        assert_eq!(calls.find_by_id, vec![1]);
        assert_eq!(calls.save.len(), 1);
        assert_eq!(calls.save[0].bands, existing.bands);
    }

    #[tokio::test]
    async fn test_update_event_fails_when_event_does_not_exist() {
        let repo = Arc::new(MockEventRepository::default());
        let service = service_with(&repo);

        let err = service
            .update_event(1000, EventUpdate::with_comment("Je suis un commentaire"))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Event not found with id: 1000");
        let calls = repo.calls.lock().unwrap();
        assert_eq!(calls.find_by_id, vec![1000]);
        assert!(calls.save.is_empty());
    }

    #[tokio::test]
    async fn test_update_event_reports_concurrent_removal_as_not_found() {
        let repo = Arc::new(MockEventRepository {
            events: Mutex::new(festival_events()),
            vanish_before_write: true,
            ..Default::default()
        });
        let service = service_with(&repo);

        let err = service
            .update_event(2, EventUpdate::with_comment("late"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Event(EventError::NotFound(2))));
    }

    #[tokio::test]
    async fn test_update_event_with_null_comment_clears_it() {
        let mut existing = festival_events().remove(0);
        existing.comment = Some("Sold out".to_string());
        let repo = Arc::new(MockEventRepository::with_events(vec![existing]));
        let service = service_with(&repo);

        let saved = service
            .update_event(1, EventUpdate::clearing_comment())
            .await
            .unwrap();

        assert!(saved.comment.is_none());
        assert!(repo.stored(1).unwrap().comment.is_none());
    }

    #[tokio::test]
    async fn test_update_event_without_comment_is_rejected() {
        let mut existing = festival_events().remove(0);
        existing.comment = Some("Sold out".to_string());
        let repo = Arc::new(MockEventRepository::with_events(vec![existing]));
        let service = service_with(&repo);

        let update = EventUpdate {
            title: Some("Renamed".to_string()),
            ..Default::default()
        };
        let err = service.update_event(1, update).await.unwrap_err();

        assert!(matches!(
            err,
            Error::Validation(ValidationError::MissingField(ref field)) if field == "comment"
        ));
        assert_eq!(repo.stored(1).unwrap().comment.as_deref(), Some("Sold out"));
        assert!(repo.calls.lock().unwrap().save.is_empty());
    }

    // --- get_filtered_events ---

    #[test]
    fn test_get_filtered_events_when_query_matches() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        let result = service.get_filtered_events("John").unwrap();

        assert_eq!(result.len(), 1);
        let filtered = &result[0];
        assert_eq!(filtered.title, "Rock Fest [2]");
        assert_eq!(filtered.bands.len(), 2);
        assert!(filtered.bands.iter().any(|b| b.name == "Metallica [1]"));
        assert!(filtered.bands.iter().any(|b| b.name == "Nirvana [1]"));
        assert_eq!(repo.calls.lock().unwrap().find_all, 1);
    }

    #[test]
    fn test_get_filtered_events_empty_when_query_does_not_match() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        let result = service.get_filtered_events("Nonexistent").unwrap();

        assert!(result.is_empty());
        assert_eq!(repo.calls.lock().unwrap().find_all, 1);
    }

    #[test]
    fn test_get_filtered_events_handles_no_events() {
        let repo = Arc::new(MockEventRepository::default());
        let service = service_with(&repo);

        assert!(service.get_filtered_events("Query").unwrap().is_empty());
    }

    #[test]
    fn test_get_filtered_events_is_case_insensitive() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        let upper = service.get_filtered_events("JOHN").unwrap();
        let lower = service.get_filtered_events("john").unwrap();

        assert_eq!(upper, lower);
        assert_eq!(upper.len(), 1);
    }

    #[test]
    fn test_get_filtered_events_empty_query_matches_every_event_with_members() {
        let mut events = festival_events();
        events.push(event(3, "Empty Stage", vec![]));
        let repo = Arc::new(MockEventRepository::with_events(events));
        let service = service_with(&repo);

        let result = service.get_filtered_events("").unwrap();

        let titles: Vec<&str> = result.iter().map(|e| e.title.as_str()).collect();
        assert_eq!(titles, vec!["Rock Fest [2]", "Jazz Night [1]"]);
    }

    #[test]
    fn test_get_filtered_events_whitespace_query_is_not_trimmed() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        // Both member names contain a space
        assert_eq!(service.get_filtered_events(" ").unwrap().len(), 2);
        assert!(service.get_filtered_events("\t").unwrap().is_empty());
    }

    #[test]
    fn test_get_filtered_events_excludes_events_without_bands() {
        let repo = Arc::new(MockEventRepository::with_events(vec![event(
            1,
            "Open Mic",
            vec![],
        )]));
        let service = service_with(&repo);

        assert!(service.get_filtered_events("a").unwrap().is_empty());
    }

    #[test]
    fn test_get_filtered_events_does_not_compound_labels() {
        let repo = Arc::new(MockEventRepository::with_events(festival_events()));
        let service = service_with(&repo);

        let first = service.get_filtered_events("jane").unwrap();
        let second = service.get_filtered_events("jane").unwrap();

        assert_eq!(first, second);
        assert_eq!(second[0].title, "Rock Fest [2]");
        assert_eq!(second[1].title, "Jazz Night [1]");
        // The stored records are never decorated
        assert_eq!(repo.stored(1).unwrap().title, "Rock Fest");
        assert_eq!(repo.stored(2).unwrap().bands[0].name, "Nirvana");
    }
}
