//! Events module - domain models, services, and traits.

mod events_errors;
mod events_model;
mod events_service;
mod events_traits;

mod events_service_tests;

// Re-export the public interface
pub use events_errors::EventError;
pub use events_model::{deserialize_present, with_count_label, Band, Event, EventUpdate, Member};
pub use events_service::EventService;
pub use events_traits::{EventRepositoryTrait, EventServiceTrait};
