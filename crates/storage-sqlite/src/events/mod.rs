//! SQLite storage implementation for events.

mod model;
mod repository;

pub use model::{BandDB, EventDB, MemberDB};
pub use repository::EventRepository;
