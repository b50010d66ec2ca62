//! Database models for events and their line-ups.

use diesel::prelude::*;

use lineup_core::events::{Band, Event, Member};

/// Database model for events
#[derive(Queryable, Identifiable, AsChangeset, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::events)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[diesel(treat_none_as_null = true)]
pub struct EventDB {
    pub id: i64,
    pub title: String,
    pub comment: Option<String>,
}

/// Database model for bands
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::bands)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct BandDB {
    pub id: i64,
    pub name: String,
}

/// Database model for members
#[derive(Queryable, Identifiable, Selectable, PartialEq, Debug, Clone)]
#[diesel(table_name = crate::schema::members)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct MemberDB {
    pub id: i64,
    pub name: String,
}

impl EventDB {
    /// Builds the domain event with the bands already loaded for it.
    pub fn into_domain(self, bands: Vec<Band>) -> Event {
        Event {
            id: self.id,
            title: self.title,
            comment: self.comment,
            bands,
        }
    }
}

impl From<&Event> for EventDB {
    fn from(domain: &Event) -> Self {
        Self {
            id: domain.id,
            title: domain.title.clone(),
            comment: domain.comment.clone(),
        }
    }
}

impl BandDB {
    pub fn into_domain(self, members: Vec<Member>) -> Band {
        Band {
            id: self.id,
            name: self.name,
            members,
        }
    }
}

impl From<MemberDB> for Member {
    fn from(db: MemberDB) -> Self {
        Self {
            id: db.id,
            name: db.name,
        }
    }
}
