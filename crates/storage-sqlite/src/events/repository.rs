use async_trait::async_trait;
use diesel::prelude::*;
use diesel::SqliteConnection;
use log::debug;
use std::collections::HashMap;
use std::sync::Arc;

use lineup_core::errors::{DatabaseError, Result};
use lineup_core::events::{Band, Event, EventRepositoryTrait, Member};

use super::model::{BandDB, EventDB, MemberDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::{band_members, bands, event_bands, events, members};

/// Repository for event line-ups stored in SQLite
pub struct EventRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl EventRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        EventRepository { pool, writer }
    }
}

/// Loads events with their bands and members, optionally restricted to one event.
///
/// Three queries regardless of size: events, event→band links, band→member
/// links. Bands come back ordered by id within each event, members by id
/// within each band.
fn load_events(conn: &mut SqliteConnection, only: Option<i64>) -> QueryResult<Vec<Event>> {
    let mut event_query = events::table
        .select(EventDB::as_select())
        .order(events::id.asc())
        .into_boxed();
    if let Some(event_id) = only {
        event_query = event_query.filter(events::id.eq(event_id));
    }
    let event_rows: Vec<EventDB> = event_query.load(conn)?;
    if event_rows.is_empty() {
        return Ok(Vec::new());
    }

    let mut band_query = event_bands::table
        .inner_join(bands::table)
        .select((event_bands::event_id, BandDB::as_select()))
        .order((event_bands::event_id.asc(), bands::id.asc()))
        .into_boxed();
    if let Some(event_id) = only {
        band_query = band_query.filter(event_bands::event_id.eq(event_id));
    }
    let band_rows: Vec<(i64, BandDB)> = band_query.load(conn)?;

    let mut member_query = band_members::table
        .inner_join(members::table)
        .select((band_members::band_id, MemberDB::as_select()))
        .order((band_members::band_id.asc(), members::id.asc()))
        .into_boxed();
    if only.is_some() {
        let band_ids: Vec<i64> = band_rows.iter().map(|(_, band)| band.id).collect();
        member_query = member_query.filter(band_members::band_id.eq_any(band_ids));
    }
    let member_rows: Vec<(i64, MemberDB)> = member_query.load(conn)?;

    let mut members_by_band: HashMap<i64, Vec<Member>> = HashMap::new();
    for (band_id, member) in member_rows {
        members_by_band
            .entry(band_id)
            .or_default()
            .push(Member::from(member));
    }

    // A band playing several events is copied into each of them
    let mut bands_by_event: HashMap<i64, Vec<Band>> = HashMap::new();
    for (event_id, band) in band_rows {
        let line_up = members_by_band.get(&band.id).cloned().unwrap_or_default();
        bands_by_event
            .entry(event_id)
            .or_default()
            .push(band.into_domain(line_up));
    }

    Ok(event_rows
        .into_iter()
        .map(|row| {
            let playing = bands_by_event.remove(&row.id).unwrap_or_default();
            row.into_domain(playing)
        })
        .collect())
}

/// Runs `load_events` in one read transaction so its three queries see the
/// same snapshot even while the writer commits.
fn load_snapshot(conn: &mut SqliteConnection, only: Option<i64>) -> Result<Vec<Event>> {
    conn.transaction(|c| load_events(c, only)).into_core()
}

fn event_not_found(event_id: i64) -> lineup_core::Error {
    DatabaseError::NotFound(format!("event {}", event_id)).into()
}

#[async_trait]
impl EventRepositoryTrait for EventRepository {
    fn find_all(&self) -> Result<Vec<Event>> {
        let mut conn = get_connection(&self.pool)?;
        load_snapshot(&mut conn, None)
    }

    fn find_by_id(&self, event_id: i64) -> Result<Option<Event>> {
        let mut conn = get_connection(&self.pool)?;
        Ok(load_snapshot(&mut conn, Some(event_id))?.into_iter().next())
    }

    async fn save(&self, event: Event) -> Result<Event> {
        let event_db = EventDB::from(&event);
        debug!("Saving event {}", event_db.id);

        self.writer
            .exec(move |conn| {
                let updated = diesel::update(events::table.find(event_db.id))
                    .set(&event_db)
                    .execute(conn)
                    .into_core()?;
                if updated == 0 {
                    return Err(event_not_found(event_db.id));
                }

                load_events(conn, Some(event_db.id))
                    .into_core()?
                    .pop()
                    .ok_or_else(|| event_not_found(event_db.id))
            })
            .await
    }

    async fn delete_by_id(&self, event_id: i64) -> Result<usize> {
        debug!("Deleting event {}", event_id);

        self.writer
            .exec(move |conn| {
                // Only the links go; bands stay for the other events they play
                diesel::delete(event_bands::table.filter(event_bands::event_id.eq(event_id)))
                    .execute(conn)
                    .into_core()?;
                diesel::delete(events::table.find(event_id))
                    .execute(conn)
                    .into_core()
            })
            .await
    }
}
