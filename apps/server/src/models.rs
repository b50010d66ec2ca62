use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use lineup_core::events as core_events;

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
}

impl From<core_events::Member> for Member {
    fn from(m: core_events::Member) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

impl From<Member> for core_events::Member {
    fn from(m: Member) -> Self {
        Self {
            id: m.id,
            name: m.name,
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl From<core_events::Band> for Band {
    fn from(b: core_events::Band) -> Self {
        Self {
            id: b.id,
            name: b.name,
            members: b.members.into_iter().map(Member::from).collect(),
        }
    }
}

impl From<Band> for core_events::Band {
    fn from(b: Band) -> Self {
        Self {
            id: b.id,
            name: b.name,
            members: b.members.into_iter().map(Into::into).collect(),
        }
    }
}

#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub comment: Option<String>,
    pub bands: Vec<Band>,
}

impl From<core_events::Event> for Event {
    fn from(e: core_events::Event) -> Self {
        Self {
            id: e.id,
            title: e.title,
            comment: e.comment,
            bands: e.bands.into_iter().map(Band::from).collect(),
        }
    }
}

/// Body of `PUT /events/{id}`. Only `comment` is applied; a full event
/// payload is accepted as well. `comment` is required, `null` clears it.
#[derive(Serialize, Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "core_events::deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    #[schema(value_type = Option<String>)]
    pub comment: Option<Option<String>>,
    #[serde(default)]
    pub bands: Option<Vec<Band>>,
}

impl From<EventUpdate> for core_events::EventUpdate {
    fn from(u: EventUpdate) -> Self {
        Self {
            title: u.title,
            comment: u.comment,
            bands: u
                .bands
                .map(|bands| bands.into_iter().map(Into::into).collect()),
        }
    }
}
