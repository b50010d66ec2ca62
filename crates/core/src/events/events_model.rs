//! Event domain models.

use serde::{Deserialize, Deserializer, Serialize};

/// An individual performer in a band.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: i64,
    pub name: String,
}

/// A named group playing at an event.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Band {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub members: Vec<Member>,
}

impl Band {
    /// Returns true if any member name contains `needle`.
    ///
    /// `needle` must already be lower-cased; member names are lower-cased
    /// here before the containment check.
    pub fn has_member_matching(&self, needle: &str) -> bool {
        self.members
            .iter()
            .any(|member| member.name.to_lowercase().contains(needle))
    }

    /// Consumes the band and returns it with the member count appended to its name.
    pub fn with_member_count(mut self) -> Self {
        self.name = with_count_label(&self.name, self.members.len());
        self
    }
}

/// Domain model representing an event and its line-up.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: i64,
    pub title: String,
    pub comment: Option<String>,
    #[serde(default)]
    pub bands: Vec<Band>,
}

impl Event {
    /// Returns true if at least one band has a member whose name contains `needle`.
    ///
    /// An event without bands never matches.
    pub fn has_member_matching(&self, needle: &str) -> bool {
        self.bands.iter().any(|band| band.has_member_matching(needle))
    }

    /// Consumes the event and returns it with count labels applied: the band
    /// count on the title and each band's member count on its name.
    pub fn with_count_labels(mut self) -> Self {
        self.title = with_count_label(&self.title, self.bands.len());
        self.bands = self
            .bands
            .into_iter()
            .map(Band::with_member_count)
            .collect();
        self
    }
}

/// Input model for updating an existing event.
///
/// Only `comment` is applied. The other fields are accepted so that a full
/// event payload can be sent back, but they never overwrite stored data.
///
/// `comment` is `None` when the key is absent and `Some(None)` when it is an
/// explicit `null`, which clears the stored comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct EventUpdate {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub comment: Option<Option<String>>,
    #[serde(default)]
    pub bands: Option<Vec<Band>>,
}

impl EventUpdate {
    pub fn with_comment(comment: impl Into<String>) -> Self {
        Self {
            comment: Some(Some(comment.into())),
            ..Default::default()
        }
    }

    /// An update that clears the stored comment.
    pub fn clearing_comment() -> Self {
        Self {
            comment: Some(None),
            ..Default::default()
        }
    }
}

/// Marks a key that is present in the payload, even when its value is `null`.
pub fn deserialize_present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// Appends a `" [count]"` label to `name`.
pub fn with_count_label(name: &str, count: usize) -> String {
    format!("{} [{}]", name, count)
}
