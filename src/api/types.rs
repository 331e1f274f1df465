//! Wire types for the records service
//!
//! Field names follow the service's JSON exactly. The update payload
//! sends every scalar as a string, including the year.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Body of `POST /api/auth/callback/credentials`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub password: &'a str,
    /// Sent as the string `"false"`, not a JSON boolean
    pub redirect: &'a str,
}

impl<'a> LoginRequest<'a> {
    pub fn new(email: &'a str, password: &'a str) -> Self {
        Self {
            email,
            password,
            redirect: "false",
        }
    }
}

/// The parts of `GET /api/records/{id}` the smoke test reads
///
/// The service returns the full event with parish and participations;
/// everything not listed here is ignored.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct Record {
    pub id: Option<i64>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub year: Option<i64>,
}

impl Record {
    /// The year, treating null, absent and zero alike as unset
    pub fn known_year(&self) -> Option<i64> {
        self.year.filter(|&year| year != 0)
    }
}

/// Body of `PATCH /api/records/{id}`
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct UpdatePayload {
    pub event: EventFields,
    pub subjects: Subjects,
    pub participants: Vec<Person>,
}

/// Event columns of the update
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EventFields {
    #[serde(rename = "type")]
    pub kind: String,
    pub year: String,
    pub month: String,
    pub day: String,
    pub source_url: String,
    pub notes: String,
    pub parish_id: String,
}

/// Subjects of the event; the smoke test only ever sends a primary
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Subjects {
    pub primary: Person,
}

/// A person attached to the event, with biographical attributes
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub role: String,
    pub name: String,
    pub nickname: String,
    pub profession_id: String,
    pub profession_original: String,
    pub origin: String,
    pub residence: String,
    pub death_place: String,
    pub title_id: String,
    pub sex: String,
    pub legitimacy_status_id: String,
}

impl UpdatePayload {
    /// Baptism of individual 1 in parish 1 on day 3 of month 2 of `year`
    ///
    /// `notes` carries the local timestamp so every run writes a distinct
    /// value.
    pub fn baptism(year: i64, now: DateTime<Local>) -> Self {
        Self {
            event: EventFields {
                kind: "BAPTISM".to_string(),
                year: year.to_string(),
                month: "2".to_string(),
                day: "3".to_string(),
                source_url: String::new(),
                notes: format!("Test update at {}", now.format("%Y-%m-%dT%H:%M:%S%.6f")),
                parish_id: "1".to_string(),
            },
            subjects: Subjects {
                primary: Person {
                    id: "1".to_string(),
                    role: "SUBJECT".to_string(),
                    name: "João Batista".to_string(),
                    nickname: String::new(),
                    profession_id: String::new(),
                    profession_original: String::new(),
                    origin: String::new(),
                    residence: String::new(),
                    death_place: String::new(),
                    title_id: String::new(),
                    sex: "M".to_string(),
                    legitimacy_status_id: String::new(),
                },
            },
            participants: Vec::new(),
        }
    }
}
