//! Event record types.
//!
//! An `EventRecord` is the in-memory form of one agenda event. The store
//! persists it as a BSON document and hands identifiers back as opaque
//! hex text; `StoredEvent` pairs the two for callers that need to toggle
//! or delete a specific event later.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use mongodb::bson::{self, Document, doc};
use serde::{Deserialize, Serialize};

use crate::error::{AgendaError, AgendaResult};

/// Strict date format accepted on event creation.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse user-supplied date text.
///
/// This is the only validation in the system: anything that is not a
/// real calendar date in `YYYY-MM-DD` form is rejected, and rejected
/// input never reaches the collection.
pub fn parse_date(text: &str) -> AgendaResult<NaiveDate> {
    NaiveDate::parse_from_str(text, DATE_FORMAT)
        .map_err(|_| AgendaError::InvalidDate(text.to_string()))
}

/// A single agenda event.
///
/// Events are flat, independent records: a title, the day they happen,
/// a free-text category, and whether they have been carried out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventRecord {
    pub title: String,

    /// The event day. Time of day carries no meaning; the persisted
    /// representation pins it to midnight UTC.
    pub date: NaiveDate,

    pub category: String,

    pub completed: bool,
}

impl EventRecord {
    /// Create a new pending event. Validation of user input happens in
    /// the store, not here.
    pub fn new(title: impl Into<String>, date: NaiveDate, category: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            date,
            category: category.into(),
            completed: false,
        }
    }

    /// The full persisted shape: `title`, `date`, `category`,
    /// `completed`. No identifier is included; the collection assigns
    /// `_id` on insert.
    pub fn to_document(&self) -> Document {
        doc! {
            "title": &self.title,
            "date": bson::DateTime::from_chrono(self.midnight()),
            "category": &self.category,
            "completed": self.completed,
        }
    }

    /// Rebuild a record from a persisted document.
    ///
    /// Documents written before the completion flag existed decode as
    /// pending; any stored time of day is truncated back to the date.
    pub fn from_document(doc: &Document) -> AgendaResult<Self> {
        let title = doc
            .get_str("title")
            .map_err(|_| AgendaError::Document("missing title".to_string()))?
            .to_string();
        let date = doc
            .get_datetime("date")
            .map_err(|_| AgendaError::Document("missing date".to_string()))?
            .to_chrono()
            .date_naive();
        let category = doc
            .get_str("category")
            .map_err(|_| AgendaError::Document("missing category".to_string()))?
            .to_string();
        let completed = doc.get_bool("completed").unwrap_or(false);

        Ok(Self {
            title,
            date,
            category,
            completed,
        })
    }

    /// Render this record as one entry of the calendar-widget feed.
    pub fn calendar_entry(&self) -> CalendarEntry {
        let status = if self.completed { "completed" } else { "pending" };

        CalendarEntry {
            title: self.title.clone(),
            start: self.date.format(DATE_FORMAT).to_string(),
            description: format!("Category: {}, Status: {}", self.category, status),
        }
    }

    /// The persisted instant for this event: midnight UTC on the event
    /// day.
    fn midnight(&self) -> DateTime<Utc> {
        self.date.and_time(NaiveTime::MIN).and_utc()
    }
}

/// An event as returned by the store: the record plus the identifier
/// the collection assigned to it at insert.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredEvent {
    /// Opaque identifier, hex-encoded for transport across the web
    /// boundary.
    pub id: String,

    #[serde(flatten)]
    pub record: EventRecord,
}

impl StoredEvent {
    /// Decode a document fetched from the collection, identifier
    /// included.
    pub fn from_document(doc: &Document) -> AgendaResult<Self> {
        let id = doc
            .get_object_id("_id")
            .map_err(|_| AgendaError::Document("missing _id".to_string()))?
            .to_hex();

        Ok(Self {
            id,
            record: EventRecord::from_document(doc)?,
        })
    }
}

/// One entry of the calendar-widget feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarEntry {
    pub title: String,
    /// Event day as `YYYY-MM-DD` text.
    pub start: String,
    /// Category plus a human-readable pending/completed label.
    pub description: String,
}
