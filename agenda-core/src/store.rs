//! The event store.
//!
//! `EventStore` is the sole gateway between the application and the
//! persisted collection of events. Every operation is one independent
//! round-trip to the collection; there is no batching, caching, or
//! retrying, and driver failures propagate to the caller.

use futures::TryStreamExt;
use mongodb::bson::{Document, doc, oid::ObjectId};
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

use crate::config::AgendaConfig;
use crate::error::AgendaResult;
use crate::event::{self, EventRecord, StoredEvent};

const EVENTS_COLLECTION: &str = "events";

/// Handle to the events collection.
///
/// Cloning is cheap: the underlying driver handle is reference-counted,
/// so one store can be shared across request handlers.
#[derive(Clone)]
pub struct EventStore {
    events: Collection<Document>,
}

impl EventStore {
    /// Open the store on an already-connected database handle.
    pub fn new(db: &Database) -> Self {
        Self {
            events: db.collection::<Document>(EVENTS_COLLECTION),
        }
    }

    /// Build the client, verify the deployment answers a ping, and open
    /// the store. Meant to be called once at process startup; the
    /// resulting store is then shared by cloning.
    pub async fn connect(config: &AgendaConfig) -> AgendaResult<Self> {
        let client = Client::with_uri_str(&config.mongodb_uri).await?;
        let db = client.database(&config.database);

        db.run_command(doc! { "ping": 1 }).await?;
        info!("connected to MongoDB database '{}'", config.database);

        Ok(Self::new(&db))
    }

    /// Validate `date_text` and insert a new pending event.
    ///
    /// Returns `false` without touching the collection when the date
    /// text does not parse as strict `YYYY-MM-DD`. Identical events can
    /// be inserted any number of times; there is no duplicate detection.
    pub async fn add(&self, title: &str, date_text: &str, category: &str) -> AgendaResult<bool> {
        let date = match event::parse_date(date_text) {
            Ok(date) => date,
            Err(_) => {
                debug!("rejected event '{}': bad date '{}'", title, date_text);
                return Ok(false);
            }
        };

        let record = EventRecord::new(title, date, category);
        self.events.insert_one(record.to_document()).await?;

        Ok(true)
    }

    /// All events not yet carried out, in whatever order the collection
    /// returns them.
    pub async fn list_pending(&self) -> AgendaResult<Vec<StoredEvent>> {
        self.find_events(doc! { "completed": false }).await
    }

    /// All events already carried out.
    pub async fn list_completed(&self) -> AgendaResult<Vec<StoredEvent>> {
        self.find_events(doc! { "completed": true }).await
    }

    /// Every event, pending and completed alike. Feeds the calendar
    /// export.
    pub async fn list_all(&self) -> AgendaResult<Vec<StoredEvent>> {
        self.find_events(doc! {}).await
    }

    /// Flip the completion flag of one event.
    ///
    /// An unknown identifier is a successful no-op; the return value
    /// tells whether an event was actually flipped.
    pub async fn toggle(&self, id: &str) -> AgendaResult<bool> {
        let Some(oid) = parse_event_id(id) else {
            return Ok(false);
        };
        let Some(doc) = self.events.find_one(doc! { "_id": oid }).await? else {
            return Ok(false);
        };

        let completed = doc.get_bool("completed").unwrap_or(false);
        self.events
            .update_one(
                doc! { "_id": oid },
                doc! { "$set": { "completed": !completed } },
            )
            .await?;

        Ok(true)
    }

    /// Remove one event. An unknown identifier is a successful no-op;
    /// the return value tells whether an event was actually removed.
    pub async fn delete(&self, id: &str) -> AgendaResult<bool> {
        let Some(oid) = parse_event_id(id) else {
            return Ok(false);
        };
        let result = self.events.delete_one(doc! { "_id": oid }).await?;

        Ok(result.deleted_count > 0)
    }

    async fn find_events(&self, filter: Document) -> AgendaResult<Vec<StoredEvent>> {
        let mut cursor = self.events.find(filter).await?;

        let mut found = Vec::new();
        while let Some(doc) = cursor.try_next().await? {
            found.push(StoredEvent::from_document(&doc)?);
        }

        Ok(found)
    }
}

/// Text that does not decode as an ObjectId can never match an
/// identifier the store issued, so it is treated like any other unknown
/// identifier.
fn parse_event_id(id: &str) -> Option<ObjectId> {
    ObjectId::parse_str(id).ok()
}
