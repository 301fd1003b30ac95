use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use geoarc_core::EventId;
use geoarc_links::{EventKind, Filter, LinkHandle};
use geoarc_math::GeoPoint;
use serde::{Deserialize, Serialize};

/// An incoming event, before it has been placed on the globe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewEvent {
    pub kind: EventKind,
    /// Marker colour. Falls back to the kind's colour.
    #[serde(default)]
    pub color: Option<u32>,
    #[serde(default)]
    pub message: String,
    pub source: GeoPoint,
    pub target: GeoPoint,
}

impl NewEvent {
    pub fn new(kind: EventKind, source: GeoPoint, target: GeoPoint) -> Self {
        Self {
            kind,
            color: None,
            message: String::new(),
            source,
            target,
        }
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_color(mut self, color: u32) -> Self {
        self.color = Some(color);
        self
    }

    pub fn resolved_color(&self) -> u32 {
        self.color.unwrap_or_else(|| self.kind.default_color())
    }
}

/// A live event and the globe entities it owns.
#[derive(Debug, Clone, Serialize)]
pub struct EventRecord {
    pub id: EventId,
    pub kind: EventKind,
    pub color: u32,
    pub message: String,
    pub source: GeoPoint,
    pub target: GeoPoint,
    pub created_at: DateTime<Utc>,
    pub link: LinkHandle,
}

/// Returned from insertion so the caller can later evict the event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EventHandle {
    pub id: EventId,
    pub link: LinkHandle,
}

/// Bounded list of live events, most recent first.
#[derive(Debug, Clone)]
pub struct EventQueue {
    records: VecDeque<EventRecord>,
    capacity: usize,
}

impl EventQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            records: VecDeque::with_capacity(capacity + 1),
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Insert at the head. Returns the oldest record when the queue overflows.
    pub fn push_front(&mut self, record: EventRecord) -> Option<EventRecord> {
        self.records.push_front(record);
        if self.records.len() > self.capacity {
            self.records.pop_back()
        } else {
            None
        }
    }

    pub fn get(&self, id: EventId) -> Option<&EventRecord> {
        self.records.iter().find(|r| r.id == id)
    }

    pub fn remove(&mut self, id: EventId) -> Option<EventRecord> {
        let index = self.records.iter().position(|r| r.id == id)?;
        self.records.remove(index)
    }

    /// Most recent first.
    pub fn iter(&self) -> impl Iterator<Item = &EventRecord> {
        self.records.iter()
    }

    /// Records shown in the event list under `filter`.
    pub fn visible(&self, filter: Filter) -> impl Iterator<Item = &EventRecord> {
        self.records.iter().filter(move |r| filter.matches(r.kind))
    }

    pub fn newest(&self) -> Option<&EventRecord> {
        self.records.front()
    }

    pub fn oldest(&self) -> Option<&EventRecord> {
        self.records.back()
    }
}
