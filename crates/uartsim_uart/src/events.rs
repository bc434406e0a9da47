//! Decode history.
//!
//! Every completed frame, good or bad, is appended to an event log owned by
//! the connector. Consumers either walk the whole log again with
//! [`Events`] or follow it incrementally with an [`EventCursor`], so a
//! decoded byte can never be overwritten before it has been read.
use std::slice;

use crate::frame::FrameError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeKind {
    Byte(u8),
    FrameError(FrameError),
}

/// One resolved frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeEvent {
    /// Connector tick on which the frame resolved, counting from 0.
    pub tick: u64,
    pub kind: DecodeKind,
}

impl DecodeEvent {
    pub fn byte(&self) -> Option<u8> {
        match self.kind {
            DecodeKind::Byte(byte) => Some(byte),
            DecodeKind::FrameError(_) => None,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub(crate) struct DecodeLog {
    events: Vec<DecodeEvent>,
    /// Events dropped by `clear`, so cursors stay meaningful.
    base: usize,
}

impl DecodeLog {
    pub(crate) fn push(&mut self, event: DecodeEvent) {
        self.events.push(event);
    }

    pub(crate) fn iter(&self) -> Events<'_> {
        Events {
            inner: self.events.iter(),
        }
    }

    pub(crate) fn clear(&mut self) {
        self.base += self.events.len();
        self.events.clear();
    }

    pub(crate) fn since(&self, cursor: &mut EventCursor) -> Events<'_> {
        let start = cursor.seen.saturating_sub(self.base).min(self.events.len());
        cursor.seen = self.base + self.events.len();
        Events {
            inner: self.events[start..].iter(),
        }
    }
}

/// Restartable iterator over decode events; clone it to replay.
#[derive(Debug, Clone)]
pub struct Events<'a> {
    inner: slice::Iter<'a, DecodeEvent>,
}

impl<'a> Iterator for Events<'a> {
    type Item = &'a DecodeEvent;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for Events<'_> {}

impl<'a> Events<'a> {
    /// Successfully decoded bytes, in order.
    pub fn bytes(self) -> impl Iterator<Item = u8> + 'a {
        self.filter_map(DecodeEvent::byte)
    }
}

/// Read position into a connector's decode log.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventCursor {
    seen: usize,
}

impl EventCursor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of events this cursor has been handed so far.
    pub fn seen(&self) -> usize {
        self.seen
    }
}
