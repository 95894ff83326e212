//! Interval bookkeeping for per-minute aspect snapshots.
//!
//! The tracker is fed the set of active `(body, aspect)` keys once per sample
//! and turns runs of consecutive activity into [`ReportedInterval`]s. An
//! interval closes at the first sample in which its key is no longer active,
//! so a key active for a single minute yields `end = start + 1 minute`.
//! Keys still open when the scan ends are closed at the scan end, in
//! canonical key order (body table order, then ascending aspect angle).

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::aspects::{AspectKey, AspectKind, Body};

/// A closed stretch of time during which one aspect held.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportedInterval {
    pub body: Body,
    pub aspect: AspectKind,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl ReportedInterval {
    pub fn key(&self) -> AspectKey {
        AspectKey::new(self.body, self.aspect)
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// State machine converting active-key snapshots into intervals.
///
/// Timestamps passed to [`observe`](Self::observe) must strictly increase.
/// [`finalize`](Self::finalize) consumes the tracker, so it cannot be called
/// twice or followed by further observations.
#[derive(Debug, Default)]
pub struct IntervalTracker {
    open: BTreeMap<AspectKey, NaiveDateTime>,
    closed: Vec<ReportedInterval>,
    last_observed: Option<NaiveDateTime>,
}

impl IntervalTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the keys active at `timestamp`.
    ///
    /// # Panics
    ///
    /// Panics if `timestamp` is not later than the previous observation.
    pub fn observe<I>(&mut self, timestamp: NaiveDateTime, active_keys: I)
    where
        I: IntoIterator<Item = AspectKey>,
    {
        if let Some(last) = self.last_observed {
            assert!(
                timestamp > last,
                "observations out of order: {timestamp} after {last}"
            );
        }
        self.last_observed = Some(timestamp);

        let active: BTreeSet<AspectKey> = active_keys.into_iter().collect();

        let ended: Vec<AspectKey> = self
            .open
            .keys()
            .filter(|key| !active.contains(*key))
            .copied()
            .collect();
        for key in ended {
            if let Some(start) = self.open.remove(&key) {
                log::debug!("{} {} closed {}..{}", key.body, key.aspect, start, timestamp);
                self.closed.push(ReportedInterval {
                    body: key.body,
                    aspect: key.aspect,
                    start,
                    end: timestamp,
                });
            }
        }

        for key in active {
            self.open.entry(key).or_insert_with(|| {
                log::debug!("{} {} opened at {}", key.body, key.aspect, timestamp);
                timestamp
            });
        }
    }

    pub fn is_open(&self, key: &AspectKey) -> bool {
        self.open.contains_key(key)
    }

    /// Intervals closed so far, in closing order.
    pub fn closed(&self) -> &[ReportedInterval] {
        &self.closed
    }

    /// Close every open key at `end` and return all intervals.
    ///
    /// # Panics
    ///
    /// Panics if `end` is earlier than the last observation.
    pub fn finalize(self, end: NaiveDateTime) -> Vec<ReportedInterval> {
        if let Some(last) = self.last_observed {
            assert!(end >= last, "scan end {end} precedes last observation {last}");
        }

        let Self {
            open, mut closed, ..
        } = self;
        closed.extend(open.into_iter().map(|(key, start)| ReportedInterval {
            body: key.body,
            aspect: key.aspect,
            start,
            end,
        }));
        closed
    }
}
