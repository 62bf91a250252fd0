// crates/notekeep-core/src/id.rs - Id assignment for new notes
//
// Ids are plain integers assigned once at creation. Two strategies:
// - timestamp: milliseconds since the Unix epoch, bumped past the largest
//   existing id when the clock has not moved on (same millisecond, clock
//   skew). Ids stay unique within a Document.
// - sequential: largest existing id + 1.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::warn;

use crate::note::{Document, NoteId};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum IdError {
    #[error("Unknown id strategy '{0}'. Must be one of: timestamp, sequential")]
    UnknownStrategy(String),
}

/// How new note ids are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    #[default]
    Timestamp,
    Sequential,
}

impl fmt::Display for IdStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Timestamp => write!(f, "timestamp"),
            Self::Sequential => write!(f, "sequential"),
        }
    }
}

impl FromStr for IdStrategy {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "timestamp" => Ok(Self::Timestamp),
            "sequential" => Ok(Self::Sequential),
            other => Err(IdError::UnknownStrategy(other.to_string())),
        }
    }
}

/// Current wall-clock time in milliseconds since the Unix epoch
///
/// A clock set before 1970 (or absurdly far ahead) reads as 0, which makes
/// the timestamp strategy fall back to max + 1.
pub fn epoch_millis() -> u64 {
    let now = SystemTime::now();
    millis_since_epoch(now).unwrap_or_else(|| {
        warn!(?now, "system clock is outside the millisecond id range");
        0
    })
}

fn millis_since_epoch(at: SystemTime) -> Option<u64> {
    let elapsed = at.duration_since(UNIX_EPOCH).ok()?;
    u64::try_from(elapsed.as_millis()).ok()
}

/// Picks the id for the next note given the current Document
///
/// The clock is injected so tests can pin time.
pub struct IdGenerator<C = fn() -> u64>
where
    C: Fn() -> u64,
{
    strategy: IdStrategy,
    clock: C,
}

impl IdGenerator {
    /// Generator reading the system clock
    pub fn system(strategy: IdStrategy) -> Self {
        Self::new(strategy, epoch_millis as fn() -> u64)
    }
}

impl<C> IdGenerator<C>
where
    C: Fn() -> u64,
{
    pub fn new(strategy: IdStrategy, clock: C) -> Self {
        Self { strategy, clock }
    }

    pub fn strategy(&self) -> IdStrategy {
        self.strategy
    }

    /// Id for a note about to be appended to `doc`
    pub fn next_id(&self, doc: &Document) -> NoteId {
        let after_max = doc.max_id().map_or(1, |max| max.saturating_add(1));
        match self.strategy {
            IdStrategy::Timestamp => (self.clock)().max(after_max),
            IdStrategy::Sequential => after_max,
        }
    }
}
