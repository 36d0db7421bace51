//! Pagination state definitions
//!
//! `Phase` is the controller's position in the fetch loop; `PageState` is the
//! transient bookkeeping for the page currently being processed.

use crate::ScrapeError;
use std::fmt;

/// Position of the pagination controller within one iteration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Requesting the current page
    Fetching,

    /// Pulling records off a fetched page
    Extracting,

    /// Looking for the next-page control
    Deciding,

    /// No more pages will be requested
    Done,
}

impl Phase {
    /// Returns true if `next` is a legal successor of this phase
    ///
    /// `Fetching -> Done` is the empty-page exit; `Deciding -> Done` is the
    /// no-next-control exit. `Done` has no successors.
    pub fn can_transition_to(&self, next: Phase) -> bool {
        matches!(
            (self, next),
            (Self::Fetching, Self::Extracting)
                | (Self::Fetching, Self::Done)
                | (Self::Extracting, Self::Deciding)
                | (Self::Deciding, Self::Fetching)
                | (Self::Deciding, Self::Done)
        )
    }

    /// Returns true for the terminal phase
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fetching => "fetching",
            Self::Extracting => "extracting",
            Self::Deciding => "deciding",
            Self::Done => "done",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Bookkeeping for the page the controller is working on
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageState {
    /// 1-based page number, only ever increases
    pub page: u32,

    /// Request URL for `page`
    pub url: String,

    /// Whether the last fetched page offered a next-page control
    pub has_next: bool,

    phase: Phase,
}

impl PageState {
    /// Starts at page 1 in the `Fetching` phase
    pub fn new(first_url: impl Into<String>) -> Self {
        Self {
            page: 1,
            url: first_url.into(),
            has_next: false,
            phase: Phase::Fetching,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Moves to `next`, rejecting transitions the loop does not allow
    pub fn transition(&mut self, next: Phase) -> Result<(), ScrapeError> {
        if !self.phase.can_transition_to(next) {
            return Err(ScrapeError::InvalidTransition {
                from: self.phase,
                to: next,
            });
        }

        tracing::trace!("Page {}: {} -> {}", self.page, self.phase, next);
        self.phase = next;
        Ok(())
    }

    /// Moves on to the following page and back into `Fetching`
    pub fn advance(&mut self, next_url: impl Into<String>) -> Result<(), ScrapeError> {
        self.transition(Phase::Fetching)?;
        self.page += 1;
        self.url = next_url.into();
        self.has_next = false;
        Ok(())
    }
}
