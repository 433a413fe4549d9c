//! Domain types for the box office.
//!
//! A movie is identified by its title, compared case-insensitively. Every
//! registry operation reports a [`BookingEvent`] on success or a
//! [`BookingError`] on rejection; rejections never change state.

use crate::registry::BookingRegistry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A movie and its remaining ticket count
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Movie {
    /// Display title, unique within the registry ignoring case
    pub title: String,
    /// Tickets still available
    pub available_tickets: u32,
}

impl Movie {
    /// Creates a new movie
    #[must_use]
    pub fn new(title: impl Into<String>, available_tickets: u32) -> Self {
        Self {
            title: title.into(),
            available_tickets,
        }
    }

    /// Whether no tickets remain
    #[must_use]
    pub const fn is_sold_out(&self) -> bool {
        self.available_tickets == 0
    }
}

/// An entry on the booking stack
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedTicket {
    /// Title of the booked movie as stored in the registry
    pub title: String,
    /// When the booking was made
    pub booked_at: DateTime<Utc>,
}

/// Something that happened to the registry
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingEvent {
    /// A movie joined the catalog
    MovieAdded {
        /// Movie title
        title: String,
        /// Initial ticket count
        available_tickets: u32,
    },

    /// A ticket was booked and pushed onto the booking stack
    TicketBooked {
        /// Movie title
        title: String,
        /// Tickets left after this booking
        remaining: u32,
    },

    /// The most recent booking was undone
    TicketCancelled {
        /// Movie title
        title: String,
        /// Tickets available after the cancellation
        available: u32,
    },

    /// A request joined the back of the queue
    RequestQueued {
        /// Requested title, exactly as entered
        title: String,
        /// Queue length including this request
        pending: usize,
    },
}

impl std::fmt::Display for BookingEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MovieAdded {
                title,
                available_tickets,
            } => write!(f, "Movie '{title}' added with {available_tickets} tickets."),
            Self::TicketBooked { title, .. } => write!(f, "Ticket booked for {title}."),
            Self::TicketCancelled { title, .. } => write!(f, "Ticket for {title} canceled."),
            Self::RequestQueued { title, .. } => {
                write!(f, "Request for {title} added to the queue.")
            },
        }
    }
}

/// Reasons a registry operation was rejected
#[derive(Error, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingError {
    /// No movie with this title
    #[error("Movie {title} not found.")]
    NotFound {
        /// Title that was looked up
        title: String,
    },

    /// The movie exists but is sold out
    #[error("No tickets available for {title}.")]
    NoAvailability {
        /// Movie title
        title: String,
    },

    /// The booking stack is empty
    #[error("No tickets to cancel.")]
    NothingToCancel,

    /// A movie with the same title (ignoring case) is already listed
    #[error("Movie '{title}' already exists.")]
    DuplicateTitle {
        /// Title that was rejected
        title: String,
    },

    /// The top of the booking stack names a movie the catalog no longer has
    #[error("Booked ticket for {title} has no matching movie.")]
    MissingBookedMovie {
        /// Title on the stack entry
        title: String,
    },
}

/// Result of a single registry operation
pub type Outcome = Result<BookingEvent, BookingError>;

/// Commands accepted by the booking reducer
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingAction {
    /// Add a movie to the catalog
    AddMovie {
        /// Movie title
        title: String,
        /// Initial ticket count
        available_tickets: u32,
    },

    /// Book one ticket for a movie
    BookTicket {
        /// Movie title, any case
        title: String,
    },

    /// Undo the most recent booking
    CancelLastTicket,

    /// Queue a booking request for later processing
    EnqueueRequest {
        /// Requested title, not validated
        title: String,
    },

    /// Book every queued request in arrival order
    ProcessRequests,
}

/// State owned by the booking store
#[derive(Clone, Debug, Default)]
pub struct BookingState {
    /// Movies, booking stack, and request queue
    pub registry: BookingRegistry,
    /// Outcomes produced by the most recent action, in order
    pub last_outcomes: Vec<Outcome>,
}

impl BookingState {
    /// Creates an empty state
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a state around an existing registry
    #[must_use]
    pub const fn with_registry(registry: BookingRegistry) -> Self {
        Self {
            registry,
            last_outcomes: Vec::new(),
        }
    }
}
