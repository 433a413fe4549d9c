//! In-memory movie ticket booking.
//!
//! A small box office built on the reducer architecture:
//!
//! - [`registry::BookingRegistry`]: sorted movie catalog with O(log n)
//!   case-insensitive lookup, a LIFO booking stack, and a FIFO request queue
//! - [`reducer::BookingReducer`]: applies [`types::BookingAction`]s and records
//!   their outcomes on [`types::BookingState`]
//! - [`cli`]: the interactive menu that formats those outcomes
//!
//! # Quick Start
//!
//! ```no_run
//! use box_office::{BookingAction, BookingEnvironment, BookingReducer, BookingState};
//! use box_office_core::environment::SystemClock;
//! use box_office_runtime::Store;
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let env = BookingEnvironment::new(Arc::new(SystemClock));
//! let store = Store::new(BookingState::new(), BookingReducer::new(), env);
//!
//! store.send(BookingAction::AddMovie {
//!     title: "Avengers".to_string(),
//!     available_tickets: 5,
//! }).await?;
//! store.send(BookingAction::BookTicket { title: "avengers".to_string() }).await?;
//!
//! let left = store
//!     .state(|s| s.registry.find_movie("Avengers").map(|m| m.available_tickets))
//!     .await;
//! assert_eq!(left, Some(4));
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod reducer;
pub mod registry;
pub mod types;

use box_office_runtime::Store;

// Re-export commonly used types
pub use reducer::{BookingEnvironment, BookingReducer};
pub use registry::BookingRegistry;
pub use types::{
    BookedTicket, BookingAction, BookingError, BookingEvent, BookingState, Movie, Outcome,
};

/// Store that owns the booking state
pub type BookingStore = Store<BookingState, BookingAction, BookingEnvironment, BookingReducer>;
