//! The booking registry: a sorted movie catalog, a booking stack, and a
//! request queue.
//!
//! Movies are kept sorted by their lower-cased title at all times. Inserts
//! place each movie at its binary-search position, so lookups never re-sort
//! and the sort key always matches the search key.

use crate::types::{BookedTicket, BookingError, BookingEvent, Movie, Outcome};
use chrono::{DateTime, Utc};
use std::collections::VecDeque;

/// A catalog entry with its precomputed lookup key
#[derive(Clone, Debug)]
struct Listing {
    key: String,
    movie: Movie,
}

fn title_key(title: &str) -> String {
    title.to_lowercase()
}

/// In-memory movie catalog with booking and request tracking
///
/// # Example
///
/// ```
/// use box_office::registry::BookingRegistry;
/// use chrono::Utc;
///
/// let mut registry = BookingRegistry::new();
/// registry.add_movie("Avengers", 5).ok();
///
/// assert!(registry.book_ticket("avengers", Utc::now()).is_ok());
/// assert_eq!(registry.find_movie("AVENGERS").map(|m| m.available_tickets), Some(4));
/// ```
#[derive(Clone, Debug, Default)]
pub struct BookingRegistry {
    movies: Vec<Listing>,
    booked_tickets: Vec<BookedTicket>,
    request_queue: VecDeque<String>,
}

impl BookingRegistry {
    /// Creates an empty registry
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binary search for `title`: `Ok(index)` if listed, otherwise
    /// `Err(insertion_point)`.
    fn position(&self, title: &str) -> Result<usize, usize> {
        let key = title_key(title);
        self.movies
            .binary_search_by(|listing| listing.key.as_str().cmp(key.as_str()))
    }

    /// Adds a movie at its sorted position.
    ///
    /// # Errors
    ///
    /// [`BookingError::DuplicateTitle`] if a movie with the same title,
    /// ignoring case, is already listed.
    pub fn add_movie(&mut self, title: impl Into<String>, available_tickets: u32) -> Outcome {
        let title = title.into();
        match self.position(&title) {
            Ok(_) => Err(BookingError::DuplicateTitle { title }),
            Err(index) => {
                self.movies.insert(
                    index,
                    Listing {
                        key: title_key(&title),
                        movie: Movie::new(title.clone(), available_tickets),
                    },
                );
                Ok(BookingEvent::MovieAdded {
                    title,
                    available_tickets,
                })
            },
        }
    }

    /// Looks up a movie by title, ignoring case.
    #[must_use]
    pub fn find_movie(&self, title: &str) -> Option<&Movie> {
        self.position(title)
            .ok()
            .and_then(|index| self.movies.get(index))
            .map(|listing| &listing.movie)
    }

    /// Books one ticket and pushes it onto the booking stack.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NotFound`] if no movie has this title
    /// - [`BookingError::NoAvailability`] if the movie is sold out
    pub fn book_ticket(&mut self, title: &str, now: DateTime<Utc>) -> Outcome {
        let Some(listing) = self
            .position(title)
            .ok()
            .and_then(|index| self.movies.get_mut(index))
        else {
            return Err(BookingError::NotFound {
                title: title.to_string(),
            });
        };

        let movie = &mut listing.movie;
        if movie.is_sold_out() {
            return Err(BookingError::NoAvailability {
                title: movie.title.clone(),
            });
        }

        movie.available_tickets -= 1;
        self.booked_tickets.push(BookedTicket {
            title: movie.title.clone(),
            booked_at: now,
        });

        Ok(BookingEvent::TicketBooked {
            title: movie.title.clone(),
            remaining: movie.available_tickets,
        })
    }

    /// Pops the most recent booking and returns its ticket to the movie.
    ///
    /// # Errors
    ///
    /// - [`BookingError::NothingToCancel`] if the booking stack is empty
    /// - [`BookingError::MissingBookedMovie`] if the stack top names a movie
    ///   that is no longer listed; the stack is left untouched
    pub fn cancel_last_ticket(&mut self) -> Outcome {
        let Some(last) = self.booked_tickets.last() else {
            return Err(BookingError::NothingToCancel);
        };

        let Ok(index) = self.position(&last.title) else {
            return Err(BookingError::MissingBookedMovie {
                title: last.title.clone(),
            });
        };

        self.booked_tickets.pop();
        let movie = &mut self.movies[index].movie;
        movie.available_tickets += 1;

        Ok(BookingEvent::TicketCancelled {
            title: movie.title.clone(),
            available: movie.available_tickets,
        })
    }

    /// Appends a request to the back of the queue. The title is not checked
    /// against the catalog until the request is processed.
    pub fn enqueue_request(&mut self, title: impl Into<String>) -> BookingEvent {
        let title = title.into();
        self.request_queue.push_back(title.clone());
        BookingEvent::RequestQueued {
            title,
            pending: self.request_queue.len(),
        }
    }

    /// Drains the queue front to back, booking each request.
    ///
    /// Each request succeeds or fails on its own; an empty queue yields no
    /// outcomes.
    pub fn process_requests(&mut self, now: DateTime<Utc>) -> Vec<Outcome> {
        let mut outcomes = Vec::with_capacity(self.request_queue.len());
        while let Some(title) = self.request_queue.pop_front() {
            outcomes.push(self.book_ticket(&title, now));
        }
        outcomes
    }

    /// Movies in title order, ignoring case
    pub fn list_movies(&self) -> impl Iterator<Item = &Movie> {
        self.movies.iter().map(|listing| &listing.movie)
    }

    /// Booking stack, oldest first
    #[must_use]
    pub fn booked_tickets(&self) -> &[BookedTicket] {
        &self.booked_tickets
    }

    /// Queued request titles, next to be processed first
    pub fn pending_requests(&self) -> impl Iterator<Item = &str> {
        self.request_queue.iter().map(String::as_str)
    }

    /// Number of listed movies
    #[must_use]
    pub fn len(&self) -> usize {
        self.movies.len()
    }

    /// Whether no movies are listed
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }
}
