//! Reducer for the booking registry.
//!
//! The registry is a pure state machine: every action is applied
//! synchronously and no effects are returned. Outcomes are stored on the
//! state for the presentation layer to read back.

use crate::types::{BookingAction, BookingError, BookingState, Outcome};
use box_office_core::{SmallVec, effect::Effect, environment::Clock, reducer::Reducer};
use std::sync::Arc;

/// Environment dependencies for the booking reducer
#[derive(Clone)]
pub struct BookingEnvironment {
    /// Clock for stamping bookings
    pub clock: Arc<dyn Clock>,
}

impl BookingEnvironment {
    /// Creates a new `BookingEnvironment`
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

/// Reducer for the booking registry
#[derive(Clone, Debug, Default)]
pub struct BookingReducer;

impl BookingReducer {
    /// Creates a new `BookingReducer`
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn log_outcome(outcome: &Outcome) {
        match outcome {
            Ok(event) => tracing::debug!(?event, "Booking applied"),
            Err(error @ BookingError::MissingBookedMovie { .. }) => {
                tracing::error!(
                    %error,
                    "Booking stack references a movie missing from the catalog"
                );
            },
            Err(error) => tracing::info!(%error, "Booking rejected"),
        }
    }
}

impl Reducer for BookingReducer {
    type State = BookingState;
    type Action = BookingAction;
    type Environment = BookingEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        let registry = &mut state.registry;

        let outcomes = match action {
            BookingAction::AddMovie {
                title,
                available_tickets,
            } => vec![registry.add_movie(title, available_tickets)],
            BookingAction::BookTicket { title } => {
                vec![registry.book_ticket(&title, env.clock.now())]
            },
            BookingAction::CancelLastTicket => vec![registry.cancel_last_ticket()],
            BookingAction::EnqueueRequest { title } => vec![Ok(registry.enqueue_request(title))],
            BookingAction::ProcessRequests => {
                let outcomes = registry.process_requests(env.clock.now());
                tracing::debug!(processed = outcomes.len(), "Request queue drained");
                outcomes
            },
        };

        for outcome in &outcomes {
            Self::log_outcome(outcome);
        }
        state.last_outcomes = outcomes;

        SmallVec::new()
    }
}
