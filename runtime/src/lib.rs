//! # Box Office Runtime
//!
//! Runtime implementation for the box office reducer architecture.
//!
//! This crate provides the Store runtime that owns state, serializes actions
//! through a reducer, and executes the effects the reducer returns.
//!
//! ## Example
//!
//! ```ignore
//! use box_office_runtime::Store;
//!
//! let store = Store::new(initial_state, my_reducer, environment);
//!
//! // Send an action
//! store.send(Action::DoSomething).await?;
//!
//! // Read state
//! let value = store.state(|s| s.some_field).await;
//! ```

use box_office_core::{effect::Effect, reducer::Reducer};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::RwLock;

/// Error types for the Store runtime
pub mod error {
    use thiserror::Error;

    /// Errors that can occur during Store operations
    #[derive(Error, Debug, Clone, PartialEq, Eq)]
    pub enum StoreError {
        /// Store is shutting down and not accepting new actions
        ///
        /// This error is returned when `send()` is called after `shutdown()`.
        #[error("Store is shutting down")]
        ShutdownInProgress,
    }
}

pub use error::StoreError;

/// The Store - runtime coordinator for a reducer
pub mod store {
    use super::{Arc, AtomicBool, Effect, Ordering, Reducer, RwLock, StoreError};
    use futures::future::BoxFuture;
    use std::marker::PhantomData;

    /// The Store - runtime coordinator for a reducer
    ///
    /// The Store manages:
    /// 1. State (behind a single `RwLock`, so actions never interleave)
    /// 2. Reducer (business logic)
    /// 3. Environment (injected dependencies)
    /// 4. Effect execution (with feedback loop)
    ///
    /// # Type Parameters
    ///
    /// - `S`: State type
    /// - `A`: Action type
    /// - `E`: Environment type
    /// - `R`: Reducer implementation
    pub struct Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E>,
    {
        state: Arc<RwLock<S>>,
        reducer: R,
        environment: E,
        shutdown: Arc<AtomicBool>,
        _action: PhantomData<fn(A)>,
    }

    impl<S, A, E, R> Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Send + Sync + 'static,
        A: Send + 'static,
        S: Send + Sync + 'static,
        E: Send + Sync + 'static,
    {
        /// Create a new store with initial state, reducer, and environment
        #[must_use]
        pub fn new(initial_state: S, reducer: R, environment: E) -> Self {
            Self {
                state: Arc::new(RwLock::new(initial_state)),
                reducer,
                environment,
                shutdown: Arc::new(AtomicBool::new(false)),
                _action: PhantomData,
            }
        }

        /// Send an action to the store
        ///
        /// 1. Acquires the write lock on state
        /// 2. Calls the reducer with (state, action, environment)
        /// 3. Releases the lock and executes returned effects in order
        /// 4. Actions produced by effects are fed back through the reducer
        ///
        /// `send()` returns once every effect (and every fed-back action) has
        /// completed, so callers observe the settled state afterwards.
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action), name = "store_send")]
        pub async fn send(&self, action: A) -> Result<(), StoreError> {
            self.dispatch(action).await
        }

        /// Read current state via a closure
        ///
        /// Access state through a closure to ensure the lock is released promptly:
        ///
        /// ```ignore
        /// let movie_count = store.state(|s| s.registry.len()).await;
        /// ```
        pub async fn state<F, T>(&self, f: F) -> T
        where
            F: FnOnce(&S) -> T,
        {
            let state = self.state.read().await;
            f(&*state)
        }

        /// Stop accepting new actions
        ///
        /// Actions already being reduced finish normally.
        pub fn shutdown(&self) {
            tracing::info!("Store shutting down");
            self.shutdown.store(true, Ordering::Release);
        }

        /// Whether `shutdown()` has been called on this store or any clone of it
        #[must_use]
        pub fn is_shut_down(&self) -> bool {
            self.shutdown.load(Ordering::Acquire)
        }

        /// Send an action and read state under the same write lock
        ///
        /// `f` runs right after the reducer, before the lock is released, so
        /// no other action (from this store or any clone) can change state in
        /// between. Effects run afterwards, as with [`send`](Self::send).
        ///
        /// ```ignore
        /// let outcomes = store
        ///     .send_and_read(BookingAction::CancelLastTicket, |s| s.last_outcomes.clone())
        ///     .await?;
        /// ```
        ///
        /// # Errors
        ///
        /// Returns [`StoreError::ShutdownInProgress`] if the store is shutting down.
        #[tracing::instrument(skip(self, action, f), name = "store_send_and_read")]
        pub async fn send_and_read<F, T>(&self, action: A, f: F) -> Result<T, StoreError>
        where
            F: FnOnce(&S) -> T + Send,
            T: Send,
        {
            self.apply(action, f).await
        }

        fn dispatch(&self, action: A) -> BoxFuture<'_, Result<(), StoreError>> {
            Box::pin(self.apply(action, |_| ()))
        }

        async fn apply<F, T>(&self, action: A, f: F) -> Result<T, StoreError>
        where
            F: FnOnce(&S) -> T + Send,
            T: Send,
        {
            if self.is_shut_down() {
                tracing::warn!("Rejected action: store is shutting down");
                return Err(StoreError::ShutdownInProgress);
            }

            tracing::debug!("Processing action");

            let (effects, value) = {
                let mut state = self.state.write().await;
                tracing::trace!("Acquired write lock on state");
                let effects = self.reducer.reduce(&mut *state, action, &self.environment);
                (effects, f(&*state))
            };

            tracing::trace!("Executing {} effects", effects.len());
            for effect in effects {
                self.execute_effect(effect).await?;
            }

            Ok(value)
        }

        fn execute_effect(&self, effect: Effect<A>) -> BoxFuture<'_, Result<(), StoreError>> {
            Box::pin(async move {
                match effect {
                    Effect::None => Ok(()),
                    Effect::Sequential(effects) => {
                        for effect in effects {
                            self.execute_effect(effect).await?;
                        }
                        Ok(())
                    },
                    Effect::Future(fut) => match fut.await {
                        Some(action) => {
                            tracing::trace!("Effect produced an action, feeding back");
                            self.dispatch(action).await
                        },
                        None => Ok(()),
                    },
                }
            })
        }
    }

    impl<S, A, E, R> Clone for Store<S, A, E, R>
    where
        R: Reducer<State = S, Action = A, Environment = E> + Clone,
        E: Clone,
    {
        fn clone(&self) -> Self {
            Self {
                state: Arc::clone(&self.state),
                reducer: self.reducer.clone(),
                environment: self.environment.clone(),
                shutdown: Arc::clone(&self.shutdown),
                _action: PhantomData,
            }
        }
    }
}

// Re-export for convenience
pub use store::Store;
