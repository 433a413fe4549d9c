//! End-to-end booking flows through the Store and the menu.
//!
//! Run with: `cargo test --test booking_flow_test`

#![allow(clippy::expect_used)]
#![allow(clippy::unwrap_used)]
#![allow(clippy::panic)]

use box_office::{
    BookingAction, BookingEnvironment, BookingError, BookingEvent, BookingReducer, BookingState,
    BookingStore, cli,
};
use box_office_runtime::StoreError;
use box_office_testing::test_clock;
use std::sync::Arc;

fn create_store() -> BookingStore {
    let env = BookingEnvironment::new(Arc::new(test_clock()));
    BookingStore::new(BookingState::new(), BookingReducer::new(), env)
}

async fn add(store: &BookingStore, title: &str, available_tickets: u32) {
    store
        .send(BookingAction::AddMovie {
            title: title.to_string(),
            available_tickets,
        })
        .await
        .unwrap();
}

async fn book(store: &BookingStore, title: &str) -> Vec<box_office::Outcome> {
    store
        .send(BookingAction::BookTicket {
            title: title.to_string(),
        })
        .await
        .unwrap();
    store.state(|s| s.last_outcomes.clone()).await
}

async fn tickets(store: &BookingStore, title: &str) -> u32 {
    store
        .state(|s| s.registry.find_movie(title).map(|m| m.available_tickets))
        .await
        .expect("movie should be listed")
}

async fn stack(store: &BookingStore) -> Vec<String> {
    store
        .state(|s| {
            s.registry
                .booked_tickets()
                .iter()
                .map(|t| t.title.clone())
                .collect()
        })
        .await
}

async fn seeded_store() -> BookingStore {
    let store = create_store();
    add(&store, "Avengers", 5).await;
    add(&store, "Inception", 3).await;
    add(&store, "Titanic", 0).await;
    store
}

/// The walkthrough from the demo: book, fail, cancel, queue, process.
#[tokio::test]
async fn test_demo_walkthrough() {
    let store = seeded_store().await;

    book(&store, "Avengers").await;
    assert_eq!(tickets(&store, "Avengers").await, 4);
    assert_eq!(stack(&store).await, vec!["Avengers"]);

    let outcomes = book(&store, "Titanic").await;
    assert_eq!(
        outcomes,
        vec![Err(BookingError::NoAvailability {
            title: "Titanic".to_string()
        })]
    );
    assert_eq!(tickets(&store, "Titanic").await, 0);

    store.send(BookingAction::CancelLastTicket).await.unwrap();
    assert_eq!(tickets(&store, "Avengers").await, 5);
    assert!(stack(&store).await.is_empty());

    for title in ["Inception", "Avengers"] {
        store
            .send(BookingAction::EnqueueRequest {
                title: title.to_string(),
            })
            .await
            .unwrap();
    }
    store.send(BookingAction::ProcessRequests).await.unwrap();

    let outcomes = store.state(|s| s.last_outcomes.clone()).await;
    assert_eq!(
        outcomes,
        vec![
            Ok(BookingEvent::TicketBooked {
                title: "Inception".to_string(),
                remaining: 2
            }),
            Ok(BookingEvent::TicketBooked {
                title: "Avengers".to_string(),
                remaining: 4
            }),
        ]
    );
    assert_eq!(tickets(&store, "Inception").await, 2);
    assert_eq!(tickets(&store, "Avengers").await, 4);
    assert_eq!(stack(&store).await, vec!["Inception", "Avengers"]);
}

/// Queued requests are booked in arrival order even with earlier bookings
/// already on the stack.
#[tokio::test]
async fn test_queue_is_independent_of_stack() {
    let store = seeded_store().await;
    book(&store, "Inception").await;

    for title in ["avengers", "INCEPTION", "Inception", "Inception"] {
        store
            .send(BookingAction::EnqueueRequest {
                title: title.to_string(),
            })
            .await
            .unwrap();
    }
    store.send(BookingAction::ProcessRequests).await.unwrap();

    let outcomes = store.state(|s| s.last_outcomes.clone()).await;
    assert_eq!(outcomes.len(), 4);
    assert!(outcomes[..3].iter().all(Result::is_ok));
    assert_eq!(
        outcomes[3],
        Err(BookingError::NoAvailability {
            title: "Inception".to_string()
        })
    );
    assert_eq!(
        stack(&store).await,
        vec!["Inception", "Avengers", "Inception", "Inception"]
    );
}

#[tokio::test]
async fn test_concurrent_bookings_never_oversell() {
    let store = create_store();
    add(&store, "Inception", 3).await;

    let handles: Vec<_> = (0..10)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send(BookingAction::BookTicket {
                        title: "Inception".to_string(),
                    })
                    .await
            })
        })
        .collect();

    for handle in handles {
        assert!(matches!(handle.await, Ok(Ok(()))));
    }

    assert_eq!(tickets(&store, "Inception").await, 0);
    assert_eq!(stack(&store).await.len(), 3);
}

/// Each booker reads back the outcome of its own booking, even while other
/// clones of the store keep replacing `last_outcomes` with queue reports.
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_readers_see_their_own_outcome() {
    let store = create_store();
    add(&store, "Inception", 20).await;

    let enqueuers: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send(BookingAction::EnqueueRequest {
                        title: "Dune".to_string(),
                    })
                    .await
            })
        })
        .collect();

    let bookers: Vec<_> = (0..20)
        .map(|_| {
            let store = store.clone();
            tokio::spawn(async move {
                store
                    .send_and_read(
                        BookingAction::BookTicket {
                            title: "Inception".to_string(),
                        },
                        |s| s.last_outcomes.clone(),
                    )
                    .await
            })
        })
        .collect();

    let mut remaining = Vec::new();
    for handle in bookers {
        let outcomes = handle.await.unwrap().unwrap();
        match outcomes.as_slice() {
            [Ok(BookingEvent::TicketBooked { title, remaining: left })] => {
                assert_eq!(title, "Inception");
                remaining.push(*left);
            },
            other => panic!("booker read someone else's outcome: {other:?}"),
        }
    }
    for handle in enqueuers {
        assert!(matches!(handle.await, Ok(Ok(()))));
    }

    remaining.sort_unstable();
    assert_eq!(remaining, (0..20).collect::<Vec<u32>>());
    assert_eq!(store.state(|s| s.registry.pending_requests().count()).await, 20);
}

#[tokio::test]
async fn test_store_rejects_after_shutdown() {
    let store = seeded_store().await;
    store.shutdown();

    let result = store.send(BookingAction::CancelLastTicket).await;
    assert_eq!(result, Err(StoreError::ShutdownInProgress));
}

#[tokio::test]
async fn test_menu_session_transcript() {
    let store = create_store();
    let catalog = box_office::config::Config::default().movies;

    let mut seed_output = Vec::new();
    cli::seed_catalog(&store, &catalog, &mut seed_output)
        .await
        .unwrap();
    let seed_output = String::from_utf8(seed_output).unwrap();
    assert!(seed_output.contains("Movie 'Titanic' added with 0 tickets."));

    let input: &[u8] = b"2\navengers\n3\n3\n4\nDune\n5\n5\n6\ninception\n1\n9\n7\n";
    let mut output = Vec::new();
    cli::run_menu(&store, input, &mut output).await.unwrap();
    let output = String::from_utf8(output).unwrap();

    assert!(output.contains("Ticket booked for Avengers."));
    assert!(output.contains("Ticket for Avengers canceled."));
    assert!(output.contains("No tickets to cancel."));
    assert!(output.contains("Request for Dune added to the queue."));
    assert!(output.contains("Movie Dune not found."));
    assert!(output.contains("No pending requests."));
    assert!(output.contains("Found movie: Inception - Tickets Available: 3"));
    assert!(output.contains("Avengers - Tickets Available: 5"));
    assert!(output.contains("Invalid choice. Please try again."));
    assert!(output.trim_end().ends_with("Exiting the system."));
}

#[tokio::test]
async fn test_menu_stops_when_input_ends() {
    let store = seeded_store().await;
    let input: &[u8] = b"2\n";
    let mut output = Vec::new();

    cli::run_menu(&store, input, &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.ends_with("Enter movie title to book: "));
    assert_eq!(tickets(&store, "Avengers").await, 5);
}

#[tokio::test]
async fn test_menu_trims_entered_titles() {
    let store = seeded_store().await;
    let input: &[u8] = b"2\n  Avengers \n6\n\tinception  \n7\n";
    let mut output = Vec::new();

    cli::run_menu(&store, input, &mut output).await.unwrap();

    let output = String::from_utf8(output).unwrap();
    assert!(output.contains("Ticket booked for Avengers."));
    assert!(output.contains("Found movie: Inception - Tickets Available: 3"));
    assert_eq!(tickets(&store, "Avengers").await, 4);
}
