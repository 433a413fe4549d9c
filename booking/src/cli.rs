//! Interactive menu for the box office.
//!
//! The menu owns all formatting. It sends actions to the store, reads the
//! recorded outcomes back under the same lock and prints one line per outcome.

use crate::BookingStore;
use crate::types::{BookingAction, Movie, Outcome};
use std::iter;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

/// Menu shown before every prompt
pub const MENU: &str = "\nMovie Ticket Booking System
1. Display all movies
2. Book a ticket
3. Cancel last booked ticket
4. Add a ticket request
5. Process all requests
6. Search for a movie
7. Exit
";

/// A parsed menu selection
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuChoice {
    /// 1: list every movie
    ListMovies,
    /// 2: book a ticket
    BookTicket,
    /// 3: cancel the most recent booking
    CancelLastTicket,
    /// 4: queue a request
    EnqueueRequest,
    /// 5: process the request queue
    ProcessRequests,
    /// 6: look up one movie
    SearchMovie,
    /// 7: leave the menu
    Exit,
}

impl MenuChoice {
    /// Prompt for the title this choice needs, if any
    #[must_use]
    pub const fn title_prompt(self) -> Option<&'static str> {
        match self {
            Self::BookTicket => Some("Enter movie title to book: "),
            Self::EnqueueRequest => Some("Enter movie title to request a ticket: "),
            Self::SearchMovie => Some("Enter movie title to search: "),
            Self::ListMovies | Self::CancelLastTicket | Self::ProcessRequests | Self::Exit => None,
        }
    }
}

/// Menu input errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MenuError {
    /// Input was not one of the listed choices
    #[error("Invalid choice. Please try again.")]
    InvalidChoice(String),
}

impl FromStr for MenuChoice {
    type Err = MenuError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        match input.trim() {
            "1" => Ok(Self::ListMovies),
            "2" => Ok(Self::BookTicket),
            "3" => Ok(Self::CancelLastTicket),
            "4" => Ok(Self::EnqueueRequest),
            "5" => Ok(Self::ProcessRequests),
            "6" => Ok(Self::SearchMovie),
            "7" => Ok(Self::Exit),
            other => Err(MenuError::InvalidChoice(other.to_string())),
        }
    }
}

/// Format the catalog listing
#[must_use]
pub fn render_movies<'a>(movies: impl IntoIterator<Item = &'a Movie>) -> String {
    iter::once("Available Movies:".to_string())
        .chain(movies.into_iter().map(|movie| {
            format!("{} - Tickets Available: {}", movie.title, movie.available_tickets)
        }))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Format a search result
#[must_use]
pub fn render_search(found: Option<&Movie>) -> String {
    found.map_or_else(
        || "Movie not found.".to_string(),
        |movie| {
            format!(
                "Found movie: {} - Tickets Available: {}",
                movie.title, movie.available_tickets
            )
        },
    )
}

/// Format the outcomes of one action, one line each
#[must_use]
pub fn render_outcomes(outcomes: &[Outcome]) -> String {
    outcomes
        .iter()
        .map(|outcome| match outcome {
            Ok(event) => event.to_string(),
            Err(error) => error.to_string(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Send `action` and render the outcomes it recorded, read under the same lock
async fn dispatch(store: &BookingStore, action: BookingAction) -> anyhow::Result<String> {
    let report = store
        .send_and_read(action, |s| render_outcomes(&s.last_outcomes))
        .await?;
    Ok(report)
}

async fn write_line<O>(output: &mut O, line: &str) -> std::io::Result<()>
where
    O: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await
}

async fn prompt<O>(output: &mut O, text: &str) -> std::io::Result<()>
where
    O: AsyncWrite + Unpin,
{
    output.write_all(text.as_bytes()).await?;
    output.flush().await
}

/// Add the configured movies, printing one line per movie.
///
/// # Errors
///
/// Fails if the store has shut down or the output cannot be written.
pub async fn seed_catalog<O>(
    store: &BookingStore,
    movies: &[Movie],
    output: &mut O,
) -> anyhow::Result<()>
where
    O: AsyncWrite + Unpin,
{
    for movie in movies {
        let report = dispatch(
            store,
            BookingAction::AddMovie {
                title: movie.title.clone(),
                available_tickets: movie.available_tickets,
            },
        )
        .await?;
        write_line(output, &report).await?;
    }
    Ok(())
}

/// Run the menu loop until the user exits or input ends.
///
/// # Errors
///
/// Fails on I/O errors or if the store has already shut down.
pub async fn run_menu<I, O>(store: &BookingStore, input: I, mut output: O) -> anyhow::Result<()>
where
    I: AsyncBufRead + Unpin,
    O: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    loop {
        prompt(&mut output, MENU).await?;
        prompt(&mut output, "Enter your choice: ").await?;

        let Some(line) = lines.next_line().await? else {
            tracing::info!("Input closed, leaving menu");
            break;
        };

        let choice = match line.parse::<MenuChoice>() {
            Ok(choice) => choice,
            Err(error) => {
                tracing::debug!(?error, "Unrecognized menu input");
                write_line(&mut output, &error.to_string()).await?;
                continue;
            },
        };

        let title = match choice.title_prompt() {
            Some(text) => {
                prompt(&mut output, text).await?;
                match lines.next_line().await? {
                    Some(title) => title.trim().to_string(),
                    None => break,
                }
            },
            None => String::new(),
        };

        let report = match choice {
            MenuChoice::ListMovies => {
                store.state(|s| render_movies(s.registry.list_movies())).await
            },
            MenuChoice::BookTicket => dispatch(store, BookingAction::BookTicket { title }).await?,
            MenuChoice::CancelLastTicket => dispatch(store, BookingAction::CancelLastTicket).await?,
            MenuChoice::EnqueueRequest => {
                dispatch(store, BookingAction::EnqueueRequest { title }).await?
            },
            MenuChoice::ProcessRequests => {
                let report = dispatch(store, BookingAction::ProcessRequests).await?;
                if report.is_empty() {
                    "No pending requests.".to_string()
                } else {
                    report
                }
            },
            MenuChoice::SearchMovie => {
                store
                    .state(|s| render_search(s.registry.find_movie(&title)))
                    .await
            },
            MenuChoice::Exit => {
                write_line(&mut output, "Exiting the system.").await?;
                break;
            },
        };

        write_line(&mut output, &report).await?;
    }

    output.flush().await?;
    Ok(())
}
