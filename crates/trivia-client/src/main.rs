//! Terminal front end for Trivia Grid.
//!
//! Asks for a username, loads the questions once, then reads commands
//! from stdin until `q` or end of input:
//!
//! - `s` -- start or restart the game
//! - `1`..`9` -- open a tile's question
//! - `l` -- show the top ten
//! - `q` -- quit
//!
//! The server is taken from `TRIVIA_SERVER_URL`.

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tracing_subscriber::EnvFilter;
use trivia_client::config::LEADERBOARD_LIMIT;
use trivia_client::render::{
    LEADERBOARD_FAILED, render_grid, render_leaderboard, render_prompt, render_status,
};
use trivia_client::{ApiClient, ClientConfig, PlaySession};
use trivia_core::timer::format_elapsed;
use trivia_core::{AnswerOutcome, QuestionBank, TileIndex};

const HELP: &str = "Commands: s = start, 1-9 = open tile, l = leaderboard, q = quit";

/// How long to wait for an in-flight score submission when quitting.
const SUBMIT_GRACE: Duration = Duration::from_secs(5);

type Input = Lines<BufReader<Stdin>>;

/// Application entry point for the terminal client.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the questions cannot be
/// loaded, or stdin fails.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = ClientConfig::from_env()?;
    let api = ApiClient::new(&config)?;
    tracing::info!(server = api.base_url(), "trivia-play starting");

    let mut input = BufReader::new(tokio::io::stdin()).lines();

    let Some(username) = ask_username(&mut input).await? else {
        return Ok(());
    };

    let questions = api
        .questions()
        .await
        .with_context(|| format!("loading questions from {}", api.base_url()))?;
    let bank = Arc::new(QuestionBank::for_grid(questions)?);
    let mut play = PlaySession::new(bank, &username, api.clone());

    println!("{HELP}");
    show_board(&play);

    while let Some(command) = read_line(&mut input, "> ").await? {
        match command.as_str() {
            "q" => break,
            "s" => {
                play.start(Instant::now());
                println!("Game started.");
                show_board(&play);
            }
            "l" => show_leaderboard(&api).await,
            "" => show_board(&play),
            other => match parse_number(other).and_then(TileIndex::new) {
                Some(tile) => play_tile(&mut play, tile, &mut input).await?,
                None => println!("{HELP}"),
            },
        }
    }

    if let Some(handle) = play.take_submission() {
        match tokio::time::timeout(SUBMIT_GRACE, handle).await {
            Ok(Ok(())) => {}
            Ok(Err(e)) => tracing::warn!(error = %e, "Submission task failed"),
            Err(e) => tracing::warn!(error = %e, "Gave up waiting for score submission"),
        }
    }
    Ok(())
}

/// Print `prompt` and read one trimmed line. `None` at end of input.
async fn read_line(input: &mut Input, prompt: &str) -> anyhow::Result<Option<String>> {
    print!("{prompt}");
    std::io::stdout().flush()?;
    Ok(input.next_line().await?.map(|line| line.trim().to_owned()))
}

/// One-based number typed by the player, as a zero-based index.
fn parse_number(text: &str) -> Option<usize> {
    text.parse::<usize>().ok().and_then(|n| n.checked_sub(1))
}

/// Ask for a name. A blank name must be confirmed; it means no
/// leaderboard entry. Returns `None` at end of input.
async fn ask_username(input: &mut Input) -> anyhow::Result<Option<String>> {
    loop {
        let Some(name) = read_line(input, "Username: ").await? else {
            return Ok(None);
        };
        if !name.is_empty() {
            return Ok(Some(name));
        }
        let Some(answer) = read_line(
            input,
            "No username entered. Continue as anonymous? (You won't appear on leaderboard) [y/N] ",
        )
        .await?
        else {
            return Ok(None);
        };
        if answer.eq_ignore_ascii_case("y") {
            return Ok(Some(String::new()));
        }
    }
}

fn show_board(play: &PlaySession) {
    let session = play.session();
    println!("{}", render_grid(session.unlocked()));
    println!(
        "{}",
        render_status(session.tiles_unlocked(), play.elapsed(Instant::now()))
    );
}

async fn show_leaderboard(api: &ApiClient) {
    match api.leaderboard(Some(LEADERBOARD_LIMIT)).await {
        Ok(entries) => println!("{}", render_leaderboard(&entries)),
        Err(e) => {
            tracing::warn!(error = %e, "Leaderboard request failed");
            println!("{LEADERBOARD_FAILED}");
        }
    }
}

/// Run one question instance until a correct answer, `b`, or end of input.
async fn play_tile(play: &mut PlaySession, tile: TileIndex, input: &mut Input) -> anyhow::Result<()> {
    let mut prompt = match play.open_tile(tile) {
        Ok(prompt) => prompt,
        Err(rejection) => {
            println!("{rejection}");
            return Ok(());
        }
    };

    loop {
        println!("{}", render_prompt(&prompt));
        let Some(text) = read_line(input, "answer> ").await? else {
            return Ok(());
        };
        if text.eq_ignore_ascii_case("b") {
            show_board(play);
            return Ok(());
        }
        let Some(choice) = parse_number(&text) else {
            println!("Enter a choice number, or b to go back.");
            continue;
        };

        match play.answer(tile, choice, Instant::now()) {
            Ok(AnswerOutcome::Correct {
                completion: Some(completion),
                ..
            }) => {
                println!(
                    "Correct! All tiles unlocked. Final time: {}",
                    format_elapsed(completion.elapsed)
                );
                if play.username().is_none() {
                    println!("Playing anonymously; the time was not submitted.");
                }
                show_board(play);
                return Ok(());
            }
            Ok(AnswerOutcome::Correct { .. }) => {
                println!("Correct! Tile unlocked.");
                show_board(play);
                return Ok(());
            }
            Ok(AnswerOutcome::Incorrect { remaining, .. }) => {
                println!("Incorrect — try again later!");
                if remaining == 0 {
                    println!("No choices left. Go back and reopen the tile.");
                }
            }
            Ok(AnswerOutcome::Rejected(rejection)) => println!("{rejection}"),
            Err(e) => println!("{e}"),
        }

        prompt = match play.prompt(tile) {
            Ok(prompt) => prompt,
            Err(rejection) => {
                println!("{rejection}");
                return Ok(());
            }
        };
    }
}
