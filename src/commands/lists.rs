//! List screens: users, influencers, token usage, interactive browse

use anyhow::{Result, anyhow};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::app::AppState;
use crate::commands::{api_failure, table};
use crate::listing::{
    InfluencersSource, LoadOutcome, PageSource, PaginatedList, SearchDebouncer, TokensSource,
    UsersSource,
};

fn show<S: PageSource>(list: &PaginatedList<S>, outcome: &LoadOutcome) {
    match outcome {
        LoadOutcome::Superseded => {}
        _ => print!("{}", table::render_list(list.columns(), &list.snapshot())),
    }
}

/// One-shot page load: prints the page, or fails with the inline error.
async fn print_page<S: PageSource>(
    list: PaginatedList<S>,
    page: u32,
    search: Option<&str>,
) -> Result<()> {
    let outcome = match search {
        Some(term) => list.set_search_at(term, page).await,
        None => list.load_page(page).await,
    };
    match outcome {
        LoadOutcome::Failed(message) => Err(anyhow!(message)),
        outcome => {
            show(&list, &outcome);
            Ok(())
        }
    }
}

pub async fn users(app: &AppState, page: u32) -> Result<()> {
    print_page(PaginatedList::new(UsersSource::new(app.api.clone())), page, None).await
}

pub async fn influencers(app: &AppState, page: u32, search: Option<&str>) -> Result<()> {
    print_page(
        PaginatedList::new(InfluencersSource::new(app.api.clone())),
        page,
        search,
    )
    .await
}

pub async fn tokens(app: &AppState, page: u32) -> Result<()> {
    print_page(PaginatedList::new(TokensSource::new(app.api.clone())), page, None).await
}

const BROWSE_HELP: &str = "Type to search. Commands: :page N, :link N, :delete N, :q";

/// Interactive influencer list. Input lines feed the search debouncer; lines
/// starting with `:` act on the page shown.
pub async fn browse(app: &AppState) -> Result<()> {
    let list = PaginatedList::new(InfluencersSource::new(app.api.clone()));
    let outcome = list.load_page(1).await;
    show(&list, &outcome);
    println!("{BROWSE_HELP}");

    let (debouncer, mut settled) = SearchDebouncer::spawn(app.config.ui.search_debounce);
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut last_input = String::new();
    let mut applied = String::new();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    // input closed: apply whatever was still waiting on the timer
                    if last_input != applied {
                        let outcome = list.set_search(&last_input).await;
                        show(&list, &outcome);
                    }
                    break;
                };
                match line.trim() {
                    ":q" => break,
                    cmd if cmd.starts_with(':') => browse_command(app, &list, cmd).await,
                    _ => {
                        last_input = line.clone();
                        debouncer.input(line);
                    }
                }
            }
            Some(term) = settled.recv() => {
                applied = term.clone();
                let outcome = list.set_search(&term).await;
                show(&list, &outcome);
            }
        }
    }
    Ok(())
}

async fn browse_command(app: &AppState, list: &PaginatedList<InfluencersSource>, cmd: &str) {
    let mut parts = cmd.split_whitespace();
    let verb = parts.next().unwrap_or_default();
    let arg = parts.next().and_then(|n| n.parse::<usize>().ok());

    let row = |n: usize| list.snapshot().rows.get(n.wrapping_sub(1)).cloned();

    match (verb, arg) {
        (":page", Some(page)) => {
            let outcome = list.load_page(u32::try_from(page).unwrap_or(u32::MAX)).await;
            show(list, &outcome);
        }
        (":link", Some(n)) => match row(n).and_then(|r| r.invite_link(&app.config.ui.deep_link_scheme)) {
            Some(link) => println!("{link}"),
            None => println!("Row {n} has no invite link"),
        },
        (":delete", Some(n)) => match row(n) {
            Some(r) => match list.delete_row(&r).await {
                Ok((ack, outcome)) => {
                    println!("{}", ack.message.unwrap_or_else(|| "Deleted successfully".into()));
                    show(list, &outcome);
                }
                Err(e) => println!("{}", api_failure(e, "Delete failed")),
            },
            None => println!("No row {n} on this page"),
        },
        _ => println!("{BROWSE_HELP}"),
    }
}
