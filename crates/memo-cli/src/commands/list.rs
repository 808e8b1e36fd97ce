//! List command implementation.

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;

use memo_core::{NoteStore, Page, page_count, page_slice};

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct ListArgs {
    /// Page to show (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    /// Notes per page
    #[arg(long, default_value_t = 10)]
    pub page_size: usize,

    /// Output notes as JSON, one per line
    #[arg(long)]
    pub json: bool,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Backend base URL (overrides the stored session)
    #[arg(long)]
    pub backend: Option<String>,
}

pub async fn run(args: ListArgs) -> Result<()> {
    let session = storage::resolve_session(args.backend.as_deref()).await?;

    let store = NoteStore::new(session.gateway);
    store.refresh().await.context("Failed to fetch notes")?;

    let snapshot = store.snapshot();

    if snapshot.cards.is_empty() {
        eprintln!("{}", "No notes found.".dimmed());
        return Ok(());
    }

    let page = Page::new(args.page, args.page_size).context("Invalid page")?;
    let pages = page_count(snapshot.cards.len(), args.page_size);

    for card in page_slice(&snapshot.cards, page) {
        if args.pretty {
            output::json_pretty(card)?;
        } else if args.json {
            output::json(card)?;
        } else {
            println!("{}  {}", card.note.id.as_str().dimmed(), card.note.name.bold());
            println!("    {}", card.note.description);
            if let Some(url) = &card.image_url {
                println!("    {}", url.underline());
            }
        }
    }

    eprintln!();
    eprintln!("{}", format!("page {} of {}", page.index(), pages).dimmed());

    Ok(())
}
