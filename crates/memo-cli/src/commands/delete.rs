//! Delete command implementation.

use anyhow::{Context, Result};
use clap::Args;

use memo_core::{NoteId, NoteStore};

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct DeleteArgs {
    /// Id of the note to delete
    pub id: String,

    /// Backend base URL (overrides the stored session)
    #[arg(long)]
    pub backend: Option<String>,
}

pub async fn run(args: DeleteArgs) -> Result<()> {
    let session = storage::resolve_session(args.backend.as_deref()).await?;

    let id = NoteId::new(&args.id).context("Invalid note id")?;

    let store = NoteStore::new(session.gateway);
    store.remove(&id).await.context("Failed to delete note")?;

    output::success(&format!("Deleted note: {}", id));

    Ok(())
}
