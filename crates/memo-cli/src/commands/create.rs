//! Create command implementation.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use memo_core::NoteStore;

use crate::output;
use crate::session::storage;

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Note title
    pub name: String,

    /// Note body text
    #[arg(long)]
    pub description: String,

    /// Image file to attach
    #[arg(long)]
    pub image: Option<PathBuf>,

    /// Backend base URL (overrides the stored session)
    #[arg(long)]
    pub backend: Option<String>,
}

pub async fn run(args: CreateArgs) -> Result<()> {
    let session = storage::resolve_session(args.backend.as_deref()).await?;

    let store = NoteStore::new(session.gateway);

    store.update_draft(|draft| {
        draft.name = args.name.clone();
        draft.description = args.description.clone();
    });

    if let Some(path) = &args.image {
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .context("Image path has no file name")?;
        let bytes = std::fs::read(path).context("Failed to read image file")?;

        store
            .attach_file(file_name, bytes)
            .await
            .context("Failed to upload image")?;
    }

    let card = store.submit().await.context("Failed to create note")?;

    output::success(&format!("Created note: {}", card.note.id));
    println!();
    output::field("Name", &card.note.name);
    output::field("Description", &card.note.description);
    if let Some(url) = &card.image_url {
        output::field("Image", url);
    }

    Ok(())
}
