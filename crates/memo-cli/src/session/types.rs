//! CLI gateway wrapper.

use async_trait::async_trait;

use memo_core::{BackendUrl, Draft, Gateway, ListNotesOutput, Note, NoteId, ObjectKey, Result};
use memo_file::FileGateway;
use memo_graphql::GraphqlGateway;

/// Gateway wrapper for CLI use.
///
/// Dispatches to the file or GraphQL implementation depending on which
/// backend the stored session points at.
#[derive(Debug)]
pub enum CliGateway {
    File(FileGateway),
    Graphql(GraphqlGateway),
}

#[async_trait]
impl Gateway for CliGateway {
    fn backend(&self) -> &BackendUrl {
        match self {
            CliGateway::File(gateway) => gateway.backend(),
            CliGateway::Graphql(gateway) => gateway.backend(),
        }
    }

    async fn list_notes(&self) -> Result<ListNotesOutput> {
        match self {
            CliGateway::File(gateway) => gateway.list_notes().await,
            CliGateway::Graphql(gateway) => gateway.list_notes().await,
        }
    }

    async fn create_note(&self, draft: &Draft) -> Result<Note> {
        match self {
            CliGateway::File(gateway) => gateway.create_note(draft).await,
            CliGateway::Graphql(gateway) => gateway.create_note(draft).await,
        }
    }

    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        match self {
            CliGateway::File(gateway) => gateway.delete_note(id).await,
            CliGateway::Graphql(gateway) => gateway.delete_note(id).await,
        }
    }

    async fn put_object(&self, key: &ObjectKey, bytes: Vec<u8>) -> Result<()> {
        match self {
            CliGateway::File(gateway) => gateway.put_object(key, bytes).await,
            CliGateway::Graphql(gateway) => gateway.put_object(key, bytes).await,
        }
    }

    async fn get_object_url(&self, key: &ObjectKey) -> Result<String> {
        match self {
            CliGateway::File(gateway) => gateway.get_object_url(key).await,
            CliGateway::Graphql(gateway) => gateway.get_object_url(key).await,
        }
    }
}
