//! GraphQL operation documents and wire types.

#![allow(dead_code)]

use serde::{Deserialize, Serialize};

use memo_core::Note;

// ============================================================================
// Documents
// ============================================================================

/// listNotes query.
pub const LIST_NOTES: &str = "\
query ListNotes($limit: Int, $nextToken: String) {
  listNotes(limit: $limit, nextToken: $nextToken) {
    items { id name description image createdAt }
    nextToken
  }
}";

/// createNote mutation.
pub const CREATE_NOTE: &str = "\
mutation CreateNote($input: CreateNoteInput!) {
  createNote(input: $input) { id name description image createdAt }
}";

/// deleteNote mutation.
pub const DELETE_NOTE: &str = "\
mutation DeleteNote($input: DeleteNoteInput!) {
  deleteNote(input: $input) { id }
}";

/// signIn mutation.
pub const SIGN_IN: &str = "\
mutation SignIn($username: String!, $password: String!) {
  signIn(username: $username, password: $password) { accessToken refreshToken }
}";

/// refreshSession mutation.
/// The refresh token travels in the Authorization header, not as a variable.
pub const REFRESH_SESSION: &str = "\
mutation RefreshSession {
  refreshSession { accessToken refreshToken }
}";

// ============================================================================
// Variables and response types
// ============================================================================

/// Placeholder for operations without variables.
#[derive(Debug, Serialize)]
pub struct NoVariables {}

/// Variables for listNotes.
#[derive(Debug, Serialize)]
pub struct ListNotesVariables<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(rename = "nextToken", skip_serializing_if = "Option::is_none")]
    pub next_token: Option<&'a str>,
}

/// Data payload of listNotes.
#[derive(Debug, Deserialize)]
pub struct ListNotesData {
    #[serde(rename = "listNotes")]
    pub list_notes: NoteConnection,
}

/// A page of notes plus its continuation cursor.
#[derive(Debug, Deserialize)]
pub struct NoteConnection {
    pub items: Vec<Note>,
    #[serde(rename = "nextToken", default)]
    pub next_token: Option<String>,
}

/// Variables for createNote.
#[derive(Debug, Serialize)]
pub struct CreateNoteVariables<'a> {
    pub input: CreateNoteInput<'a>,
}

/// The createNote input object.
#[derive(Debug, Serialize)]
pub struct CreateNoteInput<'a> {
    pub name: &'a str,
    pub description: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<&'a str>,
}

/// Data payload of createNote: the stored note, id assigned.
#[derive(Debug, Deserialize)]
pub struct CreateNoteData {
    #[serde(rename = "createNote")]
    pub create_note: Note,
}

/// Variables for deleteNote.
#[derive(Debug, Serialize)]
pub struct DeleteNoteVariables<'a> {
    pub input: DeleteNoteInput<'a>,
}

/// The deleteNote input object.
#[derive(Debug, Serialize)]
pub struct DeleteNoteInput<'a> {
    pub id: &'a str,
}

/// Data payload of deleteNote.
#[derive(Debug, Deserialize)]
pub struct DeleteNoteData {
    #[serde(rename = "deleteNote", default)]
    pub delete_note: Option<DeletedNote>,
}

/// Echo of the deleted note's id.
#[derive(Debug, Deserialize)]
pub struct DeletedNote {
    pub id: String,
}

/// Variables for signIn.
#[derive(Serialize)]
pub struct SignInVariables<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

// No Debug derive: the password must not reach logs.
impl std::fmt::Debug for SignInVariables<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignInVariables")
            .field("username", &self.username)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Data payload of signIn.
#[derive(Debug, Deserialize)]
pub struct SignInData {
    #[serde(rename = "signIn")]
    pub sign_in: SessionTokensPayload,
}

/// Data payload of refreshSession.
#[derive(Debug, Deserialize)]
pub struct RefreshSessionData {
    #[serde(rename = "refreshSession")]
    pub refresh_session: SessionTokensPayload,
}

/// Token pair issued by the auth mutations.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionTokensPayload {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

impl std::fmt::Debug for SessionTokensPayload {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokensPayload")
            .field("access_token", &"[REDACTED]")
            .field("refresh_token", &"[REDACTED]")
            .finish()
    }
}

/// Response from the object-URL resolution endpoint.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectUrlResponse {
    pub url: String,
    #[serde(default)]
    pub expires_in: Option<u64>,
}
