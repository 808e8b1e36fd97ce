//! GraphQL-backed gateway implementation.

use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use memo_core::error::{AuthError, Error};
use memo_core::{
    AccessToken, BackendUrl, Credentials, Draft, Gateway, ListNotesOutput, Note, NoteId,
    ObjectKey, RefreshToken, Result,
};

use crate::client::GraphqlClient;
use crate::operations::*;

/// A network-backed gateway talking GraphQL plus HTTP object storage.
pub struct GraphqlGateway {
    backend: BackendUrl,
    client: GraphqlClient,
    tokens: RwLock<SessionTokens>,
}

#[derive(Debug)]
struct SessionTokens {
    access: AccessToken,
    refresh: Option<RefreshToken>,
}

impl GraphqlGateway {
    /// Authenticate against the backend and return a ready gateway.
    #[instrument(skip(credentials), fields(backend = %backend, username = credentials.username()))]
    pub async fn sign_in(backend: BackendUrl, credentials: Credentials) -> Result<Self> {
        info!("Signing in");

        let client = GraphqlClient::new(backend.clone());
        let variables = SignInVariables {
            username: credentials.username(),
            password: credentials.password(),
        };

        let data: SignInData = client
            .execute("SignIn", SIGN_IN, &variables, None)
            .await
            .map_err(|err| match err {
                Error::Protocol(p) if p.status == 401 || p.is_auth_error() => {
                    let reason = p
                        .message
                        .unwrap_or_else(|| "sign-in rejected".to_string());
                    AuthError::InvalidCredentials(reason).into()
                }
                other => other,
            })?;

        Ok(Self::build(
            backend,
            client,
            AccessToken::new(data.sign_in.access_token),
            data.sign_in.refresh_token.map(RefreshToken::new),
        ))
    }

    /// Restore a gateway from persisted tokens.
    pub fn from_tokens(
        backend: BackendUrl,
        access: AccessToken,
        refresh: Option<RefreshToken>,
    ) -> Self {
        let client = GraphqlClient::new(backend.clone());
        Self::build(backend, client, access, refresh)
    }

    fn build(
        backend: BackendUrl,
        client: GraphqlClient,
        access: AccessToken,
        refresh: Option<RefreshToken>,
    ) -> Self {
        Self {
            backend,
            client,
            tokens: RwLock::new(SessionTokens { access, refresh }),
        }
    }

    /// Exchange the refresh token for fresh session tokens.
    #[instrument(skip(self), fields(backend = %self.backend))]
    pub async fn refresh_session(&self) -> Result<()> {
        let refresh = self
            .refresh_token()
            .ok_or(AuthError::RefreshTokenInvalid)?;

        let data: RefreshSessionData = self
            .client
            .execute(
                "RefreshSession",
                REFRESH_SESSION,
                &NoVariables {},
                Some(refresh.as_str()),
            )
            .await?;

        {
            let mut tokens = self.tokens.write().unwrap();
            tokens.access = AccessToken::new(data.refresh_session.access_token);
            if let Some(r) = data.refresh_session.refresh_token {
                tokens.refresh = Some(RefreshToken::new(r));
            }
        }

        debug!("Session refreshed");
        Ok(())
    }

    /// Export the current access token for persistence.
    pub fn access_token(&self) -> AccessToken {
        self.tokens.read().unwrap().access.clone()
    }

    /// Export the current refresh token for persistence.
    pub fn refresh_token(&self) -> Option<RefreshToken> {
        self.tokens.read().unwrap().refresh.clone()
    }

    fn token(&self) -> String {
        self.tokens.read().unwrap().access.as_str().to_string()
    }

    /// An auth-classified protocol error means the session is gone.
    fn map_auth(err: Error) -> Error {
        match err {
            Error::Protocol(p) if p.is_auth_error() => AuthError::SessionExpired.into(),
            other => other,
        }
    }
}

#[async_trait]
impl Gateway for GraphqlGateway {
    fn backend(&self) -> &BackendUrl {
        &self.backend
    }

    #[instrument(skip(self), fields(backend = %self.backend))]
    async fn list_notes(&self) -> Result<ListNotesOutput> {
        debug!("Listing notes");

        let token = self.token();
        let variables = ListNotesVariables {
            limit: None,
            next_token: None,
        };

        let data: ListNotesData = self
            .client
            .execute("ListNotes", LIST_NOTES, &variables, Some(&token))
            .await
            .map_err(Self::map_auth)?;

        Ok(ListNotesOutput {
            notes: data.list_notes.items,
            cursor: data.list_notes.next_token,
        })
    }

    #[instrument(skip(self, draft), fields(backend = %self.backend))]
    async fn create_note(&self, draft: &Draft) -> Result<Note> {
        debug!(name = %draft.name, "Creating note");

        let token = self.token();
        let variables = CreateNoteVariables {
            input: CreateNoteInput {
                name: &draft.name,
                description: &draft.description,
                image: draft.image_key.as_ref().map(|k| k.as_str()),
            },
        };

        let data: CreateNoteData = self
            .client
            .execute("CreateNote", CREATE_NOTE, &variables, Some(&token))
            .await
            .map_err(Self::map_auth)?;

        Ok(data.create_note)
    }

    #[instrument(skip(self), fields(backend = %self.backend, %id))]
    async fn delete_note(&self, id: &NoteId) -> Result<()> {
        debug!("Deleting note");

        let token = self.token();
        let variables = DeleteNoteVariables {
            input: DeleteNoteInput { id: id.as_str() },
        };

        let _: DeleteNoteData = self
            .client
            .execute("DeleteNote", DELETE_NOTE, &variables, Some(&token))
            .await
            .map_err(Self::map_auth)?;

        Ok(())
    }

    #[instrument(skip(self, bytes), fields(backend = %self.backend, %key, len = bytes.len()))]
    async fn put_object(&self, key: &ObjectKey, bytes: Vec<u8>) -> Result<()> {
        debug!("Uploading object");

        let token = self.token();
        self.client
            .put_bytes(&self.backend.object_url(key), bytes, &token)
            .await
            .map_err(Self::map_auth)
    }

    #[instrument(skip(self), fields(backend = %self.backend, %key))]
    async fn get_object_url(&self, key: &ObjectKey) -> Result<String> {
        debug!("Resolving object URL");

        let token = self.token();
        let response: ObjectUrlResponse = self
            .client
            .get_json(&self.backend.object_resolve_url(key), &token)
            .await
            .map_err(Self::map_auth)?;

        Ok(response.url)
    }
}

impl std::fmt::Debug for GraphqlGateway {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphqlGateway")
            .field("backend", &self.backend)
            .field("tokens", &"[REDACTED]")
            .finish()
    }
}
