//! Session storage for persisting login state.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use memo_core::{AccessToken, BackendUrl, Gateway, RefreshToken};
use memo_file::FileGateway;
use memo_graphql::GraphqlGateway;

use super::CliGateway;

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

/// Stored session data.
///
/// File backends need no tokens; the account is the directory.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    backend: String,
    username: Option<String>,
    access_token: Option<String>,
    refresh_token: Option<String>,
}

/// A loaded session: the gateway plus who is signed in.
#[derive(Debug)]
pub struct ActiveSession {
    pub gateway: CliGateway,
    pub username: Option<String>,
}

/// Get the session file path.
fn session_path() -> Result<PathBuf> {
    let dirs = ProjectDirs::from("", "", "memo").context("Could not determine config directory")?;

    let data_dir = dirs.data_dir();
    fs::create_dir_all(data_dir).context("Failed to create data directory")?;

    Ok(data_dir.join("session.json"))
}

/// Save a session to disk.
pub fn save_session(gateway: &CliGateway, username: Option<&str>) -> Result<()> {
    let (access_token, refresh_token) = match gateway {
        CliGateway::File(_) => (None, None),
        CliGateway::Graphql(gw) => (
            Some(gw.access_token().as_str().to_string()),
            gw.refresh_token().map(|t| t.as_str().to_string()),
        ),
    };

    let stored = StoredSession {
        backend: gateway.backend().to_string(),
        username: username.map(|u| u.to_string()),
        access_token,
        refresh_token,
    };

    let path = session_path()?;
    let json = serde_json::to_string_pretty(&stored)?;

    fs::write(&path, &json).context("Failed to write session file")?;

    // Set restrictive permissions (Unix only)
    #[cfg(unix)]
    {
        let mut perms = fs::metadata(&path)?.permissions();
        perms.set_mode(0o600);
        fs::set_permissions(&path, perms)?;
    }

    Ok(())
}

/// Load a session from disk.
pub async fn load_session() -> Result<Option<ActiveSession>> {
    let path = session_path()?;

    if !path.exists() {
        return Ok(None);
    }

    let json = fs::read_to_string(&path).context("Failed to read session file")?;
    let stored: StoredSession = serde_json::from_str(&json).context("Invalid session file")?;

    let backend = BackendUrl::new(&stored.backend).context("Invalid backend URL in session")?;

    let gateway = if backend.is_local() {
        CliGateway::File(FileGateway::from_backend(backend)?)
    } else {
        let access_token = stored
            .access_token
            .map(AccessToken::new)
            .context("Session has no access token. Run 'memo login' again.")?;
        let refresh_token = stored.refresh_token.map(RefreshToken::new);

        let gateway = GraphqlGateway::from_tokens(backend, access_token, refresh_token);
        if let Err(e) = gateway.refresh_session().await {
            tracing::warn!(error = %e, "Failed to refresh session, using existing tokens");
        }
        CliGateway::Graphql(gateway)
    };

    Ok(Some(ActiveSession {
        gateway,
        username: stored.username,
    }))
}

/// Resolve the gateway for a data command.
///
/// An explicit `--backend` wins over the stored session; a `file://`
/// backend needs no login at all. A network backend always goes
/// through the stored session, which must point at the same backend.
pub async fn resolve_session(backend: Option<&str>) -> Result<ActiveSession> {
    let Some(raw) = backend else {
        return load_session()
            .await?
            .context("No active session. Run 'memo login' first.");
    };

    let backend = BackendUrl::new(raw).context("Invalid backend URL")?;

    if backend.is_local() {
        return Ok(ActiveSession {
            gateway: CliGateway::File(FileGateway::from_backend(backend)?),
            username: None,
        });
    }

    let session = load_session()
        .await?
        .context("No active session. Run 'memo login' first.")?;

    anyhow::ensure!(
        session.gateway.backend().as_str() == backend.as_str(),
        "Stored session is for {}, not {}. Run 'memo login' again.",
        session.gateway.backend(),
        backend
    );

    Ok(session)
}

/// Clear the stored session. Returns true if one existed.
pub fn clear_session() -> Result<bool> {
    let path = session_path()?;

    if path.exists() {
        fs::remove_file(&path).context("Failed to remove session file")?;
        return Ok(true);
    }

    Ok(false)
}
