//! Service-account credential loading.
//!
//! The credential file is the JSON key downloaded for a service account. Only
//! the fields needed to pick the project are read; everything else is ignored.

use camino::{Utf8Path, Utf8PathBuf};
use serde::Deserialize;
use thiserror::Error;
use tracing::debug;

pub const SERVICE_ACCOUNT_TYPE: &str = "service_account";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceAccount {
    #[serde(rename = "type", default)]
    pub kind: String,

    #[serde(default)]
    pub project_id: String,

    #[serde(default)]
    pub client_email: Option<String>,
}

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("service account file not found: {path}")]
    NotFound { path: Utf8PathBuf },

    #[error("cannot read service account file {path}: {source}")]
    Unreadable {
        path: Utf8PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("service account file {path} is not valid json: {source}")]
    Malformed {
        path: Utf8PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("service account file {path} is invalid: {reason}")]
    Invalid {
        path: Utf8PathBuf,
        reason: &'static str,
    },
}

/// Read and validate the credential file at `path`.
pub fn load_service_account(path: &Utf8Path) -> Result<ServiceAccount, CredentialError> {
    if !path.is_file() {
        return Err(CredentialError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let text = fs_err::read_to_string(path).map_err(|source| CredentialError::Unreadable {
        path: path.to_path_buf(),
        source,
    })?;
    let account = parse_service_account(&text).map_err(|err| match err {
        ParseFailure::Json(source) => CredentialError::Malformed {
            path: path.to_path_buf(),
            source,
        },
        ParseFailure::Invalid(reason) => CredentialError::Invalid {
            path: path.to_path_buf(),
            reason,
        },
    })?;

    debug!(
        path = path.as_str(),
        project_id = account.project_id.as_str(),
        "loaded service account"
    );
    Ok(account)
}

enum ParseFailure {
    Json(serde_json::Error),
    Invalid(&'static str),
}

fn parse_service_account(text: &str) -> Result<ServiceAccount, ParseFailure> {
    let mut account: ServiceAccount = serde_json::from_str(text).map_err(ParseFailure::Json)?;
    if account.kind != SERVICE_ACCOUNT_TYPE {
        return Err(ParseFailure::Invalid(
            "\"type\" must be \"service_account\"",
        ));
    }
    account.project_id = account.project_id.trim().to_string();
    if account.project_id.is_empty() {
        return Err(ParseFailure::Invalid("\"project_id\" is missing or blank"));
    }
    Ok(account)
}
