//! Invocation validation.

use tracing::instrument;

use mimecast_api::MimecastApiClient;
use mimecast_auth::Credentials;
use mimecast_client::ClientConfig;

use crate::error::{Error, ErrorKind, Result};

/// Check an invocation before any step runs.
///
/// Incomplete or malformed credentials are a validation error and no request
/// is made. Otherwise the credentials are verified against the provider and
/// the ready client is returned.
#[instrument(skip(credentials, config))]
pub async fn validate_invocation(
    credentials: Credentials,
    config: ClientConfig,
) -> Result<MimecastApiClient> {
    credentials
        .validate()
        .map_err(|e| Error::with_source(ErrorKind::Validation(e.to_string()), e))?;

    let client = MimecastApiClient::with_config(credentials, config)?;
    client.verify_authentication().await?;
    Ok(client)
}
