//! Mimecast resource accessors.

use serde::Serialize;
use tracing::instrument;

use mimecast_auth::Credentials;
use mimecast_client::{paginate, ApiRequest, ClientConfig, MimecastClient, Page, Result};

use crate::endpoints;
use crate::types::{Account, AwarenessCampaign, CampaignUserData, Domain, User, UserListing};

#[derive(Serialize)]
struct DomainFilter<'a> {
    domain: &'a str,
}

#[derive(Serialize)]
struct CampaignFilter<'a> {
    id: &'a str,
}

/// Typed access to the Mimecast resources the connector collects.
///
/// Each method only shapes the request and narrows the response; signing,
/// retries, envelope validation, defect recovery and pagination all happen
/// in [`MimecastClient`].
///
/// # Example
///
/// ```rust,ignore
/// use mimecast_api::MimecastApiClient;
/// use mimecast_auth::Credentials;
///
/// let client = MimecastApiClient::new(Credentials::from_env()?)?;
/// client.verify_authentication().await?;
///
/// for domain in client.get_domains().await? {
///     let users = client.get_users(&domain.domain).await?;
///     println!("{}: {} users", domain.domain, users.len());
/// }
/// ```
#[derive(Debug, Clone)]
pub struct MimecastApiClient {
    client: MimecastClient,
}

impl MimecastApiClient {
    /// Create a client against the default host.
    pub fn new(credentials: Credentials) -> Result<Self> {
        Ok(Self {
            client: MimecastClient::new(credentials)?,
        })
    }

    /// Create a client with custom HTTP configuration.
    pub fn with_config(credentials: Credentials, config: ClientConfig) -> Result<Self> {
        Ok(Self {
            client: MimecastClient::with_config(credentials, config)?,
        })
    }

    pub fn from_client(client: MimecastClient) -> Self {
        Self { client }
    }

    /// Get the underlying MimecastClient.
    pub fn inner(&self) -> &MimecastClient {
        &self.client
    }

    // =========================================================================
    // Account
    // =========================================================================

    /// Confirm the credentials are accepted by the provider.
    ///
    /// Any failure, including a missing account record, is reported as an
    /// authentication error.
    #[instrument(skip(self))]
    pub async fn verify_authentication(&self) -> Result<()> {
        let request = ApiRequest::new(endpoints::ACCOUNT).authentication();
        self.client
            .fetch_one::<serde_json::Value>(&request)
            .await
            .map(|_| ())
    }

    /// Fetch the customer account; an empty response is a not-found error.
    #[instrument(skip(self))]
    pub async fn get_account(&self) -> Result<Account> {
        self.client
            .fetch_one(&ApiRequest::new(endpoints::ACCOUNT))
            .await
    }

    // =========================================================================
    // Domains and users
    // =========================================================================

    /// List every internal domain.
    ///
    /// The provider answers in one page, but continuation cursors are
    /// followed if present.
    #[instrument(skip(self))]
    pub async fn get_domains(&self) -> Result<Vec<Domain>> {
        let endpoint = self.client.url(endpoints::INTERNAL_DOMAINS);
        paginate::collect_all(&endpoint, move |cursor| {
            let request = ApiRequest::new(endpoints::INTERNAL_DOMAINS)
                .paginate(self.client.page_size(), cursor.as_deref());
            async move { self.client.fetch_page(&request).await }
        })
        .await
    }

    /// Fetch one page of the users of a domain.
    #[instrument(skip(self))]
    pub async fn get_user_batch(&self, domain: &str, cursor: Option<&str>) -> Result<Page<User>> {
        let request = ApiRequest::new(endpoints::INTERNAL_USERS)
            .datum(&DomainFilter { domain })?
            .paginate(self.client.page_size(), cursor);

        let envelope = self.client.fetch::<UserListing>(&request).await?;
        let next_cursor = envelope.next_cursor().map(str::to_string);
        let users = envelope
            .data
            .into_iter()
            .flat_map(|listing| listing.users)
            .collect();

        Ok(Page::new(users, next_cursor))
    }

    /// List every user of a domain, following all pages.
    #[instrument(skip(self))]
    pub async fn get_users(&self, domain: &str) -> Result<Vec<User>> {
        let endpoint = self.client.url(endpoints::INTERNAL_USERS);
        paginate::collect_all(&endpoint, move |cursor| async move {
            self.get_user_batch(domain, cursor.as_deref()).await
        })
        .await
    }

    // =========================================================================
    // Awareness training
    // =========================================================================

    /// List awareness training campaigns; none is an empty list.
    #[instrument(skip(self))]
    pub async fn get_awareness_campaigns(&self) -> Result<Vec<AwarenessCampaign>> {
        let endpoint = self.client.url(endpoints::AWARENESS_CAMPAIGNS);
        paginate::collect_all(&endpoint, move |cursor| {
            let request = ApiRequest::new(endpoints::AWARENESS_CAMPAIGNS)
                .paginate(self.client.page_size(), cursor.as_deref());
            async move { self.client.fetch_page(&request).await }
        })
        .await
    }

    /// Fetch one page of per-user enrollment data for a campaign.
    #[instrument(skip(self))]
    pub async fn get_awareness_campaign_user_data_batch(
        &self,
        campaign_id: &str,
        cursor: Option<&str>,
    ) -> Result<Page<CampaignUserData>> {
        let request = ApiRequest::new(endpoints::AWARENESS_CAMPAIGN_USER_DATA)
            .datum(&CampaignFilter { id: campaign_id })?
            .paginate(self.client.page_size(), cursor);

        self.client.fetch_page(&request).await
    }

    /// All enrollment data for a campaign, following all pages.
    #[instrument(skip(self))]
    pub async fn get_awareness_campaign_user_data(
        &self,
        campaign_id: &str,
    ) -> Result<Vec<CampaignUserData>> {
        let endpoint = self.client.url(endpoints::AWARENESS_CAMPAIGN_USER_DATA);
        paginate::collect_all(&endpoint, move |cursor| async move {
            self.get_awareness_campaign_user_data_batch(campaign_id, cursor.as_deref())
                .await
        })
        .await
    }
}
