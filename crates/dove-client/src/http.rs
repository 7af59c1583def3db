//! REST client for the Dove Ministries backend.

use reqwest::{Client, Method, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};
use url::Url;

use dove_types::api::{
    BroadcastsResponse, ContactInfoResponse, DevotionResponse, DevotionsResponse,
    DonationsResponse, EventsResponse, LoginRequest, LoginResponse, MinistriesResponse,
    PodcastsResponse, SavedResponse, UsersResponse,
};
use dove_types::models::{
    ContactInfo, DevotionRecord, DonationRecord, EventRecord, LiveRecord, MinistryRecord,
    PodcastRecord, UserRecord,
};

use crate::auth::{AuthContext, Session};
use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::forms::{AdminForm, ContactInfoForm};

pub const USER_AGENT: &str = concat!("dove-client/", env!("CARGO_PKG_VERSION"));

/// Thin typed wrapper over the JSON API. Stateless: session tokens are
/// passed in per call through [`AuthContext`].
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: Url,
}

impl ApiClient {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.http_timeout)
            .build()?;
        Ok(Self::with_client(client, config.api_url.clone()))
    }

    /// Use a caller-provided reqwest client, e.g. to share a connection pool.
    pub fn with_client(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::config(format!("{} cannot be a base URL", self.base_url)))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(&self, method: Method, segments: &[&str], token: Option<&str>) -> Result<RequestBuilder> {
        let url = self.endpoint(segments)?;
        debug!("{} {}", method, url);
        let builder = self.client.request(method, url);
        Ok(match token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        })
    }

    async fn send(builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(Error::Status {
                endpoint: response.url().path().to_string(),
                status,
            });
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str], token: Option<&str>) -> Result<T> {
        let response = Self::send(self.request(Method::GET, segments, token)?).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B, T>(&self, method: Method, segments: &[&str], token: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.request(method, segments, Some(token))?.json(body);
        let response = Self::send(builder).await?;
        Ok(response.json().await?)
    }

    // -- Auth --

    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let builder = self.request(Method::POST, &["auth", "login"], None)?.json(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        });
        let response: LoginResponse = Self::send(builder).await?.json().await?;
        Session::from_token(&response.token)
    }

    // -- Member-facing content --

    pub async fn list_podcasts(&self) -> Result<Vec<PodcastRecord>> {
        let body: PodcastsResponse = self.get_json(&["podcasts"], None).await?;
        Ok(body.podcasts)
    }

    pub async fn list_live_broadcasts(&self) -> Result<Vec<LiveRecord>> {
        let body: BroadcastsResponse = self.get_json(&["live-broadcasts"], None).await?;
        Ok(body.broadcasts)
    }

    pub async fn list_devotions(&self) -> Result<Vec<DevotionRecord>> {
        let body: DevotionsResponse = self.get_json(&["devotions"], None).await?;
        Ok(body.devotions)
    }

    pub async fn get_devotion(&self, id: &str) -> Result<DevotionRecord> {
        let body: DevotionResponse = self.get_json(&["devotions", id], None).await?;
        Ok(body.devotion)
    }

    pub async fn list_events(&self) -> Result<Vec<EventRecord>> {
        let body: EventsResponse = self.get_json(&["events"], None).await?;
        Ok(body.events)
    }

    pub async fn list_ministries(&self) -> Result<Vec<MinistryRecord>> {
        let body: MinistriesResponse = self.get_json(&["ministries"], None).await?;
        Ok(body.ministries)
    }

    pub async fn get_contact_info(&self) -> Result<ContactInfo> {
        let body: ContactInfoResponse = self.get_json(&["contact-info"], None).await?;
        Ok(body.contact_info)
    }

    /// Record the saved state of a devotion server-side. Returns the state
    /// the server reports.
    pub async fn set_devotion_saved(&self, token: &str, devotion_id: &str, saved: bool) -> Result<bool> {
        let method = if saved { Method::POST } else { Method::DELETE };
        let builder = self.request(method, &["devotions", devotion_id, "save"], Some(token))?;
        let body: SavedResponse = Self::send(builder).await?.json().await?;
        Ok(body.saved)
    }

    // -- Admin --

    pub async fn list_donations(&self, auth: &AuthContext) -> Result<Vec<DonationRecord>> {
        let token = auth.admin_token()?;
        let body: DonationsResponse = self.get_json(&["donations"], Some(&token)).await?;
        Ok(body.donations)
    }

    pub async fn list_users(&self, auth: &AuthContext) -> Result<Vec<UserRecord>> {
        let token = auth.admin_token()?;
        let body: UsersResponse = self.get_json(&["users"], Some(&token)).await?;
        Ok(body.users)
    }

    pub async fn admin_create<F: AdminForm>(&self, auth: &AuthContext, form: &F) -> Result<serde_json::Value> {
        let token = auth.admin_token()?;
        form.validate()?;
        self.send_json(Method::POST, &[F::COLLECTION], &token, form).await
    }

    pub async fn admin_update<F: AdminForm>(
        &self,
        auth: &AuthContext,
        id: &str,
        form: &F,
    ) -> Result<serde_json::Value> {
        let token = auth.admin_token()?;
        form.validate()?;
        self.send_json(Method::PUT, &[F::COLLECTION, id], &token, form).await
    }

    pub async fn admin_delete<F: AdminForm>(&self, auth: &AuthContext, id: &str) -> Result<()> {
        let token = auth.admin_token()?;
        Self::send(self.request(Method::DELETE, &[F::COLLECTION, id], Some(&token))?).await?;
        Ok(())
    }

    pub async fn update_contact_info(&self, auth: &AuthContext, form: &ContactInfoForm) -> Result<ContactInfo> {
        let token = auth.admin_token()?;
        form.validate()?;
        let body: ContactInfoResponse = self
            .send_json(Method::PUT, &["contact-info"], &token, form)
            .await?;
        Ok(body.contact_info)
    }
}

/// Fall back to `fallback` when a background load fails. Nothing is shown
/// to the user; the failure is only logged.
pub fn recover<T>(what: &str, result: Result<T>, fallback: impl FnOnce() -> T) -> T {
    match result {
        Ok(value) => value,
        Err(e) if e.is_network_failure() => {
            warn!("Failed to load {}: {}", what, e);
            fallback()
        }
        Err(e) => {
            error!("Failed to load {}: {}", what, e);
            fallback()
        }
    }
}
