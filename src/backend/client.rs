//! REST client for the hosted V-Fire backend
//!
//! Speaks the service's PostgREST-style row API plus its storage and
//! auth endpoints. All three collaborator traits are implemented on the
//! one client; the acting user is resolved once at connect time from
//! the configured access token.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;

use crate::config::TuiConfig;
use crate::state::wizard::FileHandle;
use crate::state::Establishment;

use super::traits::{BackendError, FileStore, RecordStore, SessionProvider};

/// Storage bucket holding wizard document uploads
const DOCUMENTS_BUCKET: &str = "establishment_documents";

pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    access_token: String,
    user_id: Option<String>,
}

impl BackendClient {
    /// Build the client and resolve the signed-in user. A failed auth
    /// lookup leaves the client usable but unauthenticated; submission
    /// refuses later through [`SessionProvider::current_user`].
    pub async fn connect(config: &TuiConfig) -> Self {
        let mut client = Self {
            http: reqwest::Client::new(),
            base_url: config.backend_url().trim_end_matches('/').to_string(),
            api_key: config.api_key.clone().unwrap_or_default(),
            access_token: config.access_token.clone().unwrap_or_default(),
            user_id: None,
        };
        if !client.access_token.is_empty() {
            match client.fetch_user().await {
                Ok(id) => client.user_id = Some(id),
                Err(err) => tracing::warn!(error = %err, "could not resolve session user"),
            }
        }
        client
    }

    pub fn user_id(&self) -> Option<&str> {
        self.user_id.as_deref()
    }

    fn request(&self, method: reqwest::Method, url: String) -> reqwest::RequestBuilder {
        self.http
            .request(method, url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.access_token)
    }

    /// Reject non-2xx responses with the body as the message
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, BackendError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let message = response.text().await.unwrap_or_default();
        Err(BackendError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn fetch_user(&self) -> Result<String, BackendError> {
        let url = format!("{}/auth/v1/user", self.base_url);
        let response = self.request(reqwest::Method::GET, url).send().await?;
        let body: Value = Self::check_status(response).await?.json().await?;
        body["id"]
            .as_str()
            .map(str::to_string)
            .ok_or(BackendError::NotSignedIn)
    }
}

/// Storage object key for an uploaded document, mirroring the service's
/// `{owner}/{record}/{timestamp}_{field}.{ext}` layout
fn object_path(owner_id: &str, record_id: &str, field: &str, file: &FileHandle) -> String {
    let ext = file.extension().unwrap_or_else(|| "bin".to_string());
    format!(
        "{owner_id}/{record_id}/{}_{field}.{ext}",
        Utc::now().timestamp_millis()
    )
}

#[async_trait]
impl RecordStore for BackendClient {
    async fn exists(
        &self,
        collection: &str,
        column: &str,
        value: &str,
    ) -> Result<bool, BackendError> {
        let url = format!("{}/rest/v1/{collection}", self.base_url);
        let filter = format!("eq.{value}");
        let response = self
            .request(reqwest::Method::GET, url)
            .query(&[("select", "id"), (column, filter.as_str()), ("limit", "1")])
            .send()
            .await?;
        let rows: Vec<Value> = Self::check_status(response).await?.json().await?;
        Ok(!rows.is_empty())
    }

    async fn create(&self, collection: &str, record: Value) -> Result<String, BackendError> {
        let url = format!("{}/rest/v1/{collection}", self.base_url);
        let requested_id = record["id"].as_str().unwrap_or_default().to_string();
        let response = self
            .request(reqwest::Method::POST, url)
            .header("Prefer", "return=representation")
            .json(&record)
            .send()
            .await?;
        let rows: Vec<Value> = Self::check_status(response).await?.json().await?;
        let id = rows
            .first()
            .and_then(|row| row["id"].as_str())
            .map(str::to_string)
            .unwrap_or(requested_id);
        Ok(id)
    }

    async fn list_establishments(
        &self,
        owner_id: &str,
    ) -> Result<Vec<Establishment>, BackendError> {
        let url = format!("{}/rest/v1/establishments", self.base_url);
        let filter = format!("eq.{owner_id}");
        let response = self
            .request(reqwest::Method::GET, url)
            .query(&[
                ("select", "id,name,dti_number,address,status,date_registered"),
                ("owner_id", filter.as_str()),
                ("order", "name.asc"),
            ])
            .send()
            .await?;
        let rows = Self::check_status(response).await?.json().await?;
        Ok(rows)
    }
}

#[async_trait]
impl FileStore for BackendClient {
    async fn upload(
        &self,
        owner_id: &str,
        record_id: &str,
        field: &str,
        file: &FileHandle,
    ) -> Result<String, BackendError> {
        let path = object_path(owner_id, record_id, field, file);
        let bytes = tokio::fs::read(&file.path).await?;
        let url = format!("{}/storage/v1/object/{DOCUMENTS_BUCKET}/{path}", self.base_url);
        let response = self
            .request(reqwest::Method::POST, url)
            .body(bytes)
            .send()
            .await?;
        Self::check_status(response).await?;
        Ok(path)
    }
}

#[async_trait]
impl SessionProvider for BackendClient {
    async fn current_user(&self) -> Option<String> {
        self.user_id.clone()
    }
}
