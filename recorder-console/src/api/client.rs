//! HTTP client for the recorder backend.

use reqwest::{Method, RequestBuilder, Response, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::ConsoleSettings;
use crate::domain::{ConfigDocument, StreamerEntity, StudioTemplate};
use crate::utils::http_client::build_client;
use crate::{Error, Result};

const CONFIGURATION: &str = "/v1/configuration";
const STREAMERS: &str = "/v1/streamers";
const TEMPLATES: &str = "/v1/upload/streamers";

/// Typed access to the backend REST API.
///
/// Entities are checked before they are sent; a request that fails
/// validation never reaches the network.
#[derive(Debug, Clone)]
pub struct ConsoleClient {
    http: reqwest::Client,
    base_url: String,
    auth: Option<String>,
}

impl ConsoleClient {
    pub fn new(settings: &ConsoleSettings) -> Self {
        Self::with_client(
            build_client(settings.request_timeout),
            settings.base_url(),
            settings.auth.clone(),
        )
    }

    pub fn with_client(http: reqwest::Client, base_url: impl Into<String>, auth: Option<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http,
            base_url,
            auth,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        debug!(%method, %url, "Sending backend request");
        let builder = self.http.request(method, url);
        match &self.auth {
            Some(token) => builder.header(header::AUTHORIZATION, format!("Basic {token}")),
            None => builder,
        }
    }

    async fn send(&self, builder: RequestBuilder) -> Result<Response> {
        let response = builder.send().await?;
        if response.status().is_success() {
            Ok(response)
        } else {
            Err(error_from_response(response).await)
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(self.request(Method::GET, path)).await?;
        Ok(response.json().await?)
    }

    async fn send_json<B, T>(&self, method: Method, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.send(self.request(method, path).json(body)).await?;
        Ok(response.json().await?)
    }

    async fn send_json_discard<B: Serialize + ?Sized>(&self, method: Method, path: &str, body: &B) -> Result<()> {
        self.send(self.request(method, path).json(body)).await?;
        Ok(())
    }

    async fn delete(&self, collection: &str, id: i64) -> Result<()> {
        self.send(self.request(Method::DELETE, &format!("{collection}/{id}")))
            .await?;
        Ok(())
    }

    // Configuration

    pub async fn get_configuration(&self) -> Result<ConfigDocument> {
        self.get_json(CONFIGURATION).await
    }

    /// Replace the whole configuration document.
    pub async fn put_configuration(&self, document: &ConfigDocument) -> Result<()> {
        self.send_json_discard(Method::PUT, CONFIGURATION, document).await
    }

    // Streamers

    pub async fn list_streamers(&self) -> Result<Vec<StreamerEntity>> {
        self.get_json(STREAMERS).await
    }

    /// Create a streamer, returning the backend's copy with its id.
    pub async fn create_streamer(&self, entity: &StreamerEntity) -> Result<StreamerEntity> {
        let mut entity = entity.clone();
        entity.normalize()?;
        entity.id = None;
        self.send_json(Method::POST, STREAMERS, &entity.to_wire()?).await
    }

    /// Full replace of an existing streamer, `override` included.
    pub async fn update_streamer(&self, entity: &StreamerEntity) -> Result<()> {
        if entity.is_new() {
            return Err(Error::validation("id", "streamer has not been created yet"));
        }
        let mut entity = entity.clone();
        entity.normalize()?;
        self.send_json_discard(Method::PUT, STREAMERS, &entity.to_wire()?).await
    }

    pub async fn delete_streamer(&self, id: i64) -> Result<()> {
        self.delete(STREAMERS, id).await
    }

    // Upload templates

    pub async fn list_templates(&self) -> Result<Vec<StudioTemplate>> {
        self.get_json(TEMPLATES).await
    }

    pub async fn get_template(&self, id: i64) -> Result<StudioTemplate> {
        self.get_json(&format!("{TEMPLATES}/{id}")).await
    }

    pub async fn create_template(&self, template: &StudioTemplate) -> Result<StudioTemplate> {
        template.validate()?;
        let mut template = template.clone();
        template.id = None;
        self.send_json(Method::POST, TEMPLATES, &template).await
    }

    /// Templates are updated by posting them with their id.
    pub async fn update_template(&self, template: &StudioTemplate) -> Result<StudioTemplate> {
        if template.is_new() {
            return Err(Error::validation("id", "template has not been created yet"));
        }
        template.validate()?;
        self.send_json(Method::POST, TEMPLATES, template).await
    }

    pub async fn delete_template(&self, id: i64) -> Result<()> {
        self.delete(TEMPLATES, id).await
    }
}

/// Turn a non-success response into [`Error::Api`].
///
/// The message is the body's `message` field when the body is a JSON object
/// carrying one, otherwise the raw body text.
async fn error_from_response(response: Response) -> Error {
    let status = response.status();
    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => {
            warn!(status = status.as_u16(), error = %e, "Failed to read error body");
            String::new()
        }
    };

    let message = match serde_json::from_str::<Value>(&body) {
        Ok(Value::Object(map)) => match map.get("message").and_then(Value::as_str) {
            Some(message) => message.to_string(),
            None => body,
        },
        _ => body,
    };
    let message = if message.trim().is_empty() {
        status.canonical_reason().unwrap_or("request failed").to_string()
    } else {
        message
    };

    warn!(status = status.as_u16(), message = %message, "Backend request failed");
    Error::Api {
        status: status.as_u16(),
        message,
    }
}
