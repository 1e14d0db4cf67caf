use async_trait::async_trait;
use log::{error, warn};
use reqwest::{Client, header};
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;
use url::Url;

use crate::errors::ProviderError;
use crate::language_utils::Language;
use crate::providers::Provider;

/// Public MyMemory endpoint; no API key required
pub const MYMEMORY_API_URL: &str = "https://api.mymemory.translated.net/get";

/// Status the API reports inside the body for a good translation
const SUCCESS_STATUS: u16 = 200;

/// MyMemory client for the `get` endpoint
#[derive(Debug)]
pub struct MyMemory {
    /// HTTP client for API requests
    client: Client,
    /// Endpoint URL
    endpoint: Url,
    /// Contact email, raises the anonymous daily quota
    email: Option<String>,
}

/// Query parameters of a translation request
#[derive(Debug, Clone, Serialize)]
pub struct MyMemoryRequest {
    /// Text to translate
    q: String,

    /// Language pair as `<source>|<target>`
    langpair: String,

    /// Contact email
    #[serde(skip_serializing_if = "Option::is_none")]
    de: Option<String>,
}

impl MyMemoryRequest {
    /// Create a request for one chunk
    pub fn new(text: impl Into<String>, source_language: Language, target_language: Language) -> Self {
        Self {
            q: text.into(),
            langpair: format!("{}|{}", source_language.code(), target_language.code()),
            de: None,
        }
    }

    /// Attach a contact email
    pub fn email(mut self, email: impl Into<String>) -> Self {
        self.de = Some(email.into());
        self
    }

    /// The text being translated
    pub fn text(&self) -> &str {
        &self.q
    }

    /// The `langpair` parameter
    pub fn langpair(&self) -> &str {
        &self.langpair
    }
}

/// Translation payload of a response
#[derive(Debug, Deserialize)]
pub struct ResponseData {
    /// The translated text
    #[serde(rename = "translatedText", default)]
    pub translated_text: Option<String>,
}

/// MyMemory response body
#[derive(Debug, Deserialize)]
pub struct MyMemoryResponse {
    /// Application-level status; sent as a number or a numeric string
    #[serde(rename = "responseStatus", default, deserialize_with = "lenient_status")]
    pub response_status: Option<u16>,

    /// Translation payload
    #[serde(rename = "responseData", default)]
    pub response_data: Option<ResponseData>,

    /// Human-readable detail, usually set on errors
    #[serde(rename = "responseDetails", default)]
    pub response_details: serde_json::Value,
}

impl MyMemoryResponse {
    /// Non-empty translated text, if any
    pub fn translated_text(&self) -> Option<&str> {
        self.response_data
            .as_ref()
            .and_then(|data| data.translated_text.as_deref())
            .filter(|text| !text.is_empty())
    }

    /// Whether the body reports a usable translation
    pub fn is_success(&self) -> bool {
        self.response_status == Some(SUCCESS_STATUS) && self.translated_text().is_some()
    }
}

// Deliberately lenient: a quoted "200" is a success, not a soft failure
fn lenient_status<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(number)) => {
            number.as_u64().and_then(|n| u16::try_from(n).ok())
        }
        Some(serde_json::Value::String(text)) => text.trim().parse().ok(),
        _ => None,
    })
}

impl MyMemory {
    /// Create a new MyMemory client
    pub fn new(endpoint: Url, timeout: Duration) -> Self {
        Self {
            client: Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            endpoint,
            email: None,
        }
    }

    /// Send a contact email with every request
    pub fn with_email(mut self, email: Option<String>) -> Self {
        self.email = email.filter(|e| !e.trim().is_empty());
        self
    }

    /// Build the request for one chunk, with the configured email
    pub fn request(&self, text: &str, source_language: Language, target_language: Language) -> MyMemoryRequest {
        let request = MyMemoryRequest::new(text, source_language, target_language);
        match &self.email {
            Some(email) => request.email(email.clone()),
            None => request,
        }
    }

    /// Full GET URL for a request, with url-encoded query parameters
    pub fn build_url(&self, request: &MyMemoryRequest) -> Url {
        let mut url = self.endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("q", &request.q);
            query.append_pair("langpair", &request.langpair);
            if let Some(email) = &request.de {
                query.append_pair("de", email);
            }
        }
        url
    }

    /// Send one request and decode the body
    ///
    /// A non-success HTTP status is an error; the application status inside
    /// the body is not inspected here.
    pub async fn complete(&self, request: &MyMemoryRequest) -> Result<MyMemoryResponse, ProviderError> {
        let response = self
            .client
            .get(self.build_url(request))
            .header(header::ACCEPT, "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| status.canonical_reason().unwrap_or_default().to_string());
            error!("Translation API error ({}): {}", status, message);
            return Err(ProviderError::ApiError {
                status_code: status.as_u16(),
                message,
            });
        }

        let body = response.text().await?;
        serde_json::from_str::<MyMemoryResponse>(&body)
            .map_err(|e| ProviderError::ParseError(e.to_string()))
    }

    /// Pick the translated text out of a response, or fall back to the
    /// original chunk when the body reports a failure
    pub fn extract_text(original: &str, response: &MyMemoryResponse) -> String {
        match response.translated_text() {
            Some(text) if response.response_status == Some(SUCCESS_STATUS) => text.to_string(),
            _ => {
                warn!(
                    "Translation chunk failed: status {:?} ({})",
                    response.response_status, response.response_details
                );
                original.to_string()
            }
        }
    }
}

#[async_trait]
impl Provider for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
    }

    async fn translate_chunk(
        &self,
        text: &str,
        source_language: Language,
        target_language: Language,
    ) -> Result<String, ProviderError> {
        let request = self.request(text, source_language, target_language);
        let response = self.complete(&request).await?;
        Ok(Self::extract_text(text, &response))
    }

    async fn test_connection(&self) -> Result<(), ProviderError> {
        let request = self.request("Hello", Language::En, Language::Ar);
        let response = self.complete(&request).await?;

        if response.is_success() {
            Ok(())
        } else {
            Err(ProviderError::ApiError {
                status_code: response.response_status.unwrap_or_default(),
                message: response.response_details.to_string(),
            })
        }
    }
}
