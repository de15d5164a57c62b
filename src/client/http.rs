use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::domain::{Character, CharacterId, CharacterPatch, NewCharacter};
use crate::web::ErrorResponse;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("server returned {status}: {message}")]
    Server { status: u16, message: String },
}

pub type ClientResult<T> = Result<T, ClientError>;

/// Thin typed wrapper around the roster's REST endpoints.
#[derive(Debug, Clone)]
pub struct RosterClient {
    base_url: String,
    http: reqwest::Client,
}

impl RosterClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn list(&self) -> ClientResult<Vec<Character>> {
        let response = self.http.get(self.url("/characters")).send().await?;
        decode(response).await
    }

    pub async fn get(&self, id: CharacterId) -> ClientResult<Character> {
        let response = self.http.get(self.character_url(id)).send().await?;
        decode(response).await
    }

    pub async fn create(&self, payload: &NewCharacter) -> ClientResult<Character> {
        let response = self
            .http
            .post(self.url("/characters"))
            .json(payload)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn update(&self, id: CharacterId, patch: &CharacterPatch) -> ClientResult<Character> {
        let response = self
            .http
            .put(self.character_url(id))
            .json(patch)
            .send()
            .await?;
        decode(response).await
    }

    pub async fn delete(&self, id: CharacterId) -> ClientResult<Character> {
        let response = self.http.delete(self.character_url(id)).send().await?;
        decode(response).await
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn character_url(&self, id: CharacterId) -> String {
        format!("{}/characters/{}", self.base_url, id)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    if status.is_success() {
        return Ok(response.json::<T>().await?);
    }

    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ErrorResponse>(&body)
        .map(|err| err.error)
        .unwrap_or(body);

    if status == StatusCode::NOT_FOUND {
        Err(ClientError::NotFound(message))
    } else {
        Err(ClientError::Server {
            status: status.as_u16(),
            message,
        })
    }
}
