//! HTTP implementation of the gateway

use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder};
use serde_json::Value;
use std::time::{Duration, Instant};

use crate::error::{ApiError, Result};
use crate::models::{
    AuthResponse, LoginRequest, Movie, MovieDraft, ProfileUpdate, ProfileUpdated,
    RegisterRequest, Review, ReviewDraft, User,
};
use crate::network::gateway::MovieApi;
use crate::network::payload;
use crate::storage::{self, SharedStorage};

/// Backend paths, relative to the configured base URL
pub mod endpoints {
    pub const LOGIN: &str = "/users/auth";
    pub const REGISTER: &str = "/users/";
    pub const PROFILE: &str = "/users/profile";
    pub const MOVIES: &str = "/movies";

    pub fn movie(id: &str) -> String {
        format!("/movies/{}", id)
    }

    pub fn reviews(movie_id: &str) -> String {
        format!("/movies/{}/reviews", movie_id)
    }
}

/// Gateway talking JSON over HTTP, authenticating with the cached token
pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
    storage: SharedStorage,
}

impl HttpGateway {
    pub fn new(base_url: impl Into<String>, storage: SharedStorage) -> Self {
        HttpGateway {
            client: create_client(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            storage,
        }
    }

    /// Build a request with the JSON content type and, when a credential is
    /// cached, the bearer header
    pub fn build_request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req_builder = self
            .client
            .request(method, &url)
            .header(CONTENT_TYPE, "application/json");

        let token = storage::lock(&self.storage).token().map(str::to_string);
        if let Some(token) = token {
            req_builder = req_builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        req_builder
    }

    /// Send a request and return the parsed JSON body of a 2xx response
    async fn execute(&self, req_builder: RequestBuilder) -> Result<Value> {
        let start = Instant::now();
        let response = req_builder
            .send()
            .await
            .map_err(|e| ApiError::from_transport(&e))?;

        let status = response.status();
        let url = response.url().path().to_string();
        let body = response
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("Error reading body: {}", e)))?;

        tracing::debug!(
            path = %url,
            status = status.as_u16(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Backend responded"
        );

        if !status.is_success() {
            return Err(ApiError::from_response(status.as_u16(), &body));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }
        serde_json::from_str(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get(&self, path: &str) -> Result<Value> {
        self.execute(self.build_request(Method::GET, path)).await
    }

    async fn send_json<B: serde::Serialize + ?Sized + Sync>(
        &self,
        method: Method,
        path: &str,
        body: &B,
    ) -> Result<Value> {
        self.execute(self.build_request(method, path).json(body)).await
    }
}

#[async_trait]
impl MovieApi for HttpGateway {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let value = self
            .send_json(Method::POST, endpoints::LOGIN, credentials)
            .await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn register(&self, account: &RegisterRequest) -> Result<AuthResponse> {
        let value = self
            .send_json(Method::POST, endpoints::REGISTER, account)
            .await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get_profile(&self) -> Result<User> {
        let value = self.get(endpoints::PROFILE).await?;
        serde_json::from_value(value).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileUpdated> {
        let value = self
            .send_json(Method::PUT, endpoints::PROFILE, update)
            .await?;
        payload::profile_updated(value)
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        payload::movies(self.get(endpoints::MOVIES).await?)
    }

    async fn get_movie(&self, id: &str) -> Result<Movie> {
        payload::movie(self.get(&endpoints::movie(id)).await?)
    }

    async fn create_movie(&self, movie: &MovieDraft) -> Result<Movie> {
        let value = self
            .send_json(Method::POST, endpoints::MOVIES, movie)
            .await?;
        payload::movie(value)
    }

    async fn update_movie(&self, id: &str, movie: &MovieDraft) -> Result<Movie> {
        let value = self
            .send_json(Method::PUT, &endpoints::movie(id), movie)
            .await?;
        payload::movie(value)
    }

    async fn delete_movie(&self, id: &str) -> Result<()> {
        self.execute(self.build_request(Method::DELETE, &endpoints::movie(id)))
            .await
            .map(|_| ())
    }

    async fn list_reviews(&self, movie_id: &str) -> Result<Vec<Review>> {
        payload::reviews(self.get(&endpoints::reviews(movie_id)).await?)
    }

    async fn create_review(&self, movie_id: &str, review: &ReviewDraft) -> Result<Review> {
        let value = self
            .send_json(Method::POST, &endpoints::reviews(movie_id), review)
            .await?;
        payload::review(value)
    }
}

/// Create an HTTP client with default configuration
pub fn create_client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(30))
        .build()
        .unwrap_or_else(|_| reqwest::Client::new())
}
