//! The backend contract as an injectable trait
//!
//! The app layer never builds HTTP requests itself: it describes an
//! [`ApiCall`] and the network actor runs it against whatever `MovieApi`
//! it was given (the real HTTP gateway, or a fake in tests).

use async_trait::async_trait;

use crate::error::Result;
use crate::messages::{ApiCall, ApiReply};
use crate::models::{
    AuthResponse, LoginRequest, Movie, MovieDraft, ProfileUpdate, ProfileUpdated,
    RegisterRequest, Review, ReviewDraft, User,
};

/// One operation per backend endpoint
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `POST /users/auth`
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse>;

    /// `POST /users/`
    async fn register(&self, account: &RegisterRequest) -> Result<AuthResponse>;

    /// `GET /users/profile`
    async fn get_profile(&self) -> Result<User>;

    /// `PUT /users/profile`
    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileUpdated>;

    /// `GET /movies`
    async fn list_movies(&self) -> Result<Vec<Movie>>;

    /// `GET /movies/:id`
    async fn get_movie(&self, id: &str) -> Result<Movie>;

    /// `POST /movies`
    async fn create_movie(&self, movie: &MovieDraft) -> Result<Movie>;

    /// `PUT /movies/:id`
    async fn update_movie(&self, id: &str, movie: &MovieDraft) -> Result<Movie>;

    /// `DELETE /movies/:id`
    async fn delete_movie(&self, id: &str) -> Result<()>;

    /// `GET /movies/:id/reviews`
    async fn list_reviews(&self, movie_id: &str) -> Result<Vec<Review>>;

    /// `POST /movies/:id/reviews`
    async fn create_review(&self, movie_id: &str, review: &ReviewDraft) -> Result<Review>;
}

impl ApiCall {
    /// Run this call against a gateway
    pub async fn execute(self, api: &dyn MovieApi) -> Result<ApiReply> {
        match self {
            ApiCall::Login(credentials) => api.login(&credentials).await.map(ApiReply::Auth),
            ApiCall::Register(account) => api.register(&account).await.map(ApiReply::Auth),
            ApiCall::GetProfile => api.get_profile().await.map(ApiReply::Profile),
            ApiCall::UpdateProfile(update) => api
                .update_profile(&update)
                .await
                .map(ApiReply::ProfileUpdated),
            ApiCall::ListMovies => api.list_movies().await.map(ApiReply::Movies),
            ApiCall::GetMovie(id) => api.get_movie(&id).await.map(ApiReply::Movie),
            ApiCall::CreateMovie(movie) => api.create_movie(&movie).await.map(ApiReply::Movie),
            ApiCall::UpdateMovie { id, movie } => {
                api.update_movie(&id, &movie).await.map(ApiReply::Movie)
            }
            ApiCall::DeleteMovie(id) => {
                api.delete_movie(&id).await?;
                Ok(ApiReply::MovieDeleted(id))
            }
            ApiCall::ListReviews(movie_id) => {
                api.list_reviews(&movie_id).await.map(ApiReply::Reviews)
            }
            ApiCall::CreateReview { movie_id, review } => api
                .create_review(&movie_id, &review)
                .await
                .map(ApiReply::ReviewCreated),
        }
    }
}
