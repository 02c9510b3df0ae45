//! Network messages - communication between App and Network layers

use crate::error::ApiError;
use crate::models::{
    AuthResponse, LoginRequest, Movie, MovieDraft, ProfileUpdate, ProfileUpdated,
    RegisterRequest, Review, ReviewDraft, User,
};

/// A backend operation, described as data
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Login(LoginRequest),
    Register(RegisterRequest),
    GetProfile,
    UpdateProfile(ProfileUpdate),
    ListMovies,
    GetMovie(String),
    CreateMovie(MovieDraft),
    UpdateMovie { id: String, movie: MovieDraft },
    DeleteMovie(String),
    ListReviews(String),
    CreateReview { movie_id: String, review: ReviewDraft },
}

impl ApiCall {
    /// Short label for logs
    pub fn name(&self) -> &'static str {
        match self {
            ApiCall::Login(_) => "login",
            ApiCall::Register(_) => "register",
            ApiCall::GetProfile => "get_profile",
            ApiCall::UpdateProfile(_) => "update_profile",
            ApiCall::ListMovies => "list_movies",
            ApiCall::GetMovie(_) => "get_movie",
            ApiCall::CreateMovie(_) => "create_movie",
            ApiCall::UpdateMovie { .. } => "update_movie",
            ApiCall::DeleteMovie(_) => "delete_movie",
            ApiCall::ListReviews(_) => "list_reviews",
            ApiCall::CreateReview { .. } => "create_review",
        }
    }
}

/// Successful result of an [`ApiCall`]
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply {
    Auth(AuthResponse),
    Profile(User),
    ProfileUpdated(ProfileUpdated),
    Movies(Vec<Movie>),
    Movie(Movie),
    MovieDeleted(String),
    Reviews(Vec<Review>),
    ReviewCreated(Review),
}

impl ApiReply {
    pub fn kind(&self) -> &'static str {
        match self {
            ApiReply::Auth(_) => "auth",
            ApiReply::Profile(_) => "profile",
            ApiReply::ProfileUpdated(_) => "profile_updated",
            ApiReply::Movies(_) => "movies",
            ApiReply::Movie(_) => "movie",
            ApiReply::MovieDeleted(_) => "movie_deleted",
            ApiReply::Reviews(_) => "reviews",
            ApiReply::ReviewCreated(_) => "review_created",
        }
    }
}

/// Commands sent from App layer to Network layer
#[derive(Debug, Clone)]
pub enum NetworkCommand {
    /// Execute a backend call
    Call { id: u64, call: ApiCall },
    /// Shutdown the network actor
    Shutdown,
}

/// Responses sent from Network layer to App layer
#[derive(Debug, Clone)]
pub enum NetworkResponse {
    /// A call finished, successfully or not
    Completed {
        id: u64,
        result: Result<ApiReply, ApiError>,
        time_ms: u64,
    },
}
