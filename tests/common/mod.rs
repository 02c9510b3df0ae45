//! Shared fixtures: an in-memory backend and a helper that runs queued calls

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use marquee_tui::app::AppState;
use marquee_tui::error::{ApiError, Result};
use marquee_tui::messages::{NetworkCommand, NetworkResponse};
use marquee_tui::models::{
    AuthResponse, LoginRequest, Movie, MovieDraft, ProfileUpdate, ProfileUpdated,
    RegisterRequest, Review, ReviewDraft, Role, User,
};
use marquee_tui::network::MovieApi;
use marquee_tui::storage::Storage;

#[derive(Default)]
struct Backend {
    movies: Vec<Movie>,
    profile: Option<User>,
    calls: Vec<String>,
    next_id: u32,
    fail_profile: bool,
    token_only_login: bool,
    refreshed_token: Option<String>,
}

/// In-memory `MovieApi` that records every call it receives
#[derive(Clone, Default)]
pub struct FakeApi {
    inner: Arc<Mutex<Backend>>,
}

impl FakeApi {
    pub fn new(movies: Vec<Movie>, profile: Option<User>) -> Self {
        let api = FakeApi::default();
        {
            let mut backend = api.inner.lock().unwrap();
            backend.movies = movies;
            backend.profile = profile;
        }
        api
    }

    /// Profile fetches fail as an expired token would
    pub fn failing_profile(self) -> Self {
        self.inner.lock().unwrap().fail_profile = true;
        self
    }

    /// Login answers with a token but no user
    pub fn token_only_login(self) -> Self {
        self.inner.lock().unwrap().token_only_login = true;
        self
    }

    /// Profile updates hand back a replacement token
    pub fn with_refreshed_token(self, token: &str) -> Self {
        self.inner.lock().unwrap().refreshed_token = Some(token.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.inner.lock().unwrap().calls.clone()
    }

    fn record(&self, call: impl Into<String>) -> std::sync::MutexGuard<'_, Backend> {
        let mut backend = self.inner.lock().unwrap();
        backend.calls.push(call.into());
        backend
    }
}

fn not_found(what: &str) -> ApiError {
    ApiError::Server {
        status: 404,
        message: format!("{} not found", what),
    }
}

fn from_draft(id: String, draft: &MovieDraft) -> Movie {
    Movie {
        id,
        title: draft.title.clone(),
        description: draft.description.clone(),
        poster: draft.poster.clone(),
        genres: draft.genres.clone(),
        year: Some(draft.year),
        duration: Some(draft.duration),
        director: draft.director.clone(),
        rating: Some(draft.rating),
        ..Default::default()
    }
}

#[async_trait]
impl MovieApi for FakeApi {
    async fn login(&self, credentials: &LoginRequest) -> Result<AuthResponse> {
        let backend = self.record("login");
        match &backend.profile {
            Some(user) if user.email == credentials.email && credentials.password == "secret1" => {
                Ok(AuthResponse {
                    token: "login-token".into(),
                    user: (!backend.token_only_login).then(|| user.clone()),
                })
            }
            _ => Err(ApiError::Server {
                status: 401,
                message: "Invalid email or password".into(),
            }),
        }
    }

    async fn register(&self, account: &RegisterRequest) -> Result<AuthResponse> {
        let mut backend = self.record("register");
        let user = User {
            id: "new-user".into(),
            name: account.name.clone(),
            email: account.email.clone(),
            ..Default::default()
        };
        backend.profile = Some(user.clone());
        Ok(AuthResponse {
            token: "register-token".into(),
            user: Some(user),
        })
    }

    async fn get_profile(&self) -> Result<User> {
        let backend = self.record("get_profile");
        if backend.fail_profile {
            return Err(ApiError::Server {
                status: 401,
                message: "Not authorized, token failed".into(),
            });
        }
        backend.profile.clone().ok_or_else(|| not_found("User"))
    }

    async fn update_profile(&self, update: &ProfileUpdate) -> Result<ProfileUpdated> {
        let mut backend = self.record("update_profile");
        let token = backend.refreshed_token.clone();
        let profile = backend.profile.as_mut().ok_or_else(|| not_found("User"))?;
        profile.name = update.name.clone();
        profile.email = update.email.clone();
        profile.bio = Some(update.bio.clone());
        Ok(ProfileUpdated {
            user: profile.clone(),
            token: update.new_password.as_ref().and(token),
        })
    }

    async fn list_movies(&self) -> Result<Vec<Movie>> {
        Ok(self.record("list_movies").movies.clone())
    }

    async fn get_movie(&self, id: &str) -> Result<Movie> {
        let backend = self.record(format!("get_movie:{}", id));
        backend
            .movies
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| not_found("Movie"))
    }

    async fn create_movie(&self, movie: &MovieDraft) -> Result<Movie> {
        let mut backend = self.record("create_movie");
        backend.next_id += 1;
        let created = from_draft(format!("new-{}", backend.next_id), movie);
        backend.movies.push(created.clone());
        Ok(created)
    }

    async fn update_movie(&self, id: &str, movie: &MovieDraft) -> Result<Movie> {
        let mut backend = self.record(format!("update_movie:{}", id));
        let slot = backend
            .movies
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| not_found("Movie"))?;
        *slot = from_draft(id.to_string(), movie);
        Ok(slot.clone())
    }

    async fn delete_movie(&self, id: &str) -> Result<()> {
        let mut backend = self.record(format!("delete_movie:{}", id));
        backend.movies.retain(|m| m.id != id);
        Ok(())
    }

    async fn list_reviews(&self, movie_id: &str) -> Result<Vec<Review>> {
        let backend = self.record(format!("list_reviews:{}", movie_id));
        backend
            .movies
            .iter()
            .find(|m| m.id == movie_id)
            .map(|m| m.reviews.clone())
            .ok_or_else(|| not_found("Movie"))
    }

    async fn create_review(&self, movie_id: &str, review: &ReviewDraft) -> Result<Review> {
        let mut backend = self.record(format!("create_review:{}", movie_id));
        let name = backend
            .profile
            .as_ref()
            .map(|u| u.name.clone())
            .unwrap_or_default();
        let movie = backend
            .movies
            .iter_mut()
            .find(|m| m.id == movie_id)
            .ok_or_else(|| not_found("Movie"))?;
        let created = Review {
            id: format!("r{}", movie.reviews.len() + 1),
            movie: Some(movie_id.to_string()),
            name,
            rating: review.rating,
            review_text: review.review_text.clone(),
            created_at: None,
        };
        movie.reviews.push(created.clone());
        Ok(created)
    }
}

pub fn movie(id: &str, title: &str, genres: &[&str]) -> Movie {
    Movie {
        id: id.into(),
        title: title.into(),
        description: format!("{} description", title),
        poster: format!("https://img/{}.jpg", id),
        genres: genres.iter().map(|g| g.to_string()).collect(),
        year: Some(2001),
        duration: Some(110),
        director: "Someone".into(),
        rating: Some(4.0),
        ..Default::default()
    }
}

pub fn catalog() -> Vec<Movie> {
    vec![
        movie("m1", "Inception", &["Sci-Fi", "Thriller"]),
        movie("m2", "The Conjuring", &["Horror"]),
        movie("m3", "Hereditary", &["Horror", "Drama"]),
    ]
}

pub fn user(role: Role) -> User {
    User {
        id: "u1".into(),
        name: "Kim".into(),
        email: "kim@example.com".into(),
        role,
        ..Default::default()
    }
}

/// State over an in-memory store, optionally holding a cached token
pub fn app_state(token: Option<&str>) -> AppState {
    let mut storage = Storage::in_memory();
    if let Some(token) = token {
        storage.store_credential(token).unwrap();
    }
    AppState::new(storage.shared())
}

/// Run the queued calls against `api` but keep their replies for later
pub async fn hold(state: &mut AppState, api: &FakeApi) -> Vec<NetworkResponse> {
    let mut replies = Vec::new();
    for cmd in state.take_commands() {
        if let NetworkCommand::Call { id, call } = cmd {
            let result = call.execute(api).await;
            replies.push(NetworkResponse::Completed {
                id,
                result,
                time_ms: 0,
            });
        }
    }
    replies
}

/// Run every queued call against `api` until the state stops issuing new ones
pub async fn pump(state: &mut AppState, api: &FakeApi) {
    loop {
        let commands = state.take_commands();
        if commands.is_empty() {
            break;
        }
        for cmd in commands {
            if let NetworkCommand::Call { id, call } = cmd {
                let result = call.execute(api).await;
                state.handle_response(NetworkResponse::Completed {
                    id,
                    result,
                    time_ms: 0,
                });
            }
        }
    }
}
