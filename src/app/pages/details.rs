//! Movie details page and review submission

use crate::app::input::TextInput;
use crate::app::validation;
use crate::error::ApiError;
use crate::messages::ApiCall;
use crate::models::{Movie, Review, ReviewDraft};

pub const DEFAULT_REVIEW_RATING: u8 = 5;

#[derive(Clone, Debug, PartialEq)]
pub struct DetailsPage {
    pub movie_id: String,
    pub movie: Option<Movie>,
    /// Reviews as displayed; seeded from the movie and appended locally
    pub reviews: Vec<Review>,
    pub loading: bool,
    pub load_error: Option<String>,
    pub rating: u8,
    pub review_text: TextInput,
    pub submitting: bool,
    pub submit_error: Option<String>,
    pub scroll: u16,
}

impl Default for DetailsPage {
    fn default() -> Self {
        DetailsPage {
            movie_id: String::new(),
            movie: None,
            reviews: Vec::new(),
            loading: false,
            load_error: None,
            rating: DEFAULT_REVIEW_RATING,
            review_text: TextInput::new(),
            submitting: false,
            submit_error: None,
            scroll: 0,
        }
    }
}

impl DetailsPage {
    pub fn mount(movie_id: impl Into<String>) -> (Self, ApiCall) {
        let movie_id = movie_id.into();
        let page = DetailsPage {
            movie_id: movie_id.clone(),
            loading: true,
            ..Default::default()
        };
        (page, ApiCall::GetMovie(movie_id))
    }

    pub fn on_loaded(&mut self, result: Result<Movie, ApiError>) {
        self.loading = false;
        match result {
            Ok(movie) => {
                self.reviews = movie.reviews.clone();
                self.movie = Some(movie);
                self.load_error = None;
            }
            Err(e) => {
                tracing::error!(movie_id = %self.movie_id, error = %e, "Error fetching movie details");
                self.load_error = Some("Failed to load movie details".to_string());
            }
        }
    }

    /// Re-read the review list without touching the movie
    pub fn reload_reviews(&self) -> Option<ApiCall> {
        if self.loading || self.movie.is_none() {
            return None;
        }
        Some(ApiCall::ListReviews(self.movie_id.clone()))
    }

    pub fn on_reviews(&mut self, result: Result<Vec<Review>, ApiError>) {
        match result {
            Ok(reviews) => self.reviews = reviews,
            Err(e) => {
                tracing::warn!(movie_id = %self.movie_id, error = %e, "Error fetching reviews");
                self.submit_error = Some(e.to_string());
            }
        }
    }

    pub fn rating_up(&mut self) {
        self.set_rating(self.rating.saturating_add(1));
    }

    pub fn rating_down(&mut self) {
        self.set_rating(self.rating.saturating_sub(1));
    }

    pub fn set_rating(&mut self, rating: u8) {
        self.rating = rating.clamp(1, 5);
    }

    /// Build the review post, or None while one is already in flight
    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.submitting || self.movie.is_none() {
            return None;
        }
        let review_text = match validation::required(self.review_text.value(), "Review") {
            Ok(text) => text,
            Err(e) => {
                self.submit_error = Some(e.to_string());
                return None;
            }
        };
        self.submitting = true;
        self.submit_error = None;
        Some(ApiCall::CreateReview {
            movie_id: self.movie_id.clone(),
            review: ReviewDraft {
                rating: self.rating,
                review_text,
            },
        })
    }

    pub fn on_submitted(&mut self, result: Result<Review, ApiError>) {
        self.submitting = false;
        match result {
            Ok(review) => {
                tracing::info!(movie_id = %self.movie_id, "Review posted");
                self.reviews.push(review);
                self.review_text.clear();
                self.rating = DEFAULT_REVIEW_RATING;
            }
            Err(e) => {
                tracing::error!(movie_id = %self.movie_id, error = %e, "Error submitting review");
                let message = e.to_string();
                self.submit_error = Some(if message.is_empty() {
                    "Failed to submit review".to_string()
                } else {
                    message
                });
            }
        }
    }

    pub fn scroll_up(&mut self) {
        self.scroll = self.scroll.saturating_sub(1);
    }

    pub fn scroll_down(&mut self) {
        self.scroll = self.scroll.saturating_add(1);
    }
}
