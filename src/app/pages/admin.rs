//! Admin dashboard - movie list plus a create/edit form

use chrono::Datelike;

use crate::app::input::TextInput;
use crate::app::validation;
use crate::constants::{AVAILABLE_GENRES, MIN_MOVIE_YEAR};
use crate::error::ApiError;
use crate::messages::ApiCall;
use crate::models::{Movie, MovieDraft};

/// Focusable fields of the movie form, in tab order
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum FormField {
    #[default]
    Title,
    Director,
    Year,
    Duration,
    Rating,
    Poster,
    Description,
    Genres,
}

impl FormField {
    const ORDER: [FormField; 8] = [
        FormField::Title,
        FormField::Director,
        FormField::Year,
        FormField::Duration,
        FormField::Rating,
        FormField::Poster,
        FormField::Description,
        FormField::Genres,
    ];

    pub fn next(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        let pos = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(pos + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Director => "Director",
            FormField::Year => "Year",
            FormField::Duration => "Duration (min)",
            FormField::Rating => "Rating",
            FormField::Poster => "Poster URL",
            FormField::Description => "Description",
            FormField::Genres => "Genres",
        }
    }
}

fn current_year() -> i32 {
    chrono::Local::now().year()
}

#[derive(Clone, Debug, PartialEq)]
pub struct MovieForm {
    pub title: TextInput,
    pub director: TextInput,
    pub year: TextInput,
    pub duration: TextInput,
    pub rating: TextInput,
    pub poster: TextInput,
    pub description: TextInput,
    pub genres: Vec<String>,
    /// Highlighted entry of the genre checklist
    pub genre_cursor: usize,
    pub focus: FormField,
}

impl Default for MovieForm {
    fn default() -> Self {
        MovieForm {
            title: TextInput::new(),
            director: TextInput::new(),
            year: TextInput::with_value(current_year().to_string()),
            duration: TextInput::new(),
            rating: TextInput::with_value("0"),
            poster: TextInput::new(),
            description: TextInput::new(),
            genres: Vec::new(),
            genre_cursor: 0,
            focus: FormField::Title,
        }
    }
}

impl MovieForm {
    pub fn from_movie(movie: &Movie) -> Self {
        let draft = MovieDraft::from(movie);
        MovieForm {
            title: TextInput::with_value(draft.title),
            director: TextInput::with_value(draft.director),
            year: TextInput::with_value(draft.year.to_string()),
            duration: TextInput::with_value(draft.duration.to_string()),
            rating: TextInput::with_value(draft.rating.to_string()),
            poster: TextInput::with_value(draft.poster),
            description: TextInput::with_value(draft.description),
            genres: draft.genres,
            genre_cursor: 0,
            focus: FormField::Title,
        }
    }

    /// Text input under focus; None on the genre checklist
    pub fn focused_input(&mut self) -> Option<&mut TextInput> {
        match self.focus {
            FormField::Title => Some(&mut self.title),
            FormField::Director => Some(&mut self.director),
            FormField::Year => Some(&mut self.year),
            FormField::Duration => Some(&mut self.duration),
            FormField::Rating => Some(&mut self.rating),
            FormField::Poster => Some(&mut self.poster),
            FormField::Description => Some(&mut self.description),
            FormField::Genres => None,
        }
    }

    pub fn input(&self, field: FormField) -> Option<&TextInput> {
        match field {
            FormField::Title => Some(&self.title),
            FormField::Director => Some(&self.director),
            FormField::Year => Some(&self.year),
            FormField::Duration => Some(&self.duration),
            FormField::Rating => Some(&self.rating),
            FormField::Poster => Some(&self.poster),
            FormField::Description => Some(&self.description),
            FormField::Genres => None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn prev_field(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn genre_cursor_next(&mut self) {
        self.genre_cursor = (self.genre_cursor + 1) % AVAILABLE_GENRES.len();
    }

    pub fn genre_cursor_prev(&mut self) {
        self.genre_cursor = (self.genre_cursor + AVAILABLE_GENRES.len() - 1) % AVAILABLE_GENRES.len();
    }

    /// Toggle the highlighted genre in or out of the selection
    pub fn toggle_genre(&mut self) {
        let Some(genre) = AVAILABLE_GENRES.get(self.genre_cursor) else {
            return;
        };
        if let Some(pos) = self.genres.iter().position(|g| g == genre) {
            self.genres.remove(pos);
        } else {
            self.genres.push(genre.to_string());
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Check every field and build the payload
    pub fn validate(&self) -> Result<MovieDraft, ApiError> {
        let title = validation::required(self.title.value(), "Title")?;
        let director = validation::required(self.director.value(), "Director")?;
        let year = validation::int_in_range(
            self.year.value(),
            "Year",
            MIN_MOVIE_YEAR as i64,
            current_year() as i64 + 5,
        )?;
        let duration =
            validation::int_in_range(self.duration.value(), "Duration", 1, u32::MAX as i64)?;
        let rating = validation::number_in_range(self.rating.value(), "Rating", 0.0, 5.0)?;
        let poster = validation::required(self.poster.value(), "Poster URL")?;
        let description = validation::required(self.description.value(), "Description")?;

        Ok(MovieDraft {
            title,
            description,
            poster,
            genres: self.genres.clone(),
            rating,
            director,
            year: year as i32,
            duration: duration as u32,
        })
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct AdminPage {
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub selected: usize,
    pub form: MovieForm,
    /// Movie being edited; None means the form creates
    pub editing: Option<String>,
    pub saving: bool,
}

impl AdminPage {
    pub fn mount() -> (Self, ApiCall) {
        let page = AdminPage {
            loading: true,
            ..Default::default()
        };
        (page, ApiCall::ListMovies)
    }

    pub fn on_loaded(&mut self, result: Result<Vec<Movie>, ApiError>) {
        self.loading = false;
        match result {
            Ok(movies) => {
                self.movies = movies;
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error fetching movies");
                self.error = Some("Failed to load movies".to_string());
            }
        }
        self.clamp_selection();
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.movies.get(self.selected)
    }

    pub fn select_next(&mut self) {
        if !self.movies.is_empty() {
            self.selected = (self.selected + 1) % self.movies.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.movies.is_empty() {
            self.selected = self.selected.checked_sub(1).unwrap_or(self.movies.len() - 1);
        }
    }

    fn clamp_selection(&mut self) {
        if self.selected >= self.movies.len() {
            self.selected = self.movies.len().saturating_sub(1);
        }
    }

    /// Load the highlighted movie into the form
    pub fn edit_selected(&mut self) {
        if let Some(movie) = self.selected_movie().cloned() {
            self.form = MovieForm::from_movie(&movie);
            self.editing = Some(movie.id);
        }
    }

    /// Blank create form
    pub fn new_movie(&mut self) {
        self.editing = None;
        self.form = MovieForm::default();
    }

    /// Leave edit mode without saving
    pub fn cancel_edit(&mut self) {
        if self.editing.take().is_some() {
            self.form = MovieForm::default();
        }
    }

    pub fn submit(&mut self) -> Option<ApiCall> {
        if self.saving {
            return None;
        }
        let movie = match self.form.validate() {
            Ok(draft) => draft,
            Err(e) => {
                self.error = Some(e.to_string());
                return None;
            }
        };
        self.saving = true;
        self.error = None;
        Some(match &self.editing {
            Some(id) => ApiCall::UpdateMovie {
                id: id.clone(),
                movie,
            },
            None => ApiCall::CreateMovie(movie),
        })
    }

    /// Apply a save result. `target` is the id that was being edited when
    /// the request went out.
    pub fn on_saved(&mut self, target: Option<String>, result: Result<Movie, ApiError>) {
        self.saving = false;
        match (target, result) {
            (Some(id), Ok(updated)) => {
                tracing::info!(movie_id = %id, "Movie updated");
                for movie in self.movies.iter_mut().filter(|m| m.id == id) {
                    *movie = updated.clone();
                }
                if self.editing.as_deref() == Some(id.as_str()) {
                    self.editing = None;
                    self.form = MovieForm::default();
                }
                self.error = None;
            }
            (None, Ok(created)) => {
                tracing::info!(movie_id = %created.id, "Movie created");
                self.movies.push(created);
                if self.editing.is_none() {
                    self.form = MovieForm::default();
                }
                self.error = None;
            }
            (_, Err(e)) => {
                tracing::error!(error = %e, "Error saving movie");
                self.error = Some(e.to_string());
            }
        }
    }

    pub fn delete_selected(&mut self) -> Option<ApiCall> {
        self.selected_movie()
            .map(|movie| ApiCall::DeleteMovie(movie.id.clone()))
    }

    pub fn on_deleted(&mut self, result: Result<String, ApiError>) {
        match result {
            Ok(id) => {
                tracing::info!(movie_id = %id, "Movie deleted");
                self.movies.retain(|m| m.id != id);
                if self.editing.as_deref() == Some(id.as_str()) {
                    self.cancel_edit();
                }
                self.clamp_selection();
                self.error = None;
            }
            Err(e) => {
                tracing::error!(error = %e, "Error deleting movie");
                self.error = Some(e.to_string());
            }
        }
    }
}
