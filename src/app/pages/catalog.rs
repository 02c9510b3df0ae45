//! Catalog page - the full movie list with search and genre filtering

use std::collections::BTreeSet;

use crate::app::input::TextInput;
use crate::error::ApiError;
use crate::messages::ApiCall;
use crate::models::Movie;

/// Genre chip selection
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum GenreFilter {
    #[default]
    All,
    Genre(String),
}

impl GenreFilter {
    pub fn matches(&self, movie: &Movie) -> bool {
        match self {
            GenreFilter::All => true,
            GenreFilter::Genre(genre) => movie.has_genre(genre),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            GenreFilter::All => "All",
            GenreFilter::Genre(genre) => genre,
        }
    }
}

/// Every genre used by `movies`, deduplicated and sorted ascending
pub fn derive_genres(movies: &[Movie]) -> Vec<String> {
    movies
        .iter()
        .flat_map(|m| m.genres.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Positions in `movies` of those matching both the search term and the
/// genre selection, in list order
pub fn filter_indices(movies: &[Movie], term: &str, genre: &GenreFilter) -> Vec<usize> {
    let needle = term.to_lowercase();
    movies
        .iter()
        .enumerate()
        .filter(|(_, m)| m.matches_search(&needle) && genre.matches(m))
        .map(|(i, _)| i)
        .collect()
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct CatalogPage {
    pub movies: Vec<Movie>,
    pub loading: bool,
    pub error: Option<String>,
    pub search: TextInput,
    pub genre: GenreFilter,
    pub genres: Vec<String>,
    /// Indices into `movies` that pass the current filters
    pub visible: Vec<usize>,
    pub selected: usize,
}

impl CatalogPage {
    /// Mount the page: fresh state plus the list fetch
    pub fn mount() -> (Self, ApiCall) {
        let page = CatalogPage {
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
        self.genres = derive_genres(&self.movies);
        if let GenreFilter::Genre(g) = &self.genre {
            if !self.genres.contains(g) {
                self.genre = GenreFilter::All;
            }
        }
        self.refilter();
    }

    /// Recompute the visible list; called after every input change
    pub fn refilter(&mut self) {
        self.visible = filter_indices(&self.movies, self.search.value(), &self.genre);
        if self.selected >= self.visible.len() {
            self.selected = self.visible.len().saturating_sub(1);
        }
    }

    pub fn visible_movies(&self) -> impl Iterator<Item = &Movie> {
        self.visible.iter().filter_map(|&i| self.movies.get(i))
    }

    pub fn selected_movie(&self) -> Option<&Movie> {
        self.visible
            .get(self.selected)
            .and_then(|&i| self.movies.get(i))
    }

    pub fn select_genre(&mut self, genre: GenreFilter) {
        self.genre = genre;
        self.selected = 0;
        self.refilter();
    }

    /// Genre chips in display order: "All" first, then the derived genres
    fn chips(&self) -> Vec<GenreFilter> {
        std::iter::once(GenreFilter::All)
            .chain(self.genres.iter().cloned().map(GenreFilter::Genre))
            .collect()
    }

    pub fn next_genre(&mut self) {
        let chips = self.chips();
        let pos = chips.iter().position(|c| *c == self.genre).unwrap_or(0);
        self.select_genre(chips[(pos + 1) % chips.len()].clone());
    }

    pub fn prev_genre(&mut self) {
        let chips = self.chips();
        let pos = chips.iter().position(|c| *c == self.genre).unwrap_or(0);
        let prev = pos.checked_sub(1).unwrap_or(chips.len() - 1);
        self.select_genre(chips[prev].clone());
    }

    pub fn select_next(&mut self) {
        if !self.visible.is_empty() {
            self.selected = (self.selected + 1) % self.visible.len();
        }
    }

    pub fn select_prev(&mut self) {
        if !self.visible.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.visible.len() - 1);
        }
    }
}
