use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Account role
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    #[serde(other)]
    User,
}

impl Role {
    pub fn as_str(&self) -> &str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

/// A user profile as returned by `/users/profile` and the auth endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub bio: Option<String>,
    #[serde(default)]
    pub avatar: Option<String>,
    #[serde(default)]
    pub favorite_genres: Vec<String>,
    #[serde(default)]
    pub role: Role,
}

impl User {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// Avatar URL, falling back to a generated one seeded by the user's name
    pub fn avatar_url(&self) -> String {
        match self.avatar.as_deref().filter(|a| !a.is_empty()) {
            Some(url) => url.to_string(),
            None => format!(
                "https://api.dicebear.com/7.x/avataaars/svg?seed={}",
                self.name
            ),
        }
    }
}

/// A single review of a movie
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    /// Parent movie; the backend sends either the id or a populated document
    #[serde(default, deserialize_with = "reference_id")]
    pub movie: Option<String>,
    #[serde(default)]
    pub name: String,
    pub rating: u8,
    #[serde(default)]
    pub review_text: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// A movie with its embedded reviews
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub poster: String,
    #[serde(default)]
    pub genres: Vec<String>,
    #[serde(default)]
    pub year: Option<i32>,
    /// Running time in minutes
    #[serde(default)]
    pub duration: Option<u32>,
    #[serde(default)]
    pub director: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average_rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_reviews: Option<u32>,
    #[serde(default)]
    pub reviews: Vec<Review>,
}

impl Movie {
    /// Aggregate rating as reported by the backend, never recomputed here
    pub fn display_rating(&self) -> f64 {
        self.average_rating
            .filter(|r| *r > 0.0)
            .or(self.rating.filter(|r| *r > 0.0))
            .unwrap_or(0.0)
    }

    pub fn review_count(&self) -> usize {
        match self.num_reviews {
            Some(n) if n > 0 => n as usize,
            _ => self.reviews.len(),
        }
    }

    pub fn has_genre(&self, genre: &str) -> bool {
        self.genres.iter().any(|g| g == genre)
    }

    /// Case-insensitive substring match on title or description.
    /// `needle` must already be lowercased.
    pub fn matches_search(&self, needle: &str) -> bool {
        needle.is_empty()
            || self.title.to_lowercase().contains(needle)
            || self.description.to_lowercase().contains(needle)
    }
}

/// Payload for creating or updating a movie
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MovieDraft {
    pub title: String,
    pub description: String,
    pub poster: String,
    pub genres: Vec<String>,
    pub rating: f64,
    pub director: String,
    pub year: i32,
    pub duration: u32,
}

impl From<&Movie> for MovieDraft {
    fn from(movie: &Movie) -> Self {
        MovieDraft {
            title: movie.title.clone(),
            description: movie.description.clone(),
            poster: movie.poster.clone(),
            genres: movie.genres.clone(),
            rating: movie.rating.unwrap_or(0.0),
            director: movie.director.clone(),
            year: movie.year.unwrap_or_default(),
            duration: movie.duration.unwrap_or_default(),
        }
    }
}

/// Payload for posting a review
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewDraft {
    pub rating: u8,
    pub review_text: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Response of the login and register endpoints
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    #[serde(default)]
    pub user: Option<User>,
}

/// Payload for `PUT /users/profile`
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub name: String,
    pub email: String,
    pub bio: String,
    pub avatar: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_password: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_password: Option<String>,
}

/// Result of a profile update: the fresh profile and, after a password
/// change, a replacement token
#[derive(Clone, Debug, PartialEq)]
pub struct ProfileUpdated {
    pub user: User,
    pub token: Option<String>,
}

fn reference_id<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(id)) => Some(id),
        Some(serde_json::Value::Object(doc)) => doc
            .get("_id")
            .or_else(|| doc.get("id"))
            .and_then(|v| v.as_str())
            .map(str::to_string),
        _ => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movie_from_backend_json() {
        let json = r#"{
            "_id": "m1",
            "title": "Inception",
            "description": "Dreams within dreams",
            "poster": "https://img/inception.jpg",
            "genres": ["Sci-Fi", "Thriller"],
            "year": 2010,
            "duration": 148,
            "director": "Christopher Nolan",
            "rating": 4.5,
            "numReviews": 2,
            "reviews": [{
                "_id": "r1",
                "movie": "m1",
                "name": "Ana",
                "rating": 5,
                "reviewText": "Mind bending",
                "createdAt": "2024-03-01T10:00:00.000Z"
            }]
        }"#;
        let movie: Movie = serde_json::from_str(json).unwrap();
        assert_eq!(movie.id, "m1");
        assert_eq!(movie.year, Some(2010));
        assert_eq!(movie.duration, Some(148));
        assert_eq!(movie.display_rating(), 4.5);
        assert_eq!(movie.review_count(), 2);
        assert_eq!(movie.reviews[0].review_text, "Mind bending");
        assert_eq!(movie.reviews[0].movie.as_deref(), Some("m1"));
        assert!(movie.reviews[0].created_at.is_some());
    }

    #[test]
    fn test_display_rating_prefers_average() {
        let movie: Movie = serde_json::from_str(
            r#"{"_id":"m2","rating":3.0,"averageRating":4.2,"reviews":[]}"#,
        )
        .unwrap();
        assert_eq!(movie.display_rating(), 4.2);
        assert_eq!(movie.review_count(), 0);
    }

    #[test]
    fn test_review_with_populated_movie() {
        let review: Review = serde_json::from_str(
            r#"{"_id":"r9","movie":{"_id":"m7","title":"Heat"},"name":"Bo","rating":3,"reviewText":"Solid"}"#,
        )
        .unwrap();
        assert_eq!(review.movie.as_deref(), Some("m7"));
        assert!(review.created_at.is_none());
    }

    #[test]
    fn test_unknown_role_is_user() {
        let user: User =
            serde_json::from_str(r#"{"_id":"u1","name":"Kim","email":"k@x.io","role":"editor"}"#)
                .unwrap();
        assert_eq!(user.role, Role::User);
        assert!(!user.is_admin());

        let admin: User = serde_json::from_str(r#"{"name":"Root","role":"admin"}"#).unwrap();
        assert!(admin.is_admin());
    }

    #[test]
    fn test_profile_update_omits_password_fields() {
        let update = ProfileUpdate {
            name: "Kim".into(),
            email: "k@x.io".into(),
            ..Default::default()
        };
        let json = serde_json::to_value(&update).unwrap();
        assert!(json.get("currentPassword").is_none());
        assert!(json.get("newPassword").is_none());

        let with_password = ProfileUpdate {
            current_password: Some("old-secret".into()),
            new_password: Some("new-secret".into()),
            ..update
        };
        let json = serde_json::to_value(&with_password).unwrap();
        assert_eq!(json["currentPassword"], "old-secret");
        assert_eq!(json["newPassword"], "new-secret");
    }

    #[test]
    fn test_review_draft_wire_names() {
        let draft = ReviewDraft {
            rating: 4,
            review_text: "Great pacing".into(),
        };
        let json = serde_json::to_value(&draft).unwrap();
        assert_eq!(json, serde_json::json!({"rating": 4, "reviewText": "Great pacing"}));
    }

    #[test]
    fn test_avatar_fallback() {
        let user = User {
            name: "Kim".into(),
            avatar: Some(String::new()),
            ..Default::default()
        };
        assert!(user.avatar_url().ends_with("seed=Kim"));
    }
}
