//! End-to-end flows through AppState against an in-memory backend
//!
//! Each test queues UI actions on the state, runs the resulting calls with
//! `pump`, and checks what the pages and the stored credential look like.

mod common;

use common::{app_state, catalog, hold, pump, user, FakeApi};
use marquee_tui::app::pages::GenreFilter;
use marquee_tui::app::{Route, Screen};
use marquee_tui::messages::{ApiCall, InputMode, NetworkCommand, NetworkResponse};
use marquee_tui::models::{Movie, Role};
use marquee_tui::storage;

#[tokio::test]
async fn test_anonymous_start_lands_on_login() {
    let api = FakeApi::new(catalog(), None);
    let mut state = app_state(None);

    state.start(Route::Catalog);
    pump(&mut state, &api).await;

    assert_eq!(state.screen, Screen::Login);
    assert_eq!(state.route, Route::Login);
    assert_eq!(state.input_mode, InputMode::Editing);
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_session_waits_for_profile() {
    let mut state = app_state(Some("cached"));
    state.start(Route::Catalog);

    assert_eq!(state.screen, Screen::Loading);
    assert!(state.session.is_loading());
    let commands = state.take_commands();
    assert!(matches!(
        commands.as_slice(),
        [NetworkCommand::Call { call: ApiCall::GetProfile, .. }]
    ));
}

#[tokio::test]
async fn test_cached_token_restores_session() {
    let api = FakeApi::new(catalog(), Some(user(Role::User)));
    let mut state = app_state(Some("cached"));

    state.start(Route::Catalog);
    pump(&mut state, &api).await;

    assert_eq!(state.screen, Screen::Catalog);
    assert_eq!(state.session.user().map(|u| u.name.as_str()), Some("Kim"));
    assert_eq!(state.catalog.movies.len(), 3);
    assert_eq!(api.calls(), vec!["get_profile", "list_movies"]);
}

#[tokio::test]
async fn test_failed_profile_fetch_logs_out_silently() {
    let api = FakeApi::new(catalog(), Some(user(Role::User))).failing_profile();
    let mut state = app_state(Some("expired"));

    state.start(Route::Catalog);
    pump(&mut state, &api).await;

    assert!(state.session.user().is_none());
    assert!(!state.session.is_loading());
    assert!(storage::lock(&state.storage).token().is_none());
    assert!(!storage::lock(&state.storage).is_logged_in());
    assert_eq!(state.screen, Screen::Login);
    assert!(state.login.error.is_none());
}

#[tokio::test]
async fn test_login_then_logout() {
    let api = FakeApi::new(catalog(), Some(user(Role::User)));
    let mut state = app_state(None);
    state.start(Route::Catalog);

    state.login.email.set("kim@example.com");
    state.login.password.set("secret1");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(state.screen, Screen::Catalog);
    assert_eq!(storage::lock(&state.storage).token(), Some("login-token"));
    assert_eq!(state.catalog.movies.len(), 3);

    state.logout();
    assert_eq!(state.screen, Screen::Login);
    assert!(state.session.user().is_none());
    assert!(storage::lock(&state.storage).token().is_none());
}

#[tokio::test]
async fn test_wrong_password_shows_server_message() {
    let api = FakeApi::new(catalog(), Some(user(Role::User)));
    let mut state = app_state(None);
    state.start(Route::Catalog);

    state.login.email.set("kim@example.com");
    state.login.password.set("nope-nope");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(state.screen, Screen::Login);
    assert_eq!(state.login.error.as_deref(), Some("Invalid email or password"));
    assert!(!state.login.loading);
}

#[tokio::test]
async fn test_register_mismatch_sends_nothing() {
    let api = FakeApi::new(catalog(), None);
    let mut state = app_state(None);
    state.start(Route::Register);
    assert_eq!(state.screen, Screen::Register);

    state.register.name.set("Ana");
    state.register.email.set("ana@example.com");
    state.register.password.set("secret1");
    state.register.confirm.set("secret2");
    state.submit();

    assert!(state.take_commands().is_empty());
    assert_eq!(state.register.error.as_deref(), Some("Passwords do not match"));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn test_register_signs_in() {
    let api = FakeApi::new(catalog(), None);
    let mut state = app_state(None);
    state.start(Route::Register);

    state.register.name.set("Ana");
    state.register.email.set("ana@example.com");
    state.register.password.set("secret1");
    state.register.confirm.set("secret1");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(state.screen, Screen::Catalog);
    assert_eq!(state.session.user().map(|u| u.name.as_str()), Some("Ana"));
    assert_eq!(storage::lock(&state.storage).token(), Some("register-token"));
}

async fn signed_in(role: Role) -> (marquee_tui::AppState, FakeApi) {
    let api = FakeApi::new(catalog(), Some(user(role)));
    let mut state = app_state(Some("cached"));
    state.start(Route::Catalog);
    pump(&mut state, &api).await;
    (state, api)
}

#[tokio::test]
async fn test_catalog_search_and_genre() {
    let (mut state, _api) = signed_in(Role::User).await;

    state.start_editing();
    for c in "ince".chars() {
        state.enter_char(c);
    }
    let titles: Vec<&str> = state.catalog.visible_movies().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception"]);

    for _ in 0..4 {
        state.delete_char();
    }
    state.stop_editing();
    state.catalog.select_genre(GenreFilter::Genre("Horror".into()));
    let ids: Vec<&str> = state.catalog.visible_movies().map(|m| m.id.as_str()).collect();
    assert_eq!(ids, vec!["m2", "m3"]);
    assert_eq!(state.catalog.genres, vec!["Drama", "Horror", "Sci-Fi", "Thriller"]);
}

#[tokio::test]
async fn test_review_submission_appends_one() {
    let (mut state, api) = signed_in(Role::User).await;

    state.open_selected();
    pump(&mut state, &api).await;
    assert_eq!(state.screen, Screen::Details);
    assert_eq!(state.details.movie.as_ref().map(|m| m.id.as_str()), Some("m1"));
    assert!(state.details.reviews.is_empty());

    state.rating_down();
    state.start_editing();
    for c in "Great pacing".chars() {
        state.enter_char(c);
    }
    state.submit();
    assert_eq!(state.input_mode, InputMode::Normal);
    pump(&mut state, &api).await;

    assert_eq!(state.details.reviews.len(), 1);
    assert_eq!(state.details.reviews[0].rating, 4);
    assert_eq!(state.details.reviews[0].review_text, "Great pacing");
    assert!(state.details.review_text.value().is_empty());
    assert_eq!(state.details.rating, 5);
    // no refetch of the movie after posting
    assert_eq!(
        api.calls().iter().filter(|c| c.starts_with("get_movie")).count(),
        1
    );
}

#[tokio::test]
async fn test_stale_details_response_is_ignored() {
    let (mut state, api) = signed_in(Role::User).await;

    state.navigate(Route::Details("m1".into()));
    let first = state.take_commands();
    state.navigate(Route::Details("m2".into()));
    pump(&mut state, &api).await;
    assert_eq!(state.details.movie.as_ref().map(|m| m.id.as_str()), Some("m2"));

    // the m1 reply lands late
    for cmd in first {
        if let NetworkCommand::Call { id, call } = cmd {
            let result = call.execute(&api).await;
            state.handle_response(NetworkResponse::Completed { id, result, time_ms: 0 });
        }
    }
    assert_eq!(state.details.movie.as_ref().map(|m| m.id.as_str()), Some("m2"));
}

#[tokio::test]
async fn test_review_reply_after_reopen_is_dropped() {
    let (mut state, api) = signed_in(Role::User).await;
    state.open_selected();
    pump(&mut state, &api).await;

    state.details.review_text.set("Seen it twice");
    state.submit();
    let late = hold(&mut state, &api).await;

    // leave and come back before the post reply lands
    state.back();
    pump(&mut state, &api).await;
    state.open_selected();
    pump(&mut state, &api).await;
    assert_eq!(state.details.reviews.len(), 1);

    for reply in late {
        state.handle_response(reply);
    }
    let ids: Vec<&str> = state.details.reviews.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["r1"]);
    assert_eq!(state.details.review_text.value(), "");
}

#[tokio::test]
async fn test_admin_create_reply_after_reload_is_dropped() {
    let (mut state, api) = signed_in(Role::Admin).await;
    state.navigate(Route::Admin);
    pump(&mut state, &api).await;

    state.new_movie();
    let form = &mut state.admin.form;
    form.title.set("Ronin");
    form.director.set("John Frankenheimer");
    form.year.set("1998");
    form.duration.set("122");
    form.rating.set("3.5");
    form.poster.set("https://img/ronin.jpg");
    form.description.set("Mercenaries");
    state.submit();
    let late = hold(&mut state, &api).await;

    state.reload();
    pump(&mut state, &api).await;
    for reply in late {
        state.handle_response(reply);
    }

    let titles: Vec<&str> = state.admin.movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Inception", "The Conjuring", "Hereditary", "Ronin"]);
}

#[tokio::test]
async fn test_reload_retries_failed_details_load() {
    let (mut state, api) = signed_in(Role::User).await;
    state.navigate(Route::Details("gone".into()));
    pump(&mut state, &api).await;
    assert_eq!(state.details.load_error.as_deref(), Some("Failed to load movie details"));

    state.reload();
    assert!(state.details.loading);
    let commands = state.take_commands();
    assert!(matches!(
        commands.as_slice(),
        [NetworkCommand::Call { call: ApiCall::GetMovie(id), .. }] if id == "gone"
    ));
}

#[tokio::test]
async fn test_token_only_login_with_failing_profile_shows_error() {
    let api = FakeApi::new(catalog(), Some(user(Role::User)))
        .token_only_login()
        .failing_profile();
    let mut state = app_state(None);
    state.start(Route::Catalog);

    state.login.email.set("kim@example.com");
    state.login.password.set("secret1");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(api.calls(), vec!["login", "get_profile"]);
    assert_eq!(state.screen, Screen::Login);
    assert_eq!(state.login.error.as_deref(), Some("Failed to load profile"));
    assert!(storage::lock(&state.storage).token().is_none());
}

#[tokio::test]
async fn test_token_only_login_fetches_profile() {
    let api = FakeApi::new(catalog(), Some(user(Role::User))).token_only_login();
    let mut state = app_state(None);
    state.start(Route::Catalog);

    state.login.email.set("kim@example.com");
    state.login.password.set("secret1");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(state.screen, Screen::Catalog);
    assert_eq!(state.session.user().map(|u| u.name.as_str()), Some("Kim"));
    assert!(state.login.error.is_none());
}

#[tokio::test]
async fn test_admin_edit_replaces_only_matching_movie() {
    let (mut state, api) = signed_in(Role::Admin).await;

    state.navigate(Route::Admin);
    pump(&mut state, &api).await;
    assert_eq!(state.screen, Screen::Admin);
    let before: Vec<Movie> = state.admin.movies.clone();

    state.select_next();
    state.edit_selected();
    assert_eq!(state.admin.editing.as_deref(), Some("m2"));
    state.admin.form.title.set("The Conjuring 2");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(state.admin.movies.len(), before.len());
    assert_eq!(state.admin.movies[0], before[0]);
    assert_eq!(state.admin.movies[2], before[2]);
    assert_eq!(state.admin.movies[1].title, "The Conjuring 2");
    assert!(state.admin.editing.is_none());
    assert!(state.admin.error.is_none());
}

#[tokio::test]
async fn test_admin_create_and_delete() {
    let (mut state, api) = signed_in(Role::Admin).await;
    state.navigate(Route::Admin);
    pump(&mut state, &api).await;

    state.new_movie();
    let form = &mut state.admin.form;
    form.title.set("Ronin");
    form.director.set("John Frankenheimer");
    form.year.set("1998");
    form.duration.set("122");
    form.rating.set("3.5");
    form.poster.set("https://img/ronin.jpg");
    form.description.set("Mercenaries");
    state.submit();
    pump(&mut state, &api).await;

    assert_eq!(state.admin.movies.len(), 4);
    assert_eq!(state.admin.movies[3].title, "Ronin");
    assert!(state.admin.form.title.value().is_empty());

    state.admin.selected = 3;
    state.delete_selected();
    pump(&mut state, &api).await;
    assert_eq!(state.admin.movies.len(), 3);
    assert!(state.admin.movies.iter().all(|m| m.title != "Ronin"));
}

#[tokio::test]
async fn test_profile_password_change_replaces_token() {
    let api = FakeApi::new(catalog(), Some(user(Role::User))).with_refreshed_token("rotated");
    let mut state = app_state(Some("cached"));
    state.start(Route::Profile);
    pump(&mut state, &api).await;
    assert_eq!(state.screen, Screen::Profile);

    state.edit_profile();
    assert_eq!(state.input_mode, InputMode::Editing);
    state.profile.form.name.set("Kim Lee");
    state.profile.form.current_password.set("secret1");
    state.profile.form.new_password.set("secret22");
    state.profile.form.confirm_password.set("secret22");
    state.submit();
    pump(&mut state, &api).await;

    assert!(!state.profile.editing);
    assert_eq!(storage::lock(&state.storage).token(), Some("rotated"));
    assert_eq!(state.session.user().map(|u| u.name.as_str()), Some("Kim Lee"));
    assert!(state.profile.form.new_password.value().is_empty());
}

#[tokio::test]
async fn test_profile_save_after_leaving_still_updates_session() {
    let api = FakeApi::new(catalog(), Some(user(Role::User)));
    let mut state = app_state(Some("cached"));
    state.start(Route::Profile);
    pump(&mut state, &api).await;

    state.edit_profile();
    state.profile.form.name.set("Kim Park");
    state.submit();
    let late = hold(&mut state, &api).await;

    state.navigate(Route::Catalog);
    pump(&mut state, &api).await;
    for reply in late {
        state.handle_response(reply);
    }

    assert_eq!(state.screen, Screen::Catalog);
    assert_eq!(state.session.user().map(|u| u.name.as_str()), Some("Kim Park"));
    assert!(state.status.is_none());
}

#[tokio::test]
async fn test_theme_toggle_is_global() {
    let (mut state, _api) = signed_in(Role::User).await;
    assert!(!state.to_render_state().dark_mode);
    state.toggle_theme();
    assert!(state.to_render_state().dark_mode);
    assert!(storage::lock(&state.storage).dark_mode());
}
