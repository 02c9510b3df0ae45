//! UI events - messages from UI layer to App layer

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::app::router::{Route, Screen};

/// Events generated from user input in the UI layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    // Navigation
    Navigate(Route),
    Back,
    Logout,

    // Input editing
    StartEditing,
    StopEditing,
    CharInput(char),
    Backspace,
    CursorLeft,
    CursorRight,
    NextField,
    PrevField,
    Submit,

    // Lists
    SelectNext,
    SelectPrev,
    OpenSelected,
    Reload,
    ScrollUp,
    ScrollDown,

    // Catalog
    NextGenre,
    PrevGenre,

    // Review form
    RatingUp,
    RatingDown,

    // Admin
    EditSelected,
    DeleteSelected,
    NewMovie,
    CancelEdit,

    // Profile
    EditProfile,

    // Popups and appearance
    ToggleTheme,
    ToggleHelp,
    CloseHelp,

    // System
    Quit,
}

/// Input mode
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Editing,
}

/// What the key mapper needs to know about the current screen
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyContext {
    pub screen: Screen,
    pub input_mode: InputMode,
    pub show_help: bool,
    pub is_authenticated: bool,
    pub is_admin: bool,
}

/// Convert a key event to a UiEvent based on current UI context
pub fn key_to_ui_event(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
        return Some(UiEvent::Quit);
    }

    if ctx.show_help {
        return Some(UiEvent::CloseHelp);
    }

    match ctx.input_mode {
        InputMode::Editing => handle_editing_keys(key, ctx.screen),
        InputMode::Normal => handle_global_keys(key, ctx).or_else(|| match ctx.screen {
            Screen::Loading => None,
            Screen::Catalog => handle_catalog_keys(key),
            Screen::Details => handle_details_keys(key),
            Screen::Admin => handle_admin_keys(key),
            Screen::Profile => handle_profile_keys(key),
            Screen::Login => handle_login_keys(key),
            Screen::Register => handle_register_keys(key),
        }),
    }
}

/// Keys shared by every screen in normal mode
fn handle_global_keys(key: KeyEvent, ctx: KeyContext) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('q') => Some(UiEvent::Quit),
        KeyCode::Char('?') => Some(UiEvent::ToggleHelp),
        KeyCode::Char('t') => Some(UiEvent::ToggleTheme),
        KeyCode::Char('1') if ctx.is_authenticated => Some(UiEvent::Navigate(Route::Catalog)),
        KeyCode::Char('2') if ctx.is_authenticated => Some(UiEvent::Navigate(Route::Profile)),
        KeyCode::Char('3') if ctx.is_admin => Some(UiEvent::Navigate(Route::Admin)),
        KeyCode::Char('L') if ctx.is_authenticated => Some(UiEvent::Logout),
        _ => None,
    }
}

fn handle_editing_keys(key: KeyEvent, screen: Screen) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc => Some(UiEvent::StopEditing),
        KeyCode::Left => Some(UiEvent::CursorLeft),
        KeyCode::Right => Some(UiEvent::CursorRight),
        KeyCode::Backspace => Some(UiEvent::Backspace),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Enter => {
            if screen == Screen::Catalog {
                Some(UiEvent::StopEditing)
            } else {
                Some(UiEvent::Submit)
            }
        }
        KeyCode::Char(c) => Some(UiEvent::CharInput(c)),
        _ => None,
    }
}

fn handle_catalog_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('/') | KeyCode::Char('e') => Some(UiEvent::StartEditing),
        KeyCode::Left => Some(UiEvent::PrevGenre),
        KeyCode::Right => Some(UiEvent::NextGenre),
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Enter => Some(UiEvent::OpenSelected),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        _ => None,
    }
}

fn handle_details_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => Some(UiEvent::Back),
        KeyCode::Left | KeyCode::Char('-') => Some(UiEvent::RatingDown),
        KeyCode::Right | KeyCode::Char('+') => Some(UiEvent::RatingUp),
        KeyCode::Up => Some(UiEvent::ScrollUp),
        KeyCode::Down => Some(UiEvent::ScrollDown),
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        _ => None,
    }
}

fn handle_admin_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Up | KeyCode::Char('k') => Some(UiEvent::SelectPrev),
        KeyCode::Down | KeyCode::Char('j') => Some(UiEvent::SelectNext),
        KeyCode::Char('e') => Some(UiEvent::EditSelected),
        KeyCode::Char('n') => Some(UiEvent::NewMovie),
        KeyCode::Char('d') => Some(UiEvent::DeleteSelected),
        KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        KeyCode::Esc => Some(UiEvent::CancelEdit),
        _ => None,
    }
}

fn handle_profile_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('e') => Some(UiEvent::EditProfile),
        KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Esc => Some(UiEvent::CancelEdit),
        KeyCode::Char('r') => Some(UiEvent::Reload),
        _ => None,
    }
}

fn handle_login_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('r') => Some(UiEvent::Navigate(Route::Register)),
        _ => None,
    }
}

fn handle_register_keys(key: KeyEvent) -> Option<UiEvent> {
    match key.code {
        KeyCode::Char('e') | KeyCode::Enter => Some(UiEvent::StartEditing),
        KeyCode::Tab => Some(UiEvent::NextField),
        KeyCode::BackTab => Some(UiEvent::PrevField),
        KeyCode::Char('s') => Some(UiEvent::Submit),
        KeyCode::Char('l') => Some(UiEvent::Navigate(Route::Login)),
        _ => None,
    }
}
