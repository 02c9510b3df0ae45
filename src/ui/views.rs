//! Screen drawing, one function per page

use ratatui::{prelude::*, widgets::*};

use crate::app::pages::{FormField, LoginField, ProfileField, RegisterField};
use crate::app::router::Screen;
use crate::constants::{APP_NAME, AVAILABLE_GENRES};
use crate::messages::{InputMode, RenderState};
use crate::ui::widgets::{
    centered_rect, error_line, genre_chips, render_input, render_tabs, set_input_cursor, stars,
    Palette,
};

pub fn draw_ui(f: &mut Frame, state: &RenderState) {
    let area = f.area();
    let palette = Palette::for_mode(state.dark_mode);

    f.render_widget(
        Block::default().style(Style::default().bg(palette.bg).fg(palette.fg)),
        area,
    );

    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Nav bar
            Constraint::Min(0),    // Content
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    draw_nav_bar(f, state, palette, main_chunks[0]);

    match state.screen {
        Screen::Loading => draw_loading(f, palette, main_chunks[1]),
        Screen::Catalog => draw_catalog(f, state, palette, main_chunks[1]),
        Screen::Details => draw_details(f, state, palette, main_chunks[1]),
        Screen::Admin => draw_admin(f, state, palette, main_chunks[1]),
        Screen::Profile => draw_profile(f, state, palette, main_chunks[1]),
        Screen::Login => draw_login(f, state, palette, main_chunks[1]),
        Screen::Register => draw_register(f, state, palette, main_chunks[1]),
    }

    draw_status_bar(f, state, palette, main_chunks[2]);

    if state.show_help {
        draw_help_popup(f, palette, area);
    }
}

fn draw_nav_bar(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(APP_NAME.len() as u16 + 2),
            Constraint::Min(0),
            Constraint::Length(32),
        ])
        .split(area);

    f.render_widget(
        Paragraph::new(Span::styled(
            format!(" {}", APP_NAME),
            Style::default().fg(palette.accent).bold(),
        )),
        chunks[0],
    );

    let (titles, selected): (Vec<&str>, usize) = match &state.user {
        Some(_) => {
            let mut titles = vec!["1:Movies", "2:Profile"];
            if state.is_admin() {
                titles.push("3:Admin");
            }
            let selected = match state.screen {
                Screen::Profile => 1,
                Screen::Admin => 2,
                _ => 0,
            };
            (titles, selected)
        }
        None => {
            let selected = usize::from(state.screen == Screen::Register);
            (vec!["Login", "Register"], selected)
        }
    };
    f.render_widget(render_tabs(&titles, selected, palette), chunks[1]);

    let theme = if state.dark_mode { "☾ dark" } else { "☀ light" };
    let who = state
        .user
        .as_ref()
        .map(|u| u.name.clone())
        .unwrap_or_default();
    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::styled(who, Style::default().fg(palette.fg)),
            Span::raw("  "),
            Span::styled(theme, Style::default().fg(palette.muted)),
            Span::raw(" "),
        ]))
        .alignment(Alignment::Right),
        chunks[2],
    );
}

fn draw_loading(f: &mut Frame, palette: Palette, area: Rect) {
    let popup = centered_rect(40, 20, area);
    f.render_widget(
        Paragraph::new("Loading...")
            .style(Style::default().fg(palette.muted))
            .alignment(Alignment::Center),
        popup,
    );
}

// ============================================================================
// Catalog
// ============================================================================

fn draw_catalog(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let page = &state.catalog;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Search
            Constraint::Length(1), // Genres
            Constraint::Min(0),    // Results
        ])
        .split(area);

    let editing = state.input_mode == InputMode::Editing;
    f.render_widget(
        render_input(&page.search, " Search movies (/) ", editing, palette),
        chunks[0],
    );
    if editing {
        set_input_cursor(f, &page.search, chunks[0]);
    }

    let mut labels = vec!["All"];
    labels.extend(page.genres.iter().map(String::as_str));
    let selected = labels
        .iter()
        .position(|l| *l == page.genre.label())
        .unwrap_or(0);
    f.render_widget(Paragraph::new(genre_chips(&labels, selected, palette)), chunks[1]);

    if page.loading {
        draw_loading(f, palette, chunks[2]);
        return;
    }
    if let Some(error) = &page.error {
        f.render_widget(
            Paragraph::new(error_line(Some(error), palette)).alignment(Alignment::Center),
            chunks[2],
        );
        return;
    }
    if page.visible.is_empty() {
        f.render_widget(
            Paragraph::new("No movies found matching your criteria")
                .style(Style::default().fg(palette.muted))
                .alignment(Alignment::Center),
            chunks[2],
        );
        return;
    }

    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[2]);

    let items: Vec<ListItem> = page
        .visible_movies()
        .map(|movie| {
            let year = movie.year.map(|y| y.to_string()).unwrap_or_default();
            ListItem::new(Line::from(vec![
                Span::styled(stars(movie.display_rating()), Style::default().fg(palette.star)),
                Span::raw(" "),
                Span::styled(movie.title.clone(), Style::default().fg(palette.fg).bold()),
                Span::styled(format!(" ({})", year), Style::default().fg(palette.muted)),
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" Latest Movies ({}) ", page.visible.len())),
        )
        .highlight_style(Style::default().fg(palette.focus).bold())
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(page.selected));
    f.render_stateful_widget(list, body[0], &mut list_state);

    if let Some(movie) = page.selected_movie() {
        let mut lines = vec![
            Line::styled(movie.title.clone(), Style::default().fg(palette.fg).bold()),
            Line::styled(movie.genres.join(", "), Style::default().fg(palette.muted)),
            Line::from(vec![
                Span::styled(stars(movie.display_rating()), Style::default().fg(palette.star)),
                Span::raw(format!(
                    " {:.1} ({} reviews)",
                    movie.display_rating(),
                    movie.review_count()
                )),
            ]),
            Line::default(),
        ];
        lines.push(Line::raw(movie.description.clone()));
        let preview = Paragraph::new(lines)
            .block(Block::default().borders(Borders::ALL).title(" Enter: details "))
            .wrap(Wrap { trim: false });
        f.render_widget(preview, body[1]);
    }
}

// ============================================================================
// Details
// ============================================================================

fn draw_details(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let page = &state.details;
    if page.loading {
        draw_loading(f, palette, area);
        return;
    }
    let movie = match (&page.load_error, &page.movie) {
        (Some(error), _) => {
            f.render_widget(
                Paragraph::new(error_line(Some(error), palette)).alignment(Alignment::Center),
                area,
            );
            return;
        }
        (None, None) => {
            f.render_widget(
                Paragraph::new("Movie not found").alignment(Alignment::Center),
                area,
            );
            return;
        }
        (None, Some(movie)) => movie,
    };

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);

    let meta = [
        movie.year.map(|y| y.to_string()),
        movie.duration.map(|d| format!("{} min", d)),
        Some(movie.genres.join(", ")).filter(|g| !g.is_empty()),
    ]
    .into_iter()
    .flatten()
    .collect::<Vec<_>>()
    .join(" • ");

    let rating = movie.display_rating();
    let info = vec![
        Line::styled(movie.title.clone(), Style::default().fg(palette.fg).bold()),
        Line::styled(meta, Style::default().fg(palette.muted)),
        Line::from(vec![
            Span::styled(stars(rating), Style::default().fg(palette.star)),
            Span::raw(format!(" {:.1}/5", rating)),
        ]),
        Line::default(),
        Line::raw(movie.description.clone()),
        Line::default(),
        Line::from(vec![
            Span::styled("Director: ", Style::default().bold()),
            Span::raw(movie.director.clone()),
        ]),
        Line::styled(movie.poster.clone(), Style::default().fg(palette.muted)),
    ];
    f.render_widget(
        Paragraph::new(info)
            .block(Block::default().borders(Borders::ALL).title(" Movie "))
            .wrap(Wrap { trim: false }),
        chunks[0],
    );

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Reviews
            Constraint::Length(1), // Rating picker
            Constraint::Length(3), // Review text
            Constraint::Length(1), // Error
        ])
        .split(chunks[1]);

    let mut review_lines = Vec::new();
    if page.reviews.is_empty() {
        review_lines.push(Line::styled(
            "No reviews yet. Be the first to review!",
            Style::default().fg(palette.muted),
        ));
    }
    for review in &page.reviews {
        let date = review
            .created_at
            .map(|d| d.format("%b %-d, %Y").to_string())
            .unwrap_or_default();
        review_lines.push(Line::from(vec![
            Span::styled(review.name.clone(), Style::default().bold()),
            Span::raw(" "),
            Span::styled(stars(review.rating as f64), Style::default().fg(palette.star)),
            Span::styled(format!(" {}", date), Style::default().fg(palette.muted)),
        ]));
        review_lines.push(Line::raw(review.review_text.clone()));
        review_lines.push(Line::default());
    }
    f.render_widget(
        Paragraph::new(review_lines)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .title(format!(" Reviews ({}) ", page.reviews.len())),
            )
            .wrap(Wrap { trim: false })
            .scroll((page.scroll, 0)),
        right[0],
    );

    f.render_widget(
        Paragraph::new(Line::from(vec![
            Span::raw(" Your rating: "),
            Span::styled(stars(page.rating as f64), Style::default().fg(palette.star)),
            Span::styled("  ←/→", Style::default().fg(palette.muted)),
        ])),
        right[1],
    );

    let editing = state.input_mode == InputMode::Editing;
    let title = if page.submitting {
        " Submitting... "
    } else {
        " Write your review (e), submit (s) "
    };
    f.render_widget(render_input(&page.review_text, title, editing, palette), right[2]);
    if editing {
        set_input_cursor(f, &page.review_text, right[2]);
    }
    f.render_widget(
        Paragraph::new(error_line(page.submit_error.as_deref(), palette)),
        right[3],
    );
}

// ============================================================================
// Admin
// ============================================================================

fn draw_admin(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let page = &state.admin;
    if page.loading {
        draw_loading(f, palette, area);
        return;
    }

    let outer = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(0)])
        .split(area);
    f.render_widget(
        Paragraph::new(error_line(page.error.as_deref(), palette)),
        outer[0],
    );

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(outer[1]);

    let items: Vec<ListItem> = page
        .movies
        .iter()
        .map(|movie| {
            let marker = if page.editing.as_deref() == Some(movie.id.as_str()) {
                "✎ "
            } else {
                ""
            };
            ListItem::new(format!(
                "{}{} ({})",
                marker,
                movie.title,
                movie.year.map(|y| y.to_string()).unwrap_or_default()
            ))
        })
        .collect();
    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Movies  e:edit d:delete n:new "),
        )
        .highlight_style(Style::default().fg(palette.focus).bold())
        .highlight_symbol("> ");
    let mut list_state = ListState::default().with_selected(Some(page.selected));
    f.render_stateful_widget(list, chunks[0], &mut list_state);

    let form_title = if page.saving {
        " Saving... "
    } else if page.is_editing() {
        " Edit Movie  Esc:cancel "
    } else {
        " Add New Movie "
    };
    let form_block = Block::default().borders(Borders::ALL).title(form_title);
    let inner = form_block.inner(chunks[1]);
    f.render_widget(form_block, chunks[1]);

    let fields = [
        FormField::Title,
        FormField::Director,
        FormField::Year,
        FormField::Duration,
        FormField::Rating,
        FormField::Poster,
        FormField::Description,
    ];
    let mut constraints: Vec<Constraint> = fields.iter().map(|_| Constraint::Length(3)).collect();
    constraints.push(Constraint::Min(0));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let editing = state.input_mode == InputMode::Editing;
    for (i, field) in fields.iter().enumerate() {
        let Some(input) = page.form.input(*field) else {
            continue;
        };
        let focused = page.form.focus == *field;
        f.render_widget(render_input(input, field.label(), focused, palette), rows[i]);
        if focused && editing {
            set_input_cursor(f, input, rows[i]);
        }
    }

    let genre_focused = page.form.focus == FormField::Genres;
    let genre_lines: Vec<Line> = AVAILABLE_GENRES
        .chunks(5)
        .enumerate()
        .map(|(row, genres)| {
            let spans: Vec<Span> = genres
                .iter()
                .enumerate()
                .map(|(col, genre)| {
                    let index = row * 5 + col;
                    let check = if page.form.has_genre(genre) { "[x]" } else { "[ ]" };
                    let style = if genre_focused && index == page.form.genre_cursor {
                        Style::default().fg(palette.focus).bold()
                    } else {
                        Style::default()
                    };
                    Span::styled(format!("{} {:<12}", check, genre), style)
                })
                .collect();
            Line::from(spans)
        })
        .collect();
    let border = if genre_focused { palette.focus } else { palette.muted };
    f.render_widget(
        Paragraph::new(genre_lines).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border))
                .title(" Genres  ←/→ move, Space toggle "),
        ),
        rows[fields.len()],
    );
}

// ============================================================================
// Profile
// ============================================================================

fn draw_profile(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let page = &state.profile;
    if page.loading {
        draw_loading(f, palette, area);
        return;
    }
    if let Some(error) = &page.load_error {
        f.render_widget(
            Paragraph::new(error_line(Some(error), palette)).alignment(Alignment::Center),
            area,
        );
        return;
    }
    let Some(user) = &page.profile else {
        f.render_widget(
            Paragraph::new("Profile not found").alignment(Alignment::Center),
            area,
        );
        return;
    };

    let popup = centered_rect(70, 90, area);

    if !page.editing {
        let favorites = if user.favorite_genres.is_empty() {
            "No favorite genres selected".to_string()
        } else {
            user.favorite_genres.join(", ")
        };
        let lines = vec![
            Line::styled(user.name.clone(), Style::default().fg(palette.fg).bold()),
            Line::styled(user.email.clone(), Style::default().fg(palette.muted)),
            Line::styled(format!("Role: {}", user.role.as_str()), Style::default().fg(palette.muted)),
            Line::default(),
            Line::raw(user.bio.clone().unwrap_or_else(|| "No bio yet".to_string())),
            Line::default(),
            Line::from(vec![Span::styled("Avatar: ", Style::default().bold()), Span::raw(user.avatar_url())]),
            Line::from(vec![Span::styled("Favorite genres: ", Style::default().bold()), Span::raw(favorites)]),
        ];
        f.render_widget(
            Paragraph::new(lines)
                .block(Block::default().borders(Borders::ALL).title(" Profile  e:edit "))
                .wrap(Wrap { trim: false }),
            popup,
        );
        return;
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .title(if page.saving { " Saving... " } else { " Edit Profile  Esc:cancel " });
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let mut constraints: Vec<Constraint> = ProfileField::ALL
        .iter()
        .map(|_| Constraint::Length(3))
        .collect();
    constraints.push(Constraint::Length(1));
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    let editing = state.input_mode == InputMode::Editing;
    for (i, field) in ProfileField::ALL.iter().enumerate() {
        let input = page.form.input(*field);
        let focused = page.form.focus == *field;
        f.render_widget(render_input(input, field.label(), focused, palette), rows[i]);
        if focused && editing {
            set_input_cursor(f, input, rows[i]);
        }
    }
    f.render_widget(
        Paragraph::new(error_line(page.error.as_deref(), palette)),
        rows[ProfileField::ALL.len()],
    );
}

// ============================================================================
// Login / Register
// ============================================================================

fn draw_login(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let page = &state.login;
    let popup = centered_rect(50, 60, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(if page.loading { " Signing in... " } else { " Sign In " });
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let editing = state.input_mode == InputMode::Editing;
    let fields = [
        (LoginField::Email, &page.email, "Email"),
        (LoginField::Password, &page.password, "Password"),
    ];
    for (i, (field, input, label)) in fields.iter().enumerate() {
        let focused = page.focus == *field;
        f.render_widget(render_input(input, label, focused, palette), rows[i]);
        if focused && editing {
            set_input_cursor(f, input, rows[i]);
        }
    }
    f.render_widget(Paragraph::new(error_line(page.error.as_deref(), palette)), rows[2]);
    f.render_widget(
        Paragraph::new("Don't have an account? Press r to register")
            .style(Style::default().fg(palette.muted)),
        rows[3],
    );
}

fn draw_register(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    let page = &state.register;
    let popup = centered_rect(50, 80, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(if page.loading { " Creating account... " } else { " Create Account " });
    let inner = block.inner(popup);
    f.render_widget(block, popup);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    let editing = state.input_mode == InputMode::Editing;
    let fields = [
        (RegisterField::Name, &page.name, "Name"),
        (RegisterField::Email, &page.email, "Email"),
        (RegisterField::Password, &page.password, "Password"),
        (RegisterField::Confirm, &page.confirm, "Confirm Password"),
    ];
    for (i, (field, input, label)) in fields.iter().enumerate() {
        let focused = page.focus == *field;
        f.render_widget(render_input(input, label, focused, palette), rows[i]);
        if focused && editing {
            set_input_cursor(f, input, rows[i]);
        }
    }
    f.render_widget(Paragraph::new(error_line(page.error.as_deref(), palette)), rows[4]);
    f.render_widget(
        Paragraph::new("Already have an account? Press l to sign in")
            .style(Style::default().fg(palette.muted)),
        rows[5],
    );
}

// ============================================================================
// Status bar and help
// ============================================================================

fn draw_status_bar(f: &mut Frame, state: &RenderState, palette: Palette, area: Rect) {
    if let Some(status) = &state.status {
        f.render_widget(
            Paragraph::new(format!(" {} ", status)).style(Style::default().fg(palette.success)),
            area,
        );
        return;
    }

    let hint = if state.input_mode == InputMode::Editing {
        match state.screen {
            Screen::Catalog => " ESC/Enter:done | type to filter ",
            _ => " ESC:stop editing | Tab:next field | Enter:submit ",
        }
    } else {
        match state.screen {
            Screen::Loading => " Loading... ",
            Screen::Catalog => " /:search | ←/→:genre | ↑/↓:select | Enter:open | ?:help | q:quit ",
            Screen::Details => " ←/→:rating | e:write | s:submit | r:reload reviews | Esc:back ",
            Screen::Admin => " ↑/↓:select | e:edit | n:new | d:delete | Enter:form | s:save ",
            Screen::Profile => " e:edit | s:save | Esc:cancel | L:logout ",
            Screen::Login | Screen::Register => " e:edit | Tab:next field | s:submit | t:theme ",
        }
    };

    let bar = Paragraph::new(hint).style(Style::default().fg(palette.muted));
    f.render_widget(bar, area);
}

fn draw_help_popup(f: &mut Frame, palette: Palette, area: Rect) {
    let popup_area = centered_rect(60, 70, area);

    let help_text = r#"
 MARQUEE - Keyboard Shortcuts

 NAVIGATION
   1 / 2 / 3          Movies / Profile / Admin
   Esc                Back (details) or cancel edit
   L                  Log out

 CATALOG
   / or e             Search
   ← / →              Previous / next genre
   ↑ / ↓  Enter       Select and open a movie

 MOVIE
   ← / →              Review rating
   e  then Enter      Write and submit a review

 ADMIN
   e / n / d          Edit / new / delete movie
   Tab                Next form field
   Space              Toggle genre

 GENERAL
   t                  Toggle dark mode
   ?                  Toggle this help
   q / Ctrl+C         Quit

 Press any key to close...
"#;

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" Help ")
        .style(Style::default().bg(palette.bg).fg(palette.fg));

    let help = Paragraph::new(help_text)
        .block(block)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, popup_area);
    f.render_widget(help, popup_area);
}
