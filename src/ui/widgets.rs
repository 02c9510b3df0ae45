//! Small rendering helpers shared by every screen

use ratatui::{prelude::*, widgets::*};

use crate::app::input::TextInput;

/// Colors for the current appearance
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg: Color,
    pub fg: Color,
    pub muted: Color,
    pub accent: Color,
    pub focus: Color,
    pub error: Color,
    pub success: Color,
    pub star: Color,
}

impl Palette {
    pub fn for_mode(dark: bool) -> Self {
        if dark {
            Palette {
                bg: Color::Black,
                fg: Color::White,
                muted: Color::DarkGray,
                accent: Color::Red,
                focus: Color::Yellow,
                error: Color::LightRed,
                success: Color::Green,
                star: Color::Yellow,
            }
        } else {
            Palette {
                bg: Color::Reset,
                fg: Color::Reset,
                muted: Color::Gray,
                accent: Color::Red,
                focus: Color::Blue,
                error: Color::Red,
                success: Color::Green,
                star: Color::Rgb(230, 160, 0),
            }
        }
    }
}

/// Five-star bar: one full star per whole point
pub fn stars(rating: f64) -> String {
    let full = rating.clamp(0.0, 5.0).floor() as usize;
    format!("{}{}", "★".repeat(full), "☆".repeat(5 - full))
}

/// Renders a text input field
pub fn render_input<'a>(
    input: &TextInput,
    title: &'a str,
    is_focused: bool,
    palette: Palette,
) -> Paragraph<'a> {
    let style = if is_focused {
        Style::default().fg(palette.focus)
    } else {
        Style::default().fg(palette.muted)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(style)
        .title(title);

    Paragraph::new(input.display())
        .style(Style::default().fg(palette.fg))
        .block(block)
}

/// Place the terminal cursor inside a bordered input
pub fn set_input_cursor(f: &mut Frame, input: &TextInput, area: Rect) {
    let max_x = area.x + area.width.saturating_sub(2);
    let cursor_x = (area.x + input.display_cursor() as u16 + 1).min(max_x);
    f.set_cursor_position(Position::new(cursor_x, area.y + 1));
}

/// Renders navigation tabs
pub fn render_tabs<'a>(titles: &[&'a str], selected: usize, palette: Palette) -> Tabs<'a> {
    let titles: Vec<Line> = titles.iter().map(|t| Line::from(*t)).collect();

    Tabs::new(titles)
        .select(selected)
        .style(Style::default().fg(palette.muted))
        .highlight_style(Style::default().fg(palette.accent).bold())
        .divider("|")
}

/// One line of genre chips with the active one highlighted
pub fn genre_chips<'a>(labels: &[&'a str], selected: usize, palette: Palette) -> Line<'a> {
    let mut spans = Vec::with_capacity(labels.len() * 2);
    for (i, label) in labels.iter().enumerate() {
        let style = if i == selected {
            Style::default().fg(Color::White).bg(palette.accent).bold()
        } else {
            Style::default().fg(palette.muted)
        };
        spans.push(Span::styled(format!(" {} ", label), style));
        spans.push(Span::raw(" "));
    }
    Line::from(spans)
}

/// Error line, or nothing
pub fn error_line(message: Option<&str>, palette: Palette) -> Line<'static> {
    match message {
        Some(msg) => Line::styled(msg.to_string(), Style::default().fg(palette.error)),
        None => Line::default(),
    }
}

pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
