//! TUI rendering logic for the search form.

use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout, Position, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph, Wrap};

use super::state::SearchState;
use super::view::{MovieView, Poster, SearchView};

/// Placeholder graphic drawn when a title has no poster.
const POSTER_PLACEHOLDER_ART: [&str; 7] = [
    "+------------+",
    "|            |",
    "|   \u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}   |",
    "|  no poster |",
    "|   \u{2591}\u{2591}\u{2591}\u{2591}\u{2591}\u{2591}   |",
    "|            |",
    "+------------+",
];

/// Width of the poster column.
const POSTER_WIDTH: u16 = 20;

/// Draws the search form UI.
#[allow(clippy::indexing_slicing)]
pub fn draw(frame: &mut Frame, state: &SearchState) {
    let view = SearchView::from_state(state);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // heading
            Constraint::Length(3), // input + button
            Constraint::Length(1), // status line
            Constraint::Min(5),    // result panel
            Constraint::Length(3), // footer
        ])
        .split(frame.area());

    draw_heading(frame, chunks[0]);
    draw_search_row(frame, chunks[1], &view);
    draw_status(frame, chunks[2], &view);
    if let Some(movie) = &view.movie {
        draw_movie(frame, chunks[3], movie);
    }
    draw_footer(frame, chunks[4], &view);
}

/// Draws the title and subtitle.
fn draw_heading(frame: &mut Frame, area: Rect) {
    let heading = Paragraph::new(vec![
        Line::from(Span::styled(
            "Movie Search",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from("Search for any movies and display details."),
    ])
    .centered();
    frame.render_widget(heading, area);
}

/// Draws the query input box and the trigger button.
#[allow(clippy::indexing_slicing)]
fn draw_search_row(frame: &mut Frame, area: Rect, view: &SearchView<'_>) {
    let row = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(10), Constraint::Length(16)])
        .split(area);

    let input_style = if view.editing {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let input_text = if view.query.is_empty() && !view.editing {
        Span::styled("Enter a movie title", Style::default().fg(Color::DarkGray))
    } else {
        Span::raw(view.query)
    };
    let input = Paragraph::new(Line::from(input_text))
        .style(input_style)
        .block(Block::default().borders(Borders::ALL).title(" Title "));
    frame.render_widget(input, row[0]);

    if view.editing {
        let typed = u16::try_from(Line::from(view.query).width()).unwrap_or(u16::MAX);
        let max_x = row[0].right().saturating_sub(2);
        let x = row[0].x.saturating_add(1).saturating_add(typed).min(max_x);
        frame.set_cursor_position(Position::new(x, row[0].y.saturating_add(1)));
    }

    let button_style = if view.button_enabled {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    let button = Paragraph::new(view.button_label)
        .style(button_style)
        .centered()
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, row[1]);
}

/// Draws the error message or loading indicator.
fn draw_status(frame: &mut Frame, area: Rect, view: &SearchView<'_>) {
    let line = if let Some(error) = view.error {
        Line::from(Span::styled(error, Style::default().fg(Color::Red)))
    } else if !view.button_enabled {
        Line::from(Span::styled("Loading...", Style::default().fg(Color::Blue)))
    } else {
        Line::default()
    };
    frame.render_widget(Paragraph::new(line).centered(), area);
}

/// Draws the result panel: poster column and details.
#[allow(clippy::indexing_slicing)]
fn draw_movie(frame: &mut Frame, area: Rect, movie: &MovieView<'_>) {
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", movie.title));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(POSTER_WIDTH), Constraint::Min(10)])
        .split(inner);

    let poster = match movie.poster {
        Poster::Url(url) => Paragraph::new(vec![
            Line::from(Span::styled("Poster", Style::default().fg(Color::Cyan))),
            Line::from(url),
        ])
        .wrap(Wrap { trim: true }),
        Poster::Placeholder => Paragraph::new(
            POSTER_PLACEHOLDER_ART
                .iter()
                .map(|l| Line::from(*l))
                .collect::<Vec<_>>(),
        )
        .style(Style::default().fg(Color::DarkGray)),
    };
    frame.render_widget(poster, columns[0]);

    let label = Style::default().add_modifier(Modifier::BOLD);
    let muted = Style::default().fg(Color::Gray);
    let field = |name: &'static str, value: &str| {
        Line::from(vec![
            Span::styled(format!("{name}: "), label),
            Span::styled(String::from(value), muted),
        ])
    };

    let details = vec![
        Line::from(Span::styled(
            movie.title,
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            movie.plot,
            Style::default()
                .fg(Color::Gray)
                .add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled(format!("\u{1f4c5} {}", movie.year), muted),
            Span::raw("   "),
            Span::styled("\u{2605} ", Style::default().fg(Color::Yellow)),
            Span::styled(movie.rating, muted),
        ]),
        field("Genre", movie.genre),
        field("Director", movie.director),
        field("Actors", movie.actors),
        field("Runtime", movie.runtime),
        field("Released", movie.released),
    ];
    frame.render_widget(
        Paragraph::new(details).wrap(Wrap { trim: true }),
        columns[1],
    );
}

/// Draws the footer with key hints.
fn draw_footer(frame: &mut Frame, area: Rect, view: &SearchView<'_>) {
    let help_text = if view.editing {
        "Type a title | Enter: search | Esc: commands | Ctrl-C: quit"
    } else {
        "i or /: edit  Enter: search  o: open IMDb  p: open poster  q: quit"
    };

    let footer = Paragraph::new(help_text).block(Block::default().borders(Borders::ALL));
    frame.render_widget(footer, area);
}
