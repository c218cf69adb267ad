//! Terminal UI rendering.
//!
//! All drawing logic lives here, separated from application state ([`App`])
//! and input handling ([`crate::input`]).
//!
//! ## For contributors
//!
//! * The layout is a header, the two page sections side by side (projects
//!   left, writing right), and a one-line status bar.
//! * Colours come from [`Palette`], picked by the current theme.
//! * When the lightbox is open it is drawn last, on top of everything.

use ratatui::{
    layout::{Constraint, Flex, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, Paragraph, Wrap},
    Frame,
};

use crate::app::{App, Section};
use crate::page::{ProjectCard, Tag, WritingSection};
use crate::theme::Theme;

struct Palette {
    text: Color,
    muted: Color,
    accent: Color,
    highlight: Color,
}

impl Palette {
    fn for_theme(theme: Theme) -> Self {
        match theme {
            Theme::Light => Self {
                text: Color::Black,
                muted: Color::DarkGray,
                accent: Color::Blue,
                highlight: Color::Gray,
            },
            Theme::Dark => Self {
                text: Color::White,
                muted: Color::Gray,
                accent: Color::Cyan,
                highlight: Color::DarkGray,
            },
        }
    }
}

/// Draw the complete UI for one frame.
pub fn draw(app: &mut App, frame: &mut Frame) {
    let palette = Palette::for_theme(app.theme);
    let [header_area, main_area, status_area] = Layout::vertical([
        Constraint::Length(1),
        Constraint::Min(1),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let [projects_area, writing_area] =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)])
            .areas(main_area);

    draw_header(app, &palette, frame, header_area);
    draw_projects(app, &palette, frame, projects_area);
    draw_writing(app, &palette, frame, writing_area);
    draw_status_bar(app, &palette, frame, status_area);

    if app.lightbox.is_open() {
        draw_lightbox(app, &palette, frame);
    }
}

fn draw_header(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " Portfolio preview ",
            Style::default().fg(palette.accent).add_modifier(Modifier::BOLD),
        ),
        Span::styled(format!("[{} theme]", app.theme), Style::default().fg(palette.muted)),
    ]));
    frame.render_widget(header, area);
}

fn section_block(title: &str, focused: bool, palette: &Palette) -> Block<'static> {
    let style = if focused {
        Style::default().fg(palette.accent)
    } else {
        Style::default().fg(palette.muted)
    };
    Block::default()
        .title(format!(" {title} "))
        .borders(Borders::ALL)
        .border_style(style)
}

fn project_item<'a>(card: &'a ProjectCard, palette: &Palette) -> ListItem<'a> {
    let tags: Vec<Span> = card
        .tags
        .iter()
        .map(|tag| {
            let color = match tag {
                Tag::Language(_) => palette.accent,
                Tag::Stars(_) => Color::Yellow,
                Tag::Topic(_) => palette.muted,
            };
            Span::styled(format!("[{tag}] "), Style::default().fg(color))
        })
        .collect();

    ListItem::new(vec![
        Line::from(Span::styled(
            card.title.as_str(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            card.description.as_str(),
            Style::default().fg(palette.muted),
        )),
        Line::from(tags),
    ])
}

fn draw_projects(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let items: Vec<ListItem> = app
        .page
        .projects
        .slots()
        .iter()
        .map(|card| project_item(card, palette))
        .collect();

    let list = List::new(items)
        .block(section_block("Projects", app.section == Section::Projects, palette))
        .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(palette.highlight))
        .highlight_symbol("▸ ");

    frame.render_stateful_widget(list, area, &mut app.project_state);
}

fn draw_writing(app: &mut App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let block = section_block("Writing", app.section == Section::Writing, palette);

    match &app.page.writing {
        WritingSection::Loading => {
            let loading = Paragraph::new("Loading posts...")
                .style(Style::default().fg(palette.muted))
                .block(block);
            frame.render_widget(loading, area);
        }
        WritingSection::Fallback { landing_page } => {
            let fallback = Paragraph::new(vec![
                Line::from("Visit my Substack to read my latest articles and posts."),
                Line::from(Span::styled(
                    landing_page.as_str(),
                    Style::default().fg(palette.accent).add_modifier(Modifier::UNDERLINED),
                )),
            ])
            .wrap(Wrap { trim: true })
            .block(block);
            frame.render_widget(fallback, area);
        }
        WritingSection::Posts(cards) => {
            let items: Vec<ListItem> = cards
                .iter()
                .map(|card| {
                    let mut title = vec![Span::styled(
                        card.title.as_str(),
                        Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
                    )];
                    if card.image.is_some() {
                        title.push(Span::styled(" [img]", Style::default().fg(palette.muted)));
                    }
                    ListItem::new(vec![
                        Line::from(title),
                        Line::from(Span::styled(
                            card.date.as_str(),
                            Style::default().fg(palette.muted),
                        )),
                        Line::from(card.excerpt.as_str()),
                        Line::from(""),
                    ])
                })
                .collect();

            let list = List::new(items)
                .block(block)
                .highlight_style(Style::default().add_modifier(Modifier::BOLD).bg(palette.highlight))
                .highlight_symbol("▸ ");
            frame.render_stateful_widget(list, area, &mut app.writing_state);
        }
    }
}

fn draw_status_bar(app: &App, palette: &Palette, frame: &mut Frame, area: Rect) {
    let status = Paragraph::new(Line::from(vec![
        Span::raw(" "),
        Span::styled(&app.status, Style::default().fg(Color::Yellow)),
        Span::raw("  "),
        Span::styled(
            "q: quit  Tab: section  ↑/↓: move  Enter: open  t: theme  p: photos",
            Style::default().fg(palette.muted),
        ),
    ]));
    frame.render_widget(status, area);
}

fn draw_lightbox(app: &App, palette: &Palette, frame: &mut Frame) {
    let Some(photo) = app.lightbox.current() else {
        return;
    };

    let [area] = Layout::horizontal([Constraint::Percentage(60)])
        .flex(Flex::Center)
        .areas(frame.area());
    let [area] = Layout::vertical([Constraint::Length(7)])
        .flex(Flex::Center)
        .areas(area);

    let body = Paragraph::new(vec![
        Line::from(Span::styled(
            photo.caption.as_str(),
            Style::default().fg(palette.text).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(photo.src.as_str(), Style::default().fg(palette.muted))),
        Line::from(""),
        Line::from(format!(
            "{}/{}   ←/→: browse  Esc: close",
            app.lightbox.position() + 1,
            app.lightbox.len()
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .title(" Photo ")
            .borders(Borders::ALL)
            .border_style(Style::default().fg(palette.accent)),
    );

    frame.render_widget(Clear, area);
    frame.render_widget(body, area);
}
