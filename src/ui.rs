//! The UI renders the application state into something visible and scrollable.
//!
//! The sidebar on the left lists the document's groups and links, with the tracked link
//! highlighted; the content pane on the right shows the document from the current scroll
//! offset. Pane sizes are fed back into the state on every draw so the tracker's geometry
//! matches what is on screen.

use crate::app_state::{AppState, Focus, Mode};
use crate::config::Config;
use crate::formats::{markdown::MarkdownFormat, Format};
use crate::nav::NavRow;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

const SCROLL_TOP_TAG: &str = " ↑ top (t) ";

/// Renders the sidebar, content pane and help bar.
pub fn draw(f: &mut Frame, app: &mut AppState, cfg: &Config) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)])
        .split(f.area());

    let panes = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Length(cfg.sidebar_width), Constraint::Min(0)])
        .split(chunks[0]);

    let show_search = app.mode == Mode::Search || !app.search.is_empty();
    let sidebar = if show_search {
        let parts = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(0)])
            .split(panes[0]);
        draw_search(f, app, parts[0]);
        parts[1]
    } else {
        panes[0]
    };

    let sidebar_block = Block::default().borders(Borders::ALL).title("Contents");
    let content_block = Block::default().borders(Borders::ALL);
    let sidebar_inner = sidebar_block.inner(sidebar);
    let content_inner = content_block.inner(panes[1]);
    app.resize(
        usize::from(sidebar_inner.height),
        usize::from(content_inner.height),
    );

    draw_sidebar(f, app, sidebar, sidebar_block);
    draw_content(f, app, panes[1], content_block);
    draw_help(f, app, chunks[1]);
}

fn draw_search(f: &mut Frame, app: &AppState, area: Rect) {
    let style = if app.mode == Mode::Search {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default()
    };
    let search = Paragraph::new(app.search.as_str())
        .style(style)
        .block(Block::default().borders(Borders::ALL).title("Search"));
    f.render_widget(search, area);
}

fn draw_sidebar(f: &mut Frame, app: &AppState, area: Rect, block: Block) {
    let nav = &app.page.nav;
    let height = usize::from(block.inner(area).height);
    let sidebar_focused = app.focus == Focus::Sidebar;

    let items: Vec<ListItem> = nav
        .rows()
        .into_iter()
        .enumerate()
        .skip(app.page.sidebar_scroll)
        .take(height)
        .map(|(i, row)| {
            let (line, mut style) = match row {
                NavRow::Group(g) => {
                    let group = &nav.groups[g];
                    let arrow = if group.collapsed { "▶" } else { "▼" };
                    (
                        Line::from(format!("{arrow} {}", group.title)),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::BOLD),
                    )
                }
                NavRow::Item(link) => match nav.item(link) {
                    Some(item) => {
                        let indent = "  ".repeat(item.level.saturating_sub(1));
                        let style = if item.active {
                            Style::default()
                                .fg(Color::Yellow)
                                .add_modifier(Modifier::BOLD)
                        } else {
                            Style::default()
                        };
                        (Line::from(format!("{indent}{}", item.label)), style)
                    }
                    None => (Line::default(), Style::default()),
                },
            };
            if sidebar_focused && i == app.sidebar_cursor {
                style = style.add_modifier(Modifier::REVERSED);
            }
            ListItem::new(line).style(style)
        })
        .collect();

    let block = if sidebar_focused {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    };
    f.render_widget(List::new(items).block(block), area);
}

fn draw_content(f: &mut Frame, app: &AppState, area: Rect, block: Block) {
    let format = MarkdownFormat;
    let doc = &app.page.document;
    let inner = block.inner(area);
    let offset = app.page.content.offset();

    let lines: Vec<Line> = doc
        .lines
        .iter()
        .enumerate()
        .skip(offset)
        .take(usize::from(inner.height))
        .map(|(n, text)| match doc.heading_at(n) {
            Some(section) => format.format_heading(section.level, &section.title),
            None => Line::from(text.as_str()),
        })
        .collect();

    let section_title = app
        .tracker
        .active()
        .id()
        .and_then(|id| doc.section(id))
        .map_or("Document", |section| section.title.as_str());
    let position = if doc.is_empty() {
        String::new()
    } else {
        format!(" {}/{} ", offset + 1, doc.len())
    };
    let block = block.title(format!(" {section_title} ")).title(
        Line::from(position).right_aligned(),
    );
    let block = if app.focus == Focus::Content {
        block.border_style(Style::default().fg(Color::Yellow))
    } else {
        block
    };
    f.render_widget(Paragraph::new(lines).block(block), area);

    if app.page.scroll_top == Some(true) {
        let width = u16::try_from(SCROLL_TOP_TAG.chars().count()).unwrap_or(u16::MAX);
        if inner.width > width && inner.height > 0 {
            let tag = Rect {
                x: inner.x + inner.width - width,
                y: inner.y + inner.height - 1,
                width,
                height: 1,
            };
            let widget = Paragraph::new(Span::styled(
                SCROLL_TOP_TAG,
                Style::default().fg(Color::Black).bg(Color::Yellow),
            ));
            f.render_widget(widget, tag);
        }
    }
}

fn draw_help(f: &mut Frame, app: &AppState, area: Rect) {
    let help = if app.mode == Mode::Search {
        format!("/{}  (Enter: keep filter | Esc: clear)", app.search)
    } else if let Some(ref msg) = app.message {
        msg.clone()
    } else {
        match app.focus {
            Focus::Content => {
                "↑/↓: Scroll | PgUp/PgDn: Page | t: Top | Tab: Sidebar | /: Search | r: Reload | q: Quit"
            }
            Focus::Sidebar => {
                "↑/↓: Select | Enter: Go | Space: Fold | Tab: Content | /: Search | r: Reload | q: Quit"
            }
        }
        .to_string()
    };

    let help_widget = Paragraph::new(help).block(Block::default().borders(Borders::ALL));
    f.render_widget(help_widget, area);
}
