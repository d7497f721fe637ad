//! UI rendering using ratatui

use menuctl_core::dispatch::{PROMPT, STDERR_MARKER, UNKNOWN_ERROR};
use menuctl_core::{FocusState, ItemKind, Menu};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
    Frame,
};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for the confirmed selection
const HIGHLIGHT: Color = Color::Yellow;
/// Error color
const ERROR: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
///
/// `running` is the number of dispatches still in flight.
pub fn render(frame: &mut Frame, menu: &Menu, running: usize) {
    let area = frame.area();

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(3),    // Panels
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let panels = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(22), // Categories
            Constraint::Percentage(30), // Items
            Constraint::Percentage(48), // Output
        ])
        .split(rows[0]);

    render_categories(frame, menu, panels[0]);
    render_items(frame, menu, panels[1]);
    render_output(frame, menu, panels[2]);
    render_status_bar(frame, menu, running, rows[1]);
}

/// Bordered block whose style follows focus
fn panel_block(title: String, focused: bool) -> Block<'static> {
    let (border, title_style) = if focused {
        (
            Style::default().fg(ACCENT),
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )
    } else {
        (Style::default().fg(SECONDARY), Style::default().fg(SECONDARY))
    };

    Block::default()
        .title(title)
        .title_style(title_style)
        .borders(Borders::ALL)
        .border_style(border)
}

/// Style for the highlighted row; only the focused panel gets the full bar
fn highlight_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(ACCENT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().add_modifier(Modifier::REVERSED)
    }
}

fn placeholder(text: &'static str, block: Block<'static>) -> List<'static> {
    List::new(vec![ListItem::new(Line::from(Span::styled(
        text,
        Style::default().fg(DIM),
    )))])
    .block(block)
}

/// Render the category list
fn render_categories(frame: &mut Frame, menu: &Menu, area: Rect) {
    let focused = menu.is_focused(FocusState::Categories);
    let block = panel_block(" Categories ".to_string(), focused);
    let active = menu.cursor().category_index();

    let categories = menu.catalog().categories();
    if categories.is_empty() {
        frame.render_widget(placeholder("  No categories", block), area);
        return;
    }

    let items: Vec<ListItem> = categories
        .iter()
        .enumerate()
        .map(|(idx, category)| {
            let marker = if idx == active { "▸ " } else { "  " };
            let style = if idx == active {
                Style::default().fg(HIGHLIGHT)
            } else {
                Style::default().fg(Color::White)
            };
            let count = Span::styled(
                format!(" ({})", category.items().len()),
                Style::default().fg(DIM),
            );
            ListItem::new(Line::from(vec![
                Span::styled(format!("{}{}", marker, category.name()), style),
                count,
            ]))
        })
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(highlight_style(focused));
    let mut state = ListState::default().with_selected(Some(menu.category_highlight()));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the items of the confirmed category
fn render_items(frame: &mut Frame, menu: &Menu, area: Rect) {
    let focused = menu.is_focused(FocusState::Items);
    let title = match menu.catalog().category(menu.cursor().category_index()) {
        Some(category) => format!(" {} ", category.name()),
        None => " Items ".to_string(),
    };
    let block = panel_block(title, focused);

    let items = menu.active_items();
    if items.is_empty() {
        frame.render_widget(placeholder("  No items", block), area);
        return;
    }

    let rows: Vec<ListItem> = items
        .iter()
        .map(|item| {
            let hint = match item.kind() {
                ItemKind::RunCommand => format!("  {}{}", PROMPT, item.payload()),
                ItemKind::CopyText => "  ⧉ copy".to_string(),
                ItemKind::InternalAction => format!("  ⚡ {}", item.payload()),
            };
            ListItem::new(Line::from(vec![
                Span::styled(item.name().to_string(), Style::default().fg(Color::White)),
                Span::styled(hint, Style::default().fg(DIM)),
            ]))
        })
        .collect();

    let list = List::new(rows)
        .block(block)
        .highlight_style(highlight_style(focused));
    let mut state = ListState::default().with_selected(Some(menu.item_highlight()));

    frame.render_stateful_widget(list, area, &mut state);
}

/// Render the output log, following the tail unless scrolled back
fn render_output(frame: &mut Frame, menu: &Menu, area: Rect) {
    let focused = menu.is_focused(FocusState::Output);
    let scroll = menu.output_scroll();
    let title = if scroll > 0 {
        format!(" Output (+{} ↑) ", scroll)
    } else {
        " Output ".to_string()
    };
    let block = panel_block(title, focused);

    let height = block.inner(area).height as usize;
    let lines: Vec<Line> = menu
        .log()
        .window(height, scroll)
        .map(|line| Line::from(Span::styled(line.to_string(), output_style(line))))
        .collect();

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn output_style(line: &str) -> Style {
    if line.starts_with(PROMPT) {
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD)
    } else if line.starts_with(STDERR_MARKER)
        || line.starts_with("Error")
        || line == UNKNOWN_ERROR
    {
        Style::default().fg(ERROR)
    } else {
        Style::default().fg(Color::White)
    }
}

/// Render the status bar
fn render_status_bar(frame: &mut Frame, menu: &Menu, running: usize, area: Rect) {
    let focus = menu.focus();
    let focus_indicator = Span::styled(
        format!(" {} ", focus.display_name()),
        Style::default()
            .bg(ACCENT)
            .fg(Color::Black)
            .add_modifier(Modifier::BOLD),
    );

    let help_text = match focus {
        FocusState::Categories => "j/k:nav  Enter:open  Tab:panel  q:quit",
        FocusState::Items => "j/k:nav  Enter:run  Tab:panel  q:quit",
        FocusState::Output => "j/k:scroll  Tab:panel  q:quit",
    };

    let mut spans = vec![
        focus_indicator,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
    ];
    if running > 0 {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("{} running", running),
            Style::default().fg(HIGHLIGHT),
        ));
    }

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
