//! Rendering of the board screen.

use ratatui::prelude::*;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph, Wrap};
use unicode_width::UnicodeWidthStr;

use cmdboard_core::hotkey::HOTKEY_SLOTS;
use cmdboard_core::model::{MAX_PAGES, SlotRef};

use crate::app::App;
use crate::board_view::{BoardView, Field, GRID_SIDE, Popup};
use crate::theme::{BoardTheme, ThemeKey};

const CURSOR: &str = "▏";

/// Draws the whole board.
pub fn render(frame: &mut Frame, app: &App) {
    let theme = &app.theme;
    let view = app.view();
    let area = frame.area();

    frame.render_widget(Block::default().style(Style::default().bg(theme.get(ThemeKey::Background))), area);

    let [header, grid, footer] =
        Layout::vertical([Constraint::Length(3), Constraint::Min(GRID_SIDE as u16 * 5), Constraint::Length(1)])
            .areas(area);

    render_header(frame, header, app);
    render_grid(frame, grid, view, theme);
    render_footer(frame, footer, theme);

    if let Some(popup) = view.popup() {
        render_popup(frame, area, popup, theme);
    }
}

fn render_header(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &app.theme;
    let view = app.view();
    let page = view.page();

    let mut description = page.description.clone();
    if view.edit().is_some_and(|e| e.field == Field::PageDescription) {
        description.push_str(CURSOR);
    }
    let hotkeys = if app.controller.hotkeys_registered() { "global F-keys on" } else { "global F-keys off" };

    let line = Line::from(vec![
        Span::styled(format!("Page {}/{}", page.page, MAX_PAGES), theme.fg(ThemeKey::Page).bold()),
        Span::styled("  │  ", theme.fg(ThemeKey::Border)),
        Span::styled(description, theme.fg(ThemeKey::Page)),
    ]);

    let block = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme.fg(ThemeKey::Border))
        .title(Span::styled(" Cmdboard ", button_style(theme)))
        .title_bottom(Line::from(Span::styled(format!(" {} ", hotkeys), theme.fg(ThemeKey::Label))).right_aligned());

    frame.render_widget(Paragraph::new(line).block(block), area);
}

fn render_grid(frame: &mut Frame, area: Rect, view: &BoardView, theme: &BoardTheme) {
    let rows: [Rect; GRID_SIDE] = Layout::vertical([Constraint::Ratio(1, GRID_SIDE as u32); GRID_SIDE]).areas(area);
    for (row, row_area) in rows.into_iter().enumerate() {
        let cells: [Rect; GRID_SIDE] =
            Layout::horizontal([Constraint::Ratio(1, GRID_SIDE as u32); GRID_SIDE]).areas(row_area);
        for (col, cell) in cells.into_iter().enumerate() {
            render_slot(frame, cell, view, row * GRID_SIDE + col, theme);
        }
    }
}

fn render_slot(frame: &mut Frame, area: Rect, view: &BoardView, index: usize, theme: &BoardTheme) {
    let page = view.page();
    let Some(slot) = page.slots.get(index) else {
        return;
    };
    let selected = view.selected() == index;
    let enabled = view.is_enabled(index);
    let editing = view.edit().filter(|e| e.index == index).map(|e| e.field);

    let mut title = vec![Span::styled(
        format!(" {} ", SlotRef::new(page.page, index).ordinal()),
        theme.fg(ThemeKey::Label),
    )];
    if index < HOTKEY_SLOTS {
        title.push(Span::styled(format!("F{} ", index + 1), theme.fg(ThemeKey::Label).dim()));
    }

    let border = if selected {
        theme.fg(ThemeKey::Accent).bold()
    } else {
        theme.fg(ThemeKey::Border)
    };
    let block = Block::bordered()
        .border_type(if selected { BorderType::Thick } else { BorderType::Rounded })
        .border_style(border)
        .title(Line::from(title));
    let inner = block.inner(area);

    let label = if enabled { page.label(index) } else { "running…".to_string() };
    let mut button = button_style(theme);
    if !enabled {
        button = button.dim();
    }

    let mut command = slot.command.clone();
    let mut description = slot.description.clone();
    match editing {
        Some(Field::Command) => command.push_str(CURSOR),
        Some(Field::Description) => description.push_str(CURSOR),
        _ => {}
    }

    let lines = vec![
        Line::from(Span::styled(centered(&label, inner.width), button)),
        Line::from(vec![
            Span::styled("$ ", theme.fg(ThemeKey::Label)),
            Span::styled(command, theme.fg(ThemeKey::Command)),
        ]),
        Line::from(Span::styled(description, theme.fg(ThemeKey::Description).italic())),
    ];

    frame.render_widget(Paragraph::new(lines).block(block), area);
}

fn render_footer(frame: &mut Frame, area: Rect, theme: &BoardTheme) {
    let help = "F1-F12/Enter run · arrows select · +/- page · c command · d description · p page · q quit";
    frame.render_widget(Paragraph::new(Span::styled(help, theme.fg(ThemeKey::Label))), area);
}

fn render_popup(frame: &mut Frame, area: Rect, popup: &Popup, theme: &BoardTheme) {
    let area = centered_rect(area, 70, 60);
    let color = theme.get(if popup.is_error { ThemeKey::Accent } else { ThemeKey::Border });

    let block = Block::bordered()
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(Span::styled(format!(" {} ", popup.title), Style::default().fg(color).bold()))
        .title_bottom(Line::from(" Enter to close ").right_aligned())
        .style(Style::default().bg(theme.get(ThemeKey::Background)));

    frame.render_widget(Clear, area);
    frame.render_widget(
        Paragraph::new(popup.text.as_str())
            .style(theme.fg(ThemeKey::Command))
            .wrap(Wrap { trim: false })
            .block(block),
        area,
    );
}

fn button_style(theme: &BoardTheme) -> Style {
    theme.fg(ThemeKey::ButtonText).bg(theme.get(ThemeKey::Button)).bold()
}

/// Pads `text` on both sides to center it in `width` columns.
fn centered(text: &str, width: u16) -> String {
    let width = usize::from(width);
    let padding = width.saturating_sub(text.width());
    let left = padding / 2;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(padding - left))
}

fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let [_, middle, _] = Layout::vertical([
        Constraint::Percentage((100 - percent_y) / 2),
        Constraint::Percentage(percent_y),
        Constraint::Percentage((100 - percent_y) / 2),
    ])
    .areas(area);
    let [_, center, _] = Layout::horizontal([
        Constraint::Percentage((100 - percent_x) / 2),
        Constraint::Percentage(percent_x),
        Constraint::Percentage((100 - percent_x) / 2),
    ])
    .areas(middle);
    center
}
