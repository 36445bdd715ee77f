use airdrop_domain::i18n::{priority_label, status_label};
use airdrop_domain::view::{agenda, calendar_events, dashboard};
use airdrop_domain::{CardStatus, CardView, ColumnView, Label};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span, Text},
    widgets::{
        Bar, BarChart, BarGroup, Block, BorderType, Borders, Gauge, List, ListItem, ListState,
        Paragraph, Wrap,
    },
    Frame,
};

use crate::app::{App, AppMode};
use crate::components::{render_input_popup, render_popup_with_block};
use crate::form::{CardField, CardForm, ColumnField, ColumnForm};
use crate::theme::{column_color, tag_style, variant_color, Palette};

pub fn render(app: &App, frame: &mut Frame) {
    let palette = app.palette();
    frame.render_widget(Block::default().style(palette.normal()), frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(frame.area());

    render_header(app, frame, chunks[0], &palette);
    render_board(app, frame, chunks[1], &palette);
    render_footer(app, frame, chunks[2], &palette);

    match &app.mode {
        AppMode::Normal | AppMode::Search => {}
        AppMode::ColumnForm(form) => render_column_form(app, frame, form, &palette),
        AppMode::CardForm(form) => render_card_form(app, frame, form, &palette),
        AppMode::CardDetail { card_id, checklist } => {
            render_card_detail(app, frame, *card_id, checklist.get(), &palette)
        }
        AppMode::Confirm(request) => {
            let inner = render_popup_with_block(frame, &palette, &request.title, 50, 25);
            let text = vec![
                Line::from(request.message.as_str()),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[y] ", palette.bold_highlight()),
                    Span::raw(app.label(Label::Yes)),
                    Span::raw("   "),
                    Span::styled("[n] ", palette.bold_highlight()),
                    Span::raw(app.label(Label::No)),
                ]),
            ];
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        }
        AppMode::Dashboard => render_dashboard(app, frame, &palette),
        AppMode::Calendar => render_calendar(app, frame, &palette),
        AppMode::ExportPath(input) => render_input_popup(
            frame,
            &palette,
            app.label(Label::Export),
            app.label(Label::FilePath),
            input.as_str(),
            input.cursor_pos(),
        ),
        AppMode::ImportPath(input) => render_input_popup(
            frame,
            &palette,
            app.label(Label::Import),
            app.label(Label::FilePath),
            input.as_str(),
            input.cursor_pos(),
        ),
        AppMode::PermissionPrompt => {
            let inner = render_popup_with_block(frame, &palette, app.label(Label::AppTitle), 50, 20);
            let text = vec![
                Line::from(app.label(Label::NotificationPrompt)),
                Line::from(""),
                Line::from(vec![
                    Span::styled("[y] ", palette.bold_highlight()),
                    Span::raw(app.label(Label::Yes)),
                    Span::raw("   "),
                    Span::styled("[n] ", palette.bold_highlight()),
                    Span::raw(app.label(Label::No)),
                ]),
            ];
            frame.render_widget(Paragraph::new(text).wrap(Wrap { trim: true }), inner);
        }
    }

    if let Some(banner) = &app.banner {
        let area = frame.area();
        banner.render(frame, area, &palette);
    }
}

fn render_header(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let language = app.language();
    let searching = app.mode == AppMode::Search;
    let search_text = if app.search.is_empty() && !searching {
        Span::styled(app.label(Label::Search), palette.label())
    } else {
        Span::raw(app.search.as_str().to_string())
    };

    let mut spans = vec![
        Span::styled(app.label(Label::AppTitle), palette.bold_highlight()),
        Span::raw("  🔍 "),
        search_text,
    ];
    if let Some(status) = app.filters.status {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!("[{}: {}]", app.label(Label::Status), status_label(language, status)),
            palette.bold_highlight(),
        ));
    }
    if let Some(priority) = app.filters.priority {
        spans.push(Span::raw("  "));
        spans.push(Span::styled(
            format!(
                "[{}: {}]",
                app.label(Label::Priority),
                priority_label(language, Some(priority))
            ),
            palette.bold_highlight(),
        ));
    }
    if app.filters.has_active_filters() {
        spans.push(Span::styled(
            format!("  {}/{}", app.view.visible_cards, app.view.total_cards),
            palette.label(),
        ));
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(palette.border(searching));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);

    if searching {
        let cursor_x = area.x + 1 + header_prefix_width(app) + app.search.cursor_pos() as u16;
        frame.set_cursor_position((cursor_x.min(area.right().saturating_sub(2)), area.y + 1));
    }
}

fn header_prefix_width(app: &App) -> u16 {
    // Title plus "  🔍 ", the emoji being two cells wide
    (app.label(Label::AppTitle).chars().count() + 6) as u16
}

fn render_board(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    if app.view.columns.is_empty() {
        let empty = Paragraph::new(app.label(Label::EmptyBoard))
            .style(palette.label())
            .block(Block::default().borders(Borders::ALL).border_style(palette.border(false)));
        frame.render_widget(empty, area);
        return;
    }

    let count = app.view.columns.len() as u32;
    let constraints: Vec<Constraint> = (0..count).map(|_| Constraint::Ratio(1, count)).collect();
    let areas = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(constraints)
        .split(area);

    for (index, column) in app.view.columns.iter().enumerate() {
        let focused = index == app.column_index && app.mode == AppMode::Normal;
        let selected = (index == app.column_index)
            .then(|| app.card_selection.get())
            .flatten();
        render_column(app, frame, areas[index], column, focused, selected, palette);
    }
}

fn render_column(
    app: &App,
    frame: &mut Frame,
    area: Rect,
    column: &ColumnView,
    focused: bool,
    selected: Option<usize>,
    palette: &Palette,
) {
    let color = column_color(&column.color);
    let title = if column.cards.len() == column.total_cards {
        format!(" {} ({}) ", column.name, column.total_cards)
    } else {
        format!(" {} ({}/{}) ", column.name, column.cards.len(), column.total_cards)
    };
    let block = Block::default()
        .title(Span::styled(title, Style::default().fg(color).add_modifier(Modifier::BOLD)))
        .borders(Borders::ALL)
        .border_type(if focused { BorderType::Thick } else { BorderType::Plain })
        .border_style(Style::default().fg(color));

    let items: Vec<ListItem> = column
        .cards
        .iter()
        .map(|card| ListItem::new(card_lines(app, card, palette)))
        .collect();

    let list = List::new(items)
        .block(block)
        .highlight_style(palette.selected(focused || selected.is_some()));
    let mut state = ListState::default();
    state.select(selected);
    frame.render_stateful_widget(list, area, &mut state);
}

fn card_lines<'a>(app: &App, card: &'a CardView, palette: &Palette) -> Text<'a> {
    let language = app.language();
    let title_style = if card.status == CardStatus::Done {
        Style::default().add_modifier(Modifier::CROSSED_OUT)
    } else {
        Style::default().add_modifier(Modifier::BOLD)
    };
    let mut lines = vec![Line::from(vec![
        Span::styled("▌", Style::default().fg(variant_color(card.variant))),
        Span::styled(card.title.as_str(), title_style),
    ])];

    let mut meta = vec![
        Span::styled(status_label(language, card.status), palette.label()),
        Span::raw(" · "),
        Span::styled(
            priority_label(language, card.priority),
            Style::default().fg(variant_color(card.variant)),
        ),
    ];
    if let Some(due) = card.due {
        let style = if due.overdue {
            Style::default().fg(palette.danger).add_modifier(Modifier::BOLD)
        } else {
            palette.label()
        };
        meta.push(Span::raw(" · "));
        meta.push(Span::styled(format!("📅 {}", due.date.format("%Y-%m-%d")), style));
    }
    if let Some(progress) = card.checklist {
        meta.push(Span::raw(" · "));
        meta.push(Span::styled(
            format!("☑ {}/{}", progress.done, progress.total),
            palette.label(),
        ));
    }
    lines.push(Line::from(meta));

    if !card.tags.is_empty() {
        let mut tags = Vec::with_capacity(card.tags.len() * 2);
        for chip in &card.tags {
            tags.push(Span::styled(format!(" {} ", chip.text), tag_style(&chip.text)));
            tags.push(Span::raw(" "));
        }
        lines.push(Line::from(tags));
    }
    lines.push(Line::from(""));
    Text::from(lines)
}

fn render_footer(app: &App, frame: &mut Frame, area: Rect, palette: &Palette) {
    let hints = match &app.mode {
        AppMode::Search => "Enter/Esc: done",
        AppMode::ColumnForm(_) => "Tab: next field · ↑↓: colour · Enter: save · Esc: cancel",
        AppMode::CardForm(_) => "Tab/↑↓: field · ←→/Space: choose · Enter: save · Esc: cancel",
        AppMode::CardDetail { .. } => "↑↓: item · Space: toggle · e: edit · o: copy link · d: delete · Esc: close",
        AppMode::Dashboard | AppMode::Calendar => "b: dashboard · a: agenda · Esc: close",
        _ => "n: card · e: edit · d: delete · y: duplicate · </>: move · C/E/D: column · [/]: reorder · /: search · s/p/x: filter · b: dashboard · a: agenda · t: theme · g: language · X/I: export/import · q: quit",
    };
    frame.render_widget(Paragraph::new(hints).style(palette.label()), area);
}

fn render_column_form(app: &App, frame: &mut Frame, form: &ColumnForm, palette: &Palette) {
    let inner = render_popup_with_block(frame, palette, app.label(form.title()), 50, 40);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(1)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    let fields = [
        (ColumnField::Name, Label::ColumnName, &form.name, chunks[0]),
        (ColumnField::Color, Label::ColumnColor, &form.color, chunks[1]),
    ];
    for (field, label, input, area) in fields {
        let focused = form.focus == field;
        let mut block = Block::default()
            .title(app.label(label))
            .borders(Borders::ALL)
            .border_style(palette.border(focused));
        if field == ColumnField::Color {
            block = block.title_bottom(Span::styled("■■■", Style::default().fg(column_color(input.as_str()))));
        }
        frame.render_widget(Paragraph::new(input.as_str()).block(block), area);
        if focused {
            frame.set_cursor_position((area.x + 1 + input.cursor_pos() as u16, area.y + 1));
        }
    }
}

fn render_card_form(app: &App, frame: &mut Frame, form: &CardForm, palette: &Palette) {
    let language = app.language();
    let inner = render_popup_with_block(frame, palette, app.label(form.title_label()), 70, 80);
    let constraints: Vec<Constraint> = CardField::ALL
        .iter()
        .map(|_| Constraint::Length(3))
        .chain(std::iter::once(Constraint::Min(0)))
        .collect();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (index, field) in CardField::ALL.iter().copied().enumerate() {
        let area = chunks[index];
        let focused = form.focus == field;
        let block = Block::default()
            .title(app.label(field.label()))
            .borders(Borders::ALL)
            .border_style(palette.border(focused));
        let content = match field {
            CardField::Status => format!("◀ {} ▶", status_label(language, form.status)),
            CardField::Priority => format!("◀ {} ▶", priority_label(language, form.priority)),
            _ => form
                .input(field)
                .map(|input| input.as_str().to_string())
                .unwrap_or_default(),
        };
        frame.render_widget(Paragraph::new(content).block(block), area);
        if focused {
            if let Some(input) = form.input(field) {
                frame.set_cursor_position((area.x + 1 + input.cursor_pos() as u16, area.y + 1));
            }
        }
    }
}

fn render_card_detail(
    app: &App,
    frame: &mut Frame,
    card_id: u64,
    selected_item: Option<usize>,
    palette: &Palette,
) {
    let Some((column_id, card)) = app.model.card(card_id) else {
        return;
    };
    let language = app.language();
    let view = CardView::project(card, column_id, app.model.today());
    let inner = render_popup_with_block(frame, palette, &card.title, 70, 70);

    let mut lines = vec![
        Line::from(vec![
            Span::styled(format!("{}: ", app.label(Label::Status)), palette.label()),
            Span::raw(status_label(language, card.status)),
            Span::styled(format!("   {}: ", app.label(Label::Priority)), palette.label()),
            Span::styled(
                priority_label(language, card.priority),
                Style::default().fg(variant_color(view.variant)),
            ),
        ]),
    ];
    if let Some(due) = view.due {
        let style = if due.overdue {
            Style::default().fg(palette.danger)
        } else {
            Style::default()
        };
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", app.label(Label::CardDue)), palette.label()),
            Span::styled(due.date.format("%Y-%m-%d").to_string(), style),
        ]));
    }
    if let Some(link) = &card.link {
        lines.push(Line::from(vec![
            Span::styled(format!("{}: ", app.label(Label::CardLink)), palette.label()),
            Span::styled(link.as_str(), Style::default().add_modifier(Modifier::UNDERLINED)),
        ]));
    }
    if !view.tags.is_empty() {
        let mut spans = Vec::new();
        for chip in &view.tags {
            spans.push(Span::styled(format!(" {} ", chip.text), tag_style(&chip.text)));
            spans.push(Span::raw(" "));
        }
        lines.push(Line::from(spans));
    }
    if !card.description.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::from(card.description.as_str()));
    }
    if !card.notes.is_empty() {
        lines.push(Line::from(""));
        lines.push(Line::styled(app.label(Label::Notes), palette.label()));
        lines.push(Line::from(card.notes.as_str()));
    }

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Percentage(45)])
        .split(inner);
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), chunks[0]);

    let title = match view.checklist {
        Some(progress) => format!(
            "{} {}/{} ({}%)",
            app.label(Label::Checklist),
            progress.done,
            progress.total,
            progress.percent
        ),
        None => app.label(Label::Checklist).to_string(),
    };
    let items: Vec<ListItem> = card
        .checklist
        .iter()
        .map(|item| {
            let (mark, style) = if item.done {
                ("[x] ", Style::default().fg(palette.success).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("[ ] ", Style::default())
            };
            ListItem::new(Line::from(vec![Span::raw(mark), Span::styled(item.text.as_str(), style)]))
        })
        .collect();
    let list = List::new(items)
        .block(Block::default().title(title).borders(Borders::TOP))
        .highlight_style(palette.selected(true));
    let mut state = ListState::default();
    state.select(selected_item);
    frame.render_stateful_widget(list, chunks[1], &mut state);
}

fn render_dashboard(app: &App, frame: &mut Frame, palette: &Palette) {
    let language = app.language();
    let data = dashboard(app.model.board(), app.model.today());
    let inner = render_popup_with_block(frame, palette, app.label(Label::Dashboard), 80, 70);
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Min(8),
            Constraint::Length(3),
        ])
        .split(inner);

    let stats = &data.statistics;
    let counters = Line::from(vec![
        Span::styled(format!("{}: ", app.label(Label::Total)), palette.label()),
        Span::styled(stats.total.to_string(), palette.bold_highlight()),
        Span::styled(format!("   {}: ", app.label(Label::Done)), palette.label()),
        Span::raw(stats.done.to_string()),
        Span::styled(format!("   {}: ", app.label(Label::InProgress)), palette.label()),
        Span::raw(stats.in_progress.to_string()),
        Span::styled(format!("   {}: ", app.label(Label::Overdue)), palette.label()),
        Span::styled(stats.overdue.to_string(), Style::default().fg(palette.danger)),
    ]);
    frame.render_widget(Paragraph::new(counters), chunks[0]);

    let charts = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(chunks[1]);

    let status_bars: Vec<Bar> = data
        .status_series
        .iter()
        .map(|(status, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(status_label(language, *status)))
                .style(Style::default().fg(palette.info))
        })
        .collect();
    let status_chart = BarChart::default()
        .block(Block::default().title(app.label(Label::Status)).borders(Borders::ALL))
        .bar_width(9)
        .bar_gap(2)
        .data(BarGroup::default().bars(&status_bars));
    frame.render_widget(status_chart, charts[0]);

    let priority_bars: Vec<Bar> = data
        .priority_series
        .iter()
        .map(|(priority, count)| {
            Bar::default()
                .value(*count as u64)
                .label(Line::from(priority_label(language, Some(*priority))))
                .style(Style::default().fg(variant_color(
                    airdrop_domain::CardVariant::for_priority(Some(*priority)),
                )))
        })
        .collect();
    let priority_chart = BarChart::default()
        .block(Block::default().title(app.label(Label::Priority)).borders(Borders::ALL))
        .bar_width(7)
        .bar_gap(2)
        .data(BarGroup::default().bars(&priority_bars));
    frame.render_widget(priority_chart, charts[1]);

    let gauge = Gauge::default()
        .block(Block::default().title(app.label(Label::Completion)).borders(Borders::ALL))
        .gauge_style(Style::default().fg(palette.success))
        .percent(u16::from(data.completion_percent.min(100)));
    frame.render_widget(gauge, chunks[2]);
}

fn render_calendar(app: &App, frame: &mut Frame, palette: &Palette) {
    let language = app.language();
    let events = calendar_events(app.model.board(), app.model.today());
    let inner = render_popup_with_block(frame, palette, app.label(Label::Calendar), 70, 80);

    if events.is_empty() {
        frame.render_widget(
            Paragraph::new(app.label(Label::NoDueDates)).style(palette.label()),
            inner,
        );
        return;
    }

    let mut lines = Vec::new();
    for (date, day) in agenda(&events) {
        lines.push(Line::styled(
            date.format("%a %Y-%m-%d").to_string(),
            palette.bold_highlight(),
        ));
        for event in day {
            lines.push(Line::from(vec![
                Span::styled("  ● ", Style::default().fg(palette.event_tone(event.tone))),
                Span::raw(event.title.as_str()),
                Span::styled(
                    format!("  ({})", status_label(language, event.status)),
                    palette.label(),
                ),
            ]));
        }
    }
    frame.render_widget(Paragraph::new(lines).wrap(Wrap { trim: false }), inner);
}
