use ratatui::prelude::{Line, Span};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, BorderType, Borders, List, ListItem, ListState, Paragraph},
};

use crate::constants::PALETTE;

use super::{
    App,
    form_state::FormField,
    ui_helpers::{format_calories, format_net_calories, truncate_label},
    view_style,
};

impl App {
    pub(super) fn draw_frame(&mut self, f: &mut Frame) {
        let size = f.size();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(5),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(size);

        self.render_header(f, rows[0]);
        self.render_form(f, rows[1]);
        self.render_tracker(f, rows[2]);
        self.render_activity_list(f, rows[3]);
        self.render_footer(f, rows[4]);
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let title_color = view_style::text_color_for_bg(PALETTE.header);
        let restart_hint = Span::styled(
            "R: restart",
            view_style::key_hint_style(self.store.can_restart()),
        );

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PALETTE.header))
            .title(Line::from(restart_hint).alignment(Alignment::Right));

        let title = Paragraph::new(Line::from(Span::styled(
            "CALORIE TRACKER",
            Style::default()
                .fg(title_color)
                .bg(PALETTE.header)
                .add_modifier(Modifier::BOLD),
        )))
        .alignment(Alignment::Center)
        .block(block);

        f.render_widget(title, area);
    }

    fn render_form(&self, f: &mut Frame, area: Rect) {
        let title = if self.is_editing() {
            "Edit activity"
        } else {
            "New activity"
        };
        let border_color = if self.in_form() {
            PALETTE.form
        } else {
            PALETTE.muted
        };

        let focused = |field: FormField| self.in_form() && self.form.field == field;
        let category_color = view_style::category_color(self.form.category);

        let lines = vec![
            Line::from(vec![
                Span::raw("Category  "),
                Span::styled(
                    format!("< {} >", self.form.category.label()),
                    view_style::field_style(focused(FormField::Category)).fg(category_color),
                ),
            ]),
            Line::from(vec![
                Span::raw("Activity  "),
                Span::styled(
                    placeholder(&self.form.name, "e.g. Oatmeal, Cycling"),
                    view_style::field_style(focused(FormField::Name)),
                ),
            ]),
            Line::from(vec![
                Span::raw("Calories  "),
                Span::styled(
                    placeholder(&self.form.calories, "e.g. 300"),
                    view_style::field_style(focused(FormField::Calories)),
                ),
            ]),
        ];

        let submit_label = if self.is_editing() {
            "Enter: save changes"
        } else {
            "Enter: save"
        };

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title(Line::from(Span::styled(title, Style::default().fg(Color::White))))
            .title(
                Line::from(Span::styled(
                    submit_label,
                    view_style::key_hint_style(self.form.is_submittable()),
                ))
                .alignment(Alignment::Right),
            );

        f.render_widget(Paragraph::new(lines).block(block), area);
    }

    fn render_tracker(&self, f: &mut Frame, area: Rect) {
        let summary = self.store.summary();
        let net = summary.net_calories();

        let line = Line::from(vec![
            Span::raw("Consumed "),
            Span::styled(
                format_calories(summary.calories_consumed),
                Style::default()
                    .fg(PALETTE.consumed)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Burned "),
            Span::styled(
                format_calories(summary.calories_burned),
                Style::default()
                    .fg(PALETTE.burned)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw("   Net "),
            Span::styled(
                format_net_calories(net),
                Style::default()
                    .fg(view_style::net_color(net))
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(PALETTE.tracker))
            .title("Summary");

        f.render_widget(
            Paragraph::new(line)
                .alignment(Alignment::Center)
                .block(block),
            area,
        );
    }

    fn render_activity_list(&self, f: &mut Frame, area: Rect) {
        let border_color = if self.in_form() {
            PALETTE.muted
        } else {
            PALETTE.form
        };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(border_color))
            .title("Food and activities");

        if self.store.is_empty_activities() {
            let empty = Paragraph::new(Line::from(Span::styled(
                "No activities yet",
                Style::default().fg(PALETTE.muted),
            )))
            .alignment(Alignment::Center)
            .block(block);
            f.render_widget(empty, area);
            return;
        }

        let name_width = (area.width as usize).saturating_sub(34).max(8);
        let active_id = self.store.active_id();

        let items: Vec<ListItem> = self
            .store
            .activities()
            .iter()
            .map(|activity| {
                let marker = if active_id == Some(activity.id.as_str()) {
                    "✎ "
                } else {
                    "  "
                };
                ListItem::new(Line::from(vec![
                    Span::raw(marker),
                    Span::styled(
                        format!("{:10}", activity.category.label()),
                        Style::default().fg(view_style::category_color(activity.category)),
                    ),
                    Span::raw(format!(
                        "{:width$}",
                        truncate_label(&activity.name, name_width),
                        width = name_width
                    )),
                    Span::styled(
                        format!("{:>12}", format_calories(activity.calories)),
                        Style::default().add_modifier(Modifier::BOLD),
                    ),
                ]))
            })
            .collect();

        let mut list_state = ListState::default();
        if !self.in_form() {
            list_state.select(Some(self.selected_index));
        }

        let list = List::new(items)
            .block(block)
            .highlight_style(Style::default().fg(Color::Black).bg(Color::White));

        f.render_stateful_widget(list, area, &mut list_state);
    }

    fn render_footer(&self, f: &mut Frame, area: Rect) {
        let hints = if self.in_form() {
            "Tab list  ↑/↓ field  ←/→ category  Enter save  Esc clear  Ctrl+C quit"
        } else {
            "Tab form  ↑/↓ select  e edit  x delete  R restart  q quit"
        };

        let mut spans = vec![Span::styled(hints, Style::default().fg(PALETTE.muted))];
        if let Some(status) = &self.status {
            spans.push(Span::raw("  "));
            spans.push(Span::styled(
                status.as_str(),
                Style::default().fg(Color::White),
            ));
        }

        f.render_widget(Paragraph::new(Line::from(spans)), area);
    }
}

fn placeholder(value: &str, hint: &str) -> String {
    if value.is_empty() {
        hint.to_string()
    } else {
        value.to_string()
    }
}
