use ratatui::style::{Color, Modifier, Style};

use crate::{constants::PALETTE, domain::Category};

pub(super) fn category_color(category: Category) -> Color {
    match category {
        Category::Consumed => PALETTE.consumed,
        Category::Burned => PALETTE.burned,
    }
}

pub(super) fn net_color(net: f64) -> Color {
    if net < 0.0 {
        PALETTE.burned
    } else if net > 0.0 {
        PALETTE.consumed
    } else {
        PALETTE.muted
    }
}

pub(super) fn field_style(focused: bool) -> Style {
    if focused {
        Style::default()
            .fg(Color::Black)
            .bg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::White)
    }
}

pub(super) fn key_hint_style(enabled: bool) -> Style {
    if enabled {
        Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    }
}

pub(super) fn text_color_for_bg(bg_color: Color) -> Color {
    if let Color::Rgb(r, g, b) = bg_color {
        let brightness = (299 * r as u32 + 587 * g as u32 + 114 * b as u32) / 1000;
        if brightness > 128 {
            Color::Black
        } else {
            Color::White
        }
    } else {
        Color::White
    }
}
