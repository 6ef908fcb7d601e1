use crate::summary::format_amount;

pub fn wrap_prev_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current == 0 {
        len - 1
    } else {
        current - 1
    }
}

pub fn wrap_next_index(current: usize, len: usize) -> usize {
    if len == 0 {
        0
    } else if current + 1 >= len {
        0
    } else {
        current + 1
    }
}

pub fn format_calories(calories: f64) -> String {
    format!("{} kcal", format_amount(calories))
}

pub fn format_net_calories(net: f64) -> String {
    let amount = format_amount(net);
    if net > 0.0 && amount != "0" {
        format!("+{} kcal", amount)
    } else {
        format!("{} kcal", amount)
    }
}

pub fn truncate_label(value: &str, max_chars: usize) -> String {
    let count = value.chars().count();
    if count <= max_chars {
        return value.to_string();
    }

    if max_chars <= 3 {
        return value.chars().take(max_chars).collect();
    }

    let prefix: String = value.chars().take(max_chars - 3).collect();
    format!("{}...", prefix)
}
