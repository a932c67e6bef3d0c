use tui::style::{Color, Modifier, Style};

use crate::models::TASK_STATUSES;

fn badge(fg: Color) -> Style {
    Style::default().fg(fg).add_modifier(Modifier::BOLD)
}

/// Style used for anything the lookups don't recognise.
pub fn neutral() -> Style {
    badge(Color::Gray)
}

pub fn status_style(status: &str) -> Style {
    match status {
        "completed" => badge(Color::Green),
        "in progress" => badge(Color::Magenta),
        "todo" => badge(Color::Gray),
        _ => neutral(),
    }
}

pub fn priority_style(priority: &str) -> Style {
    match priority {
        "high" => badge(Color::Red),
        "medium" => badge(Color::Yellow),
        "low" => badge(Color::Blue),
        _ => neutral(),
    }
}

/// The status a task moves to when the user cycles it. Unrecognised statuses
/// restart the cycle.
pub fn next_task_status(current: &str) -> &'static str {
    match TASK_STATUSES.iter().position(|status| *status == current) {
        Some(i) => TASK_STATUSES[(i + 1) % TASK_STATUSES.len()],
        None => TASK_STATUSES[0],
    }
}
