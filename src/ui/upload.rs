use std::path::Path;

use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::ui::centered_rect;

pub enum UploadAction {
    Cancel,
    Upload(i64, String),
}

/// Prompt for the file to attach to a project.
pub struct UploadState {
    project_id: i64,
    pub path: String,
}

/// Only the final component of a path is ever sent.
pub fn file_name_of(path: &str) -> Option<String> {
    Path::new(path.trim())
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
}

impl UploadState {
    pub fn new(project_id: i64) -> Self {
        Self {
            project_id,
            path: String::new(),
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<UploadAction> {
        match key {
            KeyCode::Esc => return Some(UploadAction::Cancel),
            KeyCode::Enter => {
                if let Some(name) = file_name_of(&self.path) {
                    return Some(UploadAction::Upload(self.project_id, name));
                }
            }
            KeyCode::Char(c) => self.path.push(c),
            KeyCode::Backspace => {
                self.path.pop();
            }
            _ => {}
        }
        None
    }
}

pub fn render_upload<B: Backend>(f: &mut Frame<B>, state: &mut UploadState) {
    let area = centered_rect(60, 30, f.size());
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)].as_ref())
        .split(area);

    f.render_widget(Clear, area);
    let input = Paragraph::new(format!("{}|", state.path))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().title("Upload Document: file path").borders(Borders::ALL));
    f.render_widget(input, chunks[0]);

    let preview = match file_name_of(&state.path) {
        Some(name) => format!("Will record \"{}\"\n<Enter> Upload | <Esc> Cancel", name),
        None => "<Esc> Cancel".to_string(),
    };
    let help = Paragraph::new(preview)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[1]);
}

pub fn handle_input(state: &mut UploadState) -> Result<Option<UploadAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}
