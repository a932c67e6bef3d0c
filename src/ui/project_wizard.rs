use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use rust_decimal::Decimal;
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{NewProject, DEFAULT_PROJECT_STATUS, PROJECT_STATUSES};
use crate::ui::components::choice_input::ChoiceInputState;

/// Unsubmitted new-project form contents.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectDraft {
    pub name: String,
    pub budget: String,
    pub status: String,
}

impl Default for ProjectDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            budget: String::new(),
            status: DEFAULT_PROJECT_STATUS.to_string(),
        }
    }
}

impl ProjectDraft {
    /// The payload to send, if the draft has a name and a readable budget.
    /// New projects start with nothing spent and no progress.
    pub fn to_new_project(&self) -> Option<NewProject> {
        if self.name.trim().is_empty() {
            return None;
        }
        let budget = self.budget.trim().parse::<Decimal>().ok()?;

        Some(NewProject {
            name: self.name.clone(),
            budget,
            spent: Decimal::ZERO,
            progress: 0,
            status: self.status.clone(),
        })
    }
}

pub enum ProjectWizardAction {
    Cancel(ProjectDraft),
    Save(NewProject),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum ProjectField {
    Name,
    Budget,
    Status,
}

pub struct ProjectWizardState {
    pub draft: ProjectDraft,
    pub current_field: ProjectField,
    pub editing: bool,
    pub status_state: ChoiceInputState,
}

impl ProjectWizardState {
    pub fn new(draft: ProjectDraft) -> Self {
        let status_state = ChoiceInputState::new(&PROJECT_STATUSES, draft.status.clone());
        Self {
            draft,
            current_field: ProjectField::Name,
            editing: false,
            status_state,
        }
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::Name => ProjectField::Budget,
            ProjectField::Budget => ProjectField::Status,
            ProjectField::Status => ProjectField::Name,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            ProjectField::Name => ProjectField::Status,
            ProjectField::Budget => ProjectField::Name,
            ProjectField::Status => ProjectField::Budget,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        match self.current_field {
            ProjectField::Name => match key {
                KeyCode::Char(c) => self.draft.name.push(c),
                KeyCode::Backspace => {
                    self.draft.name.pop();
                }
                _ => {}
            },
            ProjectField::Budget => match key {
                KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => self.draft.budget.push(c),
                KeyCode::Backspace => {
                    self.draft.budget.pop();
                }
                _ => {}
            },
            ProjectField::Status => {
                self.status_state.handle_input(key);
                self.draft.status = self.status_state.value.clone();
            }
        }
    }

    pub fn is_valid(&self) -> bool {
        self.draft.to_new_project().is_some()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ProjectWizardAction> {
        match key {
            KeyCode::Esc => {
                if self.editing {
                    self.toggle_editing();
                } else {
                    return Some(ProjectWizardAction::Cancel(self.draft.clone()));
                }
            }
            KeyCode::Enter => self.toggle_editing(),
            KeyCode::Up if !self.editing => self.previous_field(),
            KeyCode::Down if !self.editing => self.next_field(),
            KeyCode::Char('s') if !self.editing => {
                if let Some(project) = self.draft.to_new_project() {
                    return Some(ProjectWizardAction::Save(project));
                }
            }
            _ if self.editing => self.edit_current_field(key),
            _ => {}
        }
        None
    }
}

pub fn render_project_wizard<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .margin(2)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(5),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(f.size());

    let title = Paragraph::new("New Project")
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let help_text = if state.editing {
        match state.current_field {
            ProjectField::Status => "Left/Right - Pick status | Enter/Esc - Done",
            _ => "Enter/Esc - Done",
        }
    } else if state.is_valid() {
        "Enter - Edit field | Up/Down - Navigate fields | S - Create project | Esc - Back"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | Name and budget are required | Esc - Back"
    };

    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &mut ProjectWizardState, area: Rect) {
    let field_names = ["Name", "Budget", "Status"];
    let field_values = [
        state.draft.name.clone(),
        state.draft.budget.clone(),
        state.draft.status.clone(),
    ];

    let items: Vec<ListItem> = field_names
        .iter()
        .zip(field_values.iter())
        .enumerate()
        .map(|(i, (name, value))| {
            let selected = i == state.current_field as usize;
            let content = if selected && state.editing {
                let displayed_value = if i == ProjectField::Status as usize {
                    state.status_state.get_display_string()
                } else {
                    format!("{}|", value)
                };

                Spans::from(vec![
                    Span::styled(format!("{}: ", name), Style::default().fg(Color::Yellow)),
                    Span::styled(displayed_value, Style::default().add_modifier(Modifier::BOLD)),
                ])
            } else {
                let style = if selected {
                    Style::default().fg(Color::Yellow)
                } else {
                    Style::default()
                };

                Spans::from(vec![
                    Span::styled(format!("{}: ", name), style),
                    Span::raw(value.clone()),
                ])
            };

            ListItem::new(content)
        })
        .collect();

    let form_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Project Details"));

    f.render_widget(form_list, area);
}

pub fn handle_input(state: &mut ProjectWizardState) -> Result<Option<ProjectWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(state: &mut ProjectWizardState, text: &str) {
        state.handle_key(KeyCode::Enter);
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
        state.handle_key(KeyCode::Enter);
    }

    #[test]
    fn draft_needs_name_and_budget() {
        let mut draft = ProjectDraft::default();
        assert!(draft.to_new_project().is_none());

        draft.name = "Bridge".to_string();
        assert!(draft.to_new_project().is_none());

        draft.budget = "12.5".to_string();
        let project = draft.to_new_project().unwrap();
        assert_eq!(project.budget, Decimal::new(125, 1));
        assert_eq!(project.spent, Decimal::ZERO);
        assert_eq!(project.status, DEFAULT_PROJECT_STATUS);
    }

    #[test]
    fn filling_the_form_saves_a_project() {
        let mut state = ProjectWizardState::new(ProjectDraft::default());

        type_into(&mut state, "Bridge");
        state.handle_key(KeyCode::Down);
        type_into(&mut state, "9a00");
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Enter);
        state.handle_key(KeyCode::Right);
        state.handle_key(KeyCode::Esc);

        match state.handle_key(KeyCode::Char('s')) {
            Some(ProjectWizardAction::Save(project)) => {
                assert_eq!(project.name, "Bridge");
                assert_eq!(project.budget, Decimal::new(900, 0));
                assert_eq!(project.status, "paused");
            }
            _ => panic!("expected a save"),
        }
    }

    #[test]
    fn cancel_hands_back_the_draft() {
        let mut state = ProjectWizardState::new(ProjectDraft::default());
        type_into(&mut state, "Half");

        match state.handle_key(KeyCode::Esc) {
            Some(ProjectWizardAction::Cancel(draft)) => assert_eq!(draft.name, "Half"),
            _ => panic!("expected a cancel"),
        }
    }
}
