use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::models::{NewTask, PRIORITIES};
use crate::ui::components::choice_input::ChoiceInputState;

/// Unsubmitted new-task form contents for one project.
pub type TaskDraft = NewTask;

pub enum TaskWizardAction {
    Cancel(i64, TaskDraft),
    Save(i64, NewTask),
}

#[derive(Clone, PartialEq, Copy, Debug)]
pub enum TaskField {
    Title,
    Assignee,
    Priority,
}

pub struct TaskWizardState {
    project_id: i64,
    project_name: String,
    pub draft: TaskDraft,
    pub current_field: TaskField,
    pub editing: bool,
    pub priority_state: ChoiceInputState,
}

impl TaskWizardState {
    pub fn new(project_id: i64, project_name: impl Into<String>, draft: TaskDraft) -> Self {
        let priority_state = ChoiceInputState::new(&PRIORITIES, draft.priority.clone());
        Self {
            project_id,
            project_name: project_name.into(),
            draft,
            current_field: TaskField::Title,
            editing: false,
            priority_state,
        }
    }

    pub fn project_id(&self) -> i64 {
        self.project_id
    }

    pub fn toggle_editing(&mut self) {
        self.editing = !self.editing;
    }

    pub fn next_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Title => TaskField::Assignee,
            TaskField::Assignee => TaskField::Priority,
            TaskField::Priority => TaskField::Title,
        };
    }

    pub fn previous_field(&mut self) {
        self.current_field = match self.current_field {
            TaskField::Title => TaskField::Priority,
            TaskField::Assignee => TaskField::Title,
            TaskField::Priority => TaskField::Assignee,
        };
    }

    pub fn edit_current_field(&mut self, key: KeyCode) {
        if !self.editing {
            return;
        }

        let text = match self.current_field {
            TaskField::Title => &mut self.draft.title,
            TaskField::Assignee => &mut self.draft.assignee,
            TaskField::Priority => {
                self.priority_state.handle_input(key);
                self.draft.priority = self.priority_state.value.clone();
                return;
            }
        };

        match key {
            KeyCode::Char(c) => text.push(c),
            KeyCode::Backspace => {
                text.pop();
            }
            _ => {}
        }
    }

    /// Title and assignee are both required.
    pub fn is_valid(&self) -> bool {
        !self.draft.title.trim().is_empty() && !self.draft.assignee.trim().is_empty()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<TaskWizardAction> {
        match key {
            KeyCode::Esc => {
                if self.editing {
                    self.toggle_editing();
                } else {
                    return Some(TaskWizardAction::Cancel(self.project_id, self.draft.clone()));
                }
            }
            KeyCode::Enter => self.toggle_editing(),
            KeyCode::Up if !self.editing => self.previous_field(),
            KeyCode::Down if !self.editing => self.next_field(),
            KeyCode::Char('s') if !self.editing => {
                if self.is_valid() {
                    return Some(TaskWizardAction::Save(self.project_id, self.draft.clone()));
                }
            }
            _ if self.editing => self.edit_current_field(key),
            _ => {}
        }
        None
    }
}

pub fn render_task_wizard<B: Backend>(f: &mut Frame<B>, state: &mut TaskWizardState) {
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

    let title = Paragraph::new(format!("New Task for {}", state.project_name))
        .style(Style::default().fg(Color::Cyan))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, chunks[0]);

    render_form(f, state, chunks[1]);

    let help_text = if state.editing {
        "Enter/Esc - Done | Left/Right - Pick priority"
    } else {
        "Enter - Edit field | Up/Down - Navigate fields | S - Add task | Esc - Back"
    };
    let help = Paragraph::new(help_text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(help, chunks[2]);
}

fn render_form<B: Backend>(f: &mut Frame<B>, state: &mut TaskWizardState, area: Rect) {
    let rows = [
        ("Title", state.draft.title.clone()),
        ("Assignee", state.draft.assignee.clone()),
        ("Priority", state.draft.priority.clone()),
    ];

    let items: Vec<ListItem> = rows
        .iter()
        .enumerate()
        .map(|(i, (name, value))| {
            let selected = i == state.current_field as usize;
            let label_style = if selected {
                Style::default().fg(Color::Yellow)
            } else {
                Style::default()
            };

            let value = if selected && state.editing {
                let shown = if i == TaskField::Priority as usize {
                    state.priority_state.get_display_string()
                } else {
                    format!("{}|", value)
                };
                Span::styled(shown, Style::default().add_modifier(Modifier::BOLD))
            } else {
                Span::raw(value.clone())
            };

            ListItem::new(Spans::from(vec![
                Span::styled(format!("{}: ", name), label_style),
                value,
            ]))
        })
        .collect();

    let form_list = List::new(items).block(Block::default().borders(Borders::ALL).title("Task Details"));
    f.render_widget(form_list, area);
}

pub fn handle_input(state: &mut TaskWizardState) -> Result<Option<TaskWizardAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn type_into(state: &mut TaskWizardState, text: &str) {
        state.handle_key(KeyCode::Enter);
        for c in text.chars() {
            state.handle_key(KeyCode::Char(c));
        }
        state.handle_key(KeyCode::Enter);
    }

    #[test]
    fn save_requires_title_and_assignee() {
        let mut state = TaskWizardState::new(4, "Bridge", TaskDraft::default());
        type_into(&mut state, "Survey");

        assert!(state.handle_key(KeyCode::Char('s')).is_none());

        state.handle_key(KeyCode::Down);
        type_into(&mut state, "amy");
        state.handle_key(KeyCode::Down);
        state.handle_key(KeyCode::Enter);
        state.handle_key(KeyCode::Right);
        state.handle_key(KeyCode::Enter);

        match state.handle_key(KeyCode::Char('s')) {
            Some(TaskWizardAction::Save(project_id, task)) => {
                assert_eq!(project_id, 4);
                assert_eq!(task.title, "Survey");
                assert_eq!(task.assignee, "amy");
                assert_eq!(task.priority, "high");
            }
            _ => panic!("expected a save"),
        }
    }

    #[test]
    fn typing_s_while_editing_is_text() {
        let mut state = TaskWizardState::new(1, "Bridge", TaskDraft::default());
        type_into(&mut state, "sss");

        assert_eq!(state.draft.title, "sss");
    }
}
