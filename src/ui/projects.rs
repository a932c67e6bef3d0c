use anyhow::Result;
use crossterm::event::{self, Event, KeyCode};
use tui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Gauge, List, ListItem, ListState, Paragraph},
    Frame,
};

use crate::models::Project;
use crate::ui::badge::{next_task_status, priority_style, status_style};
use crate::ui::centered_rect;

#[derive(Clone, Copy, PartialEq, Debug)]
pub enum Focus {
    Projects,
    Tasks,
}

#[derive(Clone, Copy, PartialEq, Debug)]
enum Confirm {
    DeleteTask(i64),
    DeleteProject(i64),
}

// Represents the state of the project list screen
pub struct ProjectsState {
    projects: Vec<Project>,
    list_state: ListState,
    task_state: ListState,
    focus: Focus,
    confirm: Option<Confirm>,
    message: Option<String>,
}

#[derive(Debug, PartialEq)]
pub enum ProjectAction {
    Quit,
    Reload,
    NewProject,
    NewTask(i64),           // Contains project_id
    UploadDocument(i64),    // Contains project_id
    SetTaskStatus(i64, String),
    DeleteTask(i64),        // Contains task_id
    DeleteProject(i64),     // Contains project_id
}

fn step(selected: Option<usize>, len: usize, forward: bool) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let i = match selected {
        Some(i) if forward => {
            if i >= len - 1 {
                0
            } else {
                i + 1
            }
        }
        Some(i) => {
            if i == 0 {
                len - 1
            } else {
                i - 1
            }
        }
        None => 0,
    };
    Some(i)
}

impl ProjectsState {
    pub fn new(projects: Vec<Project>) -> Self {
        let mut state = Self {
            projects: Vec::new(),
            list_state: ListState::default(),
            task_state: ListState::default(),
            focus: Focus::Projects,
            confirm: None,
            message: None,
        };
        state.replace(projects);
        state
    }

    /// Swap in a freshly loaded list, keeping the selection on the same
    /// project when it still exists.
    pub fn replace(&mut self, projects: Vec<Project>) {
        let selected_id = self.selected_project_id();
        self.projects = projects;

        let index = selected_id
            .and_then(|id| self.projects.iter().position(|p| p.id == id))
            .or(if self.projects.is_empty() { None } else { Some(0) });
        self.list_state.select(index);
        self.clamp_task_selection();
    }

    fn clamp_task_selection(&mut self) {
        let task_count = self.selected_project().map_or(0, |p| p.tasks.len());
        if task_count == 0 {
            self.task_state.select(None);
            self.focus = Focus::Projects;
        } else {
            let i = self.task_state.selected().unwrap_or(0).min(task_count - 1);
            self.task_state.select(Some(i));
        }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn next(&mut self) {
        self.move_selection(true);
    }

    pub fn previous(&mut self) {
        self.move_selection(false);
    }

    fn move_selection(&mut self, forward: bool) {
        match self.focus {
            Focus::Projects => {
                let i = step(self.list_state.selected(), self.projects.len(), forward);
                self.list_state.select(i);
                self.task_state.select(None);
                self.clamp_task_selection();
            }
            Focus::Tasks => {
                let len = self.selected_project().map_or(0, |p| p.tasks.len());
                let i = step(self.task_state.selected(), len, forward);
                self.task_state.select(i);
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Projects if self.selected_task_id().is_some() => Focus::Tasks,
            _ => Focus::Projects,
        };
    }

    pub fn selected_project(&self) -> Option<&Project> {
        self.list_state.selected().and_then(|i| self.projects.get(i))
    }

    pub fn selected_project_id(&self) -> Option<i64> {
        self.selected_project().map(|p| p.id)
    }

    pub fn selected_task_id(&self) -> Option<i64> {
        let project = self.selected_project()?;
        self.task_state
            .selected()
            .and_then(|i| project.tasks.get(i))
            .map(|t| t.id)
    }

    pub fn set_message(&mut self, message: impl Into<String>) {
        self.message = Some(message.into());
    }

    pub fn clear_message(&mut self) {
        self.message = None;
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn handle_key(&mut self, key: KeyCode) -> Option<ProjectAction> {
        if let Some(confirm) = self.confirm {
            match key {
                KeyCode::Char('y') => {
                    self.confirm = None;
                    return Some(match confirm {
                        Confirm::DeleteTask(id) => ProjectAction::DeleteTask(id),
                        Confirm::DeleteProject(id) => ProjectAction::DeleteProject(id),
                    });
                }
                KeyCode::Char('n') | KeyCode::Esc => self.confirm = None,
                _ => {}
            }
            return None;
        }

        match key {
            KeyCode::Char('q') => return Some(ProjectAction::Quit),
            KeyCode::Esc => {
                if self.focus == Focus::Tasks {
                    self.focus = Focus::Projects;
                } else {
                    return Some(ProjectAction::Quit);
                }
            }
            KeyCode::Char('r') => return Some(ProjectAction::Reload),
            KeyCode::Char('n') => return Some(ProjectAction::NewProject),
            KeyCode::Tab => self.toggle_focus(),
            KeyCode::Down => self.next(),
            KeyCode::Up => self.previous(),
            KeyCode::Char('t') => {
                if let Some(id) = self.selected_project_id() {
                    return Some(ProjectAction::NewTask(id));
                }
            }
            KeyCode::Char('u') => {
                if let Some(id) = self.selected_project_id() {
                    return Some(ProjectAction::UploadDocument(id));
                }
            }
            KeyCode::Char('d') if self.focus == Focus::Projects => {
                if let Some(id) = self.selected_project_id() {
                    self.confirm = Some(Confirm::DeleteProject(id));
                }
            }
            KeyCode::Char('s') | KeyCode::Enter if self.focus == Focus::Tasks => {
                let project = self.selected_project()?;
                let task = project.tasks.get(self.task_state.selected()?)?;
                return Some(ProjectAction::SetTaskStatus(
                    task.id,
                    next_task_status(&task.status).to_string(),
                ));
            }
            KeyCode::Char('x') | KeyCode::Delete if self.focus == Focus::Tasks => {
                if let Some(id) = self.selected_task_id() {
                    self.confirm = Some(Confirm::DeleteTask(id));
                }
            }
            _ => {}
        }
        None
    }
}

pub fn render_loading<B: Backend>(frame: &mut Frame<B>) {
    let area = centered_rect(40, 20, frame.size());
    let loading = Paragraph::new("Loading...")
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL))
        .style(Style::default().fg(Color::Magenta));
    frame.render_widget(loading, area);
}

pub fn render_projects<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState) {
    let size = frame.size();
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(3),
                Constraint::Min(1),
                Constraint::Length(3),
            ]
            .as_ref(),
        )
        .split(size);

    let header = Paragraph::new("ProjectManage")
        .alignment(Alignment::Center)
        .style(Style::default().fg(Color::Magenta).add_modifier(Modifier::BOLD))
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(header, chunks[0]);

    if state.projects.is_empty() {
        let empty = Paragraph::new("No projects yet. Press <N> to create the first one.")
            .alignment(Alignment::Center)
            .block(Block::default().borders(Borders::ALL));
        frame.render_widget(empty, chunks[1]);
    } else {
        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)].as_ref())
            .split(chunks[1]);

        render_project_list(frame, state, body[0]);
        render_project_detail(frame, state, body[1]);
    }

    render_footer(frame, state, chunks[2]);

    match state.confirm {
        Some(Confirm::DeleteTask(_)) => render_confirmation(
            frame,
            size,
            "Are you sure you want to delete this task?",
            None,
        ),
        Some(Confirm::DeleteProject(_)) => render_confirmation(
            frame,
            size,
            "Are you sure you want to delete this project?",
            Some("All of its tasks and documents will also be deleted."),
        ),
        None => {}
    }
}

fn render_project_list<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState, area: Rect) {
    let items: Vec<ListItem> = state
        .projects
        .iter()
        .map(|project| {
            ListItem::new(Spans::from(vec![
                Span::raw(project.name.clone()),
                Span::raw(" "),
                Span::styled(format!("[{}]", project.status), status_style(&project.status)),
            ]))
        })
        .collect();

    let border_style = if state.focus == Focus::Projects {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };

    let list = List::new(items)
        .block(
            Block::default()
                .title("Projects")
                .borders(Borders::ALL)
                .border_style(border_style),
        )
        .highlight_style(
            Style::default()
                .bg(Color::Blue)
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        );

    frame.render_stateful_widget(list, area, &mut state.list_state);
}

fn render_project_detail<B: Backend>(frame: &mut Frame<B>, state: &mut ProjectsState, area: Rect) {
    let Some(project) = state.list_state.selected().and_then(|i| state.projects.get(i)) else {
        return;
    };

    let document_rows = project.documents.len().max(1) as u16 + 2;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(
            [
                Constraint::Length(4),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(document_rows),
            ]
            .as_ref(),
        )
        .split(area);

    let summary = Paragraph::new(vec![
        Spans::from(vec![
            Span::raw(format!("Budget: {:.2}", project.budget)),
            Span::raw("   "),
            Span::raw(format!("Spent: {:.2}", project.spent)),
        ]),
        Spans::from(vec![
            Span::raw("Status: "),
            Span::styled(project.status.clone(), status_style(&project.status)),
        ]),
    ])
    .block(Block::default().title(project.name.clone()).borders(Borders::ALL));
    frame.render_widget(summary, chunks[0]);

    // The gauge only draws 0..=100; the label shows the stored value as is.
    let gauge = Gauge::default()
        .block(Block::default().title("Progress").borders(Borders::ALL))
        .gauge_style(Style::default().fg(Color::Magenta))
        .percent(project.progress.clamp(0, 100) as u16)
        .label(format!("{}%", project.progress));
    frame.render_widget(gauge, chunks[1]);

    let tasks: Vec<ListItem> = if project.tasks.is_empty() {
        vec![ListItem::new("No tasks yet")]
    } else {
        project
            .tasks
            .iter()
            .map(|task| {
                ListItem::new(Spans::from(vec![
                    Span::styled(format!("[{}]", task.priority), priority_style(&task.priority)),
                    Span::raw(" "),
                    Span::raw(task.title.clone()),
                    Span::raw(format!(" ({}) ", task.assignee)),
                    Span::styled(task.status.clone(), status_style(&task.status)),
                ]))
            })
            .collect()
    };

    let tasks_border = if state.focus == Focus::Tasks {
        Style::default().fg(Color::Magenta)
    } else {
        Style::default()
    };
    let task_list = List::new(tasks)
        .block(
            Block::default()
                .title("Tasks")
                .borders(Borders::ALL)
                .border_style(tasks_border),
        )
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED));
    frame.render_stateful_widget(task_list, chunks[2], &mut state.task_state);

    let documents: Vec<ListItem> = if project.documents.is_empty() {
        vec![ListItem::new("No documents")]
    } else {
        project
            .documents
            .iter()
            .map(|doc| {
                ListItem::new(format!(
                    "{} - {} ({})",
                    doc.name,
                    doc.uploaded_by,
                    doc.timestamp.format("%Y-%m-%d")
                ))
            })
            .collect()
    };
    let document_list = List::new(documents).block(Block::default().title("Documents").borders(Borders::ALL));
    frame.render_widget(document_list, chunks[3]);
}

fn render_footer<B: Backend>(frame: &mut Frame<B>, state: &ProjectsState, area: Rect) {
    let text = if let Some(message) = &state.message {
        Spans::from(Span::styled(message.clone(), Style::default().fg(Color::Red)))
    } else if state.focus == Focus::Tasks {
        Spans::from("<S> Next status | <X> Delete task | <Tab>/<Esc> Projects | <Q> Quit")
    } else if state.selected_project().is_some() {
        Spans::from(
            "<N> New project | <T> Add task | <U> Upload document | <D> Delete project | <Tab> Tasks | <R> Reload | <Q> Quit",
        )
    } else {
        Spans::from("<N> New project | <R> Reload | <Q> Quit")
    };

    let footer = Paragraph::new(text).block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, area);
}

fn render_confirmation<B: Backend>(frame: &mut Frame<B>, size: Rect, question: &str, detail: Option<&str>) {
    let popup_area = centered_rect(50, 20, size);

    let mut lines = vec![Spans::from(""), Spans::from(question.to_string()), Spans::from("")];
    if let Some(detail) = detail {
        lines.push(Spans::from(detail.to_string()));
        lines.push(Spans::from(""));
    }
    lines.push(Spans::from("<Y> Yes  <N> No"));

    let popup = Paragraph::new(lines)
        .block(Block::default().title("Confirm Delete").borders(Borders::ALL))
        .style(Style::default().fg(Color::White).bg(Color::Black));

    frame.render_widget(Clear, popup_area);
    frame.render_widget(popup, popup_area);
}

pub fn handle_input(state: &mut ProjectsState) -> Result<Option<ProjectAction>> {
    if let Event::Key(key) = event::read()? {
        return Ok(state.handle_key(key.code));
    }
    Ok(None)
}
