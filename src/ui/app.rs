use std::collections::HashMap;
use std::io;

use anyhow::Result;
use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use tui::{
    backend::{Backend, CrosstermBackend},
    Frame, Terminal,
};

use crate::client::{self, ApiClient};
use crate::ui::{
    project_wizard::{self, render_project_wizard, ProjectDraft, ProjectWizardAction, ProjectWizardState},
    projects::{self, render_loading, render_projects, ProjectAction, ProjectsState},
    task_wizard::{self, render_task_wizard, TaskDraft, TaskWizardAction, TaskWizardState},
    upload::{self, render_upload, UploadAction, UploadState},
};

// Represents the current screen in the app
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppScreen {
    Projects,
    ProjectWizard,
    TaskWizard,
    Upload,
}

/// Everything the terminal client keeps between key presses.
///
/// The project list is never patched locally: every mutation that succeeds
/// is followed by a full reload from the server.
pub struct App {
    client: ApiClient,
    screen: AppScreen,
    projects_state: ProjectsState,
    project_draft: ProjectDraft,
    task_drafts: HashMap<i64, TaskDraft>,
    project_wizard_state: Option<ProjectWizardState>,
    task_wizard_state: Option<TaskWizardState>,
    upload_state: Option<UploadState>,
}

impl App {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            screen: AppScreen::Projects,
            projects_state: ProjectsState::new(Vec::new()),
            project_draft: ProjectDraft::default(),
            task_drafts: HashMap::new(),
            project_wizard_state: None,
            task_wizard_state: None,
            upload_state: None,
        }
    }

    pub fn screen(&self) -> AppScreen {
        self.screen
    }

    pub fn projects_state(&self) -> &ProjectsState {
        &self.projects_state
    }

    pub fn task_draft(&self, project_id: i64) -> Option<&TaskDraft> {
        self.task_drafts.get(&project_id)
    }

    pub fn project_draft(&self) -> &ProjectDraft {
        &self.project_draft
    }

    pub async fn reload(&mut self) {
        let projects = self.client.get_projects().await;
        self.projects_state.replace(projects);
    }

    async fn after_mutation<T>(&mut self, result: client::Result<T>, what: &str) -> bool {
        match result {
            Ok(_) => {
                self.projects_state.clear_message();
                self.reload().await;
                true
            }
            Err(err) => {
                self.projects_state.set_message(format!("{} failed: {}", what, err));
                false
            }
        }
    }

    /// Returns `true` when the user asked to quit.
    pub async fn on_projects_action(&mut self, action: ProjectAction) -> bool {
        match action {
            ProjectAction::Quit => return true,
            ProjectAction::Reload => {
                self.projects_state.clear_message();
                self.reload().await;
            }
            ProjectAction::NewProject => {
                self.project_wizard_state = Some(ProjectWizardState::new(self.project_draft.clone()));
                self.screen = AppScreen::ProjectWizard;
            }
            ProjectAction::NewTask(project_id) => {
                let project_name = self
                    .projects_state
                    .projects()
                    .iter()
                    .find(|p| p.id == project_id)
                    .map(|p| p.name.clone())
                    .unwrap_or_default();
                let draft = self.task_drafts.remove(&project_id).unwrap_or_default();
                self.task_wizard_state = Some(TaskWizardState::new(project_id, project_name, draft));
                self.screen = AppScreen::TaskWizard;
            }
            ProjectAction::UploadDocument(project_id) => {
                self.upload_state = Some(UploadState::new(project_id));
                self.screen = AppScreen::Upload;
            }
            ProjectAction::SetTaskStatus(task_id, status) => {
                let result = self.client.update_task_status(task_id, &status).await;
                self.after_mutation(result, "Updating task status").await;
            }
            ProjectAction::DeleteTask(task_id) => {
                let result = self.client.delete_task(task_id).await;
                self.after_mutation(result, "Deleting task").await;
            }
            ProjectAction::DeleteProject(project_id) => {
                let result = self.client.delete_project(project_id).await;
                if self.after_mutation(result, "Deleting project").await {
                    self.task_drafts.remove(&project_id);
                }
            }
        }
        false
    }

    pub async fn on_project_wizard_action(&mut self, action: ProjectWizardAction) {
        match action {
            ProjectWizardAction::Cancel(draft) => {
                self.project_draft = draft;
            }
            ProjectWizardAction::Save(project) => {
                let result = self.client.create_project(&project).await;
                if self.after_mutation(result, "Creating project").await {
                    self.project_draft = ProjectDraft::default();
                } else if let Some(state) = &self.project_wizard_state {
                    self.project_draft = state.draft.clone();
                }
            }
        }
        self.project_wizard_state = None;
        self.screen = AppScreen::Projects;
    }

    pub async fn on_task_wizard_action(&mut self, action: TaskWizardAction) {
        match action {
            TaskWizardAction::Cancel(project_id, draft) => {
                self.task_drafts.insert(project_id, draft);
            }
            TaskWizardAction::Save(project_id, task) => {
                let result = self.client.add_task(project_id, &task).await;
                if !self.after_mutation(result, "Adding task").await {
                    self.task_drafts.insert(project_id, task);
                }
            }
        }
        self.task_wizard_state = None;
        self.screen = AppScreen::Projects;
    }

    pub async fn on_upload_action(&mut self, action: UploadAction) {
        if let UploadAction::Upload(project_id, file_name) = action {
            let result = self.client.upload_document(project_id, &file_name).await;
            self.after_mutation(result, "Uploading document").await;
        }
        self.upload_state = None;
        self.screen = AppScreen::Projects;
    }

    pub fn draw<B: Backend>(&mut self, f: &mut Frame<B>) {
        match self.screen {
            AppScreen::Projects => render_projects(f, &mut self.projects_state),
            AppScreen::ProjectWizard => {
                if let Some(state) = &mut self.project_wizard_state {
                    render_project_wizard(f, state);
                }
            }
            AppScreen::TaskWizard => {
                if let Some(state) = &mut self.task_wizard_state {
                    render_task_wizard(f, state);
                }
            }
            AppScreen::Upload => {
                render_projects(f, &mut self.projects_state);
                if let Some(state) = &mut self.upload_state {
                    render_upload(f, state);
                }
            }
        }
    }

    /// Wait for one key press on the current screen and act on it.
    async fn step(&mut self) -> Result<bool> {
        match self.screen {
            AppScreen::Projects => {
                if let Some(action) = projects::handle_input(&mut self.projects_state)? {
                    return Ok(self.on_projects_action(action).await);
                }
            }
            AppScreen::ProjectWizard => {
                let action = match &mut self.project_wizard_state {
                    Some(state) => project_wizard::handle_input(state)?,
                    None => None,
                };
                if let Some(action) = action {
                    self.on_project_wizard_action(action).await;
                }
            }
            AppScreen::TaskWizard => {
                let action = match &mut self.task_wizard_state {
                    Some(state) => task_wizard::handle_input(state)?,
                    None => None,
                };
                if let Some(action) = action {
                    self.on_task_wizard_action(action).await;
                }
            }
            AppScreen::Upload => {
                let action = match &mut self.upload_state {
                    Some(state) => upload::handle_input(state)?,
                    None => None,
                };
                if let Some(action) = action {
                    self.on_upload_action(action).await;
                }
            }
        }
        Ok(false)
    }
}

pub async fn run(client: ApiClient) -> Result<()> {
    // Setup terminal
    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new(client);
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<()> {
    terminal.draw(|f| render_loading(f))?;
    app.reload().await;

    loop {
        terminal.draw(|f| app.draw(f))?;

        if app.step().await? {
            break;
        }
    }

    Ok(())
}
