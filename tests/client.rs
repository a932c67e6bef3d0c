use std::net::SocketAddr;

use rust_decimal::Decimal;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use projectmanage::client::{ApiClient, ClientError};
use projectmanage::db::Database;
use projectmanage::models::{NewProject, NewTask};
use projectmanage::server;
use projectmanage::ui::app::{App, AppScreen};
use projectmanage::ui::projects::ProjectAction;
use projectmanage::ui::task_wizard::TaskWizardAction;
use projectmanage::ui::upload::UploadAction;

struct TestServer {
    addr: SocketAddr,
    _shutdown: oneshot::Sender<()>,
}

impl TestServer {
    async fn start() -> Self {
        let db = Database::in_memory().await.unwrap();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel::<()>();

        tokio::spawn(server::serve_on(listener, db, async {
            let _ = rx.await;
        }));

        Self { addr, _shutdown: tx }
    }

    fn client(&self) -> ApiClient {
        ApiClient::new(format!("http://{}/", self.addr), "current user")
    }
}

fn bridge() -> NewProject {
    NewProject {
        name: "Bridge".to_string(),
        budget: Decimal::new(5000, 0),
        ..Default::default()
    }
}

#[tokio::test]
async fn client_drives_the_whole_surface() {
    let server = TestServer::start().await;
    let client = server.client();

    let project = client.create_project(&bridge()).await.unwrap();
    let task = client
        .add_task(project.id, &NewTask { title: "Survey".into(), assignee: "amy".into(), ..Default::default() })
        .await
        .unwrap();
    let document = client.upload_document(project.id, "site.pdf").await.unwrap();
    client.update_task_status(task.id, "completed").await.unwrap();

    let projects = client.get_projects().await;
    assert_eq!(projects.len(), 1);
    assert_eq!(projects[0].budget, Decimal::new(5000, 0));
    assert_eq!(projects[0].tasks[0].status, "completed");
    assert_eq!(projects[0].documents, vec![document.clone()]);
    assert_eq!(document.uploaded_by, "current user");

    client.delete_task(task.id).await.unwrap();
    assert!(client.get_projects().await[0].tasks.is_empty());

    client.delete_project(project.id).await.unwrap();
    assert!(client.get_projects().await.is_empty());
}

#[tokio::test]
async fn failed_mutations_surface_the_status() {
    let server = TestServer::start().await;
    let client = server.client();

    let err = client.add_task(77, &NewTask::default()).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status == reqwest::StatusCode::NOT_FOUND));

    let err = client.delete_task(77).await.unwrap_err();
    assert!(matches!(err, ClientError::Status(status) if status == reqwest::StatusCode::NOT_FOUND));
}

#[tokio::test]
async fn unreachable_server_yields_an_empty_list() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = ApiClient::new(format!("http://{}", addr), "current user");

    assert!(client.get_projects().await.is_empty());
}

#[tokio::test]
async fn app_reloads_after_each_mutation() {
    let server = TestServer::start().await;
    let client = server.client();
    let project = client.create_project(&bridge()).await.unwrap();

    let mut app = App::new(client);
    app.reload().await;
    assert_eq!(app.projects_state().projects().len(), 1);

    app.on_projects_action(ProjectAction::NewTask(project.id)).await;
    assert_eq!(app.screen(), AppScreen::TaskWizard);
    let task = NewTask { title: "Pour".into(), assignee: "cy".into(), ..Default::default() };
    app.on_task_wizard_action(TaskWizardAction::Save(project.id, task)).await;

    assert_eq!(app.screen(), AppScreen::Projects);
    assert_eq!(app.projects_state().projects()[0].tasks[0].title, "Pour");
    assert!(app.task_draft(project.id).is_none());

    app.on_projects_action(ProjectAction::UploadDocument(project.id)).await;
    app.on_upload_action(UploadAction::Upload(project.id, "notes.txt".into())).await;
    assert_eq!(app.projects_state().projects()[0].documents[0].name, "notes.txt");
    assert_eq!(app.projects_state().message(), None);
}

#[tokio::test]
async fn failed_task_keeps_its_draft_and_the_old_list() {
    let server = TestServer::start().await;
    let client = server.client();
    let project = client.create_project(&bridge()).await.unwrap();

    let mut app = App::new(client.clone());
    app.reload().await;
    client.delete_project(project.id).await.unwrap();

    let task = NewTask { title: "Late".into(), assignee: "dee".into(), ..Default::default() };
    app.on_task_wizard_action(TaskWizardAction::Save(project.id, task.clone())).await;

    assert_eq!(app.task_draft(project.id), Some(&task));
    assert_eq!(app.projects_state().projects().len(), 1);
    assert!(app.projects_state().message().unwrap().contains("Adding task failed"));
}

#[tokio::test]
async fn cancelled_task_draft_survives_per_project() {
    let server = TestServer::start().await;
    let mut app = App::new(server.client());

    let draft = NewTask { title: "Half typed".into(), ..Default::default() };
    app.on_task_wizard_action(TaskWizardAction::Cancel(3, draft.clone())).await;

    assert_eq!(app.task_draft(3), Some(&draft));
    assert_eq!(app.task_draft(4), None);
}
