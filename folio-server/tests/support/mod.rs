#![allow(dead_code)]

use std::{sync::Arc, time::Duration};

use anyhow::{Result, anyhow};
use axum_test::TestServer;
use chrono::Utc;
use folio_core::{
    application::unit_of_work::AppUnitOfWorkBuilder,
    drive::{DEFAULT_API_BASE, DEFAULT_TOKEN_URI},
    testing::{
        InMemoryEnrollments, InMemoryMediaRecords, InMemoryProjects,
        InMemorySessions, ScriptedFolderListing,
    },
};
use folio_model::{DriveEntry, Project, ProjectID, UserID};
use folio_server::{
    AppState, create_app,
    infra::config::{
        Config, ConfigMetadata, CorsConfig, DatabaseConfig, DriveConfig,
        ServerConfig,
    },
};

pub const TOKEN: &str = "test-session-token";
pub const FOLDER_URL: &str =
    "https://drive.google.com/drive/folders/1AbC_folder-9?usp=sharing";

pub struct TestApp {
    pub server: TestServer,
    pub user: UserID,
    pub media: Arc<InMemoryMediaRecords>,
    pub projects: Arc<InMemoryProjects>,
    pub sessions: Arc<InMemorySessions>,
    pub enrollments: Arc<InMemoryEnrollments>,
    pub drive: Arc<ScriptedFolderListing>,
}

fn test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
        },
        database: DatabaseConfig::default(),
        drive: DriveConfig {
            credentials: None,
            api_base: DEFAULT_API_BASE.into(),
            token_uri: DEFAULT_TOKEN_URI.into(),
            request_timeout: Duration::from_secs(5),
        },
        cors: CorsConfig::default(),
        metadata: ConfigMetadata::default(),
    }
}

pub fn build_test_app() -> Result<TestApp> {
    build_test_app_with_drive(ScriptedFolderListing::default())
}

pub fn build_test_app_with_drive(drive: ScriptedFolderListing) -> Result<TestApp> {
    let media = Arc::new(InMemoryMediaRecords::default());
    let projects = Arc::new(InMemoryProjects::default());
    let sessions = Arc::new(InMemorySessions::default());
    let enrollments = Arc::new(InMemoryEnrollments::default());
    let drive = Arc::new(drive);

    let user = UserID::new();
    sessions.insert(TOKEN, user, Utc::now() + chrono::Duration::hours(1));

    let unit_of_work = AppUnitOfWorkBuilder::new()
        .with_media_records(media.clone())
        .with_projects(projects.clone())
        .with_sessions(sessions.clone())
        .with_enrollments(enrollments.clone())
        .build()
        .map_err(|err| anyhow!(err))?;

    let state = AppState::new(
        Arc::new(unit_of_work),
        drive.clone(),
        Arc::new(test_config()),
    );
    let server = TestServer::new(create_app(state))
        .map_err(|err| anyhow!(err.to_string()))?;

    Ok(TestApp {
        server,
        user,
        media,
        projects,
        sessions,
        enrollments,
        drive,
    })
}

pub fn entry(id: &str, name: &str) -> DriveEntry {
    DriveEntry {
        id: id.to_string(),
        name: name.to_string(),
        mime_type: "image/jpeg".to_string(),
        thumbnail_link: Some(format!("https://lh3.example/{id}")),
        web_view_link: Some(format!("https://drive.example/file/{id}/view")),
    }
}

pub fn project(drive_folder_url: Option<&str>) -> Project {
    Project {
        id: ProjectID::new(),
        title: "Charcoal studies".into(),
        description: None,
        tags: vec!["drawing".into()],
        drive_folder_url: drive_folder_url.map(str::to_string),
        thumbnail_url: None,
        sort_order: 0,
    }
}
