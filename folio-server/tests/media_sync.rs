use anyhow::Result;
use axum::http::StatusCode;
use folio_core::api::routes::{v1, with_id};
use folio_core::testing::ScriptedFolderListing;
use folio_model::ProjectID;
use serde_json::{Value, json};

#[path = "support/mod.rs"]
mod support;
use support::{FOLDER_URL, TOKEN, build_test_app, build_test_app_with_drive, entry, project};

#[tokio::test]
async fn drive_sync_converges_and_reports_count() -> Result<()> {
    let app = build_test_app()?;
    let project_id = ProjectID::new();
    app.media.seed_drive_record(project_id, "f1", "old.png", 0);
    app.media.seed_drive_record(project_id, "gone", "gone.png", 1);
    app.drive
        .set_entries(vec![entry("f2", "new.png"), entry("f1", "old-renamed.png")]);

    let response = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer(TOKEN)
        .json(&json!({ "folderUrl": FOLDER_URL, "projectId": project_id.to_string() }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "success": true, "filesCount": 2 }));

    let records = app.media.records_for(project_id);
    let ids: Vec<_> = records
        .iter()
        .map(|r| (r.drive_file_id.clone().unwrap(), r.sort_order))
        .collect();
    assert_eq!(ids, vec![("f2".to_string(), 0), ("f1".to_string(), 1)]);
    assert_eq!(records[1].file_name, "old-renamed.png");
    Ok(())
}

#[tokio::test]
async fn drive_sync_requires_authentication() -> Result<()> {
    let app = build_test_app()?;

    let anonymous = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .json(&json!({ "folderUrl": FOLDER_URL, "projectId": ProjectID::new().to_string() }))
        .await;
    anonymous.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = anonymous.json();
    assert_eq!(body["error"], "Unauthorized");

    let bad_token = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer("not-a-session")
        .json(&json!({}))
        .await;
    bad_token.assert_status(StatusCode::UNAUTHORIZED);

    assert_eq!(app.drive.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn drive_sync_validates_input_before_calling_drive() -> Result<()> {
    let app = build_test_app()?;
    let project_id = ProjectID::new().to_string();

    let cases = [
        json!({ "projectId": project_id }),
        json!({ "folderUrl": FOLDER_URL }),
        json!({ "folderUrl": "", "projectId": project_id }),
        json!({ "folderUrl": "https://example.com/nothing", "projectId": project_id }),
    ];

    for body in cases {
        let response = app
            .server
            .post(v1::media::DRIVE_SYNC)
            .authorization_bearer(TOKEN)
            .json(&body)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        let error: Value = response.json();
        assert!(error["error"].is_string(), "body: {error}");
    }

    let malformed = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer(TOKEN)
        .text("{not json")
        .content_type("application/json")
        .await;
    malformed.assert_status(StatusCode::BAD_REQUEST);

    assert_eq!(app.drive.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn unconfigured_integration_is_a_server_error() -> Result<()> {
    let app = build_test_app_with_drive(ScriptedFolderListing::unconfigured())?;

    let response = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer(TOKEN)
        .json(&json!({ "folderUrl": FOLDER_URL, "projectId": ProjectID::new().to_string() }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert_eq!(body["error"], "Google Drive integration is not configured");
    assert_eq!(app.drive.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn drive_failures_propagate_message() -> Result<()> {
    let app = build_test_app()?;
    app.drive.fail_with("File not found: 1AbC_folder-9");

    let response = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer(TOKEN)
        .json(&json!({ "folderUrl": FOLDER_URL, "projectId": ProjectID::new().to_string() }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(
        body["error"]
            .as_str()
            .is_some_and(|msg| msg.contains("File not found: 1AbC_folder-9"))
    );
    Ok(())
}

#[tokio::test]
async fn session_store_outage_is_a_storage_error() -> Result<()> {
    let app = build_test_app()?;
    app.sessions.fail_with("connection refused");

    let response = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer(TOKEN)
        .json(&json!({ "folderUrl": FOLDER_URL, "projectId": ProjectID::new().to_string() }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Storage error: connection refused" }));
    assert_eq!(app.drive.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn truncated_listing_still_syncs_first_page() -> Result<()> {
    let app = build_test_app()?;
    let project_id = ProjectID::new();
    app.media.seed_drive_record(project_id, "z-beyond-page", "zz.png", 0);
    app.drive
        .set_entries(vec![entry("a1", "a.png"), entry("b2", "b.png")]);
    app.drive.set_truncated(true);

    let response = app
        .server
        .post(v1::media::DRIVE_SYNC)
        .authorization_bearer(TOKEN)
        .json(&json!({ "folderUrl": FOLDER_URL, "projectId": project_id.to_string() }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "success": true, "filesCount": 2 }));
    let ids: Vec<_> = app
        .media
        .records_for(project_id)
        .into_iter()
        .filter_map(|record| record.drive_file_id)
        .collect();
    assert_eq!(ids, vec!["a1".to_string(), "b2".to_string()]);
    Ok(())
}

#[tokio::test]
async fn project_media_lists_drive_records_then_manual() -> Result<()> {
    let app = build_test_app()?;
    let project_id = ProjectID::new();
    app.media.seed_manual_record(project_id, "cover.jpg", 0);
    app.media.seed_drive_record(project_id, "b", "b.png", 1);
    app.media.seed_drive_record(project_id, "a", "a.png", 0);

    let response = app
        .server
        .get(&with_id(v1::projects::MEDIA, project_id))
        .authorization_bearer(TOKEN)
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let names: Vec<&str> = body["media"]
        .as_array()
        .expect("media array")
        .iter()
        .filter_map(|m| m["file_name"].as_str())
        .collect();
    assert_eq!(names, vec!["a.png", "b.png", "cover.jpg"]);
    Ok(())
}

#[tokio::test]
async fn resync_uses_stored_folder_url() -> Result<()> {
    let app = build_test_app()?;
    let stored = project(Some(FOLDER_URL));
    let project_id = stored.id;
    app.projects.insert(stored);
    app.drive.set_entries(vec![entry("x", "x.jpg")]);

    let response = app
        .server
        .post(&with_id(v1::projects::MEDIA_RESYNC, project_id))
        .authorization_bearer(TOKEN)
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "success": true, "filesCount": 1 }));
    assert_eq!(app.media.records_for(project_id).len(), 1);
    Ok(())
}

#[tokio::test]
async fn resync_without_folder_or_project() -> Result<()> {
    let app = build_test_app()?;
    let bare = project(None);
    let bare_id = bare.id;
    app.projects.insert(bare);

    let missing_url = app
        .server
        .post(&with_id(v1::projects::MEDIA_RESYNC, bare_id))
        .authorization_bearer(TOKEN)
        .await;
    missing_url.assert_status(StatusCode::BAD_REQUEST);

    let unknown = app
        .server
        .post(&with_id(v1::projects::MEDIA_RESYNC, ProjectID::new()))
        .authorization_bearer(TOKEN)
        .await;
    unknown.assert_status(StatusCode::NOT_FOUND);

    assert_eq!(app.drive.calls(), 0);
    Ok(())
}

#[tokio::test]
async fn health_is_public() -> Result<()> {
    let app = build_test_app()?;
    let response = app.server.get(folio_core::api::routes::HEALTH).await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "ok" }));
    Ok(())
}
