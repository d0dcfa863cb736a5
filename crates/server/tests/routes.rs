use std::path::PathBuf;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use migration::MigratorTrait;
use serde_json::{json, Value};
use service::storage::file_store::FileStore;
use tower::ServiceExt;
use uuid::Uuid;

use server::routes::build_router;
use server::startup::build_cors;
use server::state::AppState;

const BOUNDARY: &str = "----admin-api-test-boundary";

struct TestApp {
    router: Router,
    uploads: PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.uploads);
    }
}

async fn build_app() -> anyhow::Result<TestApp> {
    let db = models::db::connect_in_memory().await?;
    migration::Migrator::up(&db, None).await?;
    let uploads = std::env::temp_dir().join(format!("routes_uploads_{}", Uuid::new_v4()));
    let state = AppState::new(db, FileStore::new(&uploads));
    Ok(TestApp { router: build_router(state, build_cors(), 10 << 20), uploads })
}

async fn send(app: &TestApp, req: Request<Body>) -> anyhow::Result<(StatusCode, Vec<u8>)> {
    let res = app.router.clone().oneshot(req).await?;
    let status = res.status();
    let body = to_bytes(res.into_body(), usize::MAX).await?;
    Ok((status, body.to_vec()))
}

fn json_req(method: Method, uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_owned()))
        .expect("request")
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).expect("request")
}

fn multipart_req(method: Method, uri: &str, field: &str, files: &[(&str, &str)]) -> Request<Body> {
    let mut body = Vec::new();
    for (name, data) in files {
        body.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{field}\"; filename=\"{name}\"\r\nContent-Type: application/octet-stream\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data.as_bytes());
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
        .body(Body::from(body))
        .expect("request")
}

fn sauna() -> Value {
    json!({
        "eng": "sauna",
        "title": "Finnish sauna",
        "src": "/uploads/sauna.jpg",
        "prices": "1500",
        "text": "Wood-fired"
    })
}

#[tokio::test]
async fn health_is_ok() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, get("/health")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn service_create_list_update() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, body) = send(&app, get("/services")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));

    let (status, body) = send(&app, json_req(Method::POST, "/services", &sauna().to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    let created: Value = serde_json::from_slice(&body)?;
    let id = created["id"].as_i64().expect("numeric id");
    assert!(id > 0);
    assert_eq!(created["title"], "Finnish sauna");

    let mut changed = sauna();
    changed["title"] = json!("Russian banya");
    let (status, body) =
        send(&app, json_req(Method::PUT, &format!("/services/{id}"), &changed.to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body)?;
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["title"], "Russian banya");

    let (_, body) = send(&app, get("/services")).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([updated]));
    Ok(())
}

#[tokio::test]
async fn service_rejects_bad_bodies_without_persisting() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _) = send(&app, json_req(Method::POST, "/services", "{not json")).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&app, json_req(Method::POST, "/services", r#"{"eng":"x","title":"y"}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(String::from_utf8(body)?.contains("src"));

    let (status, _) = send(&app, json_req(Method::POST, "/services", r#"{"eng": 5}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, get("/services")).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));
    Ok(())
}

#[tokio::test]
async fn malformed_json_on_updates_changes_nothing() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (_, body) = send(&app, json_req(Method::POST, "/services", &sauna().to_string())).await?;
    let service: Value = serde_json::from_slice(&body)?;
    let id = service["id"].as_i64().expect("id");
    for bad in ["{not json", r#"{"title": 7}"#, r#""just a string""#] {
        let (status, _) = send(&app, json_req(Method::PUT, &format!("/services/{id}"), bad)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
    }
    let (_, body) = send(&app, get("/services")).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([service]));

    let (_, body) = send(&app, multipart_req(Method::POST, "/gallery", "files", &[("a.png", "img")])).await?;
    let items: Vec<Value> = serde_json::from_slice(&body)?;
    let gid = items[0]["id"].as_i64().expect("id");
    for bad in ["{not json", r#"{"hidden": "yes"}"#] {
        let (status, _) = send(&app, json_req(Method::PUT, &format!("/gallery/{gid}"), bad)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
    }
    let (_, body) = send(&app, get("/gallery")).await?;
    assert_eq!(serde_json::from_slice::<Vec<Value>>(&body)?, items);

    for bad in ["{not json", r#"{"address": 1, "phone": "1", "email": "a@b"}"#] {
        let (status, _) = send(&app, json_req(Method::PUT, "/contacts", bad)).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{bad}");
    }
    let (_, body) = send(&app, get("/contacts")).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));
    Ok(())
}

#[tokio::test]
async fn blank_values_count_as_present() -> anyhow::Result<()> {
    let app = build_app().await?;

    let mut service = sauna();
    service["title"] = json!(" ");
    let (status, _) = send(&app, json_req(Method::POST, "/services", &service.to_string())).await?;
    assert_eq!(status, StatusCode::OK);

    let contacts = r#"{"address":" ","phone":"1","email":"a@b"}"#;
    let (status, body) = send(&app, json_req(Method::PUT, "/contacts", contacts)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?["address"], " ");
    Ok(())
}

#[tokio::test]
async fn invalid_identities_are_bad_requests() -> anyhow::Result<()> {
    let app = build_app().await?;
    for raw in ["abc", "-1", "0", "99999999999"] {
        let (status, _) =
            send(&app, json_req(Method::PUT, &format!("/services/{raw}"), &sauna().to_string())).await?;
        assert_eq!(status, StatusCode::BAD_REQUEST, "/services/{raw}");
    }
    let req = Request::builder().method(Method::DELETE).uri("/gallery/abc").body(Body::empty())?;
    assert_eq!(send(&app, req).await?.0, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn unknown_identities_are_not_found() -> anyhow::Result<()> {
    let app = build_app().await?;

    let (status, _) =
        send(&app, json_req(Method::PUT, "/services/999999", &sauna().to_string())).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, json_req(Method::PUT, "/gallery/999999", r#"{"hidden":true}"#)).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) =
        send(&app, multipart_req(Method::PUT, "/docs/999999", "file", &[("a.pdf", "a")])).await?;
    assert_eq!(status, StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn gallery_upload_toggle_and_delete() -> anyhow::Result<()> {
    let app = build_app().await?;

    let req = multipart_req(Method::POST, "/gallery", "files", &[("a.png", "one"), ("b.jpg", "two")]);
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    let items: Vec<Value> = serde_json::from_slice(&body)?;
    assert_eq!(items.len(), 2);
    assert_ne!(items[0]["filename"], items[1]["filename"]);
    assert!(items.iter().all(|item| item["hidden"] == json!(false)));

    // stored file is served back verbatim
    let path = items[0]["filename"].as_str().expect("filename");
    let (status, body) = send(&app, get(path)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"one");

    let id = items[1]["id"].as_i64().expect("id");
    let (status, body) =
        send(&app, json_req(Method::PUT, &format!("/gallery/{id}"), r#"{"hidden":true}"#)).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?["hidden"], json!(true));

    // missing key means visible again
    let (_, body) = send(&app, json_req(Method::PUT, &format!("/gallery/{id}"), "{}")).await?;
    assert_eq!(serde_json::from_slice::<Value>(&body)?["hidden"], json!(false));

    let delete = |id: i64| {
        Request::builder()
            .method(Method::DELETE)
            .uri(format!("/gallery/{id}"))
            .body(Body::empty())
            .expect("request")
    };
    let (status, body) = send(&app, delete(id)).await?;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());
    assert_eq!(send(&app, delete(id)).await?.0, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, get("/gallery")).await?;
    let remaining: Vec<Value> = serde_json::from_slice(&body)?;
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0]["id"], items[0]["id"]);
    Ok(())
}

#[tokio::test]
async fn bracketed_field_name_is_accepted() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = multipart_req(Method::POST, "/docs", "files[]", &[("rules.pdf", "%PDF")]);
    let (status, body) = send(&app, req).await?;
    assert_eq!(status, StatusCode::OK);
    let docs: Vec<Value> = serde_json::from_slice(&body)?;
    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0]["name"], "rules.pdf");
    Ok(())
}

#[tokio::test]
async fn malformed_multipart_is_bad_request() -> anyhow::Result<()> {
    let app = build_app().await?;
    for uri in ["/gallery", "/docs"] {
        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "multipart/form-data")
            .body(Body::from("garbage"))?;
        assert_eq!(send(&app, req).await?.0, StatusCode::BAD_REQUEST, "{uri}");

        let req = Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"))
            .body(Body::from(format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"files\"; filename=\"x\"\r\n\r\ntruncated")))?;
        assert_eq!(send(&app, req).await?.0, StatusCode::BAD_REQUEST, "{uri}");
    }
    Ok(())
}

#[tokio::test]
async fn docs_replace_requires_exactly_one_file() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (_, body) =
        send(&app, multipart_req(Method::POST, "/docs", "files", &[("rules.pdf", "v1")])).await?;
    let docs: Vec<Value> = serde_json::from_slice(&body)?;
    let id = docs[0]["id"].as_i64().expect("id");
    let uri = format!("/docs/{id}");

    let (status, _) = send(&app, multipart_req(Method::PUT, &uri, "file", &[])).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let two = &[("a.pdf", "a"), ("b.pdf", "b")];
    let (status, _) = send(&app, multipart_req(Method::PUT, &uri, "file", two)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) =
        send(&app, multipart_req(Method::PUT, &uri, "file", &[("rules-v2.pdf", "v2")])).await?;
    assert_eq!(status, StatusCode::OK);
    let updated: Value = serde_json::from_slice(&body)?;
    assert_eq!(updated["id"], json!(id));
    assert_eq!(updated["name"], "rules-v2.pdf");
    assert_ne!(updated["file"], docs[0]["file"]);
    Ok(())
}

#[tokio::test]
async fn contacts_singleton_upsert() -> anyhow::Result<()> {
    let app = build_app().await?;
    let contacts = json!({
        "address": "1 Lake Road",
        "phone": "+7 900 000-00-00",
        "email": "info@example.org",
        "work_schedule": "Daily"
    });

    let (status, body) = send(&app, get("/contacts")).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(serde_json::from_slice::<Value>(&body)?, json!([]));

    let (status, body) = send(&app, json_req(Method::PUT, "/contacts", &contacts.to_string())).await?;
    assert_eq!(status, StatusCode::OK);
    let first: Value = serde_json::from_slice(&body)?;
    assert!(first.get("id").is_none());
    assert_eq!(first["website"], "");

    let mut changed = contacts.clone();
    changed["phone"] = json!("+7 900 111-11-11");
    let (status, _) = send(&app, json_req(Method::PUT, "/contacts", &changed.to_string())).await?;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, get("/contacts")).await?;
    let rows: Vec<Value> = serde_json::from_slice(&body)?;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0]["phone"], "+7 900 111-11-11");

    let (status, _) =
        send(&app, json_req(Method::PUT, "/contacts", r#"{"address":"x","phone":"y"}"#)).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn preflight_and_cors_headers() -> anyhow::Result<()> {
    let app = build_app().await?;
    let req = Request::builder()
        .method(Method::OPTIONS)
        .uri("/services")
        .header(header::ORIGIN, "http://admin.example.org")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.status(), StatusCode::OK);
    let headers = res.headers();
    assert_eq!(headers[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    let methods = headers[header::ACCESS_CONTROL_ALLOW_METHODS].to_str()?;
    for m in ["GET", "POST", "PUT", "DELETE", "OPTIONS"] {
        assert!(methods.contains(m), "{m} missing from {methods}");
    }
    let allowed = headers[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str()?.to_ascii_lowercase();
    assert!(allowed.contains("content-type") && allowed.contains("authorization"));

    let req = Request::builder()
        .uri("/services")
        .header(header::ORIGIN, "http://admin.example.org")
        .body(Body::empty())?;
    let res = app.router.clone().oneshot(req).await?;
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert!(res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS].to_str()?.contains("DELETE"));
    assert!(res.headers()[header::ACCESS_CONTROL_ALLOW_HEADERS].to_str()?.contains("Authorization"));

    // error responses carry them too
    let res = app.router.clone().oneshot(get("/services/abc")).await?;
    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    let res = app.router.clone().oneshot(get("/nope")).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert!(res.headers().contains_key(header::ACCESS_CONTROL_ALLOW_HEADERS));
    Ok(())
}

#[tokio::test]
async fn unmatched_routes_use_framework_defaults() -> anyhow::Result<()> {
    let app = build_app().await?;
    assert_eq!(send(&app, get("/nope")).await?.0, StatusCode::NOT_FOUND);
    let req = Request::builder().method(Method::DELETE).uri("/services").body(Body::empty())?;
    assert_eq!(send(&app, req).await?.0, StatusCode::METHOD_NOT_ALLOWED);
    Ok(())
}

#[tokio::test]
async fn openapi_document_is_served() -> anyhow::Result<()> {
    let app = build_app().await?;
    let (status, body) = send(&app, get("/api-docs/openapi.json")).await?;
    assert_eq!(status, StatusCode::OK);
    let doc: Value = serde_json::from_slice(&body)?;
    assert!(doc["paths"]["/gallery/{id}"].is_object());
    assert!(doc["components"]["securitySchemes"]["ApiKeyAuth"].is_object());
    Ok(())
}
