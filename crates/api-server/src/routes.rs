use crate::auth::AuthSession;
use crate::error::ApiError;
use crate::extract::{ApiJson, ApiQuery};
use crate::AppState;
use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post, put},
    Router,
};
use domain::{DomainError, ImageUpload, ProjectDraft, ProjectFilter, ProjectPage, UploadedImage};
use serde::Deserialize;
use serde_json::json;
use std::collections::HashMap;
use tracing::debug;

const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;
const POSTER_FIELD: &str = "posterImage";

#[derive(Debug, Deserialize)]
pub struct ListParams {
    page: Option<u32>,
    limit: Option<u32>,
    category: Option<String>,
    search: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorListParams {
    user_id: Option<String>,
    page: Option<u32>,
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
pub struct RelatedParams {
    limit: Option<u32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectForm {
    project_data: ProjectDraft,
}

#[derive(Debug, Deserialize)]
pub struct ProfileForm {
    name: String,
    email: String,
    image: Option<String>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/projects", get(list_projects))
        .route("/projects/:id", get(get_project).delete(delete_project))
        .route("/projects/:id/related", get(related_projects))
        .route("/projects/:id/like", post(toggle_like))
        .route("/share-work", post(share_work))
        .route(
            "/share-work/upload",
            post(share_work_with_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/edit-project/:id", put(edit_project))
        .route(
            "/edit-project/:id/upload",
            put(edit_project_with_upload).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .route("/user-projects", get(user_projects))
        .route("/users", post(register_profile))
        .route("/users/:id", get(get_user))
        .route(
            "/upload",
            post(upload_image).layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES)),
        )
        .with_state(state)
}

async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

async fn list_projects(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<ListParams>,
) -> Result<Json<ProjectPage>, ApiError> {
    let filter = ProjectFilter::from_params(params.category.as_deref(), params.search.as_deref());
    let page = state
        .app
        .project_query_service
        .list(
            params.page.unwrap_or(1),
            params.limit.unwrap_or(state.projects_per_page),
            filter,
        )
        .await?;
    Ok(Json(page))
}

async fn get_project(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project = state
        .app
        .project_query_service
        .get_project_with_author(&id)
        .await?;
    Ok(Json(json!({ "project": project })))
}

async fn related_projects(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiQuery(params): ApiQuery<RelatedParams>,
) -> Result<impl IntoResponse, ApiError> {
    let projects = state
        .app
        .project_query_service
        .related_projects(&id, params.limit.unwrap_or(state.projects_per_page))
        .await?;
    Ok(Json(json!({ "projects": projects })))
}

async fn toggle_like(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let status = state.app.like_service.toggle_like(&user, &id).await?;
    Ok(Json(status))
}

async fn delete_project(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    state.app.project_service.delete_project(&user, &id).await?;
    Ok(Json(json!({
        "success": true,
        "message": "Project deleted successfully"
    })))
}

async fn share_work(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    ApiJson(form): ApiJson<ProjectForm>,
) -> Result<impl IntoResponse, ApiError> {
    let project = state
        .app
        .project_service
        .create_project(&user, form.project_data)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Project created successfully",
            "project": project
        })),
    ))
}

async fn share_work_with_upload(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    user.require("create a project")?;
    let (mut fields, poster) = read_form(multipart, POSTER_FIELD).await?;
    let poster = poster.ok_or_else(|| {
        DomainError::ValidationError("Please upload the Poster Image".to_string())
    })?;

    let draft = draft_from_fields(&mut fields, None);

    let project = state
        .app
        .project_service
        .create_project_with_upload(&user, draft, poster)
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "success": true,
            "message": "Project created successfully",
            "project": project
        })),
    ))
}

async fn edit_project(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    Path(id): Path<String>,
    ApiJson(form): ApiJson<ProjectForm>,
) -> Result<impl IntoResponse, ApiError> {
    let project = state
        .app
        .project_service
        .update_project(&user, &id, form.project_data)
        .await?;
    Ok(Json(json!({
        "success": true,
        "message": "Project updated successfully",
        "project": project
    })))
}

/// Edit from a multipart form. A `posterImage` file replaces the poster,
/// otherwise the form's `posterImage` text (or the stored poster) is kept.
async fn edit_project_with_upload(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, ApiError> {
    user.require("edit a project")?;
    let (mut fields, poster) = read_form(multipart, POSTER_FIELD).await?;

    let service = &state.app.project_service;
    let project = match poster {
        Some(poster) => {
            let draft = draft_from_fields(&mut fields, None);
            service.update_project_with_upload(&user, &id, draft, poster).await?
        }
        None => {
            let poster_url = fields.remove(POSTER_FIELD).filter(|url| !url.is_empty());
            let draft = draft_from_fields(&mut fields, poster_url);
            service.update_project(&user, &id, draft).await?
        }
    };
    Ok(Json(json!({
        "success": true,
        "message": "Project updated successfully",
        "project": project
    })))
}

async fn user_projects(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<AuthorListParams>,
) -> Result<Json<ProjectPage>, ApiError> {
    let author_id = params.user_id.unwrap_or_default();
    let page = state
        .app
        .project_query_service
        .list_by_author(
            &author_id,
            params.page.unwrap_or(1),
            params.limit.unwrap_or(state.projects_per_page),
        )
        .await?;
    Ok(Json(page))
}

async fn get_user(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state.app.user_service.get_user(&id).await?;
    Ok(Json(user))
}

async fn register_profile(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    ApiJson(form): ApiJson<ProfileForm>,
) -> Result<impl IntoResponse, ApiError> {
    let profile = state
        .app
        .user_service
        .register_profile(&user, form.name, form.email, form.image)
        .await?;
    Ok((StatusCode::CREATED, Json(profile)))
}

async fn upload_image(
    State(state): State<AppState>,
    AuthSession(user): AuthSession,
    multipart: Multipart,
) -> Result<Json<UploadedImage>, ApiError> {
    user.require("upload an image")?;
    let (_, image) = read_form(multipart, "image").await?;
    let image = image
        .ok_or_else(|| DomainError::ValidationError("Please upload the Poster Image".to_string()))?;

    let uploaded = state.app.project_service.upload_image(&user, image).await?;
    Ok(Json(uploaded))
}

fn draft_from_fields(fields: &mut HashMap<String, String>, poster_image: Option<String>) -> ProjectDraft {
    ProjectDraft {
        title: fields.remove("title").unwrap_or_default(),
        description: fields.remove("description").unwrap_or_default(),
        github_url: fields.remove("githubUrl").unwrap_or_default(),
        website_url: fields.remove("websiteUrl").unwrap_or_default(),
        category: fields.remove("category").unwrap_or_default(),
        poster_image,
    }
}

/// Splits a multipart body into its text fields and the file under `file_field`.
async fn read_form(
    mut multipart: Multipart,
    file_field: &str,
) -> Result<(HashMap<String, String>, Option<ImageUpload>), ApiError> {
    let mut fields = HashMap::new();
    let mut file = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();
        if name == file_field {
            let file_name = field.file_name().unwrap_or("poster").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let bytes = field.bytes().await?;
            debug!(file_name = %file_name, size = bytes.len(), "Received upload");
            file = Some(ImageUpload::new(file_name, content_type, bytes.to_vec()));
        } else {
            let value = field.text().await?;
            fields.insert(name, value);
        }
    }

    Ok((fields, file))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{JwtAuthProvider, SessionClaims};
    use application::NexusApp;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request};
    use jsonwebtoken::{encode, EncodingKey, Header};
    use serde_json::Value;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    const SECRET: &str = "router-test-secret";

    struct TestServer {
        _dir: TempDir,
        router: Router,
    }

    fn server() -> TestServer {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nexus.db");
        let app = NexusApp::new_with_config(path.to_str().unwrap(), 50, None).unwrap();
        let state = AppState {
            app: Arc::new(app),
            auth: Arc::new(JwtAuthProvider::new(SECRET)),
            projects_per_page: 8,
        };
        TestServer {
            _dir: dir,
            router: router(state),
        }
    }

    fn bearer(user_id: &str) -> String {
        let claims = SessionClaims {
            sub: user_id.to_string(),
            exp: (chrono::Utc::now().timestamp() + 3600) as u64,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        format!("Bearer {}", token)
    }

    async fn send(
        server: &TestServer,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut request = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            request = request.header(header::AUTHORIZATION, bearer(user));
        }
        let request = match body {
            Some(body) => request
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => request.body(Body::empty()).unwrap(),
        };

        let response = server.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    fn project_data(title: &str, category: &str) -> Value {
        json!({
            "projectData": {
                "title": title,
                "description": "A project shared through the router tests",
                "githubUrl": "https://github.com/example/project",
                "websiteUrl": "https://project.example",
                "category": category,
                "posterImage": "https://img.example/poster.png"
            }
        })
    }

    async fn share(server: &TestServer, user: &str, title: &str, category: &str) -> String {
        let (status, body) = send(
            server,
            Method::POST,
            "/share-work",
            Some(user),
            Some(project_data(title, category)),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body["project"]["id"].as_str().unwrap().to_string()
    }

    #[tokio::test]
    async fn health_reports_healthy() {
        let server = server();
        let (status, body) = send(&server, Method::GET, "/health", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn empty_store_lists_an_empty_page() {
        let server = server();
        let (status, body) = send(&server, Method::GET, "/projects", None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "items": [], "totalCount": 0 }));
    }

    #[tokio::test]
    async fn listing_applies_category_before_search() {
        let server = server();
        share(&server, "alice", "Chat bot", "AI").await;
        share(&server, "alice", "Shop bot", "Web").await;
        share(&server, "bob", "Landing page", "Web").await;

        let (_, body) = send(&server, Method::GET, "/projects?category=Web&search=chat", None, None).await;
        assert_eq!(body["totalCount"], 2);

        let (_, body) = send(&server, Method::GET, "/projects?category=&search=BOT", None, None).await;
        assert_eq!(body["totalCount"], 2);

        let (_, body) = send(&server, Method::GET, "/projects?limit=1&page=2", None, None).await;
        assert_eq!(body["totalCount"], 3);
        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["title"], "Shop bot");

        let (_, body) = send(&server, Method::GET, "/user-projects?userId=alice", None, None).await;
        assert_eq!(body["totalCount"], 2);
    }

    #[tokio::test]
    async fn invalid_paging_is_a_bad_request() {
        let server = server();
        let (status, body) = send(&server, Method::GET, "/projects?page=0", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, _) = send(&server, Method::GET, "/projects?limit=51", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn like_requires_a_session_and_toggles() {
        let server = server();
        let id = share(&server, "alice", "Likeable", "Mobile").await;
        let uri = format!("/projects/{}/like", id);

        let (status, body) = send(&server, Method::POST, &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["success"], false);

        let (status, body) = send(&server, Method::POST, &uri, Some("bob"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "isLiked": true, "likeCount": 1 }));

        let (_, body) = send(&server, Method::POST, &uri, Some("bob"), None).await;
        assert_eq!(body, json!({ "isLiked": false, "likeCount": 0 }));

        let (status, _) = send(&server, Method::POST, "/projects/ghost/like", Some("bob"), None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn detail_includes_author_profile() {
        let server = server();
        let (status, _) = send(
            &server,
            Method::POST,
            "/users",
            Some("alice"),
            Some(json!({ "name": "Alice", "email": "alice@example.com" })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let id = share(&server, "alice", "Detailed", "DevOps").await;
        let other = share(&server, "alice", "Other", "Web").await;

        let (status, body) = send(&server, Method::GET, &format!("/projects/{}", id), None, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["title"], "Detailed");
        assert_eq!(body["project"]["category"], "DevOps");
        assert_eq!(body["project"]["author"]["name"], "Alice");

        let (_, body) = send(&server, Method::GET, &format!("/projects/{}/related", id), None, None).await;
        assert_eq!(body["projects"].as_array().unwrap().len(), 1);
        assert_eq!(body["projects"][0]["id"], other.as_str());

        let (status, _) = send(&server, Method::GET, "/projects/missing", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn only_the_author_can_edit_or_delete() {
        let server = server();
        let id = share(&server, "alice", "Mine", "Web").await;

        let (status, _) = send(
            &server,
            Method::PUT,
            &format!("/edit-project/{}", id),
            Some("mallory"),
            Some(project_data("Hijacked", "Web")),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(
            &server,
            Method::PUT,
            &format!("/edit-project/{}", id),
            Some("alice"),
            Some(project_data("Still mine", "Blockchain")),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["title"], "Still mine");

        let (status, _) = send(&server, Method::DELETE, &format!("/projects/{}", id), Some("mallory"), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, body) = send(&server, Method::DELETE, &format!("/projects/{}", id), Some("alice"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }

    #[tokio::test]
    async fn invalid_draft_is_rejected_with_message() {
        let server = server();
        let mut data = project_data("Short", "Web");
        data["projectData"]["description"] = json!("too short");

        let (status, body) = send(&server, Method::POST, "/share-work", Some("alice"), Some(data)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn upload_without_image_hosting_is_a_bad_gateway() {
        let server = server();
        let body = "--XBOUNDARY\r\n\
            Content-Disposition: form-data; name=\"image\"; filename=\"a.png\"\r\n\
            Content-Type: image/png\r\n\r\n\
            PNGDATA\r\n\
            --XBOUNDARY--\r\n";
        let request = Request::builder()
            .method(Method::POST)
            .uri("/upload")
            .header(header::AUTHORIZATION, bearer("alice"))
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();

        let response = server.router.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    }

    fn form_body(fields: &[(&str, &str)], poster: Option<&str>) -> String {
        let mut body = String::new();
        for (name, value) in fields {
            body.push_str(&format!(
                "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                name, value
            ));
        }
        if let Some(file_name) = poster {
            body.push_str(&format!(
                "--XBOUNDARY\r\nContent-Disposition: form-data; name=\"posterImage\"; filename=\"{}\"\r\n\
                 Content-Type: image/png\r\n\r\nPNGDATA\r\n",
                file_name
            ));
        }
        body.push_str("--XBOUNDARY--\r\n");
        body
    }

    async fn send_form(
        server: &TestServer,
        method: Method,
        uri: &str,
        user: &str,
        body: String,
    ) -> (StatusCode, Value) {
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header(header::AUTHORIZATION, bearer(user))
            .header(header::CONTENT_TYPE, "multipart/form-data; boundary=XBOUNDARY")
            .body(Body::from(body))
            .unwrap();

        let response = server.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
    }

    const FORM_FIELDS: [(&str, &str); 5] = [
        ("title", "Form project"),
        ("description", "A project shared through a multipart form"),
        ("githubUrl", "https://github.com/example/form"),
        ("websiteUrl", "https://form.example"),
        ("category", "Web"),
    ];

    #[tokio::test]
    async fn malformed_query_and_body_get_json_errors() {
        let server = server();

        let (status, body) = send(&server, Method::GET, "/projects?page=abc", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid query string"));

        let (status, body) = send(&server, Method::GET, "/user-projects?userId=a&limit=-1", None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send(
            &server,
            Method::POST,
            "/share-work",
            Some("alice"),
            Some(json!({ "projectData": {} })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert!(body["message"].as_str().unwrap().starts_with("Invalid request body"));

        let (status, body) = send(
            &server,
            Method::POST,
            "/users",
            Some("alice"),
            Some(json!({ "name": "Alice" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (_, body) = send(&server, Method::GET, "/projects", None, None).await;
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn share_form_checks_fields_before_uploading() {
        let server = server();

        let (status, body) = send_form(
            &server,
            Method::POST,
            "/share-work/upload",
            "alice",
            form_body(&FORM_FIELDS, None),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "Please upload the Poster Image");

        let mut short = FORM_FIELDS;
        short[1] = ("description", "too short");
        let (status, body) = send_form(
            &server,
            Method::POST,
            "/share-work/upload",
            "alice",
            form_body(&short, Some("a.png")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);

        let (status, body) = send_form(
            &server,
            Method::POST,
            "/share-work/upload",
            "alice",
            form_body(&FORM_FIELDS, Some("a.png")),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["success"], false);

        let (_, body) = send(&server, Method::GET, "/projects", None, None).await;
        assert_eq!(body["totalCount"], 0);
    }

    #[tokio::test]
    async fn edit_form_is_owner_only_and_keeps_poster_without_a_file() {
        let server = server();
        let id = share(&server, "alice", "Mine", "AI").await;
        let uri = format!("/edit-project/{}/upload", id);

        let (status, _) = send_form(&server, Method::PUT, &uri, "mallory", form_body(&FORM_FIELDS, Some("a.png"))).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send_form(&server, Method::PUT, &uri, "alice", form_body(&FORM_FIELDS, Some("a.png"))).await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        let (_, body) = send(&server, Method::GET, &format!("/projects/{}", id), None, None).await;
        assert_eq!(body["project"]["title"], "Mine");

        let (status, body) = send_form(&server, Method::PUT, &uri, "alice", form_body(&FORM_FIELDS, None)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["project"]["title"], "Form project");
        assert_eq!(body["project"]["category"], "Web");
        assert_eq!(body["project"]["posterImage"], "https://img.example/poster.png");

        let (status, _) = send_form(&server, Method::PUT, "/edit-project/ghost/upload", "alice", form_body(&FORM_FIELDS, None)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_profile_is_not_found() {
        let server = server();
        let (status, body) = send(&server, Method::GET, "/users/nobody", None, None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["message"], "User not found");
    }
}
