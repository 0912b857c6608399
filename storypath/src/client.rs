use reqwest::{header, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{
    domain::{
        IdFilter, Location, LocationId, LocationPayload, Project, ProjectId, ProjectIdFilter,
        ProjectPayload,
    },
    StoryPathURL,
};

const PROJECT_PATH: &str = "/project";
const LOCATION_PATH: &str = "/location";

/// Client for the StoryPath REST backend (PostgREST conventions).
#[derive(Debug, Clone)]
pub struct StoryPathClient {
    http: reqwest::Client,
    base_url: StoryPathURL,
    token: String,
}

impl StoryPathClient {
    pub fn new(base_url: &str, token: impl Into<String>) -> Result<Self, StoryPathError> {
        reqwest::Url::parse(base_url)
            .map_err(|e| StoryPathError::InvalidUrl(format!("{base_url}: {e}")))?;

        let http = reqwest::Client::builder()
            .build()
            .map_err(|e| StoryPathError::ResponseError(e.to_string()))?;

        Ok(Self {
            http,
            base_url: StoryPathURL::new(base_url),
            token: token.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_ref()
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/json")
    }

    async fn send(&self, request: RequestBuilder, call_name: &str) -> Result<Response, StoryPathError> {
        debug!(call = call_name, "calling StoryPath API");

        let resp = self.authorized(request).send().await.map_err(|e| {
            warn!(call = call_name, error = %e, "request failed");
            StoryPathError::ResponseError(e.to_string())
        })?;

        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            warn!(call = call_name, %status, "unauthorized");
            return Err(StoryPathError::Unauthorized);
        }
        if !status.is_success() {
            warn!(call = call_name, %status, "unexpected status");
            return Err(StoryPathError::Status {
                call: call_name.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(resp)
    }

    async fn fetch<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<T, StoryPathError> {
        let resp = self.send(request, call_name).await?;
        resp.json::<T>().await.map_err(|e| {
            warn!(call = call_name, error = %e, "failed to parse response");
            StoryPathError::ParsingError(format!("Failed to parse {call_name} response: {e}"))
        })
    }

    async fn send_without_body(
        &self,
        request: RequestBuilder,
        call_name: &str,
    ) -> Result<(), StoryPathError> {
        let resp = self.send(request, call_name).await?;
        if let Err(e) = resp.bytes().await {
            warn!(call = call_name, error = %e, "failed to read response body");
        }
        Ok(())
    }

    async fn list<T: DeserializeOwned>(
        &self,
        url: StoryPathURL,
        call_name: &str,
    ) -> Result<Vec<T>, StoryPathError> {
        self.fetch(self.http.get(url.as_ref()), call_name).await
    }

    async fn get_one<T: DeserializeOwned>(
        &self,
        url: StoryPathURL,
        call_name: &str,
        entity: &'static str,
        id: i64,
    ) -> Result<T, StoryPathError> {
        let rows: Vec<T> = self.list(url, call_name).await?;
        rows.into_iter()
            .next()
            .ok_or(StoryPathError::NotFound { entity, id })
    }

    async fn write_one<T: DeserializeOwned, B: Serialize>(
        &self,
        request: RequestBuilder,
        body: &B,
        call_name: &str,
    ) -> Result<T, StoryPathError> {
        let request = request
            .header("Prefer", "return=representation")
            .json(body);
        let rows: Vec<T> = self.fetch(request, call_name).await?;
        rows.into_iter().next().ok_or_else(|| {
            StoryPathError::ParsingError(format!("{call_name} returned no rows"))
        })
    }

    fn projects_url(&self) -> StoryPathURL {
        self.base_url.append_path(PROJECT_PATH)
    }

    fn locations_url(&self) -> StoryPathURL {
        self.base_url.append_path(LOCATION_PATH)
    }

    pub async fn list_projects(&self) -> Result<Vec<Project>, StoryPathError> {
        self.list(self.projects_url(), "GET /project").await
    }

    pub async fn get_project(&self, id: ProjectId) -> Result<Project, StoryPathError> {
        let url = self.projects_url().with_filter(&IdFilter::new(id));
        self.get_one(url, "GET /project?id", "project", id.as_i64())
            .await
    }

    pub async fn create_project(&self, payload: &ProjectPayload) -> Result<Project, StoryPathError> {
        let request = self.http.post(self.projects_url().as_ref());
        self.write_one(request, payload, "POST /project").await
    }

    pub async fn update_project(
        &self,
        id: ProjectId,
        payload: &ProjectPayload,
    ) -> Result<Project, StoryPathError> {
        let url = self.projects_url().with_filter(&IdFilter::new(id));
        let request = self.http.patch(url.as_ref());
        self.write_one(request, payload, "PATCH /project").await
    }

    pub async fn delete_project(&self, id: ProjectId) -> Result<(), StoryPathError> {
        let url = self.projects_url().with_filter(&IdFilter::new(id));
        self.send_without_body(self.http.delete(url.as_ref()), "DELETE /project")
            .await
    }

    pub async fn list_locations(&self) -> Result<Vec<Location>, StoryPathError> {
        self.list(self.locations_url(), "GET /location").await
    }

    pub async fn list_locations_by_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<Location>, StoryPathError> {
        let url = self
            .locations_url()
            .with_filter(&ProjectIdFilter::new(project_id));
        self.list(url, "GET /location?project_id").await
    }

    pub async fn get_location(&self, id: LocationId) -> Result<Location, StoryPathError> {
        let url = self.locations_url().with_filter(&IdFilter::new(id));
        self.get_one(url, "GET /location?id", "location", id.as_i64())
            .await
    }

    pub async fn create_location(
        &self,
        payload: &LocationPayload,
    ) -> Result<Location, StoryPathError> {
        let request = self.http.post(self.locations_url().as_ref());
        self.write_one(request, payload, "POST /location").await
    }

    pub async fn update_location(
        &self,
        id: LocationId,
        payload: &LocationPayload,
    ) -> Result<Location, StoryPathError> {
        let url = self.locations_url().with_filter(&IdFilter::new(id));
        let request = self.http.patch(url.as_ref());
        self.write_one(request, payload, "PATCH /location").await
    }

    pub async fn delete_location(&self, id: LocationId) -> Result<(), StoryPathError> {
        let url = self.locations_url().with_filter(&IdFilter::new(id));
        self.send_without_body(self.http.delete(url.as_ref()), "DELETE /location")
            .await
    }
}

#[derive(Error, Debug)]
pub enum StoryPathError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("No {entity} found with id {id}")]
    NotFound { entity: &'static str, id: i64 },
    #[error("ResponseError: {0}")]
    ResponseError(String),
    #[error("{call} returned status {status}")]
    Status { call: String, status: u16 },
    #[error("ParsingError: {0}")]
    ParsingError(String),
    #[error("InvalidUrl: {0}")]
    InvalidUrl(String),
    #[error("There is no location to print.")]
    NothingToPrint,
    #[error("QrError: {0}")]
    QrError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{HomescreenDisplay, ParticipantScoring};
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};
    use tokio::task::JoinHandle;

    #[test]
    fn test_new_rejects_invalid_base_url() {
        let err = StoryPathClient::new("not a url", "token").unwrap_err();
        assert!(matches!(err, StoryPathError::InvalidUrl(_)));
    }

    #[test]
    fn test_urls_are_built_from_base() {
        let client = StoryPathClient::new("https://example.com/api/", "token").unwrap();
        assert_eq!(client.base_url(), "https://example.com/api");
        assert_eq!(
            client.projects_url().as_ref(),
            "https://example.com/api/project"
        );
        assert_eq!(
            client
                .locations_url()
                .with_filter(&IdFilter::new(LocationId::new(5)))
                .as_ref(),
            "https://example.com/api/location?id=eq.5"
        );
    }

    #[test]
    fn test_not_found_message() {
        let err = StoryPathError::NotFound {
            entity: "project",
            id: 42,
        };
        assert_eq!(err.to_string(), "No project found with id 42");
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_response_error() {
        let client = StoryPathClient::new("http://127.0.0.1:9", "token").unwrap();
        let err = client.list_projects().await.unwrap_err();
        assert!(matches!(err, StoryPathError::ResponseError(_)));
    }

    const PROJECT_ROW: &str = r#"{"id":7,"title":"Campus Tour","description":"d","instructions":"i","initial_clue":"c","homescreen_display":"Display initial clue","participant_scoring":"Not Scored","is_published":false,"username":"author"}"#;

    /// Answers a single request with `status` and `body`, handing back the raw request.
    async fn serve_once(
        status: &'static str,
        body: impl Into<String>,
    ) -> (String, JoinHandle<String>) {
        let body = body.into();
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let request = read_request(&mut socket).await;
            let response = format!(
                "HTTP/1.1 {status}\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                body.len()
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            request
        });
        (format!("http://{addr}"), handle)
    }

    async fn read_request(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 1024];
        loop {
            let n = socket.read(&mut chunk).await.unwrap();
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf);
            if let Some(end) = text.find("\r\n\r\n") {
                let content_length = text[..end]
                    .lines()
                    .filter_map(|line| line.split_once(':'))
                    .find(|(name, _)| name.eq_ignore_ascii_case("content-length"))
                    .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                    .unwrap_or(0);
                if buf.len() >= end + 4 + content_length {
                    break;
                }
            }
        }
        String::from_utf8_lossy(&buf).into_owned()
    }

    fn payload() -> ProjectPayload {
        ProjectPayload {
            title: "Campus Tour".to_string(),
            description: "d".to_string(),
            instructions: "i".to_string(),
            initial_clue: "c".to_string(),
            homescreen_display: HomescreenDisplay::InitialClue,
            is_published: false,
            participant_scoring: ParticipantScoring::NotScored,
            username: "author".to_string(),
        }
    }

    #[tokio::test]
    async fn test_get_project_sends_id_filter_and_bearer_token() {
        let (base_url, server) = serve_once("200 OK", format!("[{PROJECT_ROW}]")).await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        let project = client.get_project(ProjectId::new(7)).await.unwrap();
        let request = server.await.unwrap().to_ascii_lowercase();

        assert_eq!(project.id, ProjectId::new(7));
        assert_eq!(project.title, "Campus Tour");
        assert!(request.starts_with("get /project?id=eq.7 http/1.1"));
        assert!(request.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_empty_read_is_not_found() {
        let (base_url, server) = serve_once("200 OK", "[]").await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        let err = client.get_location(LocationId::new(3)).await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(
            err,
            StoryPathError::NotFound {
                entity: "location",
                id: 3
            }
        ));
    }

    #[tokio::test]
    async fn test_unauthorized_and_forbidden_map_to_unauthorized() {
        for status in ["401 Unauthorized", "403 Forbidden"] {
            let (base_url, server) = serve_once(status, "{}").await;
            let client = StoryPathClient::new(&base_url, "stale").unwrap();

            let err = client.list_projects().await.unwrap_err();
            server.await.unwrap();

            assert!(matches!(err, StoryPathError::Unauthorized), "{status}");
        }
    }

    #[tokio::test]
    async fn test_server_error_maps_to_status() {
        let (base_url, server) = serve_once("500 Internal Server Error", "{}").await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        let err = client.delete_project(ProjectId::new(7)).await.unwrap_err();
        let request = server.await.unwrap().to_ascii_lowercase();

        assert!(request.starts_with("delete /project?id=eq.7 http/1.1"));
        match err {
            StoryPathError::Status { call, status } => {
                assert_eq!(call, "DELETE /project");
                assert_eq!(status, 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_location_succeeds_with_empty_body() {
        let (base_url, server) = serve_once("200 OK", "").await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        client.delete_location(LocationId::new(11)).await.unwrap();
        let request = server.await.unwrap().to_ascii_lowercase();

        assert!(request.starts_with("delete /location?id=eq.11 http/1.1"));
        assert!(request.contains("authorization: bearer secret"));
    }

    #[tokio::test]
    async fn test_undecodable_body_is_parsing_error() {
        let (base_url, server) = serve_once("200 OK", "<html>oops</html>").await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        let err = client.list_projects().await.unwrap_err();
        server.await.unwrap();

        assert!(matches!(err, StoryPathError::ParsingError(_)));
    }

    #[tokio::test]
    async fn test_update_asks_for_representation_and_takes_first_row() {
        let second = PROJECT_ROW.replace("\"id\":7", "\"id\":8");
        let body = format!("[{PROJECT_ROW},{second}]");
        let (base_url, server) = serve_once("200 OK", body).await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        let project = client
            .update_project(ProjectId::new(7), &payload())
            .await
            .unwrap();
        let request = server.await.unwrap();
        let lowered = request.to_ascii_lowercase();

        assert_eq!(project.id, ProjectId::new(7));
        assert!(lowered.starts_with("patch /project?id=eq.7 http/1.1"));
        assert!(lowered.contains("prefer: return=representation"));
        assert!(request.contains(r#""homescreen_display":"Display initial clue""#));
    }

    #[tokio::test]
    async fn test_create_with_no_rows_returned_is_parsing_error() {
        let (base_url, server) = serve_once("201 Created", "[]").await;
        let client = StoryPathClient::new(&base_url, "secret").unwrap();

        let err = client.create_project(&payload()).await.unwrap_err();
        let request = server.await.unwrap().to_ascii_lowercase();

        assert!(request.starts_with("post /project http/1.1"));
        assert!(matches!(err, StoryPathError::ParsingError(_)));
    }
}
