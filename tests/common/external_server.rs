use std::{collections::HashMap, net::TcpListener, sync::Arc};

use axum::{Router, extract::{Path, State, Query}, http::{HeaderMap, StatusCode, Uri}, response::IntoResponse, Json, body::{Bytes, StreamBody}, routing::{get, post}};
use chrono::{Duration, SecondsFormat, Utc};
use serde_json::{json, Value};
use tokio::{sync::RwLock, task::JoinHandle};
use tokio_util::io::ReaderStream;

pub const FOOTBALL_KEY: &str = "FOOTBALL_KEY";
pub const NFL_KEY: &str = "NFL_KEY";
pub const NFL_HOST: &str = "nfl-api-data.p.rapidapi.com";

const FIXTURES: &str = "./tests/integration/external";

/// Week returned by the mocked whitelist for the current date.
pub const CURRENT_WEEK: i32 = 2;

#[derive(Default)]
pub struct AppState {
    pub requests: Vec<String>,
    pub ingested: Vec<Value>,
    pub ingest_content_types: Vec<String>,
    pub ingest_status: Option<StatusCode>,
}

type SafeState = Arc<RwLock<AppState>>;

pub struct ExternalServer {
    url: String,
    handles: Vec<JoinHandle<()>>,

    pub api_state: SafeState,
}

impl Drop for ExternalServer {
    fn drop(&mut self) {
        for e in &self.handles {
            e.abort();
        }
    }
}

impl ExternalServer {
    pub async fn start() -> ExternalServer {
        let listener = TcpListener::bind("127.0.0.1:0").expect("should bind mock port");
        let url = format!("http://{}", listener.local_addr().expect("should have local addr"));
        let api_state = Arc::new(RwLock::new(AppState::default()));

        let external_mock = {
            let state = api_state.clone();
            tokio::spawn(async move { ExternalServer::serve_external_data(state, listener).await })
        };

        ExternalServer { url, handles: vec![external_mock], api_state }
    }

    pub fn get_url(&self) -> String {
        self.url.clone()
    }

    pub fn get_ingest_url(&self) -> String {
        format!("{}/ingest", self.url)
    }

    pub async fn set_ingest_status(&self, status: StatusCode) {
        self.api_state.write().await.ingest_status = Some(status);
    }

    pub async fn ingested(&self) -> Vec<Value> {
        self.api_state.read().await.ingested.clone()
    }

    pub async fn requests(&self) -> Vec<String> {
        self.api_state.read().await.requests.clone()
    }

    async fn serve_external_data(state: SafeState, listener: TcpListener) {
        let app = Router::new()
            .route("/matches", get(ExternalServer::get_football_matches))
            .route("/competitions", get(ExternalServer::get_football_competitions))
            .route("/competitions/:id/matches", get(ExternalServer::get_competition_matches))
            .route("/teams/:id/matches", get(ExternalServer::get_team_matches))

            .route("/nfl-whitelist", get(ExternalServer::get_whitelist))
            .route("/nfl-weeks-events", get(ExternalServer::get_week_events))
            .route("/nfl-single-events", get(ExternalServer::get_single_event))
            .route("/nfl-teams", get(ExternalServer::get_teams))
            .route("/nfl-team", get(ExternalServer::get_team))
            .route("/nfl-livescores", get(ExternalServer::get_livescores))
            .route("/nfl-matches", get(ExternalServer::get_nfl_matches))

            .route("/ingest", post(ExternalServer::post_ingest))
            .with_state(state);

        axum::Server::from_tcp(listener)
            .expect("should serve on listener")
            .serve(app.into_make_service())
            .await
            .unwrap();
    }

    async fn get_football_matches(uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::football_file(&state, &uri, &headers, "football/matches.json").await
    }

    async fn get_football_competitions(uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::football_file(&state, &uri, &headers, "football/competitions.json").await
    }

    async fn get_competition_matches(Path(id): Path<String>, uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::football_file(&state, &uri, &headers, &format!("football/competition-{id}-matches.json")).await
    }

    async fn get_team_matches(Path(id): Path<String>, uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::football_file(&state, &uri, &headers, &format!("football/team-{id}-matches.json")).await
    }

    async fn get_whitelist(uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::record(&state, &uri).await;
        if !ExternalServer::is_nfl_authorized(&headers) {
            return Err((StatusCode::FORBIDDEN, "Invalid API key".to_string()));
        }
        let now = Utc::now();
        let date = |days: i64| (now + Duration::days(days)).to_rfc3339_opts(SecondsFormat::Millis, true);
        Ok(Json(json!({
            "sections": [
                { "label": "Preseason", "entries": [{ "label": "Hall of Fame Weekend", "value": "1" }, ["mixed", "shape"]] },
                { "label": "Regular Season", "entries": [
                    { "label": "Week 1", "value": 1, "startDate": date(-10), "endDate": date(-3) },
                    { "label": "Week 2", "value": CURRENT_WEEK, "startDate": date(-3), "endDate": date(4) },
                    { "label": "Week 3", "value": 3, "startDate": date(4), "endDate": date(11) }
                ]}
            ]
        })))
    }

    async fn get_week_events(Query(query): Query<HashMap<String, String>>, uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        let week = query.get("week").cloned().unwrap_or_default();
        ExternalServer::nfl_file(&state, &uri, &headers, &format!("nfl/weeks-events/week-{week}.json")).await
    }

    async fn get_single_event(Query(query): Query<HashMap<String, String>>, uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        let id = query.get("id").cloned().unwrap_or_default();
        ExternalServer::nfl_file(&state, &uri, &headers, &format!("nfl/events/{id}.json")).await
    }

    async fn get_teams(uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::nfl_file(&state, &uri, &headers, "nfl/teams.json").await
    }

    async fn get_team(Query(query): Query<HashMap<String, String>>, uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        let id = query.get("team_id").cloned().unwrap_or_default();
        ExternalServer::nfl_file(&state, &uri, &headers, &format!("nfl/teams/{id}.json")).await
    }

    async fn get_livescores(uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::nfl_file(&state, &uri, &headers, "nfl/livescores.json").await
    }

    async fn get_nfl_matches(uri: Uri, headers: HeaderMap, State(state): State<SafeState>) -> impl IntoResponse {
        ExternalServer::nfl_file(&state, &uri, &headers, "nfl/matches.json").await
    }

    async fn post_ingest(headers: HeaderMap, State(state): State<SafeState>, body: Bytes) -> impl IntoResponse {
        let mut safe_state = state.write().await;
        let content_type = headers.get("content-type").and_then(|e| e.to_str().ok()).unwrap_or_default().to_string();
        safe_state.ingest_content_types.push(content_type);
        safe_state.ingested.push(serde_json::from_slice(&body).unwrap_or(Value::Null));
        match safe_state.ingest_status {
            Some(status) => (status, "Service unavailable"),
            None => (StatusCode::OK, "Data ingested successfully"),
        }
    }

    async fn record(state: &SafeState, uri: &Uri) {
        state.write().await.requests.push(uri.to_string());
    }

    fn header<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
        headers.get(name).and_then(|e| e.to_str().ok())
    }

    fn is_nfl_authorized(headers: &HeaderMap) -> bool {
        ExternalServer::header(headers, "x-rapidapi-key") == Some(NFL_KEY)
            && ExternalServer::header(headers, "x-rapidapi-host") == Some(NFL_HOST)
    }

    async fn football_file(state: &SafeState, uri: &Uri, headers: &HeaderMap, file: &str) -> Result<StreamBody<ReaderStream<tokio::fs::File>>, (StatusCode, String)> {
        ExternalServer::record(state, uri).await;
        if ExternalServer::header(headers, "X-Auth-Token") != Some(FOOTBALL_KEY) {
            return Err((StatusCode::FORBIDDEN, "Invalid API key".to_string()));
        }
        ExternalServer::get_file_from(format!("{FIXTURES}/{file}")).await
    }

    async fn nfl_file(state: &SafeState, uri: &Uri, headers: &HeaderMap, file: &str) -> Result<StreamBody<ReaderStream<tokio::fs::File>>, (StatusCode, String)> {
        ExternalServer::record(state, uri).await;
        if !ExternalServer::is_nfl_authorized(headers) {
            return Err((StatusCode::FORBIDDEN, "Invalid API key".to_string()));
        }
        ExternalServer::get_file_from(format!("{FIXTURES}/{file}")).await
    }

    async fn get_file_from(path: String) -> Result<StreamBody<ReaderStream<tokio::fs::File>>, (StatusCode, String)> {
        let file = match tokio::fs::File::open(path).await {
            Ok(file) => file,
            Err(err) => return Err((StatusCode::NOT_FOUND, format!("File not found: {}", err))),
        };
        let stream = ReaderStream::new(file);
        let body = StreamBody::new(stream);
        Ok(body)
    }
}
