//! HTTP client for the scoreboard backend.
//!
//! Every call goes through one request path that applies the retry policy:
//! transient failures (network errors, timeouts, 5xx) are retried a fixed
//! number of times after a fixed delay. Only idempotent methods are retried
//! unless the policy opts POST in; POST requests always carry an
//! `Idempotency-Key` that stays the same across attempts.

use std::future::Future;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};
use url::Url;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::models::{
    CourseId, CourseSearchResult, Game, GameId, GameSummary, GameUpdate, GolfCourse,
    GolfPlayerStats, GolfRound, GolfRoundSummary, GolfRoundUpdate, NewGame, NewGolfRound,
    NewPlayer, Player, PlayerId, PlayerStats, RivalryStats, RoundId, TeamId, TeamStats,
    TeamsList, ValidationError,
};

/// Header carrying the per-request idempotency key on POST.
pub const IDEMPOTENCY_KEY: &str = "Idempotency-Key";

/// Errors that can occur talking to the backend.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Not found: {0}")]
    NotFound(String),

    /// The backend refused the request; `detail` is its message verbatim.
    #[error("{detail}")]
    Rejected { status: u16, detail: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid request: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// Worth retrying: network failures, timeouts and server errors.
    pub fn is_transient(&self) -> bool {
        match self {
            ClientError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request(),
            ClientError::HttpStatus { status, .. } => *status >= 500,
            _ => false,
        }
    }
}

/// Build the error for a non-success response.
///
/// FastAPI-style bodies carry a `detail` field: a string for handled errors,
/// a list for request validation failures.
pub fn error_for_status(status: StatusCode, body: &str) -> ClientError {
    let detail = error_detail(body).unwrap_or_else(|| {
        status
            .canonical_reason()
            .unwrap_or("Unknown")
            .to_string()
    });

    if status == StatusCode::NOT_FOUND {
        ClientError::NotFound(detail)
    } else if status.is_client_error() {
        ClientError::Rejected {
            status: status.as_u16(),
            detail,
        }
    } else {
        ClientError::HttpStatus {
            status: status.as_u16(),
            message: detail,
        }
    }
}

fn error_detail(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    match value.get("detail")? {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Retry policy for backend requests.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub delay: Duration,
    pub retry_non_idempotent: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 1,
            delay: Duration::from_secs(1),
            retry_non_idempotent: false,
        }
    }
}

impl RetryPolicy {
    pub fn from_config(config: &ApiConfig) -> Self {
        Self {
            max_retries: config.max_retries,
            delay: config.retry_delay(),
            retry_non_idempotent: config.retry_non_idempotent,
        }
    }

    /// Whether requests of this kind may be retried at all.
    pub const fn allows(&self, idempotent: bool) -> bool {
        idempotent || self.retry_non_idempotent
    }
}

/// GET, PUT and DELETE can be repeated without changing the outcome.
pub fn is_idempotent(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::PUT | Method::DELETE)
}

/// Run `op`, retrying transient failures per `policy`.
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    idempotent: bool,
    label: &str,
    mut op: F,
) -> Result<T, ClientError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, ClientError>>,
{
    let mut attempt = 0;
    loop {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e)
                if e.is_transient()
                    && policy.allows(idempotent)
                    && attempt < policy.max_retries =>
            {
                attempt += 1;
                warn!(
                    "{} failed ({}), retry {}/{} in {:?}",
                    label, e, attempt, policy.max_retries, policy.delay
                );
                tokio::time::sleep(policy.delay).await;
            }
            Err(e) => return Err(e),
        }
    }
}

/// The backend operations the rest of the crate depends on.
#[async_trait]
pub trait ScoreApi: Send + Sync {
    async fn list_players(&self) -> Result<Vec<Player>, ClientError>;
    async fn get_player(&self, id: PlayerId) -> Result<Player, ClientError>;
    async fn player_stats(&self, id: PlayerId) -> Result<PlayerStats, ClientError>;
    async fn create_player(&self, player: &NewPlayer) -> Result<Player, ClientError>;

    async fn list_games(&self) -> Result<Vec<GameSummary>, ClientError>;
    async fn get_game(&self, id: GameId) -> Result<Game, ClientError>;
    async fn create_game(&self, game: &NewGame) -> Result<Game, ClientError>;
    async fn update_game(&self, id: GameId, update: &GameUpdate) -> Result<Game, ClientError>;
    async fn delete_game(&self, id: GameId) -> Result<(), ClientError>;

    async fn list_golf_rounds(&self) -> Result<Vec<GolfRoundSummary>, ClientError>;
    async fn get_golf_round(&self, id: RoundId) -> Result<GolfRound, ClientError>;
    async fn create_golf_round(&self, round: &NewGolfRound) -> Result<GolfRound, ClientError>;
    async fn update_golf_round(
        &self,
        id: RoundId,
        update: &GolfRoundUpdate,
    ) -> Result<GolfRound, ClientError>;
    async fn delete_golf_round(&self, id: RoundId) -> Result<(), ClientError>;

    async fn golf_stats(&self) -> Result<Vec<GolfPlayerStats>, ClientError>;
    async fn golf_player_stats(&self, id: PlayerId) -> Result<GolfPlayerStats, ClientError>;

    async fn list_teams(&self) -> Result<TeamsList, ClientError>;
    async fn team_stats(&self, id: TeamId) -> Result<TeamStats, ClientError>;

    async fn rivalry(&self) -> Result<RivalryStats, ClientError>;

    async fn search_courses(&self, query: &str) -> Result<Vec<CourseSearchResult>, ClientError>;
    async fn get_course(&self, id: CourseId) -> Result<GolfCourse, ClientError>;
}

/// reqwest-backed [`ScoreApi`].
pub struct ApiClient {
    client: Client,
    base_url: Url,
    retry: RetryPolicy,
}

impl ApiClient {
    /// Create a client from API settings.
    pub fn new(config: &ApiConfig) -> Result<Self, ClientError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_static(concat!("tailgate-tracker/", env!("CARGO_PKG_VERSION"))),
        );

        let client = Client::builder()
            .timeout(config.request_timeout())
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url(&config.base_url)?,
            retry: RetryPolicy::from_config(config),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Resolve a relative endpoint path against the base URL.
    pub fn endpoint(&self, path: &str) -> Result<Url, ClientError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| ClientError::InvalidUrl(format!("{path}: {e}")))
    }

    /// Request factory for one logical call. Non-idempotent calls get an
    /// idempotency key here, once, so every attempt sends the same key.
    fn attempt_builder(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> impl Fn() -> RequestBuilder + '_ {
        let key = (!is_idempotent(&method)).then(Uuid::new_v4);
        move || {
            let mut request = self.client.request(method.clone(), url.clone());
            if let Some(key) = key {
                request = request.header(IDEMPOTENCY_KEY, key.to_string());
            }
            if let Some(body) = &body {
                request = request.json(body);
            }
            request
        }
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        url: Url,
        body: Option<serde_json::Value>,
    ) -> Result<T, ClientError> {
        let idempotent = is_idempotent(&method);
        let label = format!("{} {}", method, url.path());
        let attempt = self.attempt_builder(method, url, body);

        debug!("{}", label);
        with_retry(&self.retry, idempotent, &label, || {
            let request = attempt();
            async move {
                match request.send().await {
                    Ok(response) => decode(response).await,
                    Err(e) => Err(ClientError::Http(e)),
                }
            }
        })
        .await
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ClientError> {
        self.execute(Method::GET, self.endpoint(path)?, None).await
    }

    async fn send_json<T, B>(&self, method: Method, path: &str, body: &B) -> Result<T, ClientError>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let body = serde_json::to_value(body)?;
        self.execute(method, self.endpoint(path)?, Some(body)).await
    }

    async fn delete(&self, path: &str) -> Result<(), ClientError> {
        let _: serde_json::Value = self
            .execute(Method::DELETE, self.endpoint(path)?, None)
            .await?;
        Ok(())
    }
}

/// Parse and normalise the base URL so relative joins keep its path.
fn base_url(raw: &str) -> Result<Url, ClientError> {
    let mut url = Url::parse(raw).map_err(|e| ClientError::InvalidUrl(format!("{raw}: {e}")))?;
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ClientError> {
    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        return Err(error_for_status(status, &body));
    }
    if body.trim().is_empty() {
        return Ok(serde_json::from_str("null")?);
    }
    Ok(serde_json::from_str(&body)?)
}

#[async_trait]
impl ScoreApi for ApiClient {
    async fn list_players(&self) -> Result<Vec<Player>, ClientError> {
        self.get("players/").await
    }

    async fn get_player(&self, id: PlayerId) -> Result<Player, ClientError> {
        self.get(&format!("players/{id}")).await
    }

    async fn player_stats(&self, id: PlayerId) -> Result<PlayerStats, ClientError> {
        self.get(&format!("players/{id}/stats")).await
    }

    async fn create_player(&self, player: &NewPlayer) -> Result<Player, ClientError> {
        player.validate()?;
        let created: Player = self.send_json(Method::POST, "players/", player).await?;
        info!("Created player {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn list_games(&self) -> Result<Vec<GameSummary>, ClientError> {
        self.get("games/").await
    }

    async fn get_game(&self, id: GameId) -> Result<Game, ClientError> {
        self.get(&format!("games/{id}")).await
    }

    async fn create_game(&self, game: &NewGame) -> Result<Game, ClientError> {
        game.validate()?;
        let created: Game = self.send_json(Method::POST, "games/", game).await?;
        info!(
            "Recorded game {}: {}-{}",
            created.id, created.team1_score, created.team2_score
        );
        Ok(created)
    }

    async fn update_game(&self, id: GameId, update: &GameUpdate) -> Result<Game, ClientError> {
        update.validate()?;
        let updated = self
            .send_json(Method::PUT, &format!("games/{id}"), update)
            .await?;
        info!("Updated game {}", id);
        Ok(updated)
    }

    async fn delete_game(&self, id: GameId) -> Result<(), ClientError> {
        self.delete(&format!("games/{id}")).await?;
        info!("Deleted game {}", id);
        Ok(())
    }

    async fn list_golf_rounds(&self) -> Result<Vec<GolfRoundSummary>, ClientError> {
        self.get("golf/rounds/").await
    }

    async fn get_golf_round(&self, id: RoundId) -> Result<GolfRound, ClientError> {
        self.get(&format!("golf/rounds/{id}")).await
    }

    async fn create_golf_round(&self, round: &NewGolfRound) -> Result<GolfRound, ClientError> {
        round.validate()?;
        let created: GolfRound = self.send_json(Method::POST, "golf/rounds/", round).await?;
        info!(
            "Recorded golf round {}: {}-{} ({} halved)",
            created.id, created.team1_holes_won, created.team2_holes_won, created.halved_holes
        );
        Ok(created)
    }

    async fn update_golf_round(
        &self,
        id: RoundId,
        update: &GolfRoundUpdate,
    ) -> Result<GolfRound, ClientError> {
        update.validate()?;
        let updated = self
            .send_json(Method::PUT, &format!("golf/rounds/{id}"), update)
            .await?;
        info!("Updated golf round {}", id);
        Ok(updated)
    }

    async fn delete_golf_round(&self, id: RoundId) -> Result<(), ClientError> {
        self.delete(&format!("golf/rounds/{id}")).await?;
        info!("Deleted golf round {}", id);
        Ok(())
    }

    async fn golf_stats(&self) -> Result<Vec<GolfPlayerStats>, ClientError> {
        self.get("golf/stats/").await
    }

    async fn golf_player_stats(&self, id: PlayerId) -> Result<GolfPlayerStats, ClientError> {
        self.get(&format!("golf/stats/{id}")).await
    }

    async fn list_teams(&self) -> Result<TeamsList, ClientError> {
        self.get("teams/").await
    }

    async fn team_stats(&self, id: TeamId) -> Result<TeamStats, ClientError> {
        self.get(&format!("teams/{id}")).await
    }

    async fn rivalry(&self) -> Result<RivalryStats, ClientError> {
        self.get("rivalry/").await
    }

    async fn search_courses(&self, query: &str) -> Result<Vec<CourseSearchResult>, ClientError> {
        let mut url = self.endpoint("golf/courses/search")?;
        url.query_pairs_mut().append_pair("query", query.trim());
        self.execute(Method::GET, url, None).await
    }

    async fn get_course(&self, id: CourseId) -> Result<GolfCourse, ClientError> {
        self.get(&format!("golf/courses/{id}")).await
    }
}
