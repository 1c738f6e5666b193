//! Snapshot loading and mutate-then-reload operations.
//!
//! The three top-level collections (players, games, golf rounds) are loaded
//! together and raced against a load deadline. Every successful mutation is
//! followed by a full reload, so derived statistics are always recomputed
//! from data that includes the change.

use std::sync::Arc;
use std::time::Duration;

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{error, info, warn};

use crate::client::{ClientError, ScoreApi};
use crate::models::{
    CourseId, Game, GameId, GameSummary, GameUpdate, GolfRound, GolfRoundSummary,
    GolfRoundUpdate, NewGame, NewGolfRound, NewPlayer, Player, RoundId,
};

/// Errors that can occur while loading or mutating.
#[derive(Debug, Error)]
pub enum SyncError {
    #[error("Loading data timed out after {0:?}")]
    LoadTimeout(Duration),

    #[error(transparent)]
    Client(#[from] ClientError),

    #[error("Course {course_id} has no tee named {tee}")]
    UnknownTee { course_id: CourseId, tee: String },
}

/// Everything the statistics views are computed from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub players: Vec<Player>,
    pub games: Vec<GameSummary>,
    pub golf_rounds: Vec<GolfRoundSummary>,
    /// Local time the load completed.
    pub loaded_at: NaiveDateTime,
}

impl Snapshot {
    /// Case-insensitive player lookup by name.
    pub fn find_player(&self, name: &str) -> Option<&Player> {
        let name = name.trim();
        self.players
            .iter()
            .find(|p| p.name.trim().eq_ignore_ascii_case(name))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LoadStatus {
    #[default]
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// State of the most recent load.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    pub status: LoadStatus,
    pub snapshot: Option<Snapshot>,
    pub last_error: Option<String>,
}

/// An applied mutation and the outcome of the reload that followed it.
///
/// The mutation has already happened on the backend even when `reload` is
/// an error; only the refreshed snapshot is missing.
#[derive(Debug)]
pub struct Mutation<T> {
    pub value: T,
    pub reload: Result<Snapshot, SyncError>,
}

impl<T> Mutation<T> {
    /// Reloaded snapshot, if the reload succeeded.
    pub fn snapshot(&self) -> Option<&Snapshot> {
        self.reload.as_ref().ok()
    }
}

/// Loads snapshots from a [`ScoreApi`] and applies mutations.
pub struct DataSync {
    api: Arc<dyn ScoreApi>,
    load_timeout: Duration,
    state: Arc<RwLock<LoadState>>,
}

impl DataSync {
    pub fn new(api: Arc<dyn ScoreApi>, load_timeout: Duration) -> Self {
        Self {
            api,
            load_timeout,
            state: Arc::new(RwLock::new(LoadState::default())),
        }
    }

    pub fn api(&self) -> &dyn ScoreApi {
        self.api.as_ref()
    }

    /// Get current load state.
    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Most recently loaded snapshot, if any.
    pub async fn snapshot(&self) -> Option<Snapshot> {
        self.state.read().await.snapshot.clone()
    }

    /// Load players, games and golf rounds concurrently.
    ///
    /// Fails with [`SyncError::LoadTimeout`] when the deadline passes first;
    /// pending requests are dropped and any late response is discarded. On
    /// failure the previous snapshot is kept.
    pub async fn load(&self) -> Result<Snapshot, SyncError> {
        self.state.write().await.status = LoadStatus::Loading;
        info!("Loading players, games and golf rounds");

        let fetch = async {
            tokio::try_join!(
                self.api.list_players(),
                self.api.list_games(),
                self.api.list_golf_rounds(),
            )
        };

        let result = match tokio::time::timeout(self.load_timeout, fetch).await {
            Ok(Ok((players, games, golf_rounds))) => Ok(Snapshot {
                players,
                games,
                golf_rounds,
                loaded_at: Local::now().naive_local(),
            }),
            Ok(Err(e)) => Err(SyncError::Client(e)),
            Err(_) => Err(SyncError::LoadTimeout(self.load_timeout)),
        };

        let mut state = self.state.write().await;
        match &result {
            Ok(snapshot) => {
                info!(
                    "Loaded {} players, {} games, {} golf rounds",
                    snapshot.players.len(),
                    snapshot.games.len(),
                    snapshot.golf_rounds.len()
                );
                state.status = LoadStatus::Loaded;
                state.snapshot = Some(snapshot.clone());
                state.last_error = None;
            }
            Err(e) => {
                error!("Load failed: {}", e);
                state.status = LoadStatus::Failed;
                state.last_error = Some(e.to_string());
            }
        }

        result
    }

    /// Errors from here on only concern the reload, never the mutation.
    async fn reloaded<T>(&self, value: T) -> Mutation<T> {
        let reload = self.load().await;
        if let Err(e) = &reload {
            warn!("Change applied but reload failed: {}", e);
        }
        Mutation { value, reload }
    }

    pub async fn add_player(&self, player: &NewPlayer) -> Result<Mutation<Player>, SyncError> {
        let created = self.api.create_player(player).await?;
        Ok(self.reloaded(created).await)
    }

    pub async fn record_game(&self, game: &NewGame) -> Result<Mutation<Game>, SyncError> {
        let created = self.api.create_game(game).await?;
        Ok(self.reloaded(created).await)
    }

    pub async fn update_game(
        &self,
        id: GameId,
        update: &GameUpdate,
    ) -> Result<Mutation<Game>, SyncError> {
        let updated = self.api.update_game(id, update).await?;
        Ok(self.reloaded(updated).await)
    }

    pub async fn delete_game(&self, id: GameId) -> Result<Mutation<GameId>, SyncError> {
        self.api.delete_game(id).await?;
        Ok(self.reloaded(id).await)
    }

    pub async fn record_golf_round(
        &self,
        round: &NewGolfRound,
    ) -> Result<Mutation<GolfRound>, SyncError> {
        let created = self.api.create_golf_round(round).await?;
        Ok(self.reloaded(created).await)
    }

    pub async fn update_golf_round(
        &self,
        id: RoundId,
        update: &GolfRoundUpdate,
    ) -> Result<Mutation<GolfRound>, SyncError> {
        let updated = self.api.update_golf_round(id, update).await?;
        Ok(self.reloaded(updated).await)
    }

    pub async fn delete_golf_round(&self, id: RoundId) -> Result<Mutation<RoundId>, SyncError> {
        self.api.delete_golf_round(id).await?;
        Ok(self.reloaded(id).await)
    }

    /// Fill a new round's par and yardage from a course tee.
    pub async fn populate_from_course(
        &self,
        round: NewGolfRound,
        course_id: CourseId,
        tee_name: &str,
    ) -> Result<NewGolfRound, SyncError> {
        let course = self.api.get_course(course_id).await?;
        let Some(tee) = course.tee(tee_name) else {
            warn!("{} has no tee named {}", course.display_name(), tee_name);
            return Err(SyncError::UnknownTee {
                course_id,
                tee: tee_name.to_string(),
            });
        };

        let round = round.with_tee(course_id, tee);
        Ok(NewGolfRound {
            course: round.course.clone().or_else(|| Some(course.display_name())),
            ..round
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        CourseHole, CourseSearchResult, CourseTee, GolfCourse, GolfHoleResult, GolfPlayerStats,
        PlayerId, PlayerStats, RivalryStats, TeamId, TeamStats, TeamSide, TeamsList,
    };
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Mutex;

    /// In-memory backend. `list_games` can be slowed down to exercise the
    /// load deadline.
    #[derive(Default)]
    struct FakeApi {
        players: Mutex<Vec<Player>>,
        games: Mutex<Vec<GameSummary>>,
        games_delay: Option<Duration>,
        fail_games: bool,
        list_calls: AtomicU32,
    }

    fn player(id: i64, name: &str) -> Player {
        Player {
            id: PlayerId::new(id),
            name: name.to_string(),
            created_at: None,
            games_played: 0,
            games_won: 0,
            total_points_scored: 0,
            total_points_against: 0,
            win_percentage: 0.0,
            avg_win_margin: 0.0,
            avg_loss_margin: 0.0,
        }
    }

    fn played_at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 10, 4)
            .unwrap()
            .and_hms_opt(13, 0, 0)
            .unwrap()
    }

    fn names(players: &[Player], ids: &[PlayerId]) -> Vec<String> {
        ids.iter()
            .filter_map(|id| players.iter().find(|p| p.id == *id))
            .map(|p| p.name.clone())
            .collect()
    }

    fn unsupported<T>() -> Result<T, ClientError> {
        Err(ClientError::NotFound("unsupported by fake".to_string()))
    }

    #[async_trait]
    impl ScoreApi for FakeApi {
        async fn list_players(&self) -> Result<Vec<Player>, ClientError> {
            Ok(self.players.lock().unwrap().clone())
        }

        async fn get_player(&self, _id: PlayerId) -> Result<Player, ClientError> {
            unsupported()
        }

        async fn player_stats(&self, _id: PlayerId) -> Result<PlayerStats, ClientError> {
            unsupported()
        }

        async fn create_player(&self, new: &NewPlayer) -> Result<Player, ClientError> {
            new.validate()?;
            let mut players = self.players.lock().unwrap();
            let created = player(players.len() as i64 + 1, &new.name);
            players.push(created.clone());
            Ok(created)
        }

        async fn list_games(&self) -> Result<Vec<GameSummary>, ClientError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            if let Some(delay) = self.games_delay {
                tokio::time::sleep(delay).await;
            }
            if self.fail_games {
                return Err(ClientError::HttpStatus {
                    status: 500,
                    message: "Internal Server Error".to_string(),
                });
            }
            Ok(self.games.lock().unwrap().clone())
        }

        async fn get_game(&self, _id: GameId) -> Result<Game, ClientError> {
            unsupported()
        }

        async fn create_game(&self, new: &NewGame) -> Result<Game, ClientError> {
            new.validate()?;
            let players = self.players.lock().unwrap().clone();
            let mut games = self.games.lock().unwrap();
            let id = GameId::new(games.len() as i64 + 1);
            let winner_team = if new.team1_score >= new.team2_score {
                TeamSide::One
            } else {
                TeamSide::Two
            };
            games.push(GameSummary {
                id,
                team1_score: new.team1_score,
                team2_score: new.team2_score,
                winner_team,
                location: new.location.clone(),
                played_at: played_at(),
                team1_player_names: names(&players, &new.team1_players),
                team2_player_names: names(&players, &new.team2_players),
            });
            Ok(Game {
                id,
                team1_score: new.team1_score,
                team2_score: new.team2_score,
                winner_team,
                location: new.location.clone(),
                played_at: played_at(),
                team1_players: Vec::new(),
                team2_players: Vec::new(),
            })
        }

        async fn update_game(&self, _id: GameId, _update: &GameUpdate) -> Result<Game, ClientError> {
            unsupported()
        }

        async fn delete_game(&self, id: GameId) -> Result<(), ClientError> {
            let mut games = self.games.lock().unwrap();
            let before = games.len();
            games.retain(|g| g.id != id);
            if games.len() == before {
                return Err(ClientError::NotFound("Game not found".to_string()));
            }
            Ok(())
        }

        async fn list_golf_rounds(&self) -> Result<Vec<GolfRoundSummary>, ClientError> {
            Ok(Vec::new())
        }

        async fn get_golf_round(&self, _id: RoundId) -> Result<GolfRound, ClientError> {
            unsupported()
        }

        async fn create_golf_round(&self, _round: &NewGolfRound) -> Result<GolfRound, ClientError> {
            unsupported()
        }

        async fn update_golf_round(
            &self,
            _id: RoundId,
            _update: &GolfRoundUpdate,
        ) -> Result<GolfRound, ClientError> {
            unsupported()
        }

        async fn delete_golf_round(&self, _id: RoundId) -> Result<(), ClientError> {
            unsupported()
        }

        async fn golf_stats(&self) -> Result<Vec<GolfPlayerStats>, ClientError> {
            Ok(Vec::new())
        }

        async fn golf_player_stats(&self, _id: PlayerId) -> Result<GolfPlayerStats, ClientError> {
            unsupported()
        }

        async fn list_teams(&self) -> Result<TeamsList, ClientError> {
            unsupported()
        }

        async fn team_stats(&self, _id: TeamId) -> Result<TeamStats, ClientError> {
            unsupported()
        }

        async fn rivalry(&self) -> Result<RivalryStats, ClientError> {
            Ok(RivalryStats::empty())
        }

        async fn search_courses(
            &self,
            _query: &str,
        ) -> Result<Vec<CourseSearchResult>, ClientError> {
            Ok(Vec::new())
        }

        async fn get_course(&self, id: CourseId) -> Result<GolfCourse, ClientError> {
            Ok(GolfCourse {
                id,
                api_id: None,
                club_name: "Pine Hills".to_string(),
                course_name: "North".to_string(),
                city: None,
                state: None,
                country: None,
                tees: vec![CourseTee {
                    id: Some(3),
                    tee_name: "White".to_string(),
                    gender: None,
                    course_rating: None,
                    slope_rating: None,
                    total_yards: None,
                    par_total: Some(72),
                    holes: (1..=18)
                        .map(|n| CourseHole {
                            hole_number: n,
                            par: if n % 6 == 0 { 3 } else { 4 },
                            yardage: 300 + u32::from(n),
                            handicap: None,
                        })
                        .collect(),
                }],
            })
        }
    }

    fn seeded() -> FakeApi {
        let api = FakeApi::default();
        *api.players.lock().unwrap() = ["Sean", "Tyler", "Reid", "Jeremy", "Danny", "AJ"]
            .iter()
            .enumerate()
            .map(|(i, name)| player(i as i64 + 1, name))
            .collect();
        api
    }

    fn new_game() -> NewGame {
        NewGame {
            team1_score: 21,
            team2_score: 17,
            team1_players: (1..=3).map(PlayerId::new).collect(),
            team2_players: (4..=6).map(PlayerId::new).collect(),
            location: Some("Lot C".to_string()),
        }
    }

    #[tokio::test]
    async fn test_load_populates_snapshot() {
        let sync = DataSync::new(Arc::new(seeded()), Duration::from_secs(10));
        assert_eq!(sync.state().await.status, LoadStatus::Idle);

        let snapshot = sync.load().await.unwrap();
        assert_eq!(snapshot.players.len(), 6);
        assert!(snapshot.games.is_empty());
        assert_eq!(sync.state().await.status, LoadStatus::Loaded);
        assert!(snapshot.find_player("  danny ").is_some());
    }

    #[tokio::test]
    async fn test_load_times_out() {
        let api = FakeApi {
            games_delay: Some(Duration::from_millis(500)),
            ..seeded()
        };
        let sync = DataSync::new(Arc::new(api), Duration::from_millis(50));

        let err = sync.load().await.unwrap_err();
        assert!(matches!(err, SyncError::LoadTimeout(d) if d == Duration::from_millis(50)));

        let state = sync.state().await;
        assert_eq!(state.status, LoadStatus::Failed);
        assert!(state.snapshot.is_none());
        assert!(state.last_error.unwrap().contains("timed out"));
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_snapshot() {
        let sync = DataSync::new(Arc::new(seeded()), Duration::from_secs(10));
        sync.load().await.unwrap();

        let failing = DataSync {
            api: Arc::new(FakeApi {
                fail_games: true,
                ..seeded()
            }),
            load_timeout: Duration::from_secs(10),
            state: sync.state.clone(),
        };
        assert!(matches!(failing.load().await, Err(SyncError::Client(_))));
        assert_eq!(failing.snapshot().await.unwrap().players.len(), 6);
    }

    #[tokio::test]
    async fn test_mutation_is_followed_by_reload() {
        let api = Arc::new(seeded());
        let sync = DataSync::new(api.clone(), Duration::from_secs(10));

        let result = sync.record_game(&new_game()).await.unwrap();
        assert_eq!(result.value.team1_score, 21);
        let snapshot = result.snapshot().unwrap();
        assert_eq!(snapshot.games.len(), 1);
        assert_eq!(
            snapshot.games[0].team2_player_names,
            vec!["Jeremy", "Danny", "AJ"]
        );
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 1);

        let deleted = sync.delete_game(result.value.id).await.unwrap();
        assert!(deleted.snapshot().unwrap().games.is_empty());
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_reload_timeout_still_returns_applied_mutation() {
        let api = Arc::new(FakeApi {
            games_delay: Some(Duration::from_millis(300)),
            ..seeded()
        });
        let sync = DataSync::new(api.clone(), Duration::from_millis(50));

        let result = sync.record_game(&new_game()).await.unwrap();
        assert_eq!(result.value.id, GameId::new(1));
        assert!(matches!(result.reload, Err(SyncError::LoadTimeout(_))));
        assert!(result.snapshot().is_none());
        assert_eq!(api.games.lock().unwrap().len(), 1);
        assert_eq!(sync.state().await.status, LoadStatus::Failed);
    }

    #[tokio::test]
    async fn test_failed_mutation_does_not_reload() {
        let api = Arc::new(seeded());
        let sync = DataSync::new(api.clone(), Duration::from_secs(10));

        let mut game = new_game();
        game.team2_players[0] = PlayerId::new(1);
        let err = sync.record_game(&game).await.unwrap_err();

        assert!(matches!(err, SyncError::Client(ClientError::Validation(_))));
        assert_eq!(api.list_calls.load(Ordering::SeqCst), 0);
        assert!(sync.snapshot().await.is_none());
    }

    #[tokio::test]
    async fn test_add_player_reload_includes_new_player() {
        let sync = DataSync::new(Arc::new(seeded()), Duration::from_secs(10));
        let result = sync.add_player(&NewPlayer::new(" Brendan ")).await.unwrap();

        assert_eq!(result.value.name, "Brendan");
        assert!(result.snapshot().unwrap().find_player("brendan").is_some());
    }

    #[tokio::test]
    async fn test_populate_from_course() {
        let sync = DataSync::new(Arc::new(seeded()), Duration::from_secs(10));
        let round = NewGolfRound {
            course: None,
            team1_players: vec![PlayerId::new(1), PlayerId::new(2)],
            team2_players: vec![PlayerId::new(3), PlayerId::new(4)],
            holes: (1..=18).map(|n| GolfHoleResult::new(n, None)).collect(),
            course_id: None,
            tee_id: None,
        };

        let populated = sync
            .populate_from_course(round.clone(), CourseId::new(8), "white")
            .await
            .unwrap();
        assert_eq!(populated.course_id, Some(CourseId::new(8)));
        assert_eq!(populated.tee_id, Some(3));
        assert_eq!(populated.holes[5].par, Some(3));
        assert_eq!(populated.holes[0].yardage, Some(301));
        assert_eq!(populated.course.as_deref(), Some("Pine Hills - North"));

        let err = sync
            .populate_from_course(round, CourseId::new(8), "Black")
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::UnknownTee { .. }));
    }
}
