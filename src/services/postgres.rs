use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, Row, Transaction};
use std::time::Duration;
use thiserror::Error;

use crate::core::calculate_compatibility;
use crate::models::{
    AgentProfile, Compatibility, MatchIntent, MatchRecord, RegisterAgentRequest, SeekingFlags,
    SwipeDirection, UpdateAgentRequest,
};
use crate::models::responses::PartnerSummary;

/// Errors surfaced by the agent/swipe/match store.
///
/// The first four variants make up the engine's error taxonomy and map
/// directly to HTTP statuses in the route layer; anything else is a
/// storage failure propagated as-is.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("precondition failed: {0}")]
    PreconditionFailed(String),

    #[error("forbidden: {0}")]
    Forbidden(String),

    #[error("SQLx error: {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("migration error: {0}")]
    Migrate(#[from] sqlx::migrate::MigrateError),
}

impl StoreError {
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::NotFound(_) => 404,
            StoreError::Conflict(_) => 409,
            StoreError::PreconditionFailed(_) => 400,
            StoreError::Forbidden(_) => 403,
            StoreError::Sqlx(_) | StoreError::Migrate(_) => 500,
        }
    }

    pub fn error_label(&self) -> &'static str {
        match self {
            StoreError::NotFound(_) => "not_found",
            StoreError::Conflict(_) => "conflict",
            StoreError::PreconditionFailed(_) => "precondition_failed",
            StoreError::Forbidden(_) => "forbidden",
            StoreError::Sqlx(_) | StoreError::Migrate(_) => "internal_error",
        }
    }
}

/// SQLSTATE 23505, raised when a uniqueness constraint is violated.
/// This is the backstop that keeps concurrent mutual swipes from
/// double-inserting a swipe or a match.
fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// Outcome of a recorded swipe.
#[derive(Debug, Clone)]
pub struct SwipeOutcome {
    pub matched: bool,
    pub match_id: Option<i64>,
    pub compatibility: Option<Compatibility>,
}

/// PostgreSQL-backed store for agents, swipes and matches.
///
/// Owns the swipe/match state machine: `record_swipe` runs the one-shot
/// ordered-pair transition, mutual-swipe detection and match
/// materialization inside a single transaction, so a failure anywhere
/// leaves no partial swipe, match or counter mutation behind.
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new client and run migrations.
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, StoreError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(5))
            .idle_timeout(Duration::from_secs(600))
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    pub async fn from_settings(
        url: &str,
        max_connections: Option<u32>,
        min_connections: Option<u32>,
    ) -> Result<Self, StoreError> {
        tracing::info!("Connecting to PostgreSQL");
        Self::new(
            url,
            max_connections.unwrap_or(10),
            min_connections.unwrap_or(1),
        )
        .await
    }

    // ---- agent profiles ----

    /// Register a new agent with a server-minted short id.
    pub async fn register_agent(
        &self,
        req: &RegisterAgentRequest,
    ) -> Result<AgentProfile, StoreError> {
        let existing = sqlx::query("SELECT 1 FROM agents WHERE name = $1")
            .bind(&req.name)
            .fetch_optional(&self.pool)
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(format!(
                "agent name '{}' already taken",
                req.name
            )));
        }

        let id: String = uuid::Uuid::new_v4().simple().to_string()[..8].to_string();

        let query = r#"
            INSERT INTO agents (
                id, name, emoji, tagline, bio, chains, vibes, skills,
                seeking_rivalry, seeking_collaboration, seeking_friendship,
                seeking_mentorship, seeking_romance
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(&id)
            .bind(&req.name)
            .bind(&req.emoji)
            .bind(&req.tagline)
            .bind(&req.bio)
            .bind(&req.chains)
            .bind(&req.vibes)
            .bind(&req.skills)
            .bind(req.seeking.rivalry)
            .bind(req.seeking.collaboration)
            .bind(req.seeking.friendship)
            .bind(req.seeking.mentorship)
            .bind(req.seeking.romance)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict(format!("agent name '{}' already taken", req.name))
                } else {
                    e.into()
                }
            })?;

        tracing::info!("Registered agent {} ({})", req.name, id);

        Ok(agent_from_row(&row))
    }

    pub async fn get_agent(&self, agent_id: &str) -> Result<AgentProfile, StoreError> {
        let row = sqlx::query("SELECT * FROM agents WHERE id = $1")
            .bind(agent_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("agent {} not found", agent_id)))?;

        Ok(agent_from_row(&row))
    }

    pub async fn get_agent_by_name(&self, name: &str) -> Result<AgentProfile, StoreError> {
        let row = sqlx::query("SELECT * FROM agents WHERE name = $1")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("agent '{}' not found", name)))?;

        Ok(agent_from_row(&row))
    }

    /// Apply a partial profile update.
    pub async fn update_agent(
        &self,
        agent_id: &str,
        update: &UpdateAgentRequest,
    ) -> Result<AgentProfile, StoreError> {
        let mut agent = self.get_agent(agent_id).await?;

        if let Some(name) = &update.name {
            agent.name = name.clone();
        }
        if let Some(emoji) = &update.emoji {
            agent.emoji = emoji.clone();
        }
        if update.tagline.is_some() {
            agent.tagline = update.tagline.clone();
        }
        if update.bio.is_some() {
            agent.bio = update.bio.clone();
        }
        if let Some(chains) = &update.chains {
            agent.chains = chains.clone();
        }
        if let Some(vibes) = &update.vibes {
            agent.vibes = vibes.clone();
        }
        if let Some(skills) = &update.skills {
            agent.skills = skills.clone();
        }
        agent.seeking = SeekingFlags {
            rivalry: update.seeking_rivalry.unwrap_or(agent.seeking.rivalry),
            collaboration: update
                .seeking_collaboration
                .unwrap_or(agent.seeking.collaboration),
            friendship: update.seeking_friendship.unwrap_or(agent.seeking.friendship),
            mentorship: update.seeking_mentorship.unwrap_or(agent.seeking.mentorship),
            romance: update.seeking_romance.unwrap_or(agent.seeking.romance),
        };

        let query = r#"
            UPDATE agents SET
                name = $2, emoji = $3, tagline = $4, bio = $5,
                chains = $6, vibes = $7, skills = $8,
                seeking_rivalry = $9, seeking_collaboration = $10,
                seeking_friendship = $11, seeking_mentorship = $12,
                seeking_romance = $13, updated_at = NOW()
            WHERE id = $1
            RETURNING *
        "#;

        let row = sqlx::query(query)
            .bind(agent_id)
            .bind(&agent.name)
            .bind(&agent.emoji)
            .bind(&agent.tagline)
            .bind(&agent.bio)
            .bind(&agent.chains)
            .bind(&agent.vibes)
            .bind(&agent.skills)
            .bind(agent.seeking.rivalry)
            .bind(agent.seeking.collaboration)
            .bind(agent.seeking.friendship)
            .bind(agent.seeking.mentorship)
            .bind(agent.seeking.romance)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict(format!("agent name '{}' already taken", agent.name))
                } else {
                    e.into()
                }
            })?;

        Ok(agent_from_row(&row))
    }

    pub async fn list_agents(
        &self,
        skip: u32,
        limit: u16,
    ) -> Result<Vec<AgentProfile>, StoreError> {
        let rows = sqlx::query("SELECT * FROM agents ORDER BY created_at ASC, id ASC OFFSET $1 LIMIT $2")
            .bind(skip as i64)
            .bind(limit as i64)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(agent_from_row).collect())
    }

    // ---- discovery ----

    /// Candidate pool for the discovery feed: everyone the requester has
    /// not yet swiped on, excluding the requester. Exclusion is
    /// one-directional; an agent who has already swiped on the requester
    /// still appears until the requester swipes back. Ordered by
    /// registration time so feed ties resolve deterministically.
    pub async fn candidate_pool(&self, agent_id: &str) -> Result<Vec<AgentProfile>, StoreError> {
        let query = r#"
            SELECT * FROM agents
            WHERE id != $1
              AND id NOT IN (SELECT swiped_id FROM swipes WHERE swiper_id = $1)
            ORDER BY created_at ASC, id ASC
        "#;

        let rows = sqlx::query(query)
            .bind(agent_id)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Candidate pool for {}: {} agents", agent_id, rows.len());

        Ok(rows.iter().map(agent_from_row).collect())
    }

    // ---- swipe/match engine ----

    /// Record a one-shot swipe and detect a mutual match.
    ///
    /// The whole operation runs in one transaction: the swipe insert, the
    /// allowance and counter updates, the reverse-swipe lookup and the
    /// match insert commit together or not at all. Both agent rows are
    /// locked in canonical id order, so the two directions of a pair
    /// serialize within one database; the unique constraints on
    /// (swiper_id, swiped_id) and on the canonicalized match pair are the
    /// guarantee across instances — a losing concurrent writer gets
    /// `Conflict`, never a second match.
    pub async fn record_swipe(
        &self,
        swiper_id: &str,
        target_id: &str,
        direction: SwipeDirection,
    ) -> Result<SwipeOutcome, StoreError> {
        if swiper_id == target_id {
            return Err(StoreError::PreconditionFailed(
                "cannot swipe on yourself".to_string(),
            ));
        }

        let mut tx = self.pool.begin().await?;

        // Lock both profiles in canonical id order to avoid deadlocks
        // between the two directions of the same pair.
        let (first, second) = if swiper_id < target_id {
            (swiper_id, target_id)
        } else {
            (target_id, swiper_id)
        };
        let first_agent = lock_agent(&mut tx, first).await?;
        let second_agent = lock_agent(&mut tx, second).await?;
        let (swiper, target) = if first == swiper_id {
            (first_agent, second_agent)
        } else {
            (second_agent, first_agent)
        };

        // One swipe per ordered pair, ever.
        let existing = sqlx::query("SELECT 1 FROM swipes WHERE swiper_id = $1 AND swiped_id = $2")
            .bind(swiper_id)
            .bind(target_id)
            .fetch_optional(&mut *tx)
            .await?;
        if existing.is_some() {
            return Err(StoreError::Conflict(
                "already swiped on this agent".to_string(),
            ));
        }

        if direction == SwipeDirection::Super {
            if swiper.super_swipes <= 0 {
                return Err(StoreError::PreconditionFailed(
                    "no super swipes remaining".to_string(),
                ));
            }
            sqlx::query("UPDATE agents SET super_swipes = super_swipes - 1 WHERE id = $1")
                .bind(swiper_id)
                .execute(&mut *tx)
                .await?;
        }

        // The direction is stored literally; super is only collapsed to
        // right for match detection, never on the record.
        sqlx::query("INSERT INTO swipes (swiper_id, swiped_id, direction) VALUES ($1, $2, $3)")
            .bind(swiper_id)
            .bind(target_id)
            .bind(direction.as_str())
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    StoreError::Conflict("already swiped on this agent".to_string())
                } else {
                    e.into()
                }
            })?;

        sqlx::query("UPDATE agents SET total_swipes = total_swipes + 1 WHERE id = $1")
            .bind(swiper_id)
            .execute(&mut *tx)
            .await?;

        let mut outcome = SwipeOutcome {
            matched: false,
            match_id: None,
            compatibility: None,
        };

        if direction.is_positive() {
            let reverse = sqlx::query(
                r#"
                SELECT 1 FROM swipes
                WHERE swiper_id = $1 AND swiped_id = $2
                  AND direction IN ('right', 'super')
                "#,
            )
            .bind(target_id)
            .bind(swiper_id)
            .fetch_optional(&mut *tx)
            .await?;

            if reverse.is_some() {
                let compat = calculate_compatibility(&swiper.traits(), &target.traits());
                let match_type = compat.primary_match_type();

                // Canonical column order backs the unordered-pair
                // uniqueness constraint.
                let (agent_a, agent_b) = if swiper_id < target_id {
                    (swiper_id, target_id)
                } else {
                    (target_id, swiper_id)
                };

                let query = r#"
                    INSERT INTO matches (
                        agent_a_id, agent_b_id, match_type,
                        compatibility_score, compatibility_reasons
                    )
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id
                "#;

                let row = sqlx::query(query)
                    .bind(agent_a)
                    .bind(agent_b)
                    .bind(match_type.map(|t| t.as_str()))
                    .bind(compat.total)
                    .bind(sqlx::types::Json(&compat.reasons))
                    .fetch_one(&mut *tx)
                    .await
                    .map_err(|e| {
                        if is_unique_violation(&e) {
                            StoreError::Conflict(
                                "match already exists for this pair".to_string(),
                            )
                        } else {
                            e.into()
                        }
                    })?;

                let match_id: i64 = row.get("id");

                sqlx::query(
                    "UPDATE agents SET matches_count = matches_count + 1 WHERE id = $1 OR id = $2",
                )
                .bind(swiper_id)
                .bind(target_id)
                .execute(&mut *tx)
                .await?;

                tracing::info!(
                    "Mutual match {} between {} and {} (score {})",
                    match_id,
                    swiper_id,
                    target_id,
                    compat.total
                );

                outcome.matched = true;
                outcome.match_id = Some(match_id);
                outcome.compatibility = Some(compat);
            }
        }

        tx.commit().await?;

        tracing::debug!(
            "Recorded swipe: {} -> {} ({})",
            swiper_id,
            target_id,
            direction.as_str()
        );

        Ok(outcome)
    }

    // ---- matches ----

    /// All matches an agent is party to, newest first, with partner summary.
    pub async fn matches_for_agent(
        &self,
        agent_id: &str,
        active_only: bool,
    ) -> Result<Vec<(MatchRecord, PartnerSummary)>, StoreError> {
        // Validate the agent exists so a bad id is a 404, not an empty list.
        self.get_agent(agent_id).await?;

        let query = r#"
            SELECT m.id AS match_id, m.agent_a_id, m.agent_b_id, m.match_type,
                   m.compatibility_score, m.compatibility_reasons,
                   m.created_at AS matched_at, m.is_active,
                   p.id AS partner_id, p.name AS partner_name,
                   p.emoji AS partner_emoji, p.tagline AS partner_tagline
            FROM matches m
            JOIN agents p
              ON p.id = CASE WHEN m.agent_a_id = $1 THEN m.agent_b_id ELSE m.agent_a_id END
            WHERE (m.agent_a_id = $1 OR m.agent_b_id = $1)
              AND (m.is_active OR NOT $2)
            ORDER BY m.created_at DESC
        "#;

        let rows = sqlx::query(query)
            .bind(agent_id)
            .bind(active_only)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows
            .iter()
            .map(|row| {
                let record = MatchRecord {
                    id: row.get("match_id"),
                    agent_a_id: row.get("agent_a_id"),
                    agent_b_id: row.get("agent_b_id"),
                    match_type: row
                        .get::<Option<String>, _>("match_type")
                        .as_deref()
                        .and_then(MatchIntent::parse),
                    compatibility_score: row.get("compatibility_score"),
                    compatibility_reasons: row
                        .get::<sqlx::types::Json<Vec<String>>, _>("compatibility_reasons")
                        .0,
                    created_at: row.get("matched_at"),
                    is_active: row.get("is_active"),
                };
                let partner = PartnerSummary {
                    id: row.get("partner_id"),
                    name: row.get("partner_name"),
                    emoji: row.get("partner_emoji"),
                    tagline: row.get("partner_tagline"),
                };
                (record, partner)
            })
            .collect())
    }

    /// A single match as seen by one of its parties.
    pub async fn get_match_for(
        &self,
        agent_id: &str,
        match_id: i64,
    ) -> Result<(MatchRecord, PartnerSummary), StoreError> {
        let record = self.get_match(match_id).await?;
        let partner_id = record
            .partner_of(agent_id)
            .ok_or_else(|| StoreError::Forbidden("not a party to this match".to_string()))?
            .to_string();

        let partner = self.get_agent(&partner_id).await?;

        Ok((
            record,
            PartnerSummary {
                id: partner.id,
                name: partner.name,
                emoji: partner.emoji,
                tagline: partner.tagline,
            },
        ))
    }

    async fn get_match(&self, match_id: i64) -> Result<MatchRecord, StoreError> {
        let row = sqlx::query("SELECT * FROM matches WHERE id = $1")
            .bind(match_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("match {} not found", match_id)))?;

        Ok(match_from_row(&row))
    }

    /// Deactivate a match. Terminal: an inactive match can never be
    /// reactivated, and a second unmatch fails with `Conflict`.
    pub async fn unmatch(&self, agent_id: &str, match_id: i64) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        let row = sqlx::query("SELECT * FROM matches WHERE id = $1 FOR UPDATE")
            .bind(match_id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("match {} not found", match_id)))?;

        let record = match_from_row(&row);

        if !record.involves(agent_id) {
            return Err(StoreError::Forbidden(
                "not a party to this match".to_string(),
            ));
        }
        if !record.is_active {
            return Err(StoreError::Conflict(
                "match is no longer active".to_string(),
            ));
        }

        sqlx::query("UPDATE matches SET is_active = FALSE WHERE id = $1")
            .bind(match_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        tracing::info!("Agent {} unmatched match {}", agent_id, match_id);

        Ok(())
    }

    /// Health check for the database connection.
    pub async fn health_check(&self) -> Result<bool, StoreError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| true)
            .map_err(Into::into)
    }
}

/// Lock an agent row for the duration of the transaction.
async fn lock_agent(
    tx: &mut Transaction<'_, Postgres>,
    agent_id: &str,
) -> Result<AgentProfile, StoreError> {
    let row = sqlx::query("SELECT * FROM agents WHERE id = $1 FOR UPDATE")
        .bind(agent_id)
        .fetch_optional(&mut **tx)
        .await?
        .ok_or_else(|| StoreError::NotFound(format!("agent {} not found", agent_id)))?;

    Ok(agent_from_row(&row))
}

fn agent_from_row(row: &PgRow) -> AgentProfile {
    AgentProfile {
        id: row.get("id"),
        name: row.get("name"),
        emoji: row.get("emoji"),
        tagline: row.get("tagline"),
        bio: row.get("bio"),
        chains: row.get("chains"),
        vibes: row.get("vibes"),
        skills: row.get("skills"),
        seeking: SeekingFlags {
            rivalry: row.get("seeking_rivalry"),
            collaboration: row.get("seeking_collaboration"),
            friendship: row.get("seeking_friendship"),
            mentorship: row.get("seeking_mentorship"),
            romance: row.get("seeking_romance"),
        },
        total_swipes: row.get("total_swipes"),
        matches_count: row.get("matches_count"),
        rivalries_won: row.get("rivalries_won"),
        rivalries_lost: row.get("rivalries_lost"),
        reputation: row.get("reputation"),
        super_swipes: row.get("super_swipes"),
        created_at: row.get("created_at"),
    }
}

fn match_from_row(row: &PgRow) -> MatchRecord {
    MatchRecord {
        id: row.get("id"),
        agent_a_id: row.get("agent_a_id"),
        agent_b_id: row.get("agent_b_id"),
        match_type: row
            .get::<Option<String>, _>("match_type")
            .as_deref()
            .and_then(MatchIntent::parse),
        compatibility_score: row.get("compatibility_score"),
        compatibility_reasons: row
            .get::<sqlx::types::Json<Vec<String>>, _>("compatibility_reasons")
            .0,
        created_at: row.get("created_at"),
        is_active: row.get("is_active"),
    }
}
