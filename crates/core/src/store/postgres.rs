use super::DrugStore;
use crate::search::like_pattern;
use crate::{CoreError, CoreResult, ServiceConfig, StoreError, StoreResult};
use async_trait::async_trait;
use dic_types::{Drug, DrugId, Interaction};
use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions, PgSslMode};
use sqlx::types::Json;
use std::str::FromStr;

// Whole rows as jsonb, so columns beyond id and name reach the client untouched.
const SEARCH_DRUGS_SQL: &str = "SELECT to_jsonb(d) FROM drugs d WHERE d.name ILIKE $1";

// Ids are cast so that int4 and int8 schemas decode the same way. NULL text stays NULL.
const INTERACTION_COLUMNS: &str = "id::int8 AS id, drug1_id::int8 AS drug1_id, \
     drug2_id::int8 AS drug2_id, severity::text AS severity, \
     description::text AS description";

#[derive(sqlx::FromRow)]
struct InteractionRow {
    id: i64,
    drug1_id: i64,
    drug2_id: i64,
    severity: Option<String>,
    description: Option<String>,
}

impl From<InteractionRow> for Interaction {
    fn from(row: InteractionRow) -> Self {
        Interaction {
            id: row.id,
            drug1_id: row.drug1_id,
            drug2_id: row.drug2_id,
            severity: row.severity,
            description: row.description,
        }
    }
}

/// PostgreSQL-backed store over a shared connection pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    /// Open a connection pool for `cfg`.
    ///
    /// Certificate verification follows `cfg.tls_verify()` unless the url names its own
    /// `sslmode`, in which case the url wins.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDatabaseUrl` if the url cannot be parsed, or
    /// `CoreError::Connect` if the first connection cannot be established.
    pub async fn connect(cfg: &ServiceConfig) -> CoreResult<Self> {
        let mut options = PgConnectOptions::from_str(cfg.database_url())
            .map_err(CoreError::InvalidDatabaseUrl)?;

        if url_sets_ssl_mode(cfg.database_url()) {
            tracing::info!("using sslmode from DATABASE_URL");
        } else if cfg.tls_verify() {
            options = options.ssl_mode(PgSslMode::VerifyFull);
        } else {
            tracing::warn!(
                "database certificate verification is disabled; the connection is encrypted but the server is not authenticated"
            );
            options = options.ssl_mode(PgSslMode::Require);
        }

        let pool = PgPoolOptions::new()
            .max_connections(cfg.max_connections())
            .connect_with(options)
            .await
            .map_err(CoreError::Connect)?;

        tracing::info!(
            max_connections = cfg.max_connections(),
            "database pool ready"
        );

        Ok(Self { pool })
    }
}

fn url_sets_ssl_mode(url: &str) -> bool {
    url.split_once('?')
        .map(|(_, query)| {
            query
                .split('&')
                .any(|param| param.starts_with("sslmode=") || param.starts_with("ssl-mode="))
        })
        .unwrap_or(false)
}

fn query_failed(operation: &'static str) -> impl FnOnce(sqlx::Error) -> StoreError {
    move |source| {
        tracing::error!(operation, error = %source, "query error");
        StoreError::Query { operation, source }
    }
}

#[async_trait]
impl DrugStore for PgStore {
    async fn search_drugs(&self, term: &str) -> StoreResult<Vec<Drug>> {
        let rows: Vec<Json<Drug>> = sqlx::query_scalar(SEARCH_DRUGS_SQL)
            .bind(like_pattern(term))
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("search_drugs"))?;

        Ok(rows.into_iter().map(|Json(drug)| drug).collect())
    }

    async fn interactions_for_pair(
        &self,
        first: DrugId,
        second: DrugId,
    ) -> StoreResult<Vec<Interaction>> {
        let sql = format!(
            "SELECT {INTERACTION_COLUMNS} FROM interactions \
             WHERE (drug1_id = $1 AND drug2_id = $2) OR (drug1_id = $2 AND drug2_id = $1)"
        );
        let rows: Vec<InteractionRow> = sqlx::query_as(&sql)
            .bind(first)
            .bind(second)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("interactions_for_pair"))?;

        Ok(rows.into_iter().map(Interaction::from).collect())
    }

    async fn all_interactions(&self) -> StoreResult<Vec<Interaction>> {
        let sql = format!("SELECT {INTERACTION_COLUMNS} FROM interactions");
        let rows: Vec<InteractionRow> = sqlx::query_as(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(query_failed("all_interactions"))?;

        Ok(rows.into_iter().map(Interaction::from).collect())
    }
}
