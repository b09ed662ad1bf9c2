use crate::core::filters::{AnyOf, Clause, FilterValue, Operator};
use crate::models::{EngagementRow, Experience, ExperienceId, SwipeRow};
use crate::services::store::{CatalogStore, StoreError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// Relation names in the Supabase project
#[derive(Debug, Clone)]
pub struct SupabaseTables {
    pub wishlists: String,
    pub swipes: String,
    pub viewed: String,
    pub experiences: String,
}

/// Supabase (PostgREST) catalog client
///
/// Handles all reads the recommender needs:
/// - Wishlist, swipe and view history for a user
/// - Experience lookups by id, by tag filter and by highlight flags
/// - The tag columns of the whole catalog
pub struct SupabaseClient {
    base_url: String,
    api_key: String,
    client: Client,
    tables: SupabaseTables,
    traits: Vec<String>,
}

impl SupabaseClient {
    /// Create a new Supabase client
    ///
    /// `traits` are the boolean trait columns projected for the tag vocabulary.
    pub fn new(
        base_url: String,
        api_key: String,
        tables: SupabaseTables,
        traits: Vec<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            base_url,
            api_key,
            client: builder.build()?,
            tables,
            traits,
        })
    }

    fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{}", self.base_url.trim_end_matches('/'), table)
    }

    /// Run a GET against a relation and decode the row array
    ///
    /// A body that is not an array, or any row that does not decode, is a fault.
    async fn select<T: DeserializeOwned>(
        &self,
        table: &str,
        params: &[(&str, String)],
    ) -> Result<Vec<T>, StoreError> {
        let query = params
            .iter()
            .map(|(key, value)| format!("{}={}", key, urlencoding::encode(value)))
            .collect::<Vec<_>>()
            .join("&");
        let url = format!("{}?{}", self.table_url(table), query);

        tracing::debug!("Querying store: {}", url);

        let response = self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(StoreError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Store query on {} failed: {} - {}", table, status, body);
            return Err(StoreError::ApiError(format!("{} on {}: {}", status, table, body)));
        }

        let json: Value = response.json().await?;
        let rows = json
            .as_array()
            .ok_or_else(|| StoreError::InvalidResponse(format!("Expected row array from {}", table)))?;

        let parsed: Vec<T> = rows
            .iter()
            .enumerate()
            .map(|(i, row)| {
                serde_json::from_value(row.clone()).map_err(|e| {
                    tracing::error!("Malformed row {} from {}: {}", i, table, e);
                    StoreError::InvalidResponse(format!("Row {} from {}: {}", i, table, e))
                })
            })
            .collect::<Result<_, _>>()?;

        tracing::debug!("Fetched {} rows from {}", parsed.len(), table);

        Ok(parsed)
    }
}

#[async_trait]
impl CatalogStore for SupabaseClient {
    async fn wishlist_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError> {
        let rows: Vec<EngagementRow> = self
            .select(
                &self.tables.wishlists,
                &[
                    ("select", "experience_id".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().filter_map(|row| row.experience_id).collect())
    }

    async fn liked_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError> {
        let rows: Vec<SwipeRow> = self
            .select(
                &self.tables.swipes,
                &[
                    ("select", "likes".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().flat_map(|row| row.likes).collect())
    }

    async fn viewed_ids(&self, user_id: &str) -> Result<Vec<ExperienceId>, StoreError> {
        let rows: Vec<EngagementRow> = self
            .select(
                &self.tables.viewed,
                &[
                    ("select", "experience_id".to_string()),
                    ("user_id", format!("eq.{}", user_id)),
                ],
            )
            .await?;
        Ok(rows.into_iter().filter_map(|row| row.experience_id).collect())
    }

    async fn experiences_by_ids(&self, ids: &[ExperienceId]) -> Result<Vec<Experience>, StoreError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }
        self.select(
            &self.tables.experiences,
            &[("select", "*".to_string()), ("id", render_in_list(ids))],
        )
        .await
    }

    async fn experiences_matching(&self, filter: &AnyOf) -> Result<Vec<Experience>, StoreError> {
        if filter.is_empty() {
            return Ok(Vec::new());
        }
        let or_filter = render_or_filter(filter)?;
        self.select(
            &self.tables.experiences,
            &[("select", "*".to_string()), ("or", or_filter)],
        )
        .await
    }

    async fn highlighted_experiences(&self, limit: usize) -> Result<Vec<Experience>, StoreError> {
        self.select(
            &self.tables.experiences,
            &[
                ("select", "*".to_string()),
                ("or", "(trending.eq.true,featured.eq.true)".to_string()),
                ("limit", limit.to_string()),
            ],
        )
        .await
    }

    async fn tag_columns(&self) -> Result<Vec<Experience>, StoreError> {
        let mut columns = vec!["id", "category", "niche_category"];
        columns.extend(self.traits.iter().map(String::as_str));
        self.select(&self.tables.experiences, &[("select", columns.join(","))])
            .await
    }
}

/// Quote a value for a PostgREST filter
///
/// Double quotes let values contain reserved characters such as `,` `.` `(`.
pub fn quote_value(value: &str) -> String {
    let escaped = value.replace('\\', "\\\\").replace('"', "\\\"");
    format!("\"{}\"", escaped)
}

fn is_column_name(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Render a clause as `field.op.value`
pub fn render_clause(clause: &Clause) -> Result<String, StoreError> {
    if !is_column_name(&clause.field) {
        return Err(StoreError::InvalidFilter(format!(
            "refusing to filter on column {:?}",
            clause.field
        )));
    }
    let op = match clause.op {
        Operator::Eq => "eq",
    };
    let value = match &clause.value {
        FilterValue::Bool(b) => b.to_string(),
        FilterValue::Text(text) => quote_value(text),
    };
    Ok(format!("{}.{}.{}", clause.field, op, value))
}

/// Render a disjunction as the value of an `or` parameter
pub fn render_or_filter(filter: &AnyOf) -> Result<String, StoreError> {
    let clauses = filter
        .clauses()
        .iter()
        .map(render_clause)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(format!("({})", clauses.join(",")))
}

/// Render an id set as `in.("a","b")`
pub fn render_in_list(ids: &[ExperienceId]) -> String {
    let quoted = ids.iter().map(|id| quote_value(id)).collect::<Vec<_>>();
    format!("in.({})", quoted.join(","))
}
