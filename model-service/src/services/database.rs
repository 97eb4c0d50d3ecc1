//! Database service for model-service.

use crate::models::{
    Call, CreateCall, CreateIndividual, CreateVariant, Individual, UpdateCall, UpdateIndividual,
    UpdateVariant, Variant, VariantFilter,
};
use crate::services::metrics::DB_QUERY_DURATION;
use chrono::Utc;
use service_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;
use tracing::{info, instrument};
use uuid::Uuid;

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "model-service"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health.
    #[instrument(skip(self))]
    pub async fn health_check(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Health check failed: {}", e)))?;
        Ok(())
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Individual Operations
    // -------------------------------------------------------------------------

    /// Create a new individual. A client-supplied id is honoured when present.
    #[instrument(skip(self, input))]
    pub async fn create_individual(
        &self,
        input: &CreateIndividual,
    ) -> Result<Individual, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_individual"])
            .start_timer();

        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let individual = sqlx::query_as::<_, Individual>(
            r#"
            INSERT INTO individuals (id, description, created, updated)
            VALUES ($1, $2, $3, $3)
            RETURNING id, description, created, updated
            "#,
        )
        .bind(id)
        .bind(&input.description)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("Individual {} already exists", id))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create individual: {}", e)),
        })?;

        timer.observe_duration();

        info!(individual_id = %individual.id, "Individual created");

        Ok(individual)
    }

    /// Get an individual by ID.
    #[instrument(skip(self), fields(individual_id = %id))]
    pub async fn get_individual(&self, id: Uuid) -> Result<Option<Individual>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_individual"])
            .start_timer();

        let individual = sqlx::query_as::<_, Individual>(
            r#"
            SELECT id, description, created, updated
            FROM individuals
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get individual: {}", e)))?;

        timer.observe_duration();

        Ok(individual)
    }

    /// List all individuals.
    #[instrument(skip(self))]
    pub async fn list_individuals(&self) -> Result<Vec<Individual>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_individuals"])
            .start_timer();

        let individuals = sqlx::query_as::<_, Individual>(
            r#"
            SELECT id, description, created, updated
            FROM individuals
            ORDER BY created, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to list individuals: {}", e))
        })?;

        timer.observe_duration();

        Ok(individuals)
    }

    /// Apply a partial update. Returns `None` when the id is unknown.
    /// `id` and `created` are immutable; `updated` is always refreshed.
    #[instrument(skip(self, input), fields(individual_id = %id))]
    pub async fn update_individual(
        &self,
        id: Uuid,
        input: &UpdateIndividual,
    ) -> Result<Option<Individual>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_individual"])
            .start_timer();

        let individual = sqlx::query_as::<_, Individual>(
            r#"
            UPDATE individuals
            SET description = COALESCE($2, description),
                updated = $3
            WHERE id = $1
            RETURNING id, description, created, updated
            "#,
        )
        .bind(id)
        .bind(&input.description)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to update individual: {}", e))
        })?;

        timer.observe_duration();

        Ok(individual)
    }

    /// Delete an individual. Returns whether a row was removed. Dependent
    /// calls survive with their link nulled out.
    #[instrument(skip(self), fields(individual_id = %id))]
    pub async fn delete_individual(&self, id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_individual"])
            .start_timer();

        let result = sqlx::query("DELETE FROM individuals WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete individual: {}", e))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    /// Check whether an individual id resolves.
    #[instrument(skip(self), fields(individual_id = %id))]
    pub async fn individual_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM individuals WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to check individual: {}", e))
                })?;

        Ok(exists)
    }

    // -------------------------------------------------------------------------
    // Variant Operations
    // -------------------------------------------------------------------------

    /// Create a new variant. The (chromosome, start, ref, alt) unique index
    /// is the fallback enforcer for races past the create-path check.
    #[instrument(skip(self, input), fields(chromosome = %input.chromosome, start = input.start))]
    pub async fn create_variant(&self, input: &CreateVariant) -> Result<Variant, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_variant"])
            .start_timer();

        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let variant = sqlx::query_as::<_, Variant>(
            r#"
            INSERT INTO variants (id, chromosome, start, ref, alt, name, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, chromosome, start, ref, alt, name, created, updated
            "#,
        )
        .bind(id)
        .bind(&input.chromosome)
        .bind(input.start)
        .bind(&input.reference)
        .bind(&input.alt)
        .bind(&input.name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "Variant {}:{} {}>{} already exists",
                    input.chromosome,
                    input.start,
                    input.reference,
                    input.alt
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create variant: {}", e)),
        })?;

        timer.observe_duration();

        info!(variant_id = %variant.id, "Variant created");

        Ok(variant)
    }

    /// Get a variant by ID.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn get_variant(&self, id: Uuid) -> Result<Option<Variant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_variant"])
            .start_timer();

        let variant = sqlx::query_as::<_, Variant>(
            r#"
            SELECT id, chromosome, start, ref, alt, name, created, updated
            FROM variants
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get variant: {}", e)))?;

        timer.observe_duration();

        Ok(variant)
    }

    /// List variants with optional filters: chromosome equality plus a
    /// half-open [start, end) position range.
    #[instrument(skip(self, filter))]
    pub async fn list_variants(&self, filter: &VariantFilter) -> Result<Vec<Variant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_variants"])
            .start_timer();

        let variants = sqlx::query_as::<_, Variant>(
            r#"
            SELECT id, chromosome, start, ref, alt, name, created, updated
            FROM variants
            WHERE ($1::varchar IS NULL OR chromosome = $1)
              AND ($2::bigint IS NULL OR start >= $2)
              AND ($3::bigint IS NULL OR start < $3)
            ORDER BY chromosome, start, id
            "#,
        )
        .bind(&filter.chromosome)
        .bind(filter.start)
        .bind(filter.end)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list variants: {}", e)))?;

        timer.observe_duration();

        Ok(variants)
    }

    /// Apply a partial update. Returns `None` when the id is unknown. A
    /// natural-key collision with another variant maps to Conflict.
    #[instrument(skip(self, input), fields(variant_id = %id))]
    pub async fn update_variant(
        &self,
        id: Uuid,
        input: &UpdateVariant,
    ) -> Result<Option<Variant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_variant"])
            .start_timer();

        let variant = sqlx::query_as::<_, Variant>(
            r#"
            UPDATE variants
            SET chromosome = COALESCE($2, chromosome),
                start = COALESCE($3, start),
                ref = COALESCE($4, ref),
                alt = COALESCE($5, alt),
                name = COALESCE($6, name),
                updated = $7
            WHERE id = $1
            RETURNING id, chromosome, start, ref, alt, name, created, updated
            "#,
        )
        .bind(id)
        .bind(&input.chromosome)
        .bind(input.start)
        .bind(&input.reference)
        .bind(&input.alt)
        .bind(&input.name)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "Update would collide with an existing variant"
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to update variant: {}", e)),
        })?;

        timer.observe_duration();

        Ok(variant)
    }

    /// Delete a variant. Returns whether a row was removed.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn delete_variant(&self, id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_variant"])
            .start_timer();

        let result = sqlx::query("DELETE FROM variants WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                AppError::DatabaseError(anyhow::anyhow!("Failed to delete variant: {}", e))
            })?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a variant id resolves.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn variant_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM variants WHERE id = $1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await
                .map_err(|e| {
                    AppError::DatabaseError(anyhow::anyhow!("Failed to check variant: {}", e))
                })?;

        Ok(exists)
    }

    /// Check whether the natural key (chromosome, start, ref, alt) exists.
    #[instrument(skip(self, reference, alt), fields(chromosome = %chromosome, start = start))]
    pub async fn variant_key_exists(
        &self,
        chromosome: &str,
        start: i64,
        reference: &str,
        alt: &str,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM variants
                WHERE chromosome = $1 AND start = $2 AND ref = $3 AND alt = $4
            )
            "#,
        )
        .bind(chromosome)
        .bind(start)
        .bind(reference)
        .bind(alt)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!("Failed to check variant key: {}", e))
        })?;

        Ok(exists)
    }

    // -------------------------------------------------------------------------
    // Call Operations
    // -------------------------------------------------------------------------

    /// Create a new call linking an individual to a variant. The
    /// (variant_id, individual_id) unique index is the race fallback; a
    /// dangling link is rejected by the foreign keys.
    #[instrument(skip(self, input), fields(individual_id = %input.individual_id, variant_id = %input.variant_id))]
    pub async fn create_call(&self, input: &CreateCall) -> Result<Call, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["create_call"])
            .start_timer();

        let id = input.id.unwrap_or_else(Uuid::new_v4);
        let call = sqlx::query_as::<_, Call>(
            r#"
            INSERT INTO calls (id, individual_id, variant_id, genotype, fmt, created, updated)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING id, individual_id, variant_id, genotype, fmt, created, updated
            "#,
        )
        .bind(id)
        .bind(input.individual_id)
        .bind(input.variant_id)
        .bind(&input.genotype)
        .bind(&input.fmt)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!(
                    "Call for variant {} and individual {} already exists",
                    input.variant_id,
                    input.individual_id
                ))
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest(anyhow::anyhow!(
                    "Call references a missing individual or variant"
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to create call: {}", e)),
        })?;

        timer.observe_duration();

        info!(call_id = %call.id, "Call created");

        Ok(call)
    }

    /// Get a call by ID.
    #[instrument(skip(self), fields(call_id = %id))]
    pub async fn get_call(&self, id: Uuid) -> Result<Option<Call>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["get_call"])
            .start_timer();

        let call = sqlx::query_as::<_, Call>(
            r#"
            SELECT id, individual_id, variant_id, genotype, fmt, created, updated
            FROM calls
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to get call: {}", e)))?;

        timer.observe_duration();

        Ok(call)
    }

    /// List all calls.
    #[instrument(skip(self))]
    pub async fn list_calls(&self) -> Result<Vec<Call>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["list_calls"])
            .start_timer();

        let calls = sqlx::query_as::<_, Call>(
            r#"
            SELECT id, individual_id, variant_id, genotype, fmt, created, updated
            FROM calls
            ORDER BY created, id
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to list calls: {}", e)))?;

        timer.observe_duration();

        Ok(calls)
    }

    /// Apply a partial update. Returns `None` when the id is unknown.
    #[instrument(skip(self, input), fields(call_id = %id))]
    pub async fn update_call(
        &self,
        id: Uuid,
        input: &UpdateCall,
    ) -> Result<Option<Call>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["update_call"])
            .start_timer();

        let call = sqlx::query_as::<_, Call>(
            r#"
            UPDATE calls
            SET individual_id = COALESCE($2, individual_id),
                variant_id = COALESCE($3, variant_id),
                genotype = COALESCE($4, genotype),
                fmt = COALESCE($5, fmt),
                updated = $6
            WHERE id = $1
            RETURNING id, individual_id, variant_id, genotype, fmt, created, updated
            "#,
        )
        .bind(id)
        .bind(input.individual_id)
        .bind(input.variant_id)
        .bind(&input.genotype)
        .bind(&input.fmt)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err) if db_err.is_unique_violation() => {
                AppError::Conflict(anyhow::anyhow!("Update would collide with an existing call"))
            }
            sqlx::Error::Database(ref db_err) if db_err.is_foreign_key_violation() => {
                AppError::BadRequest(anyhow::anyhow!(
                    "Call references a missing individual or variant"
                ))
            }
            _ => AppError::DatabaseError(anyhow::anyhow!("Failed to update call: {}", e)),
        })?;

        timer.observe_duration();

        Ok(call)
    }

    /// Delete a call. Returns whether a row was removed.
    #[instrument(skip(self), fields(call_id = %id))]
    pub async fn delete_call(&self, id: Uuid) -> Result<bool, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["delete_call"])
            .start_timer();

        let result = sqlx::query("DELETE FROM calls WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to delete call: {}", e)))?;

        timer.observe_duration();

        Ok(result.rows_affected() > 0)
    }

    /// Check whether a call id resolves.
    #[instrument(skip(self), fields(call_id = %id))]
    pub async fn call_exists(&self, id: Uuid) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM calls WHERE id = $1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to check call: {}", e)))?;

        Ok(exists)
    }

    /// Check whether the (variant, individual) pair is already called.
    #[instrument(skip(self), fields(variant_id = %variant_id, individual_id = %individual_id))]
    pub async fn call_pair_exists(
        &self,
        variant_id: Uuid,
        individual_id: Uuid,
    ) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            "SELECT EXISTS(SELECT 1 FROM calls WHERE variant_id = $1 AND individual_id = $2)",
        )
        .bind(variant_id)
        .bind(individual_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to check call pair: {}", e)))?;

        Ok(exists)
    }

    // -------------------------------------------------------------------------
    // Relationship Traversal
    // -------------------------------------------------------------------------

    /// Variants called in an individual. The inner join skips orphaned calls,
    /// and the pair uniqueness makes the result distinct by construction.
    #[instrument(skip(self), fields(individual_id = %individual_id))]
    pub async fn variants_by_individual(
        &self,
        individual_id: Uuid,
    ) -> Result<Vec<Variant>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["variants_by_individual"])
            .start_timer();

        let variants = sqlx::query_as::<_, Variant>(
            r#"
            SELECT v.id, v.chromosome, v.start, v.ref, v.alt, v.name, v.created, v.updated
            FROM variants v
            JOIN calls c ON c.variant_id = v.id
            WHERE c.individual_id = $1
            ORDER BY v.chromosome, v.start, v.id
            "#,
        )
        .bind(individual_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Failed to list variants by individual: {}",
                e
            ))
        })?;

        timer.observe_duration();

        Ok(variants)
    }

    /// Individuals a variant has been called in.
    #[instrument(skip(self), fields(variant_id = %variant_id))]
    pub async fn individuals_by_variant(
        &self,
        variant_id: Uuid,
    ) -> Result<Vec<Individual>, AppError> {
        let timer = DB_QUERY_DURATION
            .with_label_values(&["individuals_by_variant"])
            .start_timer();

        let individuals = sqlx::query_as::<_, Individual>(
            r#"
            SELECT i.id, i.description, i.created, i.updated
            FROM individuals i
            JOIN calls c ON c.individual_id = i.id
            WHERE c.variant_id = $1
            ORDER BY i.created, i.id
            "#,
        )
        .bind(variant_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::DatabaseError(anyhow::anyhow!(
                "Failed to list individuals by variant: {}",
                e
            ))
        })?;

        timer.observe_duration();

        Ok(individuals)
    }
}
