use crate::error::DbError;
use chrono::NaiveDate;
use sqlx::FromRow;
use sqlx::postgres::PgPool;

/// The `DbRepository` provides a high-level, application-specific interface
/// to the database. It encapsulates all SQL queries and data access logic.
#[derive(Debug, Clone)]
pub struct DbRepository {
    pool: PgPool,
}

/// A row from the `zones` registry table.
#[derive(Debug, Clone, FromRow)]
pub struct DbZone {
    pub id: i64,
    pub name: String,
}

/// The raw AVG/SUM aggregate over `listings_agg` for one zone/year.
///
/// Every field is `Option` because an aggregate over zero rows yields NULLs;
/// interpreting that as "no data for this zone/year" is the stats source's
/// job, not the repository's.
#[derive(Debug, Clone, Copy, FromRow)]
pub struct PercentileAggregate {
    pub p25_m2: Option<f64>,
    pub p50_m2: Option<f64>,
    pub p75_m2: Option<f64>,
    pub sample_size: Option<i64>,
}

impl DbRepository {
    /// Creates a new `DbRepository` with a shared database connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Looks up a zone by name, case-insensitively.
    pub async fn find_zone_by_name(&self, name: &str) -> Result<Option<DbZone>, DbError> {
        let zone = sqlx::query_as::<_, DbZone>(
            "SELECT id, name FROM zones WHERE lower(name) = lower($1) LIMIT 1",
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(zone)
    }

    /// Aggregates the listing percentiles for a zone over one year.
    ///
    /// Multiple sub-year periods mapping to the same year are averaged, while
    /// their sample sizes are summed.
    pub async fn aggregate_percentiles(
        &self,
        zone_id: i64,
        year: i32,
    ) -> Result<PercentileAggregate, DbError> {
        let aggregate = sqlx::query_as::<_, PercentileAggregate>(
            r#"
            SELECT
                avg(p25_m2) AS p25_m2,
                avg(p50_m2) AS p50_m2,
                avg(p75_m2) AS p75_m2,
                sum(sample_size) AS sample_size
            FROM listings_agg
            WHERE zone_id = $1
              AND extract(year FROM period)::int = $2
            "#,
        )
        .bind(zone_id)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(aggregate)
    }

    /// Averages the price index for a zone over one year. `None` means the
    /// index has no rows for that zone/year.
    pub async fn mean_price(&self, zone_id: i64, year: i32) -> Result<Option<f64>, DbError> {
        let row: (Option<f64>,) = sqlx::query_as(
            r#"
            SELECT avg(price_m2)
            FROM price_index
            WHERE zone_id = $1
              AND extract(year FROM period)::int = $2
            "#,
        )
        .bind(zone_id)
        .bind(year)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    /// Returns the id of the named zone, registering it first if unknown.
    /// Used by the backfill pipeline; the valuation path never writes.
    pub async fn ensure_zone(&self, name: &str, source: &str) -> Result<i64, DbError> {
        if let Some(zone) = self.find_zone_by_name(name).await? {
            return Ok(zone.id);
        }

        let row: (i64,) =
            sqlx::query_as("INSERT INTO zones (name, source) VALUES ($1, $2) RETURNING id")
                .bind(name)
                .bind(source)
                .fetch_one(&self.pool)
                .await?;

        Ok(row.0)
    }

    /// Inserts one price-index observation for a zone and period.
    pub async fn save_price_index_row(
        &self,
        zone_id: i64,
        period: NaiveDate,
        price_m2: f64,
        source: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            "INSERT INTO price_index (zone_id, period, price_m2, source) VALUES ($1, $2, $3, $4)",
        )
        .bind(zone_id)
        .bind(period)
        .bind(price_m2)
        .bind(source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Inserts one percentile-aggregate row for a zone and period.
    pub async fn save_listing_aggregate(
        &self,
        zone_id: i64,
        period: NaiveDate,
        p25_m2: f64,
        p50_m2: f64,
        p75_m2: f64,
        sample_size: i32,
        source: &str,
    ) -> Result<(), DbError> {
        sqlx::query(
            r#"
            INSERT INTO listings_agg (zone_id, period, p25_m2, p50_m2, p75_m2, sample_size, source)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(zone_id)
        .bind(period)
        .bind(p25_m2)
        .bind(p50_m2)
        .bind(p75_m2)
        .bind(sample_size)
        .bind(source)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
