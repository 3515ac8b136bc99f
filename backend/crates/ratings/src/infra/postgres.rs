//! PostgreSQL Repository Implementation

use kernel::error::conversions::is_unique_violation;
use sqlx::{PgPool, Postgres, QueryBuilder};

use crate::domain::entities::{
    DashboardTotals, NewStore, OwnerStore, Store, StoreRating, StoreSummary,
};
use crate::domain::repository::{
    RatingOutcome, RatingRepository, StoreFilter, StoreRepository,
};
use crate::domain::value_objects::RatingValue;
use crate::error::{RatingsError, RatingsResult};

/// PostgreSQL-backed store and rating repository
#[derive(Clone)]
pub struct PgStoreRepository {
    pool: PgPool,
}

impl PgStoreRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

// ============================================================================
// Store Repository Implementation
// ============================================================================

impl StoreRepository for PgStoreRepository {
    async fn insert(&self, store: &NewStore) -> RatingsResult<Store> {
        let row = sqlx::query_as::<_, StoreRow>(
            r#"
            INSERT INTO stores (name, email, address, owner_id)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, address, owner_id, created_at, updated_at
            "#,
        )
        .bind(&store.name)
        .bind(&store.email)
        .bind(&store.address)
        .bind(store.owner_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                RatingsError::StoreEmailTaken
            } else {
                RatingsError::Database(e)
            }
        })?;

        Ok(row.into_store())
    }

    async fn exists_by_email(&self, email: &str) -> RatingsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM stores WHERE email = $1)",
        )
        .bind(email)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn exists(&self, store_id: i64) -> RatingsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM stores WHERE id = $1)",
        )
        .bind(store_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn owner_exists(&self, user_id: i64) -> RatingsResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE id = $1 AND role = 'owner')",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn list_with_average(&self, filter: &StoreFilter) -> RatingsResult<Vec<StoreSummary>> {
        let mut query = QueryBuilder::<Postgres>::new(
            r#"
            SELECT s.id, s.name, s.email, s.address,
                   ROUND(AVG(r.rating), 1)::float8 AS average_rating
            FROM stores s
            LEFT JOIN ratings r ON r.store_id = s.id
            WHERE 1=1
            "#,
        );

        if let Some(name) = &filter.name {
            query.push(" AND s.name ILIKE ");
            query.push_bind(format!("%{}%", name));
        }
        if let Some(email) = &filter.email {
            query.push(" AND s.email ILIKE ");
            query.push_bind(format!("%{}%", email));
        }
        if let Some(address) = &filter.address {
            query.push(" AND s.address ILIKE ");
            query.push_bind(format!("%{}%", address));
        }

        query.push(" GROUP BY s.id ORDER BY s.name ASC");

        let rows = query
            .build_query_as::<StoreSummaryRow>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn list_for_user(&self, user_id: i64) -> RatingsResult<Vec<StoreSummary>> {
        let rows = sqlx::query_as::<_, StoreWithUserRatingRow>(
            r#"
            SELECT s.id, s.name, s.email, s.address,
                   ROUND(AVG(r.rating), 1)::float8 AS average_rating,
                   (
                       SELECT rating
                       FROM ratings
                       WHERE store_id = s.id AND user_id = $1
                   ) AS user_rating
            FROM stores s
            LEFT JOIN ratings r ON r.store_id = s.id
            GROUP BY s.id
            ORDER BY s.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|r| r.into_summary()).collect())
    }

    async fn find_by_owner(&self, owner_id: i64) -> RatingsResult<Option<OwnerStore>> {
        let row = sqlx::query_as::<_, OwnerStoreRow>(
            "SELECT id, name FROM stores WHERE owner_id = $1 ORDER BY id",
        )
        .bind(owner_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(|r| OwnerStore {
            id: r.id,
            name: r.name,
        }))
    }
}

// ============================================================================
// Rating Repository Implementation
// ============================================================================

impl RatingRepository for PgStoreRepository {
    async fn upsert(
        &self,
        user_id: i64,
        store_id: i64,
        rating: RatingValue,
    ) -> RatingsResult<RatingOutcome> {
        // One statement, decided by the primary key; xmax = 0 only for
        // freshly inserted rows, so it doubles as the created/updated flag.
        let inserted = sqlx::query_scalar::<_, bool>(
            r#"
            INSERT INTO ratings (user_id, store_id, rating)
            VALUES ($1, $2, $3)
            ON CONFLICT (user_id, store_id)
            DO UPDATE SET rating = EXCLUDED.rating, updated_at = NOW()
            RETURNING (xmax = 0) AS inserted
            "#,
        )
        .bind(user_id)
        .bind(store_id)
        .bind(rating.get())
        .fetch_one(&self.pool)
        .await?;

        Ok(if inserted {
            RatingOutcome::Created
        } else {
            RatingOutcome::Updated
        })
    }

    async fn update_existing(
        &self,
        user_id: i64,
        store_id: i64,
        rating: RatingValue,
    ) -> RatingsResult<bool> {
        let updated = sqlx::query(
            r#"
            UPDATE ratings
            SET rating = $3, updated_at = NOW()
            WHERE user_id = $1 AND store_id = $2
            "#,
        )
        .bind(user_id)
        .bind(store_id)
        .bind(rating.get())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(updated > 0)
    }

    async fn ratings_for_store(&self, store_id: i64) -> RatingsResult<Vec<StoreRating>> {
        let rows = sqlx::query_as::<_, StoreRatingRow>(
            r#"
            SELECT r.rating, u.id AS user_id, u.name AS user_name
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            WHERE r.store_id = $1
            ORDER BY r.updated_at DESC
            "#,
        )
        .bind(store_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| StoreRating {
                rating: r.rating,
                user_id: r.user_id,
                user_name: r.user_name,
            })
            .collect())
    }

    async fn totals(&self) -> RatingsResult<DashboardTotals> {
        let total_users = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let total_stores = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM stores")
            .fetch_one(&self.pool)
            .await?;
        let total_ratings = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM ratings")
            .fetch_one(&self.pool)
            .await?;

        Ok(DashboardTotals {
            total_users,
            total_stores,
            total_ratings,
        })
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct StoreRow {
    id: i64,
    name: String,
    email: String,
    address: String,
    owner_id: Option<i64>,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
}

impl StoreRow {
    fn into_store(self) -> Store {
        Store {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            owner_id: self.owner_id,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StoreSummaryRow {
    id: i64,
    name: String,
    email: String,
    address: String,
    average_rating: Option<f64>,
}

impl StoreSummaryRow {
    fn into_summary(self) -> StoreSummary {
        StoreSummary {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            average_rating: self.average_rating,
            user_rating: None,
        }
    }
}

#[derive(sqlx::FromRow)]
struct StoreWithUserRatingRow {
    id: i64,
    name: String,
    email: String,
    address: String,
    average_rating: Option<f64>,
    user_rating: Option<i32>,
}

impl StoreWithUserRatingRow {
    fn into_summary(self) -> StoreSummary {
        StoreSummary {
            id: self.id,
            name: self.name,
            email: self.email,
            address: self.address,
            average_rating: self.average_rating,
            user_rating: self.user_rating,
        }
    }
}

#[derive(sqlx::FromRow)]
struct OwnerStoreRow {
    id: i64,
    name: String,
}

#[derive(sqlx::FromRow)]
struct StoreRatingRow {
    rating: i32,
    user_id: i64,
    user_name: String,
}
