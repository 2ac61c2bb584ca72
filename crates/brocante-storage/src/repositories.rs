// Repository layer for database operations

use anyhow::Result;
use brocante_core::{OfferFilter, OfferQuery, PriceSort};
use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::models::*;

const OFFER_WITH_OWNER_COLUMNS: &str = "o.id, o.title, o.description, o.price, \
     o.brand, o.size, o.condition, o.color, o.city, o.image_url, o.owner_id, o.created_at, \
     a.username AS owner_username, a.phone AS owner_phone, a.avatar_url AS owner_avatar_url";

#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

impl Database {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create database connection from URL
    pub async fn from_url(database_url: &str) -> Result<Self> {
        let pool = PgPool::connect(database_url).await?;
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Apply pending migrations
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    // ============================================
    // Accounts
    // ============================================

    pub async fn create_account(&self, input: CreateAccount) -> Result<AccountRow> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            INSERT INTO accounts (email, username, phone, token, hash, salt)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, email, username, phone, avatar_url, token, hash, salt, created_at, updated_at
            "#,
        )
        .bind(&input.email)
        .bind(&input.username)
        .bind(&input.phone)
        .bind(&input.token)
        .bind(&input.hash)
        .bind(&input.salt)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    /// Exact, case-sensitive email match
    pub async fn get_account_by_email(&self, email: &str) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, phone, avatar_url, token, hash, salt, created_at, updated_at
            FROM accounts
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Exact bearer-token match; the auth gate's lookup
    pub async fn get_account_by_token(&self, token: &str) -> Result<Option<AccountRow>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, username, phone, avatar_url, token, hash, salt, created_at, updated_at
            FROM accounts
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    // ============================================
    // Offers
    // ============================================

    pub async fn create_offer(&self, input: CreateOffer) -> Result<OfferRow> {
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            INSERT INTO offers (id, title, description, price, brand, size, condition, color, city, image_url, owner_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, title, description, price, brand, size, condition, color, city, image_url, owner_id, created_at, updated_at
            "#,
        )
        .bind(input.id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .bind(&input.details.brand)
        .bind(&input.details.size)
        .bind(&input.details.condition)
        .bind(&input.details.color)
        .bind(&input.details.city)
        .bind(&input.image_url)
        .bind(input.owner_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_offer(&self, id: Uuid) -> Result<Option<OfferRow>> {
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            SELECT id, title, description, price, brand, size, condition, color, city, image_url, owner_id, created_at, updated_at
            FROM offers
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn get_offer_with_owner(&self, id: Uuid) -> Result<Option<OfferWithOwnerRow>> {
        let sql = format!(
            "SELECT {OFFER_WITH_OWNER_COLUMNS} FROM offers o JOIN accounts a ON a.id = o.owner_id WHERE o.id = $1"
        );
        let row = sqlx::query_as::<_, OfferWithOwnerRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    /// Partial update, restricted to the offer's owner.
    /// A non-owned or unknown id yields `None`.
    pub async fn update_offer(
        &self,
        id: Uuid,
        owner_id: Uuid,
        input: UpdateOffer,
    ) -> Result<Option<OfferRow>> {
        let row = sqlx::query_as::<_, OfferRow>(
            r#"
            UPDATE offers
            SET
                title = COALESCE($3, title),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                updated_at = NOW()
            WHERE id = $1 AND owner_id = $2
            RETURNING id, title, description, price, brand, size, condition, color, city, image_url, owner_id, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(owner_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(input.price)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    /// Delete restricted to the offer's owner
    pub async fn delete_offer(&self, id: Uuid, owner_id: Uuid) -> Result<bool> {
        let result = sqlx::query("DELETE FROM offers WHERE id = $1 AND owner_id = $2")
            .bind(id)
            .bind(owner_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Total match count for a filter, before any limit/offset
    pub async fn count_offers(&self, filter: &OfferFilter) -> Result<i64> {
        let mut qb = build_count_query(filter);
        let count: i64 = qb.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// One page of filtered, sorted offers with their owners
    pub async fn search_offers(&self, query: &OfferQuery) -> Result<Vec<OfferWithOwnerRow>> {
        let mut qb = build_search_query(query);
        let rows = qb
            .build_query_as::<OfferWithOwnerRow>()
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }
}

fn build_count_query(filter: &OfferFilter) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM offers o");
    push_filter(&mut qb, filter);
    qb
}

fn build_search_query(query: &OfferQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!(
        "SELECT {OFFER_WITH_OWNER_COLUMNS} FROM offers o JOIN accounts a ON a.id = o.owner_id"
    ));
    push_filter(&mut qb, &query.filter);

    // Stable default ordering keeps unsorted pages deterministic
    match query.sort {
        Some(PriceSort::Ascending) => qb.push(" ORDER BY o.price ASC, o.created_at ASC, o.id ASC"),
        Some(PriceSort::Descending) => {
            qb.push(" ORDER BY o.price DESC, o.created_at ASC, o.id ASC")
        }
        None => qb.push(" ORDER BY o.created_at ASC, o.id ASC"),
    };

    if let Some(limit) = query.page.limit {
        qb.push(" LIMIT ");
        qb.push_bind(limit);
        qb.push(" OFFSET ");
        qb.push_bind(query.page.offset);
    }

    qb
}

fn push_filter(qb: &mut QueryBuilder<'static, Postgres>, filter: &OfferFilter) {
    let mut sep = " WHERE ";

    if let Some(title) = &filter.title {
        qb.push(sep);
        sep = " AND ";
        qb.push("o.title ILIKE ");
        qb.push_bind(format!("%{}%", escape_like(title)));
        qb.push(" ESCAPE '\\'");
    }

    if let Some(min) = filter.price_min {
        qb.push(sep);
        sep = " AND ";
        qb.push("o.price >= ");
        qb.push_bind(min);
    }

    if let Some(max) = filter.price_max {
        qb.push(sep);
        qb.push("o.price <= ");
        qb.push_bind(max);
    }
}

/// Escape LIKE metacharacters so user input matches literally
fn escape_like(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}
