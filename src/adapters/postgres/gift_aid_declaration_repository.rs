//! PostgreSQL implementation of GiftAidDeclarationRepository (insert only).

use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::domain::foundation::DomainError;
use crate::domain::giving::GiftAidDeclaration;
use crate::ports::GiftAidDeclarationRepository;

pub struct PostgresGiftAidDeclarationRepository {
    pool: PgPool,
}

impl PostgresGiftAidDeclarationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GiftAidDeclarationRepository for PostgresGiftAidDeclarationRepository {
    async fn append(&self, declaration: &GiftAidDeclaration) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO gift_aid_declarations (id, user_id, accepted_at, address_snapshot, wording_version)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(declaration.id.as_uuid())
        .bind(declaration.user_id.as_str())
        .bind(declaration.accepted_at.as_datetime())
        .bind(Json(&declaration.address_snapshot))
        .bind(&declaration.wording_version)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database("insert declaration", e))?;

        Ok(())
    }
}
