use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::Row;
use uuid::Uuid;

use crate::domain::user::models::Role;
use crate::domain::user::models::RoleId;
use crate::domain::user::models::RoleName;
use crate::domain::user::ports::RoleRepository;
use crate::user::errors::UserError;

pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    async fn find_or_create(&self, name: RoleName) -> Result<Role, UserError> {
        // Single-statement upsert: concurrent callers resolving the same
        // missing name race inside Postgres and all land on one row. The
        // no-op DO UPDATE makes RETURNING yield the row in both cases.
        let row = sqlx::query(
            r#"
            INSERT INTO roles (id, name)
            VALUES ($1, $2)
            ON CONFLICT (name)
            DO UPDATE SET name = EXCLUDED.name
            RETURNING id
            "#,
        )
        .bind(RoleId::new().0)
        .bind(name.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        let id: Uuid = row
            .try_get("id")
            .map_err(|e| UserError::DatabaseError(e.to_string()))?;

        tracing::debug!(role = %name, role_id = %id, "Role resolved");

        Ok(Role {
            id: RoleId(id),
            name,
        })
    }
}
