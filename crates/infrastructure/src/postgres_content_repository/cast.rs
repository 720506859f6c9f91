use sqlx::{Postgres, Transaction};

use super::*;

impl PostgresContentRepository {
    pub(super) async fn load_cast(
        &self,
        content_ids: &[uuid::Uuid],
    ) -> AppResult<HashMap<uuid::Uuid, Vec<CastMember>>> {
        if content_ids.is_empty() {
            return Ok(HashMap::new());
        }

        let rows = sqlx::query_as::<_, CastMemberRow>(
            r#"
            SELECT id, content_id, full_name, role_name
            FROM cast_members
            WHERE content_id = ANY($1)
            ORDER BY content_id, position
            "#,
        )
        .bind(content_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load cast members: {error}")))?;

        let mut casts: HashMap<uuid::Uuid, Vec<CastMember>> = HashMap::new();
        for row in rows {
            casts.entry(row.content_id).or_default().push(row.into());
        }

        Ok(casts)
    }
}

pub(super) async fn replace_cast(
    transaction: &mut Transaction<'_, Postgres>,
    content: &Content,
) -> AppResult<()> {
    sqlx::query(
        r#"
        DELETE FROM cast_members
        WHERE content_id = $1
        "#,
    )
    .bind(content.id.as_uuid())
    .execute(&mut **transaction)
    .await
    .map_err(|error| {
        AppError::Internal(format!(
            "failed to clear cast for content '{}': {error}",
            content.id
        ))
    })?;

    for (position, member) in content.cast_members.iter().enumerate() {
        let position = i32::try_from(position).map_err(|_| {
            AppError::Validation("cast list is too long to store".to_owned())
        })?;

        sqlx::query(
            r#"
            INSERT INTO cast_members (id, content_id, full_name, role_name, position)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(member.id.as_uuid())
        .bind(content.id.as_uuid())
        .bind(member.full_name.as_str())
        .bind(member.role_name.as_str())
        .bind(position)
        .execute(&mut **transaction)
        .await
        .map_err(|error| {
            AppError::Internal(format!(
                "failed to store cast member for content '{}': {error}",
                content.id
            ))
        })?;
    }

    Ok(())
}
