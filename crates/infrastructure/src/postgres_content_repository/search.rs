use sqlx::{Postgres, QueryBuilder};

use super::*;

impl PostgresContentRepository {
    pub(super) async fn search_impl(
        &self,
        filter: &ContentFilter,
        page: PageRequest,
    ) -> AppResult<Page<Content>> {
        let mut count: QueryBuilder<'_, Postgres> =
            QueryBuilder::new("SELECT COUNT(*) FROM contents");
        push_filter(&mut count, filter);

        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to count contents: {error}")))?;

        let mut select: QueryBuilder<'_, Postgres> =
            QueryBuilder::new(format!("SELECT {CONTENT_COLUMNS} FROM contents"));
        push_filter(&mut select, filter);
        select.push(" ORDER BY title, id LIMIT ");
        select.push_bind(page.limit());
        select.push(" OFFSET ");
        select.push_bind(page.offset());

        let rows = select
            .build_query_as::<ContentRow>()
            .fetch_all(&self.pool)
            .await
            .map_err(|error| AppError::Internal(format!("failed to search contents: {error}")))?;

        let items = self.assemble(rows).await?;
        Ok(Page::new(items, u64::try_from(total).unwrap_or_default(), page))
    }
}

fn push_filter(builder: &mut QueryBuilder<'_, Postgres>, filter: &ContentFilter) {
    let mut separator = " WHERE ";

    if let Some(fragment) = filter.title_fragment() {
        builder.push(separator);
        builder.push("title ILIKE ");
        builder.push_bind(format!("%{}%", escape_like(fragment)));
        builder.push(" ESCAPE '\\'");
        separator = " AND ";
    }
    if let Some(genre) = filter.genre {
        builder.push(separator);
        builder.push("genre = ");
        builder.push_bind(genre.as_str());
        separator = " AND ";
    }
    if let Some(age_restriction) = filter.age_restriction {
        builder.push(separator);
        builder.push("age_restriction = ");
        builder.push_bind(age_restriction.as_str());
        separator = " AND ";
    }
    if let Some(release_year) = filter.release_year {
        builder.push(separator);
        builder.push("release_year = ");
        builder.push_bind(release_year);
    }
}

/// Escapes `LIKE` wildcards so the fragment matches literally.
fn escape_like(fragment: &str) -> String {
    let mut escaped = String::with_capacity(fragment.len());
    for character in fragment.chars() {
        if matches!(character, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(character);
    }
    escaped
}
