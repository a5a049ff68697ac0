use jointravel_db::table::ReviewReaction;
use jointravel_shared::reaction::{ReactionStatus, ReactionType};
use sea_query::{Expr, ExprTrait, OnConflict, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use time::OffsetDateTime;
use validator::Validate;

use super::query::{find_reaction, load_status};

#[derive(Validate, Clone, Debug)]
pub struct ToggleInput {
    #[validate(length(min = 1, max = 64))]
    pub review_id: String,
    #[validate(length(min = 1, max = 64))]
    pub user_id: String,
    pub reaction_type: ReactionType,
}

impl super::Command {
    /// Same reaction again removes it, the other one replaces it, otherwise it
    /// is added. Returns the committed status for the reacting user.
    pub async fn toggle(&self, input: ToggleInput) -> jointravel_shared::Result<ReactionStatus> {
        input.validate()?;

        let mut tx = self.write_db.begin().await?;
        let current = find_reaction(&mut tx, &input.review_id, &input.user_id).await?;
        let now = OffsetDateTime::now_utc().unix_timestamp();

        let (sql, values) = match current {
            Some(reaction_type) if reaction_type == input.reaction_type => Query::delete()
                .from_table(ReviewReaction::Table)
                .and_where(Expr::col(ReviewReaction::ReviewId).eq(&input.review_id))
                .and_where(Expr::col(ReviewReaction::UserId).eq(&input.user_id))
                .to_owned()
                .build_sqlx(SqliteQueryBuilder),
            Some(_) => Query::update()
                .table(ReviewReaction::Table)
                .value(ReviewReaction::ReactionType, input.reaction_type.as_ref())
                .value(ReviewReaction::UpdatedAt, now)
                .and_where(Expr::col(ReviewReaction::ReviewId).eq(&input.review_id))
                .and_where(Expr::col(ReviewReaction::UserId).eq(&input.user_id))
                .to_owned()
                .build_sqlx(SqliteQueryBuilder),
            None => Query::insert()
                .into_table(ReviewReaction::Table)
                .columns([
                    ReviewReaction::ReviewId,
                    ReviewReaction::UserId,
                    ReviewReaction::ReactionType,
                    ReviewReaction::CreatedAt,
                    ReviewReaction::UpdatedAt,
                ])
                .values_panic([
                    input.review_id.to_owned().into(),
                    input.user_id.to_owned().into(),
                    input.reaction_type.as_ref().into(),
                    now.into(),
                    now.into(),
                ])
                .on_conflict(
                    OnConflict::columns([ReviewReaction::ReviewId, ReviewReaction::UserId])
                        .update_columns([ReviewReaction::ReactionType, ReviewReaction::UpdatedAt])
                        .to_owned(),
                )
                .to_owned()
                .build_sqlx(SqliteQueryBuilder),
        };

        sqlx::query_with(&sql, values).execute(&mut *tx).await?;

        let status = load_status(&mut tx, &input.review_id, Some(&input.user_id)).await?;
        tx.commit().await?;

        tracing::debug!(
            review_id = %input.review_id,
            user_id = %input.user_id,
            requested = %input.reaction_type,
            previous = ?current,
            current = ?status.reaction_type,
            "reaction toggled"
        );

        Ok(status)
    }
}
