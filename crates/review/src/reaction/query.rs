use std::str::FromStr;

use jointravel_db::table::ReviewReaction;
use jointravel_shared::reaction::{ReactionStatus, ReactionType};
use sea_query::{Expr, ExprTrait, Func, Query, SqliteQueryBuilder};
use sea_query_sqlx::SqlxBinder;
use sqlx::SqliteConnection;
use validator::Validate;

#[derive(Validate)]
struct StatusInput<'a> {
    #[validate(length(min = 1, max = 64))]
    review_id: &'a str,
    #[validate(length(min = 1, max = 64))]
    viewer: Option<&'a str>,
}

impl super::Command {
    /// Counts for `review_id`, with `viewer`'s own reaction when one is given.
    pub async fn status(
        &self,
        review_id: impl Into<String>,
        viewer: Option<&str>,
    ) -> jointravel_shared::Result<ReactionStatus> {
        let review_id = review_id.into();
        StatusInput {
            review_id: &review_id,
            viewer,
        }
        .validate()?;

        let mut conn = self.read_db.acquire().await?;

        load_status(&mut conn, &review_id, viewer).await
    }
}

pub(super) async fn load_status(
    conn: &mut SqliteConnection,
    review_id: &str,
    viewer: Option<&str>,
) -> jointravel_shared::Result<ReactionStatus> {
    let statement = Query::select()
        .column(ReviewReaction::ReactionType)
        .expr(Func::count(Expr::col(ReviewReaction::UserId)))
        .from(ReviewReaction::Table)
        .and_where(Expr::col(ReviewReaction::ReviewId).eq(review_id))
        .group_by_col(ReviewReaction::ReactionType)
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let rows: Vec<(String, i64)> = sqlx::query_as_with(&sql, values)
        .fetch_all(&mut *conn)
        .await?;

    let mut status = ReactionStatus::default();
    for (reaction_type, count) in rows {
        let count = u32::try_from(count).unwrap_or(u32::MAX);
        match ReactionType::from_str(&reaction_type)? {
            ReactionType::Like => status.like_count = count,
            ReactionType::Dislike => status.dislike_count = count,
        }
    }

    if let Some(user_id) = viewer {
        status.reaction_type = find_reaction(conn, review_id, user_id).await?;
    }

    Ok(status)
}

pub(super) async fn find_reaction(
    conn: &mut SqliteConnection,
    review_id: &str,
    user_id: &str,
) -> jointravel_shared::Result<Option<ReactionType>> {
    let statement = Query::select()
        .column(ReviewReaction::ReactionType)
        .from(ReviewReaction::Table)
        .and_where(Expr::col(ReviewReaction::ReviewId).eq(review_id))
        .and_where(Expr::col(ReviewReaction::UserId).eq(user_id))
        .to_owned();

    let (sql, values) = statement.build_sqlx(SqliteQueryBuilder);
    let row: Option<(String,)> = sqlx::query_as_with(&sql, values)
        .fetch_optional(&mut *conn)
        .await?;

    match row {
        Some((reaction_type,)) => Ok(Some(ReactionType::from_str(&reaction_type)?)),
        None => Ok(None),
    }
}
