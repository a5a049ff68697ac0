use std::{path::PathBuf, str::FromStr};

use jointravel_review::{Command, ToggleInput};
use jointravel_shared::{
    State,
    reaction::{ReactionStatus, ReactionType},
};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx_migrator::{Migrate, Plan};

pub async fn setup_test_state(path: PathBuf) -> anyhow::Result<State> {
    let opts = SqliteConnectOptions::from_str(&format!("sqlite:{}", path.to_str().unwrap()))?
        .create_if_missing(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opts)
        .await?;
    let mut conn = pool.acquire().await?;
    jointravel_db::migrator::<sqlx::Sqlite>()?
        .run(&mut conn, &Plan::apply_all())
        .await?;

    Ok(State::single(pool))
}

#[allow(dead_code)]
pub async fn react(
    command: &Command,
    review_id: &str,
    user_id: &str,
    reaction_type: ReactionType,
) -> anyhow::Result<ReactionStatus> {
    Ok(command
        .toggle(ToggleInput {
            review_id: review_id.to_owned(),
            user_id: user_id.to_owned(),
            reaction_type,
        })
        .await?)
}

#[allow(dead_code)]
pub async fn react_all(
    command: &Command,
    review_id: &str,
    users: impl IntoIterator<Item = (&'static str, ReactionType)>,
) -> anyhow::Result<()> {
    for (user_id, reaction_type) in users {
        react(command, review_id, user_id, reaction_type).await?;
    }

    Ok(())
}
