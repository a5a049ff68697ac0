use std::sync::Arc;

use anyhow::Result;
use clap::Subcommand;
use jointravel::Config;
use jointravel_reaction::{
    ClientConfig, HttpReactionStore, ReactionController, ReactionCounts, ReactionStatus,
    ReactionStore, ReactionType, Session, SubjectId,
};

#[derive(Subcommand)]
pub enum Action {
    /// Show the counts and, when signed in, your own reaction
    Status {
        review_id: String,

        /// Bearer token (overrides config file)
        #[arg(long)]
        token: Option<String>,
    },
    /// Like a review, or take a like back
    Like {
        review_id: String,

        /// Bearer token (overrides config file)
        #[arg(long)]
        token: Option<String>,
    },
    /// Dislike a review, or take a dislike back
    Dislike {
        review_id: String,

        /// Bearer token (overrides config file)
        #[arg(long)]
        token: Option<String>,
    },
}

pub async fn run(config: &Config, action: Action) -> Result<()> {
    let (review_id, token, requested) = match action {
        Action::Status { review_id, token } => (review_id, token, None),
        Action::Like { review_id, token } => (review_id, token, Some(ReactionType::Like)),
        Action::Dislike { review_id, token } => (review_id, token, Some(ReactionType::Dislike)),
    };

    let session = Arc::new(match token.or_else(|| config.client.token.clone()) {
        Some(token) => Session::signed_in(token),
        None => Session::anonymous(),
    });
    let store = Arc::new(HttpReactionStore::new(
        ClientConfig::new(&config.client.base_url).with_timeout(config.client.timeout()),
        session.clone(),
    )?);
    let subject = SubjectId::from(review_id);

    let Some(requested) = requested else {
        let status = store.status(&subject).await?;
        return print(&status);
    };

    let controller = ReactionController::new(store, session);
    controller.mount(subject.clone(), ReactionCounts::default());

    let result = async {
        controller.refresh(&subject).await?;
        controller.toggle(&subject, requested).await
    }
    .await;

    match result {
        Ok(state) => print(&state.status()),
        Err(err) => {
            tracing::debug!(%subject, %requested, error = %err, "reaction command failed");
            anyhow::bail!("{}", err.user_message())
        }
    }
}

fn print(status: &ReactionStatus) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(status)?);

    Ok(())
}
