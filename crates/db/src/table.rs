use sea_query::Iden;

#[derive(Iden, Clone)]
pub enum ReviewReaction {
    Table,
    ReviewId,
    UserId,
    ReactionType,
    CreatedAt,
    UpdatedAt,
}
