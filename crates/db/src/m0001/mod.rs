mod review_reaction;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "jointravel",
    "m0001",
    vec_box![],
    vec_box![review_reaction::CreateTable, review_reaction::CreateIdx1]
);
