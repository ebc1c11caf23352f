mod category;
mod post;
mod post_category;
mod post_meta;

use sqlx_migrator::vec_box;

pub struct Migration;

sqlx_migrator::sqlite_migration!(
    Migration,
    "signup",
    "m0_1",
    vec_box![],
    vec_box![
        post::CreateTable,
        post::CreateSlugIdx,
        post_meta::CreateTable,
        category::CreateTable,
        category::CreateParentIdx,
        post_category::CreateTable,
    ]
);
