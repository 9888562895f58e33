use crate::server::{data::user::UserRepository, model::user::RegisterUserParam};
use sea_orm::DbErr;
use test_utils::builder::TestBuilder;

mod count;
mod find_by_discord_id;
mod upsert;
