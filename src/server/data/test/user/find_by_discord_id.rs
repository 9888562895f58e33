use super::*;
use crate::server::{error::AppError, model::user::User};
use test_utils::factory;

/// Tests finding a registered member.
///
/// Expected: Ok(Some(User))
#[tokio::test]
async fn finds_registered_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::user::UserFactory::new(db)
        .discord_id("555")
        .name("Bob")
        .build()
        .await?;

    let repo = UserRepository::new(db);
    let user = repo.find_by_discord_id(555).await.unwrap();

    assert_eq!(user.map(|u| u.name), Some("Bob".to_string()));

    Ok(())
}

/// Tests looking up an unknown member.
///
/// Expected: Ok(None)
#[tokio::test]
async fn returns_none_for_unknown_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo.find_by_discord_id(404).await.unwrap();

    assert!(user.is_none());

    Ok(())
}

/// Tests reading a row whose Discord ID is not numeric.
///
/// Verifies that the domain conversion rejects the row instead of inventing an ID.
///
/// Expected: Err(AppError::InternalErr)
#[tokio::test]
async fn rejects_malformed_stored_id() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let row = factory::create_user_with_id(db, "not-a-snowflake").await?;

    let result = User::from_entity(row);

    assert!(matches!(result, Err(AppError::InternalErr(_))));

    Ok(())
}
