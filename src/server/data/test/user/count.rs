use super::*;
use test_utils::factory;

/// Tests counting an empty user table.
///
/// Expected: Ok(0)
#[tokio::test]
async fn counts_zero_without_users() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);

    assert_eq!(repo.count().await?, 0);

    Ok(())
}

/// Tests counting registered users.
///
/// Verifies that every inserted row is counted.
///
/// Expected: Ok(3)
#[tokio::test]
async fn counts_every_registered_user() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    factory::create_user(db).await?;
    factory::create_user(db).await?;
    factory::create_user(db).await?;

    let repo = UserRepository::new(db);

    assert_eq!(repo.count().await?, 3);

    Ok(())
}
