use super::*;

/// Tests registering a new member.
///
/// Verifies that the repository inserts a row and returns the domain model
/// with the parsed Discord ID.
///
/// Expected: Ok with the registered user
#[tokio::test]
async fn registers_new_member() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let user = repo
        .upsert(RegisterUserParam {
            discord_id: 123456789,
            name: "Alice".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(user.discord_id, 123456789);
    assert_eq!(user.name, "Alice");

    Ok(())
}

/// Tests re-registering an existing member.
///
/// Verifies that a second registration updates the display name in place
/// and keeps the original registration timestamp.
///
/// Expected: Ok with one row, new name, original timestamp
#[tokio::test]
async fn refreshes_name_and_keeps_registration_time() -> Result<(), DbErr> {
    let test = TestBuilder::new().with_user_tables().build().await.unwrap();
    let db = test.db.as_ref().unwrap();

    let repo = UserRepository::new(db);
    let first = repo
        .upsert(RegisterUserParam {
            discord_id: 123456789,
            name: "Alice".to_string(),
        })
        .await
        .unwrap();

    let second = repo
        .upsert(RegisterUserParam {
            discord_id: 123456789,
            name: "Alice Renamed".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(second.name, "Alice Renamed");
    assert_eq!(second.registered_at, first.registered_at);
    assert_eq!(repo.count().await?, 1);

    Ok(())
}
