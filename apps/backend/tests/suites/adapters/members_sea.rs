use kniffel::adapters::MemberRepoSea;
use kniffel::domain::{Member, PlayerId};
use kniffel::repos::MemberRepo;
use kniffel::AppError;

use crate::support::{fresh_member, sqlite_with_members};

#[tokio::test]
async fn list_is_sorted_by_display_name() -> Result<(), AppError> {
    let zed = Member::new("m-z", "Zed");
    let anna = Member::new("m-a", "Anna");
    let db = sqlite_with_members(&[zed.clone(), anna.clone()]).await?;
    let repo = MemberRepoSea::new(db);

    assert_eq!(repo.list_members().await?, vec![anna, zed]);
    Ok(())
}

#[tokio::test]
async fn upsert_renames_existing_member() -> Result<(), AppError> {
    let member = fresh_member("Dora");
    let db = sqlite_with_members(std::slice::from_ref(&member)).await?;
    let repo = MemberRepoSea::new(db);

    let renamed = Member::new(member.id.clone(), "Dora the Second");
    repo.upsert_member(&renamed).await?;

    assert_eq!(repo.find_member(&member.id).await?, Some(renamed));
    assert_eq!(repo.list_members().await?.len(), 1);
    Ok(())
}

#[tokio::test]
async fn find_unknown_member_is_none() -> Result<(), AppError> {
    let db = sqlite_with_members(&[]).await?;
    let repo = MemberRepoSea::new(db);
    assert_eq!(repo.find_member(&PlayerId::from("m-ghost")).await?, None);
    Ok(())
}
