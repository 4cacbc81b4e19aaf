//! SeaORM adapter for the member roster.

use async_trait::async_trait;
use sea_orm::sea_query::OnConflict;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder, Set};
use time::OffsetDateTime;

use crate::domain::{Member, PlayerId};
use crate::entities::members;
use crate::errors::domain::DomainError;
use crate::repos::members::MemberRepo;

#[derive(Debug, Clone)]
pub struct MemberRepoSea {
    db: DatabaseConnection,
}

impl MemberRepoSea {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Insert or rename a member. The roster itself is managed elsewhere;
    /// this exists for seeding and tests.
    pub async fn upsert_member(&self, member: &Member) -> Result<(), DomainError> {
        let row = members::ActiveModel {
            id: Set(member.id.as_str().to_string()),
            display_name: Set(member.display_name.clone()),
            created_at: Set(OffsetDateTime::now_utc()),
        };
        members::Entity::insert(row)
            .on_conflict(
                OnConflict::column(members::Column::Id)
                    .update_column(members::Column::DisplayName)
                    .to_owned(),
            )
            .exec_without_returning(&self.db)
            .await?;
        Ok(())
    }
}

impl From<members::Model> for Member {
    fn from(row: members::Model) -> Self {
        Member::new(row.id, row.display_name)
    }
}

#[async_trait]
impl MemberRepo for MemberRepoSea {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        let rows = members::Entity::find()
            .order_by_asc(members::Column::DisplayName)
            .all(&self.db)
            .await?;
        Ok(rows.into_iter().map(Member::from).collect())
    }

    async fn find_member(&self, id: &PlayerId) -> Result<Option<Member>, DomainError> {
        let row = members::Entity::find_by_id(id.as_str().to_string())
            .one(&self.db)
            .await?;
        Ok(row.map(Member::from))
    }
}
