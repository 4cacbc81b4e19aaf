//! Read-only view of the external member roster.

use async_trait::async_trait;

use crate::domain::{Member, PlayerId};
use crate::errors::domain::DomainError;

#[async_trait]
pub trait MemberRepo: Send + Sync {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError>;

    async fn find_member(&self, id: &PlayerId) -> Result<Option<Member>, DomainError>;
}
