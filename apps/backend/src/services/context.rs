use crate::domain::{Member, PlayerId};
use crate::errors::domain::DomainError;
use crate::repos::members::MemberRepo;

/// Who is acting and the roster snapshot they see, passed into every
/// sheet operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub acting_member: PlayerId,
    pub members: Vec<Member>,
}

impl SessionContext {
    pub fn new(acting_member: impl Into<PlayerId>, members: Vec<Member>) -> Self {
        Self {
            acting_member: acting_member.into(),
            members,
        }
    }

    /// Snapshot the roster from the member collaborator.
    pub async fn load(
        acting_member: impl Into<PlayerId>,
        repo: &dyn MemberRepo,
    ) -> Result<Self, DomainError> {
        let members = repo.list_members().await?;
        Ok(Self::new(acting_member, members))
    }

    pub fn member(&self, id: &PlayerId) -> Option<&Member> {
        self.members.iter().find(|m| &m.id == id)
    }

    pub fn is_member(&self, id: &PlayerId) -> bool {
        self.member(id).is_some()
    }
}
