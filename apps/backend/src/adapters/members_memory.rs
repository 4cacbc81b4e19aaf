//! In-process member roster.

use async_trait::async_trait;
use parking_lot::RwLock;

use crate::domain::{Member, PlayerId};
use crate::errors::domain::DomainError;
use crate::repos::members::MemberRepo;

#[derive(Debug, Default)]
pub struct MemberRepoMemory {
    members: RwLock<Vec<Member>>,
}

impl MemberRepoMemory {
    pub fn new(members: Vec<Member>) -> Self {
        Self {
            members: RwLock::new(members),
        }
    }

    pub fn insert(&self, member: Member) {
        let mut members = self.members.write();
        members.retain(|m| m.id != member.id);
        members.push(member);
    }

    /// Drop a member from the roster; sheets that seat them keep their id.
    pub fn remove(&self, id: &PlayerId) {
        self.members.write().retain(|m| &m.id != id);
    }
}

#[async_trait]
impl MemberRepo for MemberRepoMemory {
    async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        Ok(self.members.read().clone())
    }

    async fn find_member(&self, id: &PlayerId) -> Result<Option<Member>, DomainError> {
        Ok(self.members.read().iter().find(|m| &m.id == id).cloned())
    }
}
