use crate::artifacts::branch::branch_name::SymRefName;
use crate::artifacts::objects::object_id::ObjectId;
use derive_new::new;

/// A ref name together with the commit it resolved to.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommitReference {
    name: SymRefName,
    oid: ObjectId,
}

impl CommitReference {
    pub fn name(&self) -> &SymRefName {
        &self.name
    }

    pub fn oid(&self) -> &ObjectId {
        &self.oid
    }
}

impl std::fmt::Display for CommitReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.oid, self.name)
    }
}
