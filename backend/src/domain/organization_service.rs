//! Read-only organization queries.

use crate::domain::ports::LedgerStore;
use crate::domain::{EntityRepository, Error, Organization};

/// Reads organizations and their member lists.
pub struct OrganizationService<'s, S: ?Sized> {
    repository: EntityRepository<'s, S>,
}

impl<'s, S> OrganizationService<'s, S>
where
    S: LedgerStore + ?Sized,
{
    pub fn new(repository: EntityRepository<'s, S>) -> Self {
        Self { repository }
    }

    pub fn query_organization(&self, org_id: &str) -> Result<Organization, Error> {
        self.repository.get(org_id)
    }

    /// Every organization, unfiltered, in key order.
    pub fn query_all_organizations(&self) -> Result<Vec<Organization>, Error> {
        self.repository.scan()
    }

    /// Member usernames of `org_id`, in stored order.
    pub fn query_organization_members(&self, org_id: &str) -> Result<Vec<String>, Error> {
        self.query_organization(org_id).map(|org| org.members)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::test_support::MemoryStore;
    use crate::domain::ErrorCode;
    use rstest::rstest;

    #[rstest]
    fn members_come_from_stored_document() {
        let store = MemoryStore::new();
        let repository = EntityRepository::new(&store);
        repository
            .create(&Organization {
                org_id: "OrgA".to_owned(),
                members: vec!["bob".to_owned(), "alice".to_owned()],
                ..Organization::default()
            })
            .expect("seed");
        let service = OrganizationService::new(repository);

        let members = service.query_organization_members("OrgA").expect("members");
        assert_eq!(members, ["bob", "alice"]);
    }

    #[rstest]
    fn members_of_missing_org_is_not_found() {
        let store = MemoryStore::new();
        let service = OrganizationService::new(EntityRepository::new(&store));
        let error = service.query_organization_members("OrgX").expect_err("missing");
        assert_eq!(error.code(), ErrorCode::NotFound);
        assert_eq!(error.message(), "organization OrgX not found");
    }
}
