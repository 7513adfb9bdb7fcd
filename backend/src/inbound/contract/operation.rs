//! Contract operation names and argument counts.

use std::fmt;

use crate::domain::Error;

/// Every function the contract exposes, by its invocation name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreatePolicy,
    QueryPolicy,
    QueryAllPolicies,
    QueryAllOrganizations,
    QueryOrganization,
    QueryOrganizationMembers,
    CreateUser,
    QueryUser,
    CreateCase,
    QueryCase,
    QueryAllCases,
    DeleteCase,
    CreateRecord,
    QueryRecord,
    QueryRecordsByCase,
    QueryRecords,
    UpdateRecordMetadata,
}

impl Operation {
    /// All operations in declaration order.
    pub const ALL: [Self; 17] = [
        Self::CreatePolicy,
        Self::QueryPolicy,
        Self::QueryAllPolicies,
        Self::QueryAllOrganizations,
        Self::QueryOrganization,
        Self::QueryOrganizationMembers,
        Self::CreateUser,
        Self::QueryUser,
        Self::CreateCase,
        Self::QueryCase,
        Self::QueryAllCases,
        Self::DeleteCase,
        Self::CreateRecord,
        Self::QueryRecord,
        Self::QueryRecordsByCase,
        Self::QueryRecords,
        Self::UpdateRecordMetadata,
    ];

    /// Name used to invoke the operation.
    pub fn name(self) -> &'static str {
        match self {
            Self::CreatePolicy => "CreatePolicy",
            Self::QueryPolicy => "QueryPolicy",
            Self::QueryAllPolicies => "QueryAllPolicies",
            Self::QueryAllOrganizations => "QueryAllOrganizations",
            Self::QueryOrganization => "QueryOrganization",
            Self::QueryOrganizationMembers => "QueryOrganizationMembers",
            Self::CreateUser => "CreateUser",
            Self::QueryUser => "QueryUser",
            Self::CreateCase => "CreateCase",
            Self::QueryCase => "QueryCase",
            Self::QueryAllCases => "QueryAllCases",
            Self::DeleteCase => "DeleteCase",
            Self::CreateRecord => "CreateRecord",
            Self::QueryRecord => "QueryRecord",
            Self::QueryRecordsByCase => "QueryRecordsByCase",
            Self::QueryRecords => "QueryRecords",
            Self::UpdateRecordMetadata => "UpdateRecordMetadata",
        }
    }

    /// Number of string arguments the operation takes.
    pub fn arity(self) -> usize {
        match self {
            Self::QueryAllPolicies | Self::QueryAllOrganizations => 0,
            Self::QueryPolicy
            | Self::QueryOrganization
            | Self::QueryOrganizationMembers
            | Self::QueryUser
            | Self::DeleteCase
            | Self::QueryRecordsByCase
            | Self::QueryRecords => 1,
            Self::QueryCase | Self::QueryAllCases | Self::QueryRecord | Self::UpdateRecordMetadata => 2,
            Self::CreatePolicy => 4,
            Self::CreateUser | Self::CreateCase => 6,
            Self::CreateRecord => 9,
        }
    }

    /// Whether the operation can change the ledger.
    pub fn writes(self) -> bool {
        matches!(
            self,
            Self::CreatePolicy
                | Self::CreateUser
                | Self::CreateCase
                | Self::DeleteCase
                | Self::CreateRecord
                | Self::UpdateRecordMetadata
        )
    }

    /// Look up an operation by its invocation name.
    pub fn parse(name: &str) -> Result<Self, Error> {
        Self::ALL
            .into_iter()
            .find(|operation| operation.name() == name)
            .ok_or_else(|| Error::invalid_input(format!("unknown function {name}")))
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
