//! Contract interface schemas.
//!
//! The two deployed contracts are described by fixed schemas: a name and the
//! method surface the client is allowed to dispatch. The schema is otherwise
//! opaque — argument encoding is the ledger layer's concern.

/// Interface schema of a deployed contract.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ContractSchema {
    pub name: &'static str,
    pub methods: &'static [&'static str],
}

impl ContractSchema {
    pub fn has_method(&self, method: &str) -> bool {
        self.methods.contains(&method)
    }
}

/// The governance contract: proposal storage, voting, execution, treasury.
pub const GOVERNANCE_SCHEMA: ContractSchema = ContractSchema {
    name: "governance",
    methods: &[
        "numProposals",
        "proposals",
        "createProposal",
        "voteOnProposal",
        "executeProposal",
    ],
};

/// The membership-token contract: gates voting and proposal eligibility.
pub const MEMBERSHIP_TOKEN_SCHEMA: ContractSchema = ContractSchema {
    name: "membership-token",
    methods: &["balanceOf"],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schemas_expose_expected_methods() {
        assert!(GOVERNANCE_SCHEMA.has_method("createProposal"));
        assert!(GOVERNANCE_SCHEMA.has_method("proposals"));
        assert!(!GOVERNANCE_SCHEMA.has_method("balanceOf"));
        assert!(MEMBERSHIP_TOKEN_SCHEMA.has_method("balanceOf"));
    }
}
