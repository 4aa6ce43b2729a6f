/// A single claim granted to the entity being created.
#[derive(serde::Serialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "PascalCase")]
pub struct Permission {
    pub user_id: String,
    pub claim_type: String,
    pub claim_value: String,
}

impl Permission {
    /// The platform expects type and value to carry the same claim name.
    pub fn claim(user_id: &str, claim: &str) -> Self {
        Self {
            user_id: user_id.to_string(),
            claim_type: claim.to_string(),
            claim_value: claim.to_string(),
        }
    }

    pub(crate) fn list(claims: &[(&str, &str)]) -> Vec<Self> {
        claims
            .iter()
            .map(|(user_id, claim)| Self::claim(user_id, claim))
            .collect()
    }
}
