//! Mail domain models.

use serde::{Deserialize, Serialize};

/// An email hosting domain grouping mailbox accounts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    pub id: String,
    pub name: String,
}

impl Domain {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }

    /// Upper-cased first letter of the domain name, used as its avatar.
    pub fn initial(&self) -> char {
        self.name
            .chars()
            .next()
            .map(|c| c.to_ascii_uppercase())
            .unwrap_or('?')
    }
}

/// A mailbox owned by exactly one domain.
///
/// The password is write-only and never part of this model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailAccount {
    pub id: String,
    pub domain_id: String,
    pub email: String,
    /// Quota in megabytes, always > 0.
    pub storage: u64,
    pub is_blocked: bool,
}

/// Validated input for creating an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAccount {
    pub email: String,
    pub password: String,
    pub storage: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn email_account_uses_camel_case_on_the_wire() {
        let account = EmailAccount {
            id: "2".into(),
            domain_id: "1".into(),
            email: "contato@empresa.com".into(),
            storage: 5120,
            is_blocked: true,
        };
        let value = serde_json::to_value(&account).unwrap();
        assert_eq!(
            value,
            json!({
                "id": "2",
                "domainId": "1",
                "email": "contato@empresa.com",
                "storage": 5120,
                "isBlocked": true,
            })
        );
    }

    #[test]
    fn domain_initial_is_uppercase() {
        assert_eq!(Domain::new("1", "empresa.com").initial(), 'E');
        assert_eq!(Domain::new("9", "").initial(), '?');
    }
}
