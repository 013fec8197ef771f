//! Route path patterns.

pub const POST_LOGIN: &str = "/login";
pub const GET_DOMAINS: &str = "/domains";
pub const DOMAIN_EMAILS: &str = "/domains/{id}/emails";
pub const DOMAIN_EMAIL: &str = "/domains/{id}/emails/{email_id}";
pub const DOMAIN_EMAIL_PASSWORD: &str = "/domains/{id}/emails/{email_id}/password";

/// Concrete `/domains/{id}/emails` path.
pub fn domain_emails(domain_id: &str) -> String {
    format!("/domains/{domain_id}/emails")
}

/// Concrete `/domains/{id}/emails/{email_id}` path.
pub fn domain_email(domain_id: &str, email_id: &str) -> String {
    format!("/domains/{domain_id}/emails/{email_id}")
}

/// Concrete `/domains/{id}/emails/{email_id}/password` path.
pub fn domain_email_password(domain_id: &str, email_id: &str) -> String {
    format!("/domains/{domain_id}/emails/{email_id}/password")
}

/// Domain ids in paths are all digits.
pub fn is_domain_id(segment: &str) -> bool {
    !segment.is_empty() && segment.chars().all(|c| c.is_ascii_digit())
}

/// Account ids in paths are `[A-Za-z0-9.-]+`.
pub fn is_account_id(segment: &str) -> bool {
    !segment.is_empty()
        && segment
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_concrete_paths() {
        assert_eq!(domain_emails("1"), "/domains/1/emails");
        assert_eq!(domain_email("1", "2"), "/domains/1/emails/2");
        assert_eq!(
            domain_email_password("1", "k3j9x"),
            "/domains/1/emails/k3j9x/password"
        );
    }

    #[test]
    fn segment_patterns() {
        assert!(is_domain_id("12"));
        assert!(!is_domain_id("abc"));
        assert!(!is_domain_id(""));
        assert!(is_account_id("a1.b-2"));
        assert!(!is_account_id("a_b"));
        assert!(!is_account_id(""));
    }
}
