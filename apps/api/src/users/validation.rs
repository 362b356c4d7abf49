//! Input normalization for user records.

use crate::errors::AppError;

/// Trims and lower-cases an email, then checks it has the shape `local@domain.tld`.
pub fn normalize_email(raw: &str) -> Result<String, AppError> {
    let email = raw.trim().to_lowercase();
    if is_valid_email(&email) {
        Ok(email)
    } else {
        Err(AppError::Validation(format!("Invalid email address: '{}'", raw.trim())))
    }
}

fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2
        && labels.iter().all(|l| !l.is_empty())
        && labels.last().is_some_and(|tld| tld.len() >= 2)
}

/// Blank names are treated as absent.
pub fn clean_name(name: Option<&str>) -> Option<String> {
    name.map(str::trim)
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_trimmed_and_lowercased() {
        assert_eq!(
            normalize_email("  Jane.Doe@Example.COM ").unwrap(),
            "jane.doe@example.com"
        );
    }

    #[test]
    fn test_valid_emails() {
        for email in ["a@b.co", "first.last+tag@mail.example.org", "x_y@sub.domain.io"] {
            assert!(normalize_email(email).is_ok(), "{email} should be valid");
        }
    }

    #[test]
    fn test_invalid_emails() {
        for email in [
            "",
            "plain",
            "@example.com",
            "jane@",
            "jane@example",
            "jane@example.c",
            "jane@@example.com",
            "jane@exa mple.com",
            "jane@.com",
            "jane@example..com",
        ] {
            assert!(
                matches!(normalize_email(email), Err(AppError::Validation(_))),
                "{email:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_clean_name() {
        assert_eq!(clean_name(Some("  Ada ")).as_deref(), Some("Ada"));
        assert_eq!(clean_name(Some("   ")), None);
        assert_eq!(clean_name(None), None);
    }
}
