use regex::Regex;
use std::sync::LazyLock;

/// North American and international phone numbers. The number (group 1) must
/// not touch a digit or hyphen on either side; the boundary characters are
/// consumed by the surrounding groups.
static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?:^|[^\d-])((?:\+?\d{1,3}[-.\s*]?)?(?:\(?\d{3}\)?[-.\s*]?)?\d{3}[-.\s*]?\d{4}|(?:\(\+?\d{2}\)|\+?\d{2})\s*\d{2}\s*\d{3}\s*\d{4})(?:[^\d-]|$)",
    )
    .expect("phone pattern is valid")
});

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)[a-z0-9!#$%&'*+/=?^_`{|.}~-]+@(?:[a-z0-9](?:[a-z0-9-]*[a-z0-9])?\.)+[a-z0-9](?:[a-z0-9-]*[a-z0-9])?",
    )
    .expect("email pattern is valid")
});

/// First phone number on the line.
pub fn find_phone(line: &str) -> Option<&str> {
    PHONE
        .captures(line)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// First email address on the line.
pub fn find_email(line: &str) -> Option<&str> {
    EMAIL.find(line).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_phone_formats() {
        assert_eq!(find_phone("Phone: 555-123-4567"), Some("555-123-4567"));
        assert_eq!(find_phone("(555) 123-4567"), Some("(555) 123-4567"));
        assert_eq!(find_phone("+1 415.555.0199 (mobile)"), Some("+1 415.555.0199"));
        assert_eq!(find_phone("Tel +33 12 345 6789"), Some("+33 12 345 6789"));
    }

    #[test]
    fn test_find_phone_first_match_only() {
        assert_eq!(
            find_phone("555-123-4567 or 555-987-6543"),
            Some("555-123-4567")
        );
    }

    #[test]
    fn test_find_phone_rejects_longer_digit_runs() {
        assert_eq!(find_phone("Order 12345678901234"), None);
        assert_eq!(find_phone("CEO"), None);
        assert_eq!(find_phone(""), None);
    }

    #[test]
    fn test_find_email() {
        assert_eq!(find_email("john@example.com"), Some("john@example.com"));
        assert_eq!(
            find_email("Email: Jane.Doe+press@Acme-Robotics.co.uk today"),
            Some("Jane.Doe+press@Acme-Robotics.co.uk")
        );
        assert_eq!(find_email("a@b.c and x@y.z"), Some("a@b.c"));
        assert_eq!(find_email("no address here"), None);
        assert_eq!(find_email("@acme"), None);
    }
}
