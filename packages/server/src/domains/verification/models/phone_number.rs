use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // E.164: "+", non-zero country digit, 8-15 ASCII digits in total
    static ref E164_REGEX: Regex = Regex::new(r"^\+[1-9][0-9]{7,14}$").unwrap();

    // Numbers the identity provider is configured to accept without a carrier
    static ref TEST_NUMBER_PATTERNS: Vec<Regex> = vec![
        Regex::new(r"^\+1234567[0-9]{3}$").unwrap(),
        Regex::new(r"^\+[89][0-9]{9,10}$").unwrap(),
    ];
}

/// Result of validating a phone number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhoneValidation {
    pub is_valid: bool,
    pub error: Option<String>,
    pub is_test_number: bool,
    /// Input with formatting characters removed. Only set when valid.
    pub normalized: Option<String>,
}

impl PhoneValidation {
    fn invalid(message: &str) -> Self {
        Self {
            is_valid: false,
            error: Some(message.to_string()),
            is_test_number: false,
            normalized: None,
        }
    }
}

/// Strip the separators people type into phone numbers.
pub fn normalize_phone_number(input: &str) -> String {
    input
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '.' | '(' | ')'))
        .collect()
}

pub fn is_test_phone_number(normalized: &str) -> bool {
    TEST_NUMBER_PATTERNS.iter().any(|re| re.is_match(normalized))
}

/// Validate an international phone number.
///
/// Test-number shapes are accepted even when they fail general validation.
pub fn validate_phone_number(input: &str) -> PhoneValidation {
    let normalized = normalize_phone_number(input);

    if normalized.is_empty() {
        return PhoneValidation::invalid("Phone number is required");
    }

    if !normalized.starts_with('+') {
        return PhoneValidation::invalid(
            "Phone number must start with + followed by the country code",
        );
    }

    let is_test_number = is_test_phone_number(&normalized);
    if !is_test_number && !E164_REGEX.is_match(&normalized) {
        return PhoneValidation::invalid("Invalid phone number format");
    }

    PhoneValidation {
        is_valid: true,
        error: None,
        is_test_number,
        normalized: Some(normalized),
    }
}
