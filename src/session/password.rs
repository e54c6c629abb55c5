//! Password strength rules applied before registration.

/// Characters that satisfy the "special character" rule.
pub const SPECIAL_CHARACTERS: &str = "!@#$%^&*(),.?\":{}|<>";

/// Minimum password length, counted in characters.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Which of the five strength rules a password meets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PasswordStrength {
    pub min_length: bool,
    pub has_upper_case: bool,
    pub has_lower_case: bool,
    pub has_number: bool,
    pub has_special: bool,
}

impl PasswordStrength {
    pub fn evaluate(password: &str) -> Self {
        Self {
            min_length: password.chars().count() >= MIN_PASSWORD_LENGTH,
            has_upper_case: password.chars().any(|c| c.is_ascii_uppercase()),
            has_lower_case: password.chars().any(|c| c.is_ascii_lowercase()),
            has_number: password.chars().any(|c| c.is_ascii_digit()),
            has_special: password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)),
        }
    }

    /// True only when every rule holds.
    pub fn is_valid(&self) -> bool {
        self.min_length && self.has_upper_case && self.has_lower_case && self.has_number && self.has_special
    }

    /// Each rule with its description, in display order.
    pub fn requirements(&self) -> [(bool, &'static str); 5] {
        [
            (self.min_length, "At least 8 characters"),
            (self.has_upper_case, "One uppercase letter"),
            (self.has_lower_case, "One lowercase letter"),
            (self.has_number, "One number"),
            (self.has_special, "One special character (!@#$%...)"),
        ]
    }

    /// Descriptions of the rules that are not met.
    pub fn unmet(&self) -> Vec<&'static str> {
        self.requirements()
            .iter()
            .filter(|(met, _)| !met)
            .map(|(_, text)| *text)
            .collect()
    }
}
