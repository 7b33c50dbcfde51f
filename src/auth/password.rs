/// One point each for length >= 6, an ASCII digit, and an ASCII letter.
pub fn strength_score(password: &str) -> u8 {
    let mut score = 0;
    if password.chars().count() >= MIN_LENGTH {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_digit()) {
        score += 1;
    }
    if password.chars().any(|c| c.is_ascii_alphabetic()) {
        score += 1;
    }
    score
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Strength {
    VeryWeak = 0,
    Weak = 1,
    Medium = 2,
    Strong = 3,
}

impl Strength {
    pub fn of(password: &str) -> Self {
        match strength_score(password) {
            0 => Strength::VeryWeak,
            1 => Strength::Weak,
            2 => Strength::Medium,
            _ => Strength::Strong,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Strength::VeryWeak => "very weak",
            Strength::Weak => "weak",
            Strength::Medium => "medium",
            Strength::Strong => "strong",
        }
    }

    pub fn class(self) -> &'static str {
        match self {
            Strength::VeryWeak => "strength-0",
            Strength::Weak => "strength-1",
            Strength::Medium => "strength-2",
            Strength::Strong => "strength-3",
        }
    }
}

/// Live indicator for the register form; hidden while the field is empty.
pub fn indicator(password: &str) -> Option<Strength> {
    if password.is_empty() {
        None
    } else {
        Some(Strength::of(password))
    }
}

/// Minimum length the backend enforces on registration.
pub const MIN_LENGTH: usize = 6;

/// Registration gate: at least medium strength, and never shorter than
/// [`MIN_LENGTH`] whatever characters the password mixes.
pub fn meets_requirements(password: &str) -> bool {
    password.chars().count() >= MIN_LENGTH && Strength::of(password) >= Strength::Medium
}
