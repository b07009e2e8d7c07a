use std::fmt;

/// Fatal setup problems. A wheel with any of these never becomes playable.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    NoSlots,
    InvalidWeight { slot: String, weight: i64 },
    WeightOverflow,
    InvalidRevolutions { min: u32, max: u32 },
    InvalidTuning { field: &'static str },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::NoSlots => write!(f, "the wheel needs at least one prize slot"),
            ConfigError::InvalidWeight { slot, weight } => {
                write!(f, "prize '{}' has weight {}, weights must be at least 1", slot, weight)
            }
            ConfigError::WeightOverflow => write!(f, "total prize weight does not fit in a u32"),
            ConfigError::InvalidRevolutions { min, max } => {
                write!(f, "revolution range {}..={} needs 1 <= min <= max", min, max)
            }
            ConfigError::InvalidTuning { field } => {
                write!(f, "tuning value '{}' is out of range", field)
            }
        }
    }
}

impl std::error::Error for ConfigError {}
