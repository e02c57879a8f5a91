use super::DomainError;

/// Minimum similarity at which a pair of submissions is flagged.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Threshold(f64);

impl Threshold {
    pub const MIN: f64 = 0.0;
    pub const MAX: f64 = 1.0;
    pub const DEFAULT: f64 = 0.85;

    pub fn new(value: f64) -> Result<Self, DomainError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidThreshold(value))
        }
    }

    pub fn value(self) -> f64 {
        self.0
    }

    pub fn is_met_by(self, similarity: f64) -> bool {
        similarity >= self.0
    }
}

impl Default for Threshold {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

impl TryFrom<f64> for Threshold {
    type Error = DomainError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Threshold> for f64 {
    fn from(value: Threshold) -> Self {
        value.value()
    }
}

#[cfg(test)]
mod tests {
    use super::{DomainError, Threshold};

    #[test]
    fn default_threshold_is_eighty_five_percent() {
        assert_eq!(Threshold::default().value(), 0.85);
    }

    #[test]
    fn bounds_are_inclusive() {
        assert!(Threshold::new(0.0).is_ok());
        assert!(Threshold::new(1.0).is_ok());
    }

    #[test]
    fn out_of_range_threshold_is_rejected() {
        let err = Threshold::new(1.5).expect_err("1.5 should be rejected");

        assert_eq!(err, DomainError::InvalidThreshold(1.5));
        assert_eq!(
            err.to_string(),
            "invalid similarity threshold: 1.5. threshold must be in [0, 1]"
        );
    }

    #[test]
    fn nan_threshold_is_rejected() {
        assert!(Threshold::new(f64::NAN).is_err());
    }

    #[test]
    fn similarity_equal_to_threshold_is_met() {
        let threshold = Threshold::new(0.5).expect("0.5 should be valid");

        assert!(threshold.is_met_by(0.5));
        assert!(!threshold.is_met_by(0.49));
    }
}
