use chrono::{Datelike, Utc};
use rand::Rng;

/// Intake reference numbers look like `TQ-2024-483920`: a year prefix for
/// the paper archive plus a random six-digit suffix.
pub fn generate_reference_no() -> String {
    let mut rng = rand::rng();
    let suffix: u32 = rng.random_range(100_000..1_000_000);
    format!("TQ-{}-{}", Utc::now().year(), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reference_no_shape() {
        let reference = generate_reference_no();
        let parts: Vec<&str> = reference.split('-').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "TQ");
        assert_eq!(parts[2].len(), 6);
        assert!(parts[1].parse::<i32>().is_ok());
        assert!(parts[2].parse::<u32>().is_ok());
    }
}
