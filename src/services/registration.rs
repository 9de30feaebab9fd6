//! Registration identifier generation.
//!
//! Identifiers look like `STU20251234`: a fixed 3-character role prefix, the
//! 4-digit calendar year of creation, and a 4-digit serial drawn uniformly
//! at random. Candidates are minted here; uniqueness is the store's job
//! (existence pre-check per draw plus the unique constraint on insert), with
//! both loops bounded so a full serial pool surfaces as an error instead of
//! spinning forever.

use rand::Rng;

/// Inclusive serial range; 9000 values per prefix and year.
pub const SERIAL_MIN: u32 = 1000;
pub const SERIAL_MAX: u32 = 9999;

/// Candidate draws per save before giving up on finding a free serial.
pub const MAX_CANDIDATE_DRAWS: usize = 16;

/// Insert attempts per save when a concurrent save wins the same candidate.
pub const MAX_INSERT_ATTEMPTS: usize = 3;

/// Mint one candidate identifier for the given prefix and calendar year.
pub fn candidate(prefix: &str, year: i32, rng: &mut impl Rng) -> String {
    let serial = rng.random_range(SERIAL_MIN..=SERIAL_MAX);
    format!("{}{}{}", prefix, year, serial)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_has_prefix_year_and_serial() {
        let mut rng = rand::rng();
        let id = candidate("STU", 2025, &mut rng);
        assert!(id.starts_with("STU2025"));
        assert_eq!(id.len(), 11);
        assert!(id[3..].chars().all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn test_candidate_serial_stays_in_range() {
        let mut rng = rand::rng();
        for _ in 0..1000 {
            let id = candidate("ADM", 2025, &mut rng);
            let serial: u32 = id[7..].parse().expect("serial is numeric");
            assert!((SERIAL_MIN..=SERIAL_MAX).contains(&serial));
        }
    }

    #[test]
    fn test_candidate_carries_the_given_year() {
        let mut rng = rand::rng();
        let id = candidate("LIB", 1999, &mut rng);
        assert_eq!(&id[..7], "LIB1999");
    }
}
