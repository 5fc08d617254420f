//! Function version numbering.
//!
//! Staging and production share one account, hence one version space per
//! function. Staging takes the odd numbers and production the even ones, and
//! each build keeps two versions live: the one it publishes and the one
//! before it.
//!
//! | environment | build | previous | current |
//! |-------------|-------|----------|---------|
//! | staging     | 5     | 9        | 11      |
//! | production  | 5     | 10       | 12      |

/// Version numbers for one build of one environment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VersionPair {
    /// Version captured from the running stack
    pub previous: i64,
    /// Version the alias is moved to
    pub current: i64,
}

impl VersionPair {
    /// Distance between the two versions of a pair
    pub const STEP: i64 = 2;

    /// Number the versions of `build` for `environment`.
    ///
    /// `environment == staging_id` yields odd numbers (`2b - 1`), any other
    /// environment even numbers (`2b`).
    pub fn for_environment(environment: &str, build: u32, staging_id: &str) -> Self {
        let build = i64::from(build);
        let previous = if environment == staging_id {
            build + (build - 1)
        } else {
            build * 2
        };
        Self {
            previous,
            current: previous + Self::STEP,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_values() {
        assert_eq!(
            VersionPair::for_environment("staging", 5, "staging"),
            VersionPair { previous: 9, current: 11 }
        );
        assert_eq!(
            VersionPair::for_environment("production", 5, "staging"),
            VersionPair { previous: 10, current: 12 }
        );
        assert_eq!(
            VersionPair::for_environment("prod", 1, "staging"),
            VersionPair { previous: 2, current: 4 }
        );
    }

    #[test]
    fn test_parity_and_monotonicity() {
        let mut last_staging = i64::MIN;
        let mut last_prod = i64::MIN;
        for build in 1..200u32 {
            let staging = VersionPair::for_environment("staging", build, "staging");
            let prod = VersionPair::for_environment("prod", build, "staging");

            assert_eq!(staging.current - staging.previous, 2);
            assert_eq!(prod.current - prod.previous, 2);
            assert_eq!(staging.previous.rem_euclid(2), 1);
            assert_eq!(staging.current.rem_euclid(2), 1);
            assert_eq!(prod.previous % 2, 0);
            assert_eq!(prod.current % 2, 0);

            assert!(staging.previous > last_staging);
            assert!(prod.previous > last_prod);
            last_staging = staging.previous;
            last_prod = prod.previous;
        }
    }

    #[test]
    fn test_staging_build_zero() {
        let pair = VersionPair::for_environment("staging", 0, "staging");
        assert_eq!(pair, VersionPair { previous: -1, current: 1 });
    }

    #[test]
    fn test_large_build_does_not_overflow() {
        let pair = VersionPair::for_environment("staging", u32::MAX, "staging");
        assert_eq!(pair.previous, 2 * i64::from(u32::MAX) - 1);
    }
}
