//! Static cross-framework compatibility priors
//!
//! Historical compatibility scores between well-known framework pairs,
//! used as a fallback prior when no live mapping has been computed. This
//! is a lookup, never a computation; it must not be conflated with
//! `map_controls` results.

/// Canonical names recognized by the compatibility table.
const KNOWN_FRAMEWORKS: &[&str] = &["ISO 27001", "NIST CSF", "CIS Controls", "SOC2"];

/// Pairwise compatibility priors, symmetric.
const COMPATIBILITY_TABLE: &[(&str, &str, f64)] = &[
    ("ISO 27001", "NIST CSF", 0.85),
    ("ISO 27001", "CIS Controls", 0.75),
    ("ISO 27001", "SOC2", 0.80),
    ("NIST CSF", "CIS Controls", 0.90),
    ("NIST CSF", "SOC2", 0.75),
    ("CIS Controls", "SOC2", 0.70),
];

/// Neutral prior when a name is unrecognized or the pair is absent.
const NEUTRAL_SCORE: f64 = 0.5;

/// Look up the historical compatibility prior for a framework pair.
pub fn framework_compatibility(source: &str, target: &str) -> f64 {
    let Some(source) = canonical_name(source) else {
        return NEUTRAL_SCORE;
    };
    let Some(target) = canonical_name(target) else {
        return NEUTRAL_SCORE;
    };

    COMPATIBILITY_TABLE
        .iter()
        .find(|(a, b, _)| (*a == source && *b == target) || (*a == target && *b == source))
        .map(|(_, _, score)| *score)
        .unwrap_or(NEUTRAL_SCORE)
}

fn canonical_name(name: &str) -> Option<&'static str> {
    let normalized = name.trim().to_lowercase().replace([' ', '-', '_'], "");
    KNOWN_FRAMEWORKS
        .iter()
        .find(|known| known.to_lowercase().replace(' ', "") == normalized)
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iso_to_nist_is_085() {
        assert_eq!(framework_compatibility("ISO 27001", "NIST CSF"), 0.85);
    }

    #[test]
    fn unknown_framework_is_neutral() {
        assert_eq!(framework_compatibility("Unknown", "NIST CSF"), 0.5);
        assert_eq!(framework_compatibility("ISO 27001", "Unknown"), 0.5);
    }

    #[test]
    fn lookup_is_symmetric() {
        for (a, b, _) in COMPATIBILITY_TABLE {
            assert_eq!(
                framework_compatibility(a, b),
                framework_compatibility(b, a)
            );
        }
    }

    #[test]
    fn name_matching_is_forgiving() {
        assert_eq!(framework_compatibility("iso 27001", "nist csf"), 0.85);
        assert_eq!(framework_compatibility("ISO27001", "NIST-CSF"), 0.85);
        assert_eq!(framework_compatibility("soc2", "cis controls"), 0.70);
    }

    #[test]
    fn same_framework_pair_takes_the_neutral_default() {
        // Self-pairs are absent from the table like any other unlisted
        // pair; the lookup holds historical priors only and never derives
        // a score.
        assert_eq!(framework_compatibility("ISO 27001", "iso 27001"), 0.5);
        assert_eq!(framework_compatibility("NIST CSF", "NIST CSF"), 0.5);
    }
}
