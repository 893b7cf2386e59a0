//! Destination-hostname rules.
//!
//! # Responsibilities
//! - Decide whether a requested destination hostname may be relayed to
//! - Wildcard/glob-style FQDN matching (e.g. "*.example.com")
//!
//! # Design Decisions
//! - Hostname matching is case-insensitive (DNS names are)
//! - `*` matches any run of characters, including empty
//! - No regex to guarantee linear-time matching

/// Rule applied to every requested destination hostname.
///
/// Exactly one variant is active per server instance, chosen once at
/// startup from the configuration snapshot.
#[derive(Debug, Clone)]
pub enum DestinationRule {
    /// Every destination is permitted.
    Unrestricted,
    /// Only destinations matching the wildcard pattern are permitted.
    FqdnPattern(String),
}

impl DestinationRule {
    /// Derive the rule from the configured pattern; empty = unrestricted.
    pub fn from_pattern(pattern: &str) -> Self {
        if pattern.is_empty() {
            Self::Unrestricted
        } else {
            Self::FqdnPattern(pattern.to_lowercase())
        }
    }

    /// Returns true if a relay request for `hostname` may proceed.
    pub fn permits(&self, hostname: &str) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::FqdnPattern(pattern) => wildcard_match(pattern, &hostname.to_lowercase()),
        }
    }
}

/// Glob-style match where `*` matches any (possibly empty) run of
/// characters and `?` matches exactly one.
/// Iterative two-pointer scan with backtracking to the most
/// recent `*`, so the worst case stays O(pattern * input).
fn wildcard_match(pattern: &str, input: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let s: Vec<char> = input.chars().collect();

    let (mut pi, mut si) = (0, 0);
    let mut star: Option<(usize, usize)> = None;

    while si < s.len() {
        if pi < p.len() && (p[pi] == s[si] || p[pi] == '?') {
            pi += 1;
            si += 1;
        } else if pi < p.len() && p[pi] == '*' {
            star = Some((pi, si));
            pi += 1;
        } else if let Some((star_pi, star_si)) = star {
            // Let the last `*` absorb one more character and retry.
            pi = star_pi + 1;
            si = star_si + 1;
            star = Some((star_pi, star_si + 1));
        } else {
            return false;
        }
    }

    p[pi..].iter().all(|&c| c == '*')
}
