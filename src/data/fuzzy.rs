//! Approximate string similarity for matching typed station names.
//!
//! Scores are on a 0–100 scale. [`weighted_ratio`] blends a plain edit
//! distance ratio with substring and token-order insensitive variants so that
//! "morgans pt" still lands on "Morgans Point" and "point morgans" does too.

use std::collections::BTreeSet;

use strsim::normalized_levenshtein;

const UNBASE_SCALE: f64 = 0.95;

/// Lowercase, replace everything that is not a letter or digit with a space,
/// and trim.
pub fn full_process(s: &str) -> String {
    let mapped: String = s
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();
    mapped.to_lowercase().trim().to_string()
}

/// Edit-distance similarity of two strings.
pub fn ratio(a: &str, b: &str) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }
    normalized_levenshtein(a, b) * 100.0
}

/// Best [`ratio`] of the shorter string against every equally long window of
/// the longer one.
pub fn partial_ratio(a: &str, b: &str) -> f64 {
    let (short, long): (Vec<char>, Vec<char>) = if a.chars().count() <= b.chars().count() {
        (a.chars().collect(), b.chars().collect())
    } else {
        (b.chars().collect(), a.chars().collect())
    };
    if short.is_empty() {
        return 0.0;
    }
    let short: String = short.into_iter().collect();
    let n = short.chars().count();
    let mut best = 0.0_f64;
    for window in long.windows(n) {
        let candidate: String = window.iter().collect();
        let score = ratio(&short, &candidate);
        if score > best {
            best = score;
            if best >= 100.0 {
                break;
            }
        }
    }
    best
}

fn sorted_tokens(s: &str) -> String {
    let mut tokens: Vec<&str> = s.split_whitespace().collect();
    tokens.sort_unstable();
    tokens.join(" ")
}

fn token_sort(a: &str, b: &str, partial: bool) -> f64 {
    let (sa, sb) = (sorted_tokens(a), sorted_tokens(b));
    if partial {
        partial_ratio(&sa, &sb)
    } else {
        ratio(&sa, &sb)
    }
}

fn token_set(a: &str, b: &str, partial: bool) -> f64 {
    let ta: BTreeSet<&str> = a.split_whitespace().collect();
    let tb: BTreeSet<&str> = b.split_whitespace().collect();
    if ta.is_empty() || tb.is_empty() {
        return 0.0;
    }

    let join = |set: Vec<&str>| set.join(" ");
    let intersection = join(ta.intersection(&tb).copied().collect());
    let diff_ab = join(ta.difference(&tb).copied().collect());
    let diff_ba = join(tb.difference(&ta).copied().collect());

    let combined_ab = format!("{intersection} {diff_ab}").trim().to_string();
    let combined_ba = format!("{intersection} {diff_ba}").trim().to_string();

    let score = |x: &str, y: &str| {
        if partial {
            partial_ratio(x, y)
        } else {
            ratio(x, y)
        }
    };

    // A full intersection is a perfect match on the shared tokens.
    let pairs = [
        (intersection.as_str(), combined_ab.as_str()),
        (intersection.as_str(), combined_ba.as_str()),
        (combined_ab.as_str(), combined_ba.as_str()),
    ];
    pairs
        .iter()
        .map(|(x, y)| {
            if !x.is_empty() && x == y {
                100.0
            } else {
                score(x, y)
            }
        })
        .fold(0.0, f64::max)
}

/// Token-order insensitive similarity.
pub fn token_sort_ratio(a: &str, b: &str) -> f64 {
    token_sort(a, b, false)
}

/// Similarity on the shared tokens plus the remainder of each side.
pub fn token_set_ratio(a: &str, b: &str) -> f64 {
    token_set(a, b, false)
}

/// Combined similarity of `query` and `choice` after [`full_process`],
/// rounded to an integer score.
pub fn weighted_ratio(query: &str, choice: &str) -> u8 {
    let p1 = full_process(query);
    let p2 = full_process(choice);
    if p1.is_empty() || p2.is_empty() {
        return 0;
    }

    let len1 = p1.chars().count() as f64;
    let len2 = p2.chars().count() as f64;
    let len_ratio = len1.max(len2) / len1.min(len2);

    let base = ratio(&p1, &p2);

    let best = if len_ratio < 1.5 {
        let tsor = token_sort_ratio(&p1, &p2) * UNBASE_SCALE;
        let tser = token_set_ratio(&p1, &p2) * UNBASE_SCALE;
        base.max(tsor).max(tser)
    } else {
        let partial_scale = if len_ratio < 8.0 { 0.9 } else { 0.6 };
        let partial = partial_ratio(&p1, &p2) * partial_scale;
        let ptsor = token_sort(&p1, &p2, true) * UNBASE_SCALE * partial_scale;
        let ptser = token_set(&p1, &p2, true) * UNBASE_SCALE * partial_scale;
        base.max(partial).max(ptsor).max(ptser)
    };

    best.round().clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn processing_drops_punctuation_and_case() {
        assert_eq!(full_process("  Morgans Point, TX! "), "morgans point  tx");
    }

    #[test]
    fn identical_names_score_100() {
        assert_eq!(weighted_ratio("Morgans Point", "morgans point"), 100);
    }

    #[test]
    fn token_order_is_ignored() {
        assert!((token_sort_ratio("point morgans", "morgans point") - 100.0).abs() < 1e-9);
        assert!(weighted_ratio("Point Morgans", "Morgans Point") >= 90);
    }

    #[test]
    fn substring_scores_high() {
        assert!((partial_ratio("galveston", "galveston pier 21") - 100.0).abs() < 1e-9);
        assert!(weighted_ratio("galveston", "Galveston Pier 21") >= 85);
    }

    #[test]
    fn token_set_handles_extra_words() {
        assert!((token_set_ratio("rollover pass", "rollover pass tx") - 100.0).abs() < 1e-9);
    }

    #[test]
    fn unrelated_names_score_low() {
        assert!(weighted_ratio("Manchester", "Rollover Pass") < 50);
    }

    #[test]
    fn empty_input_scores_zero() {
        assert_eq!(weighted_ratio("", "Morgans Point"), 0);
        assert_eq!(weighted_ratio("!!!", "Morgans Point"), 0);
    }
}
