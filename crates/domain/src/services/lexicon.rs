//! Built-in moderation word list and sentiment valence table.
//!
//! Both are deliberately small defaults; deployments point the server
//! config at replacement files for their own language and policy.

use std::collections::HashMap;

/// Default moderation word list used by the lexical scanner.
pub const DEFAULT_WORD_LIST: &[&str] = &[
    "ass",
    "asshole",
    "bastard",
    "bitch",
    "bollocks",
    "bullshit",
    "crap",
    "damn",
    "dammit",
    "dick",
    "dumbass",
    "fuck",
    "fucking",
    "hell",
    "idiot",
    "idiots",
    "jackass",
    "jerk",
    "moron",
    "piss",
    "pissed",
    "prick",
    "scum",
    "shit",
    "shitty",
    "stupid",
    "twat",
    "wanker",
];

/// Default AFINN-style valence entries used by the lexicon scorer.
/// Valences are integers in [-5, 5]; the comparative score divides the
/// summed valence by the token count.
const DEFAULT_VALENCES: &[(&str, f64)] = &[
    ("abysmal", -3.0),
    ("amazing", 4.0),
    ("angry", -3.0),
    ("annoyed", -2.0),
    ("annoying", -2.0),
    ("appalling", -3.0),
    ("awesome", 4.0),
    ("awful", -3.0),
    ("bad", -3.0),
    ("best", 3.0),
    ("bitch", -5.0),
    ("broken", -1.0),
    ("bullshit", -4.0),
    ("cheerful", 2.0),
    ("crap", -3.0),
    ("damn", -4.0),
    ("disappointed", -2.0),
    ("disappointing", -2.0),
    ("disgusting", -3.0),
    ("dreadful", -3.0),
    ("excellent", 3.0),
    ("fantastic", 4.0),
    ("fraud", -4.0),
    ("frustrated", -2.0),
    ("frustrating", -2.0),
    ("fuck", -4.0),
    ("fucking", -4.0),
    ("garbage", -3.0),
    ("good", 3.0),
    ("great", 3.0),
    ("happy", 3.0),
    ("hate", -3.0),
    ("hell", -4.0),
    ("helpful", 2.0),
    ("hopeless", -2.0),
    ("horrible", -3.0),
    ("idiot", -3.0),
    ("idiots", -3.0),
    ("incompetent", -2.0),
    ("joke", -1.0),
    ("love", 3.0),
    ("lousy", -2.0),
    ("mess", -2.0),
    ("miserable", -3.0),
    ("moron", -3.0),
    ("nice", 3.0),
    ("pathetic", -3.0),
    ("perfect", 3.0),
    ("pissed", -4.0),
    ("pleased", 3.0),
    ("poor", -2.0),
    ("refund", -1.0),
    ("ridiculous", -3.0),
    ("rubbish", -2.0),
    ("sad", -2.0),
    ("scam", -2.0),
    ("shit", -4.0),
    ("shitty", -3.0),
    ("stupid", -2.0),
    ("terrible", -3.0),
    ("thanks", 2.0),
    ("trash", -2.0),
    ("unacceptable", -2.0),
    ("unhappy", -2.0),
    ("unusable", -2.0),
    ("upset", -2.0),
    ("useless", -2.0),
    ("waste", -1.0),
    ("wonderful", 4.0),
    ("worst", -3.0),
    ("worthless", -2.0),
    ("wrong", -2.0),
];

/// Returns the default word list as owned strings.
pub fn default_word_list() -> Vec<String> {
    DEFAULT_WORD_LIST.iter().map(|w| w.to_string()).collect()
}

/// Returns the default valence table.
pub fn default_valences() -> HashMap<String, f64> {
    DEFAULT_VALENCES
        .iter()
        .map(|(w, v)| (w.to_string(), *v))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_word_list_is_lowercase() {
        for word in DEFAULT_WORD_LIST {
            assert_eq!(*word, word.to_lowercase(), "word list entry: {word}");
        }
    }

    #[test]
    fn test_valences_within_afinn_range() {
        for (word, valence) in DEFAULT_VALENCES {
            assert!(
                (-5.0..=5.0).contains(valence),
                "valence out of range for {word}"
            );
        }
    }

    #[test]
    fn test_default_tables_are_non_empty() {
        assert!(!default_word_list().is_empty());
        assert!(!default_valences().is_empty());
    }
}
