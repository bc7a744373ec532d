use std::collections::HashSet;

use crate::platform::RandomSource;

/// Alphabet used by [`CharacterPool::default`]: the printable set the
/// decrypt effect traditionally draws from.
pub const DEFAULT_ALPHABET: &str =
    "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz!@#$%^&*()_+";

/// Where scramble placeholders are drawn from.
#[derive(Clone, Debug)]
pub enum CharacterPool {
    /// Permute the text's own not-yet-revealed characters. The multiset of
    /// displayed characters at unrevealed positions always equals the
    /// multiset of not-yet-revealed originals; no character is invented.
    OriginalChars,
    /// Draw independently, with replacement, from a fixed alphabet.
    Alphabet(Vec<char>),
}

impl CharacterPool {
    /// Fixed-alphabet pool from the characters of `chars`.
    pub fn alphabet(chars: &str) -> Self {
        CharacterPool::Alphabet(chars.chars().collect())
    }
}

impl Default for CharacterPool {
    fn default() -> Self {
        Self::alphabet(DEFAULT_ALPHABET)
    }
}

/// One frame of the scramble: spaces verbatim, revealed positions verbatim,
/// everything else randomized per the pool.
pub(crate) fn scramble_frame(
    original: &[char],
    revealed: &HashSet<usize>,
    pool: &CharacterPool,
    rng: &mut dyn RandomSource,
) -> String {
    match pool {
        CharacterPool::OriginalChars => {
            let mut working: Vec<char> = original
                .iter()
                .enumerate()
                .filter(|(i, &c)| c != ' ' && !revealed.contains(i))
                .map(|(_, &c)| c)
                .collect();
            fisher_yates(&mut working, rng);

            let mut shuffled = working.into_iter();
            original
                .iter()
                .enumerate()
                .map(|(i, &c)| {
                    if c == ' ' || revealed.contains(&i) {
                        c
                    } else {
                        shuffled.next().unwrap_or(c)
                    }
                })
                .collect()
        }
        CharacterPool::Alphabet(chars) => original
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                if c == ' ' || revealed.contains(&i) || chars.is_empty() {
                    c
                } else {
                    chars[rng.pick_index(chars.len())]
                }
            })
            .collect(),
    }
}

/// Uniform in-place permutation.
fn fisher_yates(chars: &mut [char], rng: &mut dyn RandomSource) {
    for i in (1..chars.len()).rev() {
        let j = rng.pick_index(i + 1);
        chars.swap(i, j);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::SeededRandom;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    fn sorted(text: &str) -> Vec<char> {
        let mut v: Vec<char> = text.chars().collect();
        v.sort_unstable();
        v
    }

    #[test]
    fn test_spaces_stay_spaces() {
        let original = chars("AB CD EF");
        let mut rng = SeededRandom::new(3);
        for _ in 0..50 {
            let frame = scramble_frame(
                &original,
                &HashSet::new(),
                &CharacterPool::default(),
                &mut rng,
            );
            let frame: Vec<char> = frame.chars().collect();
            assert_eq!(frame.len(), original.len());
            assert_eq!(frame[2], ' ');
            assert_eq!(frame[5], ' ');
        }
    }

    #[test]
    fn test_revealed_positions_show_original() {
        let original = chars("SECRET");
        let revealed: HashSet<usize> = [0, 3].into_iter().collect();
        let mut rng = SeededRandom::new(9);
        let frame = scramble_frame(&original, &revealed, &CharacterPool::default(), &mut rng);
        let frame: Vec<char> = frame.chars().collect();
        assert_eq!(frame[0], 'S');
        assert_eq!(frame[3], 'R');
    }

    #[test]
    fn test_original_chars_preserve_multiset() {
        let original = chars("HELLO WORLD");
        let revealed: HashSet<usize> = [0, 1].into_iter().collect();
        let mut rng = SeededRandom::new(11);
        for _ in 0..50 {
            let frame = scramble_frame(&original, &revealed, &CharacterPool::OriginalChars, &mut rng);
            // Same length, same spaces, same overall character multiset.
            assert_eq!(sorted(&frame), sorted("HELLO WORLD"));
            assert!(frame.starts_with("HE"));
            assert_eq!(frame.chars().nth(5), Some(' '));
        }
    }

    #[test]
    fn test_alphabet_draws_from_pool_only() {
        let original = chars("ABCDEF");
        let pool = CharacterPool::alphabet("xyz");
        let mut rng = SeededRandom::new(21);
        for _ in 0..20 {
            let frame = scramble_frame(&original, &HashSet::new(), &pool, &mut rng);
            assert!(frame.chars().all(|c| "xyz".contains(c)));
        }
    }

    #[test]
    fn test_empty_alphabet_falls_back_to_original() {
        let original = chars("KEEP");
        let pool = CharacterPool::Alphabet(Vec::new());
        let mut rng = SeededRandom::new(1);
        let frame = scramble_frame(&original, &HashSet::new(), &pool, &mut rng);
        assert_eq!(frame, "KEEP");
    }

    #[test]
    fn test_empty_text() {
        let mut rng = SeededRandom::new(5);
        let frame = scramble_frame(&[], &HashSet::new(), &CharacterPool::default(), &mut rng);
        assert_eq!(frame, "");
    }

    #[test]
    fn test_fully_revealed_equals_original() {
        let original = chars("DONE DEAL");
        let revealed: HashSet<usize> = (0..original.len()).collect();
        let mut rng = SeededRandom::new(2);
        for pool in [CharacterPool::OriginalChars, CharacterPool::default()] {
            let frame = scramble_frame(&original, &revealed, &pool, &mut rng);
            assert_eq!(frame, "DONE DEAL");
        }
    }

    #[test]
    fn test_seeded_shuffle_is_reproducible() {
        let original = chars("REPRODUCIBLE");
        let mut a = SeededRandom::new(77);
        let mut b = SeededRandom::new(77);
        let fa = scramble_frame(&original, &HashSet::new(), &CharacterPool::OriginalChars, &mut a);
        let fb = scramble_frame(&original, &HashSet::new(), &CharacterPool::OriginalChars, &mut b);
        assert_eq!(fa, fb);
    }
}
