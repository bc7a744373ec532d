use std::collections::HashSet;

/// Order in which character positions lock in during a sequential reveal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum RevealDirection {
    /// Left to right
    #[default]
    Start,
    /// Right to left
    End,
    /// Outward from the middle, alternating right then left
    Center,
}

impl RevealDirection {
    /// Next position to reveal, given the set already revealed.
    ///
    /// Callers guarantee `revealed.len() < len`; the exhausted fallback of 0
    /// exists so the function stays total.
    pub fn next_index(self, len: usize, revealed: &HashSet<usize>) -> usize {
        let count = revealed.len();
        match self {
            RevealDirection::Start => count,
            RevealDirection::End => len.saturating_sub(1 + count),
            RevealDirection::Center => {
                let middle = len / 2;
                let offset = count / 2;
                let candidate = if count % 2 == 0 {
                    middle.checked_add(offset)
                } else {
                    middle.checked_sub(offset + 1)
                };
                if let Some(index) = candidate {
                    if index < len && !revealed.contains(&index) {
                        return index;
                    }
                }
                // Candidate collided or fell outside the text: take the
                // lowest unrevealed position instead.
                (0..len).find(|i| !revealed.contains(i)).unwrap_or(0)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reveal_order(direction: RevealDirection, len: usize) -> Vec<usize> {
        let mut revealed = HashSet::new();
        let mut order = Vec::new();
        for _ in 0..len {
            let next = direction.next_index(len, &revealed);
            revealed.insert(next);
            order.push(next);
        }
        order
    }

    #[test]
    fn test_start_fills_left_to_right() {
        assert_eq!(reveal_order(RevealDirection::Start, 5), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_end_fills_right_to_left() {
        assert_eq!(reveal_order(RevealDirection::End, 5), vec![4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_center_alternates_from_middle() {
        // middle = 2; even counts step right, odd counts step left.
        assert_eq!(
            reveal_order(RevealDirection::Center, 5),
            vec![2, 1, 3, 0, 4]
        );
    }

    #[test]
    fn test_center_even_length() {
        assert_eq!(
            reveal_order(RevealDirection::Center, 4),
            vec![2, 1, 3, 0]
        );
    }

    #[test]
    fn test_center_collision_falls_back_to_lowest() {
        // Candidate for count=2 is middle + 1 = 3, already revealed here.
        let revealed: HashSet<usize> = [2, 3].into_iter().collect();
        assert_eq!(RevealDirection::Center.next_index(5, &revealed), 0);
    }

    #[test]
    fn test_center_exhausted_returns_zero() {
        let revealed: HashSet<usize> = (0..5).collect();
        assert_eq!(RevealDirection::Center.next_index(5, &revealed), 0);
    }

    #[test]
    fn test_single_character() {
        assert_eq!(reveal_order(RevealDirection::Center, 1), vec![0]);
        assert_eq!(reveal_order(RevealDirection::End, 1), vec![0]);
    }
}
