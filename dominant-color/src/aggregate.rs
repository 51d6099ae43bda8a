use indexmap::IndexMap;

use crate::color::Color;

/// Occurrence counts of exact colors, remembering the order colors were first seen.
#[derive(Debug, Clone, Default)]
pub struct ColorTally {
    counts: IndexMap<Color, usize>,
}

impl ColorTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, color: Color) {
        *self.counts.entry(color).or_insert(0) += 1;
    }

    pub fn count(&self, color: &Color) -> usize {
        self.counts.get(color).copied().unwrap_or(0)
    }

    /// Number of distinct colors.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of colors added.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }

    /// Colors by descending count. Equal counts stay in first-seen order.
    pub fn most_common(&self) -> Vec<(Color, usize)> {
        let mut entries: Vec<(Color, usize)> =
            self.counts.iter().map(|(color, count)| (*color, *count)).collect();
        entries.sort_by(|a, b| b.1.cmp(&a.1));
        entries
    }
}

impl Extend<Color> for ColorTally {
    fn extend<I: IntoIterator<Item = Color>>(&mut self, colors: I) {
        for color in colors {
            self.add(color);
        }
    }
}

impl FromIterator<Color> for ColorTally {
    fn from_iter<I: IntoIterator<Item = Color>>(colors: I) -> Self {
        let mut tally = ColorTally::new();
        tally.extend(colors);
        tally
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = Color::new(255, 0, 0);
    const GREEN: Color = Color::new(0, 255, 0);
    const BLUE: Color = Color::new(0, 0, 255);

    #[test]
    fn test_most_common_descending() {
        let colors = vec![GREEN, RED, BLUE, RED, BLUE, RED];
        let tally: ColorTally = colors.iter().copied().collect();

        let ranked = tally.most_common();
        assert_eq!(ranked, vec![(RED, 3), (BLUE, 2), (GREEN, 1)]);
        assert!(ranked.windows(2).all(|pair| pair[0].1 > pair[1].1));
        assert_eq!(ranked.iter().map(|(_, c)| c).sum::<usize>(), colors.len());
        assert_eq!(tally.total(), colors.len());
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let tally: ColorTally = vec![BLUE, GREEN, RED, GREEN, BLUE, RED].into_iter().collect();
        assert_eq!(tally.most_common(), vec![(BLUE, 2), (GREEN, 2), (RED, 2)]);
    }

    #[test]
    fn test_empty_tally() {
        let tally = ColorTally::new();
        assert!(tally.is_empty());
        assert_eq!(tally.total(), 0);
        assert!(tally.most_common().is_empty());
        assert_eq!(tally.count(&RED), 0);
    }
}
