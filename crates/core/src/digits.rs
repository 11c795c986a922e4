use crate::GameError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A playable digit in `1..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 9;

    pub fn new(value: u8) -> Result<Self, GameError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(GameError::InvalidDigit(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn all() -> impl Iterator<Item = Digit> {
        (Self::MIN..=Self::MAX).map(Digit)
    }

    fn bit(self) -> u16 {
        1 << self.0
    }
}

impl TryFrom<u8> for Digit {
    type Error = GameError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Digit::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Set of digits backed by a bitmask. Iterates in ascending order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u8>", into = "Vec<u8>")]
pub struct DigitSet(u16);

impl DigitSet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub fn full() -> Self {
        Digit::all().collect()
    }

    pub fn contains(self, digit: Digit) -> bool {
        self.0 & digit.bit() != 0
    }

    pub fn insert(&mut self, digit: Digit) -> bool {
        let fresh = !self.contains(digit);
        self.0 |= digit.bit();
        fresh
    }

    pub fn remove(&mut self, digit: Digit) -> bool {
        let present = self.contains(digit);
        self.0 &= !digit.bit();
        present
    }

    pub fn with(mut self, digit: Digit) -> Self {
        self.insert(digit);
        self
    }

    pub fn difference(self, other: DigitSet) -> Self {
        Self(self.0 & !other.0)
    }

    pub fn is_subset(self, other: DigitSet) -> bool {
        self.0 & !other.0 == 0
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn sum(self) -> u32 {
        self.iter().map(|digit| u32::from(digit.value())).sum()
    }

    pub fn iter(self) -> impl Iterator<Item = Digit> {
        Digit::all().filter(move |digit| self.contains(*digit))
    }
}

impl FromIterator<Digit> for DigitSet {
    fn from_iter<I: IntoIterator<Item = Digit>>(iter: I) -> Self {
        let mut set = DigitSet::empty();
        for digit in iter {
            set.insert(digit);
        }
        set
    }
}

impl TryFrom<Vec<u8>> for DigitSet {
    type Error = GameError;

    fn try_from(values: Vec<u8>) -> Result<Self, Self::Error> {
        values.into_iter().map(Digit::new).collect()
    }
}

impl From<DigitSet> for Vec<u8> {
    fn from(set: DigitSet) -> Self {
        set.iter().map(Digit::value).collect()
    }
}

impl fmt::Display for DigitSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.iter().map(|digit| digit.to_string()).collect();
        write!(f, "{{{}}}", parts.join(","))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(values: &[u8]) -> DigitSet {
        values
            .iter()
            .map(|value| Digit::new(*value).expect("digit"))
            .collect()
    }

    #[test]
    fn digit_rejects_out_of_range() {
        assert_eq!(Digit::new(0), Err(GameError::InvalidDigit(0)));
        assert_eq!(Digit::new(10), Err(GameError::InvalidDigit(10)));
        assert_eq!(Digit::new(9).map(Digit::value), Ok(9));
    }

    #[test]
    fn full_set_sums_to_45() {
        let full = DigitSet::full();
        assert_eq!(full.len(), 9);
        assert_eq!(full.sum(), 45);
    }

    #[test]
    fn difference_and_subset() {
        let pool = set(&[1, 2, 3, 4]);
        let picked = set(&[2, 4]);
        assert!(picked.is_subset(pool));
        assert_eq!(pool.difference(picked), set(&[1, 3]));
        assert!(!pool.is_subset(picked));
    }

    #[test]
    fn serde_uses_plain_digit_lists() {
        let json = serde_json::to_string(&set(&[3, 1, 7])).expect("serialize");
        assert_eq!(json, "[1,3,7]");
        let parsed: Result<DigitSet, _> = serde_json::from_str("[0,2]");
        assert!(parsed.is_err());
    }
}
