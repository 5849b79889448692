use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{AutomatonError, AutomatonResult},
    grid::Cell,
};

/// An elementary automaton rule in Wolfram numbering.
///
/// Bit `i` of the number is the next state for the neighborhood pattern `i`, see [`neighborhood_index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rule(u8);

impl Rule {
    /// Chaotic, the classic single cell triangle.
    pub const RULE_30: Rule = Rule(30);

    /// Sierpinski triangle.
    pub const RULE_90: Rule = Rule(90);

    /// Turing complete.
    pub const RULE_110: Rule = Rule(110);

    pub const fn new(number: u8) -> Self {
        Self(number)
    }

    pub fn number(&self) -> u8 {
        self.0
    }

    pub fn bit(&self, index: u8) -> bool {
        (self.0 >> index) & 1 == 1
    }
}

impl Default for Rule {
    fn default() -> Self {
        Self::RULE_30
    }
}

/// Rule numbers outside of 0..=255 are rejected, never truncated.
impl TryFrom<i64> for Rule {
    type Error = AutomatonError;

    fn try_from(value: i64) -> AutomatonResult<Self> {
        u8::try_from(value).map(Self).map_err(|_| {
            AutomatonError::InvalidArgument(format!("rule number {value} is outside of 0..=255"))
        })
    }
}

impl FromStr for Rule {
    type Err = AutomatonError;

    fn from_str(s: &str) -> AutomatonResult<Self> {
        let number = s.trim().parse::<i64>().map_err(|_| {
            AutomatonError::InvalidArgument(format!("rule number {s:?} isn't an integer"))
        })?;

        Self::try_from(number)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rule {}", self.0)
    }
}

/// A rule decomposed into its 8 outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleTable {
    /// Most significant digit of the rule number first, so `outcomes[7 - pattern]` belongs to `pattern`.
    outcomes: [Cell; 8],
}

impl RuleTable {
    pub fn compile(rule: Rule) -> Self {
        let mut outcomes = [Cell::Dead; 8];

        for (index, outcome) in outcomes.iter_mut().enumerate() {
            if rule.bit(7 - index as u8) {
                *outcome = Cell::Alive;
            }
        }

        Self { outcomes }
    }

    /// Next state for a neighborhood pattern.
    ///
    /// # Panics
    ///
    /// If `pattern` is 8 or more.
    pub fn outcome(&self, pattern: u8) -> Cell {
        self.outcomes[7 - pattern as usize]
    }

    pub fn apply(&self, north_west: Cell, north: Cell, north_east: Cell) -> Cell {
        self.outcome(neighborhood_index(north_west, north, north_east))
    }

    pub fn rule(&self) -> Rule {
        let number = self
            .outcomes
            .iter()
            .fold(0u8, |number, outcome| (number << 1) | outcome.is_alive() as u8);

        Rule(number)
    }
}

pub fn compile_rule(rule: Rule) -> RuleTable {
    RuleTable::compile(rule)
}

/// Packs a neighborhood into 3 bits: north west is bit 2, north bit 1, north east bit 0.
pub fn neighborhood_index(north_west: Cell, north: Cell, north_east: Cell) -> u8 {
    let mut index = 0;

    if north_east.is_alive() {
        index |= 1;
    }
    if north.is_alive() {
        index |= 2;
    }
    if north_west.is_alive() {
        index |= 4;
    }

    index
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Cell::{Alive as A, Dead as D};

    #[test]
    fn test_outcome_matches_rule_bits() {
        for number in 0..=255u8 {
            let table = compile_rule(Rule::new(number));

            for pattern in 0..8 {
                let expected = (number >> pattern) & 1 == 1;
                assert_eq!(
                    table.outcome(pattern).is_alive(),
                    expected,
                    "rule {number} pattern {pattern}"
                );
            }
        }
    }

    #[test]
    fn test_rule_bits() {
        let rule = Rule::RULE_30;

        let alive_bits = (0..8).filter(|&index| rule.bit(index)).collect::<Vec<_>>();
        assert_eq!(alive_bits, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_table_is_most_significant_first() {
        let table = RuleTable::compile(Rule::new(0b1000_0000));

        assert_eq!(table.outcomes[0], Cell::Alive);
        assert!(table.outcomes[1..].iter().all(|outcome| *outcome == Cell::Dead));
    }

    #[test]
    fn test_table_round_trips_rule() {
        for number in [0, 1, 30, 90, 110, 184, 255] {
            assert_eq!(RuleTable::compile(Rule::new(number)).rule().number(), number);
        }
    }

    #[test]
    fn test_rule_30_neighborhoods() {
        let table = RuleTable::compile(Rule::RULE_30);

        assert_eq!(table.apply(D, D, D), D);
        assert_eq!(table.apply(A, A, A), D);
        assert_eq!(table.apply(D, D, A), A);
        assert_eq!(table.apply(D, A, D), A);
        assert_eq!(table.apply(D, A, A), A);
        assert_eq!(table.apply(A, D, D), A);
        assert_eq!(table.apply(A, D, A), D);
        assert_eq!(table.apply(A, A, D), D);
    }

    #[test]
    fn test_neighborhood_index() {
        assert_eq!(neighborhood_index(D, D, D), 0);
        assert_eq!(neighborhood_index(D, D, A), 1);
        assert_eq!(neighborhood_index(D, A, D), 2);
        assert_eq!(neighborhood_index(A, D, D), 4);
        assert_eq!(neighborhood_index(A, A, A), 7);
    }

    #[test]
    fn test_out_of_range_rules_are_rejected() {
        assert_eq!(Rule::try_from(255i64), Ok(Rule::new(255)));
        assert!(matches!(
            Rule::try_from(256i64),
            Err(AutomatonError::InvalidArgument(_))
        ));
        assert!(matches!(
            Rule::try_from(-1i64),
            Err(AutomatonError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parse_rule() {
        assert_eq!("30".parse::<Rule>(), Ok(Rule::RULE_30));
        assert_eq!(" 110 ".parse::<Rule>(), Ok(Rule::RULE_110));
        assert!("300".parse::<Rule>().is_err());
        assert!("thirty".parse::<Rule>().is_err());
    }
}
