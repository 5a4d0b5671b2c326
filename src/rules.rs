//! Pairwise transition rules, the heart of the population protocol. A rule
//! matches the unordered pair of states held by two interacting agents and
//! rewrites both. Rules are scanned in insertion order and at most one rule
//! fires per interaction.

use crate::agent::HealthState;

/// A pairwise transition rule. Matches two interacting agents whose states
/// equal `(input1, input2)` in either order and maps them respectively to
/// `(output1, output2)`, preserving the matched order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub input1: HealthState,
    pub input2: HealthState,
    pub output1: HealthState,
    pub output2: HealthState,
}

impl TransitionRule {
    #[must_use]
    pub fn new(
        input1: HealthState,
        input2: HealthState,
        output1: HealthState,
        output2: HealthState,
    ) -> TransitionRule {
        TransitionRule {
            input1,
            input2,
            output1,
            output2,
        }
    }
}

/// An ordered, append-only collection of transition rules. Earlier rules take
/// precedence over later ones; rules are never removed during a session.
#[derive(Debug, Default, Clone)]
pub struct RuleSet {
    rules: Vec<TransitionRule>,
}

impl RuleSet {
    #[must_use]
    pub fn new() -> RuleSet {
        RuleSet { rules: Vec::new() }
    }

    pub fn add_rule(&mut self, rule: TransitionRule) {
        self.rules.push(rule);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    #[must_use]
    pub fn rules(&self) -> &[TransitionRule] {
        &self.rules
    }

    /// Finds the first rule matching the unordered state pair and returns the
    /// post-interaction states in the same order as the arguments, so each
    /// physical agent receives the output slot its input slot matched.
    /// Returns `None` when no rule matches (the interaction is a no-op).
    #[must_use]
    pub fn find_match(
        &self,
        state_a: HealthState,
        state_b: HealthState,
    ) -> Option<(HealthState, HealthState)> {
        for rule in &self.rules {
            if state_a == rule.input1 && state_b == rule.input2 {
                return Some((rule.output1, rule.output2));
            }
            if state_a == rule.input2 && state_b == rule.input1 {
                return Some((rule.output2, rule.output1));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::HealthState::{
        Cure, Deceased, Healthy, Immune, Infected, UnknowinglyInfected,
    };

    #[test]
    fn matches_in_either_order() {
        let mut rules = RuleSet::new();
        rules.add_rule(TransitionRule::new(
            Healthy,
            Infected,
            UnknowinglyInfected,
            Infected,
        ));

        // The healthy agent picks up the infection regardless of which slot
        // it occupies.
        assert_eq!(
            rules.find_match(Healthy, Infected),
            Some((UnknowinglyInfected, Infected))
        );
        assert_eq!(
            rules.find_match(Infected, Healthy),
            Some((Infected, UnknowinglyInfected))
        );
    }

    #[test]
    fn no_match_is_none() {
        let mut rules = RuleSet::new();
        rules.add_rule(TransitionRule::new(
            Healthy,
            Infected,
            UnknowinglyInfected,
            Infected,
        ));

        assert_eq!(rules.find_match(Healthy, Healthy), None);
        assert_eq!(rules.find_match(Immune, Infected), None);
        assert_eq!(RuleSet::new().find_match(Healthy, Infected), None);
    }

    #[test]
    fn first_match_wins() {
        let mut rules = RuleSet::new();
        rules.add_rule(TransitionRule::new(Infected, Infected, Infected, Deceased));
        rules.add_rule(TransitionRule::new(Infected, Infected, Deceased, Deceased));

        // Only the earlier-inserted rule fires.
        assert_eq!(
            rules.find_match(Infected, Infected),
            Some((Infected, Deceased))
        );
    }

    #[test]
    fn first_match_wins_across_argument_orders() {
        let mut rules = RuleSet::new();
        rules.add_rule(TransitionRule::new(Healthy, Cure, Immune, Cure));
        rules.add_rule(TransitionRule::new(Cure, Healthy, Deceased, Deceased));

        // The reversed form of the first rule beats the second rule.
        assert_eq!(rules.find_match(Cure, Healthy), Some((Cure, Immune)));
    }

    #[test]
    fn degenerate_pair_assigns_slots_in_rule_order() {
        let mut rules = RuleSet::new();
        rules.add_rule(TransitionRule::new(Infected, Infected, Infected, Deceased));

        let (out_a, out_b) = rules.find_match(Infected, Infected).unwrap();
        assert_eq!(out_a, Infected);
        assert_eq!(out_b, Deceased);
    }

    #[test]
    fn append_preserves_insertion_order() {
        let mut rules = RuleSet::new();
        assert!(rules.is_empty());
        rules.add_rule(TransitionRule::new(
            Healthy,
            Infected,
            UnknowinglyInfected,
            Infected,
        ));
        rules.add_rule(TransitionRule::new(Infected, Infected, Infected, Deceased));

        assert_eq!(rules.len(), 2);
        assert_eq!(rules.rules()[0].input1, Healthy);
        assert_eq!(rules.rules()[1].input1, Infected);
    }
}
