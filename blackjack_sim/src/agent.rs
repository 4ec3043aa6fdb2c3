//! Weight-table blackjack agent. The weights are what an external optimizer
//! evolves; here the agent only consumes them as a hit policy.

use blackjack_core::{Hand, HitStrategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/* Hard scores reachable at a decision point: [4, 20] without an ace and
 * [2, 20] with at least one, 17 + 19 cases in total. */
pub const WEIGHT_COUNT: usize = 17 + 19;

#[derive(Debug, Error)]
#[error("agent weight table must hold {WEIGHT_COUNT} entries, got {0}")]
pub struct InvalidWeights(usize);

/// Serializable weight table, the agent's entire trainable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentWeights(pub Vec<i32>);

/// A player whose hit decision is a weighted coin flip keyed on its hand.
///
/// The weight for the current (hard score, has-ace) pair is compared against
/// a fresh uniform draw, so a weight near `i32::MAX` means "almost always
/// hit" and a non-positive weight means "never hit". Each agent owns its own
/// seeded generator, keeping concurrent tables independent.
pub struct WeightedAgent {
    weights: Vec<i32>,
    generator: StdRng,
}

impl WeightedAgent {
    /// Associated function to create an agent from a trained weight table.
    pub fn from_weights(weights: AgentWeights, seed: u64) -> Result<Self, InvalidWeights> {
        if weights.0.len() != WEIGHT_COUNT {
            return Err(InvalidWeights(weights.0.len()));
        }
        Ok(WeightedAgent {
            weights: weights.0,
            generator: StdRng::seed_from_u64(seed),
        })
    }

    /// Associated function to create an agent with uniformly random
    /// dispositions, the usual starting point for an optimizer.
    pub fn random(seed: u64) -> Self {
        let mut generator = StdRng::seed_from_u64(seed);
        let weights = (0..WEIGHT_COUNT)
            .map(|_| generator.gen_range(0..i32::MAX))
            .collect();
        WeightedAgent { weights, generator }
    }

    /// The agent's current weight table.
    pub fn weights(&self) -> AgentWeights {
        AgentWeights(self.weights.clone())
    }

    /* Maps the decidable hand states onto the weight table. Derived via
     * multiple linear regression over (has-ace, hard score). */
    fn index(hand: &Hand) -> usize {
        let ace = if hand.has_ace() { 1 } else { 0 };
        (hand.hard_score() as usize + 19 * ace) - 4
    }
}

impl HitStrategy for WeightedAgent {
    fn should_hit(&mut self, hand: &Hand) -> bool {
        self.weights[Self::index(hand)] > self.generator.gen_range(0..i32::MAX)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blackjack_core::{Card, Face, Suit};

    fn hand_of(faces: &[Face]) -> Hand {
        let mut hand = Hand::new();
        for &face in faces {
            hand.accept(Card::new(face, Suit::Spades));
        }
        hand
    }

    #[test]
    fn wrong_weight_count_is_rejected() {
        assert!(WeightedAgent::from_weights(AgentWeights(vec![0; 3]), 1).is_err());
    }

    #[test]
    fn extreme_weights_pin_the_decision() {
        let mut timid =
            WeightedAgent::from_weights(AgentWeights(vec![0; WEIGHT_COUNT]), 5).unwrap();
        let mut bold =
            WeightedAgent::from_weights(AgentWeights(vec![i32::MAX; WEIGHT_COUNT]), 5).unwrap();
        let hand = hand_of(&[Face::Five, Face::Seven]);
        for _ in 0..50 {
            assert!(!timid.should_hit(&hand));
            assert!(bold.should_hit(&hand));
        }
    }

    #[test]
    fn index_covers_the_decidable_hand_range() {
        // Lowest and highest states without an ace.
        assert_eq!(WeightedAgent::index(&hand_of(&[Face::Two, Face::Two])), 0);
        assert_eq!(
            WeightedAgent::index(&hand_of(&[Face::King, Face::Queen])),
            16
        );
        // Lowest and highest states with an ace.
        assert_eq!(WeightedAgent::index(&hand_of(&[Face::Ace, Face::Ace])), 17);
        assert_eq!(
            WeightedAgent::index(&hand_of(&[Face::Ace, Face::Nine, Face::King])),
            35
        );
    }

    #[test]
    fn weights_round_trip_through_json() {
        let agent = WeightedAgent::random(99);
        let json = serde_json::to_string(&agent.weights()).unwrap();
        let restored: AgentWeights = serde_json::from_str(&json).unwrap();
        let clone = WeightedAgent::from_weights(restored, 99).unwrap();
        assert_eq!(agent.weights().0, clone.weights().0);
    }

    #[test]
    fn fixed_seed_agents_decide_identically() {
        let mut a = WeightedAgent::random(7);
        let mut b = WeightedAgent::random(7);
        let hand = hand_of(&[Face::Eight, Face::Six]);
        for _ in 0..100 {
            assert_eq!(a.should_hit(&hand), b.should_hit(&hand));
        }
    }
}
