//! Hit-or-stand decision capability. The table consults a strategy once
//! between each card of a participant's turn; the decision is otherwise
//! opaque to the engine.

use crate::hand::Hand;

/// Decision procedure evaluated between each card of a turn.
///
/// Players supply their own implementation (a scripted policy, a trained
/// weight table, a human prompt); the dealer uses the fixed
/// [`DealerStrategy`]. Closures of type `FnMut(&Hand) -> bool` implement
/// this trait directly.
pub trait HitStrategy {
    fn should_hit(&mut self, hand: &Hand) -> bool;
}

impl<F: FnMut(&Hand) -> bool> HitStrategy for F {
    fn should_hit(&mut self, hand: &Hand) -> bool {
        self(hand)
    }
}

/* The dealer must hit below this soft score. */
const MINIMUM_DEALER_SCORE: u8 = 17;

/// Fixed house policy: hit while the soft score is below 17, stand on
/// soft 17.
#[derive(Debug, Default, Clone, Copy)]
pub struct DealerStrategy;

impl HitStrategy for DealerStrategy {
    fn should_hit(&mut self, hand: &Hand) -> bool {
        hand.soft_score() < MINIMUM_DEALER_SCORE
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::{Card, Face, Suit};

    fn hand_of(faces: &[Face]) -> Hand {
        let mut hand = Hand::new();
        for &face in faces {
            hand.accept(Card::new(face, Suit::Hearts));
        }
        hand
    }

    #[test]
    fn dealer_hits_below_seventeen() {
        let mut dealer = DealerStrategy;
        assert!(dealer.should_hit(&hand_of(&[Face::Ten, Face::Six])));
    }

    #[test]
    fn dealer_stands_on_soft_seventeen() {
        let mut dealer = DealerStrategy;
        assert!(!dealer.should_hit(&hand_of(&[Face::Ace, Face::Six])));
        assert!(!dealer.should_hit(&hand_of(&[Face::Ten, Face::Seven])));
    }

    #[test]
    fn closures_are_strategies() {
        let mut always_stand = |_: &Hand| false;
        assert!(!always_stand.should_hit(&hand_of(&[Face::Two, Face::Two])));
    }
}
