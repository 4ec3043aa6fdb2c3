//! One participant's accumulated cards for the current round, with soft and
//! hard scoring derived on demand.

use crate::card::{Card, Face};

/// Maximum valid score; anything beyond is a bust.
pub const MAXIMUM_SCORE: u8 = 21;

/* An ace may be promoted from 1 to 11 when the hand can afford it. */
const ACE_BONUS: u8 = 10;

/// Cards received this round plus the running hard total.
///
/// A hand is created empty when its owner is seated, accumulates cards
/// through a round, and is reset (not replaced) between rounds.
#[derive(Debug, Default)]
pub struct Hand {
    cards: Vec<Card>,
    hard: u8,
    has_ace: bool,
}

impl Hand {
    pub fn new() -> Self {
        Hand::default()
    }

    /// Accepts a dealt card, updating the running totals.
    pub fn accept(&mut self, card: Card) {
        self.cards.push(card);
        self.hard += card.value();
        if card.face == Face::Ace {
            self.has_ace = true;
        }
    }

    /// Cards received this round, in deal order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Whether the hand contains at least one ace.
    pub fn has_ace(&self) -> bool {
        self.has_ace
    }

    /// Hand total counting every ace as 1.
    pub fn hard_score(&self) -> u8 {
        self.hard
    }

    /// Hand total treating one ace as 11 when that does not bust the hand.
    pub fn soft_score(&self) -> u8 {
        if self.has_ace {
            let promoted = self.hard + ACE_BONUS;
            if promoted <= MAXIMUM_SCORE {
                return promoted;
            }
        }
        self.hard
    }

    /// True if the hard total exceeds the maximum score.
    pub fn has_busted(&self) -> bool {
        self.hard > MAXIMUM_SCORE
    }

    /// True if the soft score is exactly 21. Only a two-card 21 is a
    /// "natural", but the predicate itself is score-based so it also flags
    /// a 21 reached by hitting.
    pub fn has_blackjack(&self) -> bool {
        self.soft_score() == MAXIMUM_SCORE
    }

    /// Clears the hand in place, ready for the next round.
    pub fn reset(&mut self) {
        self.cards.clear();
        self.hard = 0;
        self.has_ace = false;
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::card::{Face, Suit};

    fn card(face: Face) -> Card {
        Card::new(face, Suit::Clubs)
    }

    fn hand_of(faces: &[Face]) -> Hand {
        let mut hand = Hand::new();
        for &face in faces {
            hand.accept(card(face));
        }
        hand
    }

    #[test]
    fn soft_score_promotes_a_single_ace() {
        let hand = hand_of(&[Face::Ace, Face::Six]);
        assert_eq!(hand.hard_score(), 7);
        assert_eq!(hand.soft_score(), 17);
    }

    #[test]
    fn soft_score_declines_promotion_past_twenty_one() {
        let hand = hand_of(&[Face::Ace, Face::Six, Face::Nine]);
        assert_eq!(hand.hard_score(), 16);
        assert_eq!(hand.soft_score(), 16);
    }

    #[test]
    fn two_aces_promote_only_one() {
        let hand = hand_of(&[Face::Ace, Face::Ace]);
        assert_eq!(hand.hard_score(), 2);
        assert_eq!(hand.soft_score(), 12);
    }

    #[test]
    fn natural_twenty_one_is_blackjack_not_bust() {
        let hand = hand_of(&[Face::Ace, Face::King]);
        assert!(hand.has_blackjack());
        assert!(!hand.has_busted());
    }

    #[test]
    fn bust_and_blackjack_are_mutually_exclusive() {
        let hand = hand_of(&[Face::King, Face::Queen, Face::Five]);
        assert!(hand.has_busted());
        assert!(!hand.has_blackjack());
    }

    #[test]
    fn reset_clears_everything_in_place() {
        let mut hand = hand_of(&[Face::Ace, Face::King]);
        hand.reset();
        assert!(hand.cards().is_empty());
        assert_eq!(hand.hard_score(), 0);
        assert!(!hand.has_ace());
        assert!(!hand.has_blackjack());
    }

    #[test]
    fn insertion_order_is_preserved() {
        let hand = hand_of(&[Face::Ten, Face::Ace, Face::Four]);
        let faces: Vec<Face> = hand.cards().iter().map(|c| c.face).collect();
        assert_eq!(faces, vec![Face::Ten, Face::Ace, Face::Four]);
    }
}
