//! The shoe is the table's card source: several decks worth of cards dealt
//! without replacement, with a cheap reshuffle reset.

use crate::card::{Card, Face, Suit, CARDS_IN_DECK};
use crate::error::BlackjackError;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// A shoe of `decks * 52` cards with an owned random generator.
///
/// Dealing performs one partial Fisher-Yates step per card: a uniformly
/// random card is chosen from the undealt partition and swapped to the
/// partition boundary. No card is ever physically removed, so dealing is
/// O(1) and the full sequence is reproducible for a fixed seed.
#[derive(Debug)]
pub struct Shoe {
    cards: Vec<Card>,
    dealt: usize,
    generator: StdRng,
}

impl Shoe {
    /// Associated function to create a new `Shoe` from a deck count and a
    /// seed. Fails if `decks` is zero.
    pub fn new(decks: usize, seed: u64) -> Result<Self, BlackjackError> {
        if decks < 1 {
            return Err(BlackjackError::InvalidDeckCount(decks));
        }
        let mut cards = Vec::with_capacity(decks * CARDS_IN_DECK);
        for suit in Suit::ALL {
            for face in Face::ALL {
                for _ in 0..decks {
                    cards.push(Card::new(face, suit));
                }
            }
        }
        Ok(Shoe {
            cards,
            dealt: 0,
            generator: StdRng::seed_from_u64(seed),
        })
    }

    /// Deals one card chosen uniformly at random from the undealt partition.
    /// Fails once every card in the shoe has been dealt.
    pub fn deal(&mut self) -> Result<Card, BlackjackError> {
        if self.dealt >= self.cards.len() {
            return Err(BlackjackError::ShoeExhausted);
        }
        let pick = self.generator.gen_range(self.dealt..self.cards.len());
        self.cards.swap(self.dealt, pick);
        let card = self.cards[self.dealt];
        self.dealt += 1;
        Ok(card)
    }

    /// Fraction [0.0, 1.0] of the shoe dealt since the last shuffle.
    pub fn penetration(&self) -> f32 {
        self.dealt as f32 / self.cards.len() as f32
    }

    /// Logically un-deals every card. The swap-per-deal already randomizes
    /// card positions, so resetting the boundary is all a reshuffle needs;
    /// subsequent deals draw fresh positions from the same random stream.
    pub fn shuffle(&mut self) {
        self.dealt = 0;
    }

    /// Total number of cards the shoe holds.
    pub fn size(&self) -> usize {
        self.cards.len()
    }
}
