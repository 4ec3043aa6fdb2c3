//! Playing card primitives. Suits carry no scoring weight in blackjack, they
//! exist for display and for building a full shoe.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of cards in a single standard deck.
pub const CARDS_IN_DECK: usize = 52;

/// Face of a playing card, from ace to king.
///
/// Aces are valued at 1 here; the conditional +10 "soft" bonus is a property
/// of a whole hand, not of the card itself. Ten, jack, queen and king share
/// the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Face {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Face {
    /// All thirteen faces in rank order.
    pub const ALL: [Face; 13] = [
        Face::Ace,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
        Face::Seven,
        Face::Eight,
        Face::Nine,
        Face::Ten,
        Face::Jack,
        Face::Queen,
        Face::King,
    ];

    /// Point value of the face. Aces return 1 but may count as 11 at the
    /// hand level.
    pub fn value(self) -> u8 {
        match self {
            Face::Ace => 1,
            Face::Two => 2,
            Face::Three => 3,
            Face::Four => 4,
            Face::Five => 5,
            Face::Six => 6,
            Face::Seven => 7,
            Face::Eight => 8,
            Face::Nine => 9,
            Face::Ten | Face::Jack | Face::Queen | Face::King => 10,
        }
    }

    /// Short symbol used when rendering a card, e.g. "A" or "10".
    pub fn symbol(self) -> &'static str {
        match self {
            Face::Ace => "A",
            Face::Two => "2",
            Face::Three => "3",
            Face::Four => "4",
            Face::Five => "5",
            Face::Six => "6",
            Face::Seven => "7",
            Face::Eight => "8",
            Face::Nine => "9",
            Face::Ten => "10",
            Face::Jack => "J",
            Face::Queen => "Q",
            Face::King => "K",
        }
    }
}

/// Suit of a playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    /// All four suits.
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    /// Unicode glyph for the suit.
    pub fn symbol(self) -> char {
        match self {
            Suit::Spades => '\u{2660}',
            Suit::Hearts => '\u{2665}',
            Suit::Clubs => '\u{2663}',
            Suit::Diamonds => '\u{2666}',
        }
    }
}

/// An immutable playing card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub face: Face,
    pub suit: Suit,
}

impl Card {
    pub fn new(face: Face, suit: Suit) -> Self {
        Card { face, suit }
    }

    /// Point value of the card, delegating to its face.
    pub fn value(self) -> u8 {
        self.face.value()
    }
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.face.symbol(), self.suit.symbol())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn face_values_follow_blackjack_rules() {
        assert_eq!(Face::Ace.value(), 1);
        assert_eq!(Face::Nine.value(), 9);
        for face in [Face::Ten, Face::Jack, Face::Queen, Face::King] {
            assert_eq!(face.value(), 10);
        }
    }

    #[test]
    fn deck_constant_matches_enums() {
        assert_eq!(Face::ALL.len() * Suit::ALL.len(), CARDS_IN_DECK);
    }

    #[test]
    fn card_displays_compactly() {
        let card = Card::new(Face::Ace, Suit::Spades);
        assert_eq!(card.to_string(), "A\u{2660}");
        let card = Card::new(Face::Ten, Suit::Hearts);
        assert_eq!(card.to_string(), "10\u{2665}");
    }
}
