//! Core library for simulating rounds of blackjack between automated agents
//! and a dealer. The two central pieces are the round engine
//! ([`table::BlackjackTable`]), which deals cards in the standard interleaved
//! order and settles results, and the event translator
//! ([`translate::EventTranslator`]), which reconstructs semantic round events
//! purely from the stream of raw deal notifications.

pub mod card;
pub mod error;
pub mod hand;
pub mod shoe;
pub mod strategy;
pub mod table;
pub mod translate;

pub mod prelude {
    pub use crate::card::{Card, Face, Suit};
    pub use crate::error::BlackjackError;
    pub use crate::hand::{Hand, MAXIMUM_SCORE};
    pub use crate::shoe::Shoe;
    pub use crate::strategy::{DealerStrategy, HitStrategy};
    pub use crate::table::{BlackjackTable, DealEvent, DealHook, Outcome, ParticipantId};
    pub use crate::translate::{BlackjackEvent, BlackjackObserver, EventTranslator, Translator};
}

pub use prelude::*;
