use thiserror::Error;

/// Errors surfaced by the core table components.
///
/// Configuration errors are fatal at construction or round start and are
/// never silently defaulted. Shoe exhaustion is fatal to the round that
/// triggered it; with a sane reshuffle threshold it should not occur.
#[derive(Debug, Error, PartialEq)]
pub enum BlackjackError {
    #[error("number of decks in the shoe must be at least one, got {0}")]
    InvalidDeckCount(usize),
    #[error("reshuffle penetration must lie within [0.0, 1.0], got {0}")]
    InvalidPenetration(f32),
    #[error("cannot play a round with no seated players")]
    EmptyTable,
    #[error("shoe has no cards left to deal")]
    ShoeExhausted,
}
