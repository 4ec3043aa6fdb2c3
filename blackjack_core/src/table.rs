//! The round engine: seating, the interleaved initial deal, hit/stand turns,
//! dealer play and settlement. Every card dealt is routed through a single
//! [`DealHook`] so an observer layer can be stacked on top without the engine
//! knowing anything about round phases.

use crate::error::BlackjackError;
use crate::hand::{Hand, MAXIMUM_SCORE};
use crate::shoe::Shoe;
use crate::strategy::{DealerStrategy, HitStrategy};
use crate::Card;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Opaque handle for one participant at a table. The dealer holds one too;
/// nothing about the handle itself reveals which participant it names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParticipantId(pub(crate) usize);

impl fmt::Display for ParticipantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P{}", self.0)
    }
}

/// Result of one round for one player, relative to the dealer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Win,
    Loss,
    #[default]
    Push,
}

impl Outcome {
    /// Numeric form: +1 win, -1 loss, 0 push.
    pub fn value(self) -> i32 {
        match self {
            Outcome::Win => 1,
            Outcome::Loss => -1,
            Outcome::Push => 0,
        }
    }
}

/// One raw deal notification, carrying no phase information. `hand` is the
/// recipient's hand after accepting the card; `seated` is the number of
/// seated players (dealer excluded), the same structural fact an external
/// caller could read from the results map.
pub struct DealEvent<'a> {
    pub participant: ParticipantId,
    pub card: Card,
    pub hand: &'a Hand,
    pub seated: usize,
}

/// Extension point invoked in-line for every card dealt and once at the end
/// of each round. The engine never tells the hook what phase the round is
/// in; a translator layered on top must infer that itself.
pub trait DealHook {
    fn card_dealt(&mut self, deal: DealEvent<'_>);
    fn round_over(&mut self);
}

/// No-op hook for a plain, unobserved table.
impl DealHook for () {
    fn card_dealt(&mut self, _deal: DealEvent<'_>) {}
    fn round_over(&mut self) {}
}

struct Seat {
    id: ParticipantId,
    hand: Hand,
    strategy: Box<dyn HitStrategy + Send>,
}

/// A blackjack table: one dealer, any number of seated players, a shoe, and
/// a persistent per-player results map.
///
/// The table is single-owner and synchronous; concurrent simulations must
/// each own their own table so every shoe advances its random stream only
/// through its own deal order.
pub struct BlackjackTable<H: DealHook = ()> {
    shoe: Shoe,
    reshuffle_at: f32,
    dealer_id: ParticipantId,
    dealer_hand: Hand,
    dealer_strategy: DealerStrategy,
    seats: Vec<Seat>,
    results: HashMap<ParticipantId, Outcome>,
    next_id: usize,
    hook: H,
}

impl BlackjackTable<()> {
    /// Associated function to create a plain table with no observer hook.
    /// `reshuffle_at` is the shoe penetration in [0.0, 1.0] at which the
    /// shoe reshuffles after a round.
    pub fn new(decks: usize, seed: u64, reshuffle_at: f32) -> Result<Self, BlackjackError> {
        Self::with_hook(decks, seed, reshuffle_at, ())
    }
}

impl<H: DealHook> BlackjackTable<H> {
    /// Associated function to create a table whose every deal is routed
    /// through `hook`.
    pub fn with_hook(
        decks: usize,
        seed: u64,
        reshuffle_at: f32,
        hook: H,
    ) -> Result<Self, BlackjackError> {
        if !(0.0..=1.0).contains(&reshuffle_at) {
            return Err(BlackjackError::InvalidPenetration(reshuffle_at));
        }
        let shoe = Shoe::new(decks, seed)?;
        Ok(BlackjackTable {
            shoe,
            reshuffle_at,
            dealer_id: ParticipantId(0),
            dealer_hand: Hand::new(),
            dealer_strategy: DealerStrategy,
            seats: Vec::new(),
            results: HashMap::new(),
            next_id: 1,
            hook,
        })
    }

    /// Seats a player, seeding their persistent result to a push. Returns
    /// the handle under which the player's results are keyed. Seating order
    /// is deal order.
    pub fn deal_in(&mut self, strategy: Box<dyn HitStrategy + Send>) -> ParticipantId {
        let id = ParticipantId(self.next_id);
        self.next_id += 1;
        self.seats.push(Seat {
            id,
            hand: Hand::new(),
            strategy,
        });
        self.results.insert(id, Outcome::Push);
        id
    }

    /// Number of seated players, dealer excluded.
    pub fn seated(&self) -> usize {
        self.seats.len()
    }

    /// Live read-only view of each player's most recent round outcome. The
    /// map object persists across rounds and is overwritten in place at
    /// every settlement; its key set always equals the seated player set.
    pub fn results(&self) -> &HashMap<ParticipantId, Outcome> {
        &self.results
    }

    /// Current shoe penetration.
    pub fn penetration(&self) -> f32 {
        self.shoe.penetration()
    }

    pub fn hook(&self) -> &H {
        &self.hook
    }

    pub fn hook_mut(&mut self) -> &mut H {
        &mut self.hook
    }

    /// Plays one full round: initial deal, player turns, dealer turn,
    /// settlement, reshuffle check and hand reset. Each call is one round;
    /// calling repeatedly plays successive rounds from the same shoe.
    pub fn play_round(&mut self) -> Result<(), BlackjackError> {
        if self.seats.is_empty() {
            return Err(BlackjackError::EmptyTable);
        }

        // Standard interleaved deal: one card to each player then one to the
        // dealer, the whole pass repeated so everyone holds two cards. The
        // dealer's second card is the hidden one by convention.
        for _pass in 0..2 {
            for index in 0..self.seats.len() {
                self.deal_to_seat(index)?;
            }
            self.deal_to_dealer()?;
        }

        // Player turns in seating order. A two-card natural never acts.
        for index in 0..self.seats.len() {
            if self.seats[index].hand.has_blackjack() {
                continue;
            }
            loop {
                let seat = &mut self.seats[index];
                if !seat.strategy.should_hit(&seat.hand) {
                    break;
                }
                self.deal_to_seat(index)?;
                let hand = &self.seats[index].hand;
                if hand.has_busted() || hand.soft_score() == MAXIMUM_SCORE {
                    break;
                }
            }
        }

        // The dealer only plays out his hand if somebody can still beat it.
        // A busted soft score is itself above 17, so the policy loop needs
        // no separate bust check.
        if self.seats.iter().any(|seat| !seat.hand.has_busted()) {
            while self.dealer_strategy.should_hit(&self.dealer_hand) {
                self.deal_to_dealer()?;
            }
        }

        for seat in &self.seats {
            let outcome = settle(&seat.hand, &self.dealer_hand);
            self.results.insert(seat.id, outcome);
        }
        log::debug!(
            "round settled, dealer soft score {}, shoe penetration {:.2}",
            self.dealer_hand.soft_score(),
            self.shoe.penetration()
        );

        if self.shoe.penetration() >= self.reshuffle_at {
            self.shoe.shuffle();
        }
        for seat in &mut self.seats {
            seat.hand.reset();
        }
        self.dealer_hand.reset();
        self.hook.round_over();
        Ok(())
    }

    fn deal_to_seat(&mut self, index: usize) -> Result<(), BlackjackError> {
        let seated = self.seats.len();
        let card = self.shoe.deal()?;
        self.seats[index].hand.accept(card);
        let seat = &self.seats[index];
        self.hook.card_dealt(DealEvent {
            participant: seat.id,
            card,
            hand: &seat.hand,
            seated,
        });
        Ok(())
    }

    fn deal_to_dealer(&mut self) -> Result<(), BlackjackError> {
        let seated = self.seats.len();
        let card = self.shoe.deal()?;
        self.dealer_hand.accept(card);
        self.hook.card_dealt(DealEvent {
            participant: self.dealer_id,
            card,
            hand: &self.dealer_hand,
            seated,
        });
        Ok(())
    }
}

/// Settles one player's hand against the dealer's. A busted player always
/// loses, even when the dealer busts as well; otherwise a dealer bust is a
/// win and equal soft scores push.
pub fn settle(player: &Hand, dealer: &Hand) -> Outcome {
    if player.has_busted() {
        return Outcome::Loss;
    }
    if dealer.has_busted() {
        return Outcome::Win;
    }
    match player.soft_score().cmp(&dealer.soft_score()) {
        std::cmp::Ordering::Greater => Outcome::Win,
        std::cmp::Ordering::Less => Outcome::Loss,
        std::cmp::Ordering::Equal => Outcome::Push,
    }
}
