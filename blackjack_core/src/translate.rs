//! Reconstructs semantic round events from the flat stream of raw deal
//! notifications the engine produces.
//!
//! The engine is deliberately agnostic of observers: a [`DealEvent`] says
//! only "this participant was dealt this card". Round phase, dealer
//! identity and the hidden-card rule are all inferred here by counting
//! cards. The dealer is the `(N+1)`-th distinct recipient in first-card
//! order, where `N` is the seated player count; the `2(N+1)`-th card of a
//! round is the dealer's hidden card, suppressed from normal reporting
//! until the dealer's own turn begins.

use crate::card::Card;
use crate::table::{BlackjackTable, DealEvent, DealHook, ParticipantId};
use crate::error::BlackjackError;

/// Sink for the semantic events of a round, in the order they occur.
pub trait BlackjackObserver {
    /// A round has begun.
    fn round_start(&mut self);
    /// A participant was dealt a face-up card.
    fn card_dealt(&mut self, participant: ParticipantId, card: Card);
    /// The dealer dealt himself his second card face down.
    fn dealer_hide_card(&mut self, dealer: ParticipantId);
    /// The dealer turned over his face-down card. Emitted exactly once per
    /// round, before `round_over`, whether or not the dealer drew again.
    fn dealer_reveal_card(&mut self, dealer: ParticipantId, card: Card);
    /// A participant hit into a bust.
    fn player_bust(&mut self, participant: ParticipantId);
    /// A participant's hand reached 21.
    fn player_blackjack(&mut self, participant: ParticipantId);
    /// The round is over; results are readable from the table.
    fn round_over(&mut self);
}

/// Value form of the observer notifications, one variant per callback.
/// Produced by [`Translator`] so every transition's emissions can be
/// asserted on directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlackjackEvent {
    RoundStart,
    CardDealt(ParticipantId, Card),
    DealerHidesCard(ParticipantId),
    DealerRevealsCard(ParticipantId, Card),
    PlayerBust(ParticipantId),
    PlayerBlackjack(ParticipantId),
    RoundOver,
}

/// Round phase as inferred from the deal count alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Between rounds; the next deal starts a round.
    Idle,
    /// First card per participant; the dealer has not identified himself.
    FindDealer,
    /// Second card per participant; awaiting the dealer's hidden card.
    DealSecond,
    /// Players are acting; the dealer's second card is still concealed.
    AwaitDealerTurn,
    /// The hidden card is revealed; remaining cards are ordinary hits.
    PlayerTurns,
}

/// The counting automaton. Holds only transient per-round facts: cards
/// dealt so far, the participant count snapshot, the inferred dealer and
/// the concealed card.
pub struct Translator {
    phase: Phase,
    cards_dealt: usize,
    participants: usize,
    dealer: Option<ParticipantId>,
    hidden: Option<Card>,
    seen: Vec<ParticipantId>,
}

impl Default for Translator {
    fn default() -> Self {
        Translator::new()
    }
}

impl Translator {
    pub fn new() -> Self {
        Translator {
            phase: Phase::Idle,
            cards_dealt: 0,
            participants: 0,
            dealer: None,
            hidden: None,
            seen: Vec::new(),
        }
    }

    /// Advances the automaton by one deal notification, returning the
    /// semantic events it implies, in emission order.
    pub fn observe_deal(&mut self, deal: &DealEvent<'_>) -> Vec<BlackjackEvent> {
        self.cards_dealt += 1;
        let mut events = Vec::with_capacity(3);
        match self.phase {
            Phase::Idle => {
                // Participant count and dealer identity are structural facts
                // of this round, re-learned every round to survive reseating.
                self.participants = deal.seated + 1;
                self.seen.clear();
                events.push(BlackjackEvent::RoundStart);
                self.first_pass(deal, &mut events);
            }
            Phase::FindDealer => self.first_pass(deal, &mut events),
            Phase::DealSecond => {
                self.assert_known(deal.participant);
                self.second_pass(deal, &mut events);
            }
            Phase::AwaitDealerTurn => {
                self.assert_known(deal.participant);
                if Some(deal.participant) == self.dealer {
                    // The dealer's turn has begun; surface the concealed
                    // card before reporting the card he just drew.
                    let hidden = self.hidden.take().expect("hidden card recorded when dealt");
                    events.push(BlackjackEvent::DealerRevealsCard(deal.participant, hidden));
                    self.phase = Phase::PlayerTurns;
                }
                self.hit(deal, &mut events);
            }
            Phase::PlayerTurns => {
                self.assert_known(deal.participant);
                self.hit(deal, &mut events);
            }
        }
        events
    }

    /// Signals the end of the round. If the dealer never drew a third card
    /// (every player busted, or he stood pat on two) the hidden card is
    /// still owed to the observer and is revealed here.
    pub fn observe_round_over(&mut self) -> Vec<BlackjackEvent> {
        let mut events = Vec::with_capacity(2);
        if self.phase == Phase::AwaitDealerTurn {
            let dealer = self.dealer.expect("dealer identified before players acted");
            let hidden = self.hidden.take().expect("hidden card recorded when dealt");
            events.push(BlackjackEvent::DealerRevealsCard(dealer, hidden));
        }
        events.push(BlackjackEvent::RoundOver);
        self.phase = Phase::Idle;
        self.cards_dealt = 0;
        self.participants = 0;
        self.dealer = None;
        self.hidden = None;
        events
    }

    /* First card per participant. The recipient of the last card of the
     * pass has dealt to everyone else already: that is the dealer. */
    fn first_pass(&mut self, deal: &DealEvent<'_>, events: &mut Vec<BlackjackEvent>) {
        self.seen.push(deal.participant);
        events.push(BlackjackEvent::CardDealt(deal.participant, deal.card));
        if self.cards_dealt == self.participants {
            self.dealer = Some(deal.participant);
            self.phase = Phase::DealSecond;
        } else {
            self.phase = Phase::FindDealer;
        }
    }

    /* Second card per participant. The final card of the pass is the
     * dealer's, laid face down; with exactly two cards nobody can bust, so
     * only naturals are checked. */
    fn second_pass(&mut self, deal: &DealEvent<'_>, events: &mut Vec<BlackjackEvent>) {
        if self.cards_dealt == 2 * self.participants {
            debug_assert_eq!(Some(deal.participant), self.dealer);
            events.push(BlackjackEvent::DealerHidesCard(deal.participant));
            self.hidden = Some(deal.card);
            self.phase = Phase::AwaitDealerTurn;
        } else {
            events.push(BlackjackEvent::CardDealt(deal.participant, deal.card));
            if deal.hand.has_blackjack() {
                events.push(BlackjackEvent::PlayerBlackjack(deal.participant));
            }
        }
    }

    /* A hit during the turn phases: bust and blackjack are mutually
     * exclusive outcomes of the same hand state. */
    fn hit(&self, deal: &DealEvent<'_>, events: &mut Vec<BlackjackEvent>) {
        events.push(BlackjackEvent::CardDealt(deal.participant, deal.card));
        if deal.hand.has_busted() {
            events.push(BlackjackEvent::PlayerBust(deal.participant));
        } else if deal.hand.has_blackjack() {
            events.push(BlackjackEvent::PlayerBlackjack(deal.participant));
        }
    }

    fn assert_known(&self, participant: ParticipantId) {
        assert!(
            self.seen.contains(&participant),
            "{participant} was dealt a card but never appeared in the opening deal",
        );
    }
}

/// Decorator hook that drives a [`Translator`] and forwards its events to a
/// [`BlackjackObserver`]. Layer it on a table with
/// [`BlackjackTable::watched`] or [`BlackjackTable::with_hook`].
pub struct EventTranslator<O: BlackjackObserver> {
    automaton: Translator,
    observer: O,
}

impl<O: BlackjackObserver> EventTranslator<O> {
    pub fn new(observer: O) -> Self {
        EventTranslator {
            automaton: Translator::new(),
            observer,
        }
    }

    pub fn observer(&self) -> &O {
        &self.observer
    }

    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }
}

impl<O: BlackjackObserver> DealHook for EventTranslator<O> {
    fn card_dealt(&mut self, deal: DealEvent<'_>) {
        for event in self.automaton.observe_deal(&deal) {
            dispatch(&mut self.observer, event);
        }
    }

    fn round_over(&mut self) {
        for event in self.automaton.observe_round_over() {
            dispatch(&mut self.observer, event);
        }
    }
}

impl<O: BlackjackObserver> BlackjackTable<EventTranslator<O>> {
    /// Associated function to create a table observed through an event
    /// translator.
    pub fn watched(
        decks: usize,
        seed: u64,
        reshuffle_at: f32,
        observer: O,
    ) -> Result<Self, BlackjackError> {
        BlackjackTable::with_hook(decks, seed, reshuffle_at, EventTranslator::new(observer))
    }

    /// The observer the translator reports to.
    pub fn observer(&self) -> &O {
        self.hook().observer()
    }
}

fn dispatch<O: BlackjackObserver>(observer: &mut O, event: BlackjackEvent) {
    match event {
        BlackjackEvent::RoundStart => observer.round_start(),
        BlackjackEvent::CardDealt(p, c) => observer.card_dealt(p, c),
        BlackjackEvent::DealerHidesCard(d) => observer.dealer_hide_card(d),
        BlackjackEvent::DealerRevealsCard(d, c) => observer.dealer_reveal_card(d, c),
        BlackjackEvent::PlayerBust(p) => observer.player_bust(p),
        BlackjackEvent::PlayerBlackjack(p) => observer.player_blackjack(p),
        BlackjackEvent::RoundOver => observer.round_over(),
    }
}
