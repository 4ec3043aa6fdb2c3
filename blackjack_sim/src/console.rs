//! Console-facing collaborators: a text renderer for translated round
//! events and a prompt-driven hit policy for a human player.

use blackjack_core::{BlackjackObserver, Card, Hand, HitStrategy, ParticipantId};
use std::io::{self, BufRead, Stdout, Write};

/// Renders the translated event stream as one line per event.
///
/// The view learns which participant is the dealer from the hide-card
/// event, the first point at which the role is observable at all.
pub struct ConsoleView<W: Write = Stdout> {
    out: W,
    dealer: Option<ParticipantId>,
}

impl ConsoleView<Stdout> {
    pub fn stdout() -> Self {
        ConsoleView::with_writer(io::stdout())
    }
}

impl<W: Write> ConsoleView<W> {
    pub fn with_writer(out: W) -> Self {
        ConsoleView { out, dealer: None }
    }

    pub fn writer(&self) -> &W {
        &self.out
    }

    fn label(&self, participant: ParticipantId) -> String {
        if Some(participant) == self.dealer {
            "the dealer".to_string()
        } else {
            participant.to_string()
        }
    }
}

impl<W: Write> BlackjackObserver for ConsoleView<W> {
    fn round_start(&mut self) {
        let _ = writeln!(self.out, "A round of blackjack has begun.");
    }

    fn card_dealt(&mut self, participant: ParticipantId, card: Card) {
        let _ = writeln!(self.out, "{} is dealt: {}", self.label(participant), card);
    }

    fn dealer_hide_card(&mut self, dealer: ParticipantId) {
        self.dealer = Some(dealer);
        let _ = writeln!(self.out, "The dealer lays a card face down.");
    }

    fn dealer_reveal_card(&mut self, _dealer: ParticipantId, card: Card) {
        let _ = writeln!(self.out, "The dealer reveals: {}", card);
    }

    fn player_bust(&mut self, participant: ParticipantId) {
        let _ = writeln!(
            self.out,
            "BUST! {} is out of the round.",
            self.label(participant)
        );
    }

    fn player_blackjack(&mut self, participant: ParticipantId) {
        let _ = writeln!(
            self.out,
            "BLACKJACK! {} is out of the round.",
            self.label(participant)
        );
    }

    fn round_over(&mut self) {
        let _ = writeln!(self.out);
    }
}

/// Hit policy that defers the decision to a person at a terminal,
/// re-prompting until it reads `hit` or `stand`.
pub struct PromptStrategy<R: BufRead, W: Write> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> PromptStrategy<R, W> {
    pub fn new(input: R, output: W) -> Self {
        PromptStrategy { input, output }
    }
}

impl<R: BufRead, W: Write> HitStrategy for PromptStrategy<R, W> {
    fn should_hit(&mut self, hand: &Hand) -> bool {
        loop {
            let _ = write!(
                self.output,
                "Your hand: {} (soft {}, hard {}) - 'hit' or 'stand': ",
                hand.cards()
                    .iter()
                    .map(Card::to_string)
                    .collect::<Vec<_>>()
                    .join(" "),
                hand.soft_score(),
                hand.hard_score()
            );
            let _ = self.output.flush();

            let mut line = String::new();
            match self.input.read_line(&mut line) {
                Ok(0) | Err(_) => {
                    // Input is gone; standing ends the turn cleanly.
                    log::warn!("input closed mid-turn, standing");
                    return false;
                }
                Ok(_) => match line.trim().to_lowercase().as_str() {
                    "hit" => return true,
                    "stand" => return false,
                    _ => {
                        let _ = writeln!(self.output, "Invalid input - please try again.");
                    }
                },
            }
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use blackjack_core::{BlackjackTable, Face, Suit};

    #[test]
    fn view_labels_the_dealer_after_the_hide_event() {
        let view = ConsoleView::with_writer(Vec::new());
        let mut table = BlackjackTable::watched(1, 11, 1.0, view).unwrap();
        table.deal_in(Box::new(|_: &Hand| false));
        table.play_round().unwrap();

        let text = String::from_utf8(table.observer().writer().clone()).unwrap();
        assert!(text.starts_with("A round of blackjack has begun."));
        assert!(text.contains("The dealer lays a card face down."));
        assert!(text.contains("The dealer reveals: "));

        // Once the hide event names the dealer, later events use the label.
        let mut scratch = BlackjackTable::new(1, 0, 1.0).unwrap();
        let id = scratch.deal_in(Box::new(|_: &Hand| false));
        let mut view = ConsoleView::with_writer(Vec::new());
        view.dealer_hide_card(id);
        view.card_dealt(id, Card::new(Face::Ace, Suit::Spades));
        let text = String::from_utf8(view.out).unwrap();
        assert!(text.contains("the dealer is dealt: A\u{2660}"));
    }

    #[test]
    fn prompt_retries_until_a_keyword_arrives() {
        let input = io::Cursor::new(b"double\nHIT\n".to_vec());
        let mut prompt = PromptStrategy::new(input, Vec::new());
        let mut hand = Hand::new();
        hand.accept(Card::new(Face::Five, Suit::Clubs));
        hand.accept(Card::new(Face::Six, Suit::Clubs));
        assert!(prompt.should_hit(&hand));
        let text = String::from_utf8(prompt.output).unwrap();
        assert!(text.contains("Invalid input"));
    }

    #[test]
    fn prompt_stands_when_input_ends() {
        let input = io::Cursor::new(Vec::new());
        let mut prompt = PromptStrategy::new(input, Vec::new());
        let hand = Hand::new();
        assert!(!prompt.should_hit(&hand));
    }
}
