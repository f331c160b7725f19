use serde::{Deserialize, Serialize};

use crate::ledger::{Differential, total_for_range};
use crate::player::{Player, PlayerId};

/// Wager pots for a round, in minor currency units.
///
/// Amounts saturate at `u64::MAX` instead of wrapping.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pots {
    pub entry: u64,
    pub ace: u64,
}

impl Pots {
    /// Derive the pots from the players' opt-in flags and the round fees.
    pub fn calculate(players: &[Player], entry_fee_amount: u64, ace_pot_fee_amount: u64) -> Self {
        let entrants = players.iter().filter(|p| p.pays_entry).count() as u64;
        let ace_players = players.iter().filter(|p| p.pays_ace).count() as u64;
        Self {
            entry: entrants.saturating_mul(entry_fee_amount),
            ace: ace_players.saturating_mul(ace_pot_fee_amount),
        }
    }

    pub fn total(&self) -> u64 {
        self.entry.saturating_add(self.ace)
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Who is in line for each pot given the current scores.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PotWinners {
    /// Entry payers sharing the best handicap-adjusted differential.
    pub entry: Vec<PlayerId>,
    /// Ace-pot payers who threw an ace.
    pub ace: Vec<PlayerId>,
}

impl PotWinners {
    /// Eligibility from the current card only; settling the pots happens
    /// elsewhere. Entrants with no played hole are not in contention.
    pub fn determine(players: &[Player]) -> Self {
        let entrants: Vec<(PlayerId, Differential)> = players
            .iter()
            .filter(|p| p.pays_entry)
            .map(|p| (p.id, total_for_range(&p.scores, p.handicap, None)))
            .filter(|(_, t)| t.holes_counted > 0)
            .map(|(id, t)| (id, t.differential))
            .collect();
        let best = entrants.iter().map(|(_, d)| *d).min();
        let entry = entrants
            .iter()
            .filter(|(_, d)| Some(*d) == best)
            .map(|(id, _)| *id)
            .collect();

        let ace = players
            .iter()
            .filter(|p| p.pays_ace && p.has_ace())
            .map(|p| p.id)
            .collect();

        Self { entry, ace }
    }
}
