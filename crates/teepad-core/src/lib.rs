pub mod holes;
pub mod honor;
pub mod ledger;
pub mod player;
pub mod pot;
pub mod round;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers {
    use crate::holes::HoleNumber;
    use crate::player::{Player, PlayerId, Strokes};
    use crate::round::{Round, RoundConfig};

    /// Create `n` test players with sequential IDs starting at 1.
    pub fn make_players(n: usize) -> Vec<Player> {
        (0..n)
            .map(|i| {
                let mut p = Player::new(i as PlayerId + 1, format!("Player{}", i + 1));
                p.is_current_user = i == 0;
                p
            })
            .collect()
    }

    /// A player named after its id with the given `(hole, strokes)` entries.
    pub fn scored(id: PlayerId, scores: &[(HoleNumber, Strokes)]) -> Player {
        let mut p = Player::new(id, format!("Player{id}"));
        p.scores.extend(scores.iter().copied());
        p
    }

    /// Round config with no fees and honors on.
    pub fn round_config(total_holes: HoleNumber, starting_hole: HoleNumber) -> RoundConfig {
        RoundConfig {
            total_holes,
            starting_hole,
            ..RoundConfig::default()
        }
    }

    /// Create an open round. Panics on an invalid layout.
    pub fn make_round(total_holes: HoleNumber, starting_hole: HoleNumber) -> Round {
        Round::new(&round_config(total_holes, starting_hole)).expect("valid test round")
    }

    /// Give every player `strokes` on each of `holes`.
    pub fn fill_holes(players: &mut [Player], holes: &[HoleNumber], strokes: Strokes) {
        for p in players.iter_mut() {
            for &hole in holes {
                p.scores.insert(hole, strokes);
            }
        }
    }
}
