use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::holes::{HoleLayout, HoleNumber};
use crate::player::{Player, PlayerId, Strokes};
use crate::round::{ConfigError, validate_roster};

/// Expected strokes on every hole. The course has no per-hole par table.
pub const PAR: Strokes = 3;

/// Strokes relative to par for a single hole.
pub fn to_par(strokes: Strokes) -> i64 {
    i64::from(strokes) - i64::from(PAR)
}

/// Score bucket for a single hole.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreClass {
    Ace,
    UnderPar,
    Par,
    Bogey,
    DoubleBogey,
    TripleOrWorse,
}

impl ScoreClass {
    /// Classify a recorded score. An ace wins over any par bucket.
    pub fn of(strokes: Strokes) -> Self {
        if strokes == 1 {
            return Self::Ace;
        }
        match to_par(strokes) {
            d if d < 0 => Self::UnderPar,
            0 => Self::Par,
            1 => Self::Bogey,
            2 => Self::DoubleBogey,
            _ => Self::TripleOrWorse,
        }
    }
}

/// Handicap-adjusted score relative to par.
///
/// Displays as `E` for even, `+n` over par and `-n` under par.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Differential(pub i64);

impl fmt::Display for Differential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            0 => f.write_str("E"),
            d if d > 0 => write!(f, "+{d}"),
            d => write!(f, "{d}"),
        }
    }
}

/// Result of summing a player's scores over a set of holes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeTotal {
    pub strokes: u64,
    pub holes_counted: u32,
    pub differential: Differential,
}

/// Predicate selecting which holes a total covers.
pub type HoleFilter<'a> = &'a dyn Fn(HoleNumber) -> bool;

/// Sum strokes over the holes passing `filter` (all holes when `None`).
///
/// With nothing counted the differential is just the handicap and the stroke
/// total is zero. Zero placeholders count as unplayed. Totals are 64-bit and
/// saturate instead of wrapping.
pub fn total_for_range(
    scores: &BTreeMap<HoleNumber, Strokes>,
    handicap: i32,
    filter: Option<HoleFilter<'_>>,
) -> RangeTotal {
    let (strokes, holes_counted) = scores
        .iter()
        .filter(|&(&hole, &s)| s > 0 && filter.is_none_or(|f| f(hole)))
        .fold((0u64, 0u32), |(sum, n), (_, &s)| {
            (sum.saturating_add(u64::from(s)), n + 1)
        });

    let par = i64::from(holes_counted) * i64::from(PAR);
    let differential = if holes_counted == 0 {
        i64::from(handicap)
    } else {
        i64::try_from(strokes)
            .unwrap_or(i64::MAX)
            .saturating_sub(par)
            .saturating_add(i64::from(handicap))
    };

    RangeTotal {
        strokes,
        holes_counted,
        differential: Differential(differential),
    }
}

/// True iff every player has a recorded score for `hole`. An empty card is
/// never complete.
pub fn is_hole_complete(hole: HoleNumber, players: &[Player]) -> bool {
    !players.is_empty() && players.iter().all(|p| p.has_score(hole))
}

/// A hole a player has not been scored on yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingScore {
    pub player_id: PlayerId,
    pub hole: HoleNumber,
}

/// Every `(player, hole)` gap across `holes`, in hole order then card order.
pub fn missing_scores(holes: &[HoleNumber], players: &[Player]) -> Vec<MissingScore> {
    holes
        .iter()
        .flat_map(|&hole| {
            players
                .iter()
                .filter(move |p| !p.has_score(hole))
                .map(move |p| MissingScore {
                    player_id: p.id,
                    hole,
                })
        })
        .collect()
}

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    /// 1-based rank. Tied players share a position.
    pub position: usize,
    pub player_id: PlayerId,
    pub name: String,
    pub total: RangeTotal,
}

/// Handicap-adjusted leaderboard: lowest differential first, then fewest
/// strokes. Players tied on both keep card order and share a position.
pub fn standings(players: &[Player], filter: Option<HoleFilter<'_>>) -> Vec<Standing> {
    let mut rows: Vec<(&Player, RangeTotal)> = players
        .iter()
        .map(|p| (p, total_for_range(&p.scores, p.handicap, filter)))
        .collect();
    rows.sort_by_key(|(_, t)| (t.differential, t.strokes));

    let mut out: Vec<Standing> = Vec::with_capacity(rows.len());
    for (i, (p, total)) in rows.into_iter().enumerate() {
        let position = match out.last() {
            Some(prev)
                if prev.total.differential == total.differential
                    && prev.total.strokes == total.strokes =>
            {
                prev.position
            },
            _ => i + 1,
        };
        out.push(Standing {
            position,
            player_id: p.id,
            name: p.name.clone(),
            total,
        });
    }
    out
}

/// Rejected score edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScoreError {
    /// Stroke counts start at 1.
    InvalidScore(Strokes),
    UnknownPlayer(PlayerId),
    HoleOutOfRange {
        hole: HoleNumber,
        total_holes: HoleNumber,
    },
    /// The round is closed and scores are frozen.
    RoundFinalized,
}

impl fmt::Display for ScoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidScore(v) => write!(f, "invalid score {v}: strokes must be at least 1"),
            Self::UnknownPlayer(id) => write!(f, "no player with id {id} on this card"),
            Self::HoleOutOfRange { hole, total_holes } => {
                write!(f, "hole {hole} is outside 1..={total_holes}")
            },
            Self::RoundFinalized => write!(f, "round is finalized; scores are frozen"),
        }
    }
}

impl std::error::Error for ScoreError {}

/// Per-hole strokes for every player on the card.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreLedger {
    layout: HoleLayout,
    players: Vec<Player>,
    frozen: bool,
}

impl ScoreLedger {
    pub fn new(layout: HoleLayout, players: Vec<Player>) -> Result<Self, ConfigError> {
        validate_roster(&players)?;
        Ok(Self {
            layout,
            players,
            frozen: false,
        })
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    pub fn player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    /// Record `value` strokes for `player_id` on `hole`, overwriting any
    /// earlier entry.
    pub fn set_score(
        &mut self,
        player_id: PlayerId,
        hole: HoleNumber,
        value: Strokes,
    ) -> Result<(), ScoreError> {
        if value < 1 {
            return Err(ScoreError::InvalidScore(value));
        }
        let player = self.editable(player_id, hole)?;
        let previous = player.scores.insert(hole, value);
        tracing::debug!(player_id, hole, value, ?previous, "score recorded");
        Ok(())
    }

    /// Remove a recorded score, leaving the hole unplayed for that player.
    pub fn clear_score(&mut self, player_id: PlayerId, hole: HoleNumber) -> Result<(), ScoreError> {
        let player = self.editable(player_id, hole)?;
        if player.scores.remove(&hole).is_some() {
            tracing::debug!(player_id, hole, "score cleared");
        }
        Ok(())
    }

    fn editable(&mut self, player_id: PlayerId, hole: HoleNumber) -> Result<&mut Player, ScoreError> {
        if self.frozen {
            return Err(ScoreError::RoundFinalized);
        }
        if !self.layout.contains(hole) {
            return Err(ScoreError::HoleOutOfRange {
                hole,
                total_holes: self.layout.total_holes(),
            });
        }
        self.players
            .iter_mut()
            .find(|p| p.id == player_id)
            .ok_or(ScoreError::UnknownPlayer(player_id))
    }

    pub fn is_hole_complete(&self, hole: HoleNumber) -> bool {
        is_hole_complete(hole, &self.players)
    }

    pub fn missing(&self, holes: &[HoleNumber]) -> Vec<MissingScore> {
        missing_scores(holes, &self.players)
    }

    /// Total for one player over the holes passing `filter`.
    pub fn total(&self, player_id: PlayerId, filter: Option<HoleFilter<'_>>) -> Option<RangeTotal> {
        self.player(player_id)
            .map(|p| total_for_range(&p.scores, p.handicap, filter))
    }

    pub fn standings(&self, filter: Option<HoleFilter<'_>>) -> Vec<Standing> {
        standings(&self.players, filter)
    }

    /// Stop accepting edits. Called once when the round is finalized.
    pub fn freeze(&mut self) {
        self.frozen = true;
    }

    pub fn is_frozen(&self) -> bool {
        self.frozen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{make_players, scored};

    fn ledger(n: usize) -> ScoreLedger {
        ScoreLedger::new(HoleLayout::new(18, 1).unwrap(), make_players(n)).unwrap()
    }

    #[test]
    fn empty_range_with_even_handicap() {
        let t = total_for_range(&BTreeMap::new(), 0, None);
        assert_eq!(t.strokes, 0);
        assert_eq!(t.differential.to_string(), "E");
    }

    #[test]
    fn empty_range_reports_raw_handicap() {
        assert_eq!(total_for_range(&BTreeMap::new(), 2, None).differential.to_string(), "+2");
        assert_eq!(total_for_range(&BTreeMap::new(), -3, None).differential.to_string(), "-3");
    }

    #[test]
    fn differential_adds_handicap() {
        // 3 holes, 10 strokes, par 9 => +1, handicap -2 => -1
        let scores = BTreeMap::from([(1, 3), (2, 4), (3, 3)]);
        let t = total_for_range(&scores, -2, None);
        assert_eq!(t.strokes, 10);
        assert_eq!(t.holes_counted, 3);
        assert_eq!(t.differential, Differential(-1));
        assert_eq!(t.differential.to_string(), "-1");
    }

    #[test]
    fn filter_limits_counted_holes() {
        let scores = BTreeMap::from([(1, 2), (2, 2), (10, 6)]);
        let front = total_for_range(&scores, 0, Some(&|h: HoleNumber| h <= 9));
        assert_eq!(front.strokes, 4);
        assert_eq!(front.differential.to_string(), "-2");
        let back = total_for_range(&scores, 0, Some(&|h: HoleNumber| h > 9));
        assert_eq!(back.differential.to_string(), "+3");
    }

    #[test]
    fn zero_placeholders_are_not_counted() {
        let scores = BTreeMap::from([(1, 0), (2, 3)]);
        let t = total_for_range(&scores, 0, None);
        assert_eq!(t.holes_counted, 1);
        assert_eq!(t.differential.to_string(), "E");
    }

    #[test]
    fn huge_stroke_counts_do_not_overflow() {
        let mut l = ledger(1);
        l.set_score(1, 1, 3_000_000_000).unwrap();
        l.set_score(1, 2, 3_000_000_000).unwrap();
        l.set_score(1, 3, u32::MAX).unwrap();
        let t = l.total(1, None).unwrap();
        let expected = 6_000_000_000u64 + u64::from(u32::MAX);
        assert_eq!(t.strokes, expected);
        assert_eq!(t.differential, Differential(expected as i64 - 9));
        assert_eq!(to_par(u32::MAX), i64::from(u32::MAX) - 3);
        assert_eq!(ScoreClass::of(3_000_000_000), ScoreClass::TripleOrWorse);
    }

    #[test]
    fn score_classes() {
        assert_eq!(ScoreClass::of(1), ScoreClass::Ace);
        assert_eq!(ScoreClass::of(2), ScoreClass::UnderPar);
        assert_eq!(ScoreClass::of(3), ScoreClass::Par);
        assert_eq!(ScoreClass::of(4), ScoreClass::Bogey);
        assert_eq!(ScoreClass::of(5), ScoreClass::DoubleBogey);
        assert_eq!(ScoreClass::of(9), ScoreClass::TripleOrWorse);
    }

    #[test]
    fn set_score_rejects_zero() {
        let mut l = ledger(1);
        assert_eq!(l.set_score(1, 1, 0), Err(ScoreError::InvalidScore(0)));
        assert!(!l.players()[0].has_score(1));
    }

    #[test]
    fn set_score_overwrites_and_is_idempotent() {
        let mut l = ledger(1);
        l.set_score(1, 1, 4).unwrap();
        l.set_score(1, 1, 4).unwrap();
        assert_eq!(l.players()[0].score(1), Some(4));
        l.set_score(1, 1, 1).unwrap();
        assert_eq!(l.players()[0].score(1), Some(1));
    }

    #[test]
    fn set_score_guards() {
        let mut l = ledger(2);
        assert_eq!(l.set_score(9, 1, 3), Err(ScoreError::UnknownPlayer(9)));
        assert_eq!(
            l.set_score(1, 19, 3),
            Err(ScoreError::HoleOutOfRange {
                hole: 19,
                total_holes: 18
            })
        );
        l.freeze();
        assert_eq!(l.set_score(1, 1, 3), Err(ScoreError::RoundFinalized));
        assert_eq!(l.clear_score(1, 1), Err(ScoreError::RoundFinalized));
    }

    #[test]
    fn clear_score_leaves_hole_unplayed() {
        let mut l = ledger(1);
        l.set_score(1, 2, 3).unwrap();
        l.clear_score(1, 2).unwrap();
        assert!(!l.players()[0].has_score(2));
    }

    #[test]
    fn hole_completeness() {
        let mut l = ledger(2);
        assert!(!l.is_hole_complete(1));
        l.set_score(1, 1, 3).unwrap();
        assert!(!l.is_hole_complete(1));
        l.set_score(2, 1, 2).unwrap();
        assert!(l.is_hole_complete(1));
        assert!(!is_hole_complete(1, &[]));
    }

    #[test]
    fn missing_scores_lists_gaps_in_hole_order() {
        let players = vec![scored(1, &[(1, 3)]), scored(2, &[(2, 3)])];
        let gaps = missing_scores(&[1, 2], &players);
        assert_eq!(
            gaps,
            vec![
                MissingScore { player_id: 2, hole: 1 },
                MissingScore { player_id: 1, hole: 2 },
            ]
        );
    }

    #[test]
    fn standings_rank_by_adjusted_differential() {
        let mut a = scored(1, &[(1, 3), (2, 3)]);
        a.handicap = 2;
        let b = scored(2, &[(1, 2), (2, 3)]);
        let c = scored(3, &[(1, 3), (2, 4)]);
        let rows = standings(&[a, b, c], None);
        let order: Vec<_> = rows.iter().map(|r| r.player_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
        assert_eq!(rows[0].total.differential.to_string(), "-1");
        assert_eq!(rows[2].total.differential.to_string(), "+2");
    }

    #[test]
    fn tied_standings_share_position() {
        let a = scored(1, &[(1, 3)]);
        let b = scored(2, &[(1, 3)]);
        let c = scored(3, &[(1, 4)]);
        let rows = standings(&[a, b, c], None);
        let positions: Vec<_> = rows.iter().map(|r| r.position).collect();
        assert_eq!(positions, vec![1, 1, 3]);
        assert_eq!(rows[0].player_id, 1);
    }
}
