use crate::holes::HoleNumber;
use crate::player::Player;

/// Tee order for `view_hole`.
///
/// The best score on the previous hole in play order throws first; a missing
/// score sorts last. Ties fall back to cumulative strokes over the holes
/// already played this round, then to card order. On the opening hole, or
/// with honors switched off, the card order is returned unchanged.
pub fn honor_order<'a>(
    players: &'a [Player],
    view_hole: HoleNumber,
    starting_hole: HoleNumber,
    use_honor_system: bool,
    play_order: &[HoleNumber],
) -> Vec<&'a Player> {
    let mut order: Vec<&Player> = players.iter().collect();
    if !use_honor_system || view_hole == starting_hole {
        return order;
    }

    let Some(position) = play_order.iter().position(|&h| h == view_hole) else {
        tracing::warn!(view_hole, "view hole is not in the play order; keeping card order");
        return order;
    };
    if position == 0 {
        return order;
    }
    let played = &play_order[..position];
    let previous = played[position - 1];

    order.sort_by_key(|p| {
        let last = p.score(previous).unwrap_or(u32::MAX);
        let cumulative: u64 = played
            .iter()
            .filter_map(|&h| p.score(h))
            .map(u64::from)
            .sum();
        (last, cumulative)
    });
    order
}
