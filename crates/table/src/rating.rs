use crd_core::Position;

/// Expected score of a player rated `a` against one rated `b`.
pub fn expected(a: f32, b: f32) -> f32 {
    1.0 / (1.0 + 10f32.powf((b - a) / 400.0))
}

/// Pairwise rating update across the showdown field.
///
/// Every pair of contenders is scored as a match: winners take 1 against
/// each opponent, everyone else 0. Returns the refreshed rating per seat.
pub fn update(field: &[(Position, f32, bool)], k: f32) -> Vec<(Position, f32)> {
    field
        .iter()
        .map(|&(seat, elo, won)| {
            let delta: f32 = field
                .iter()
                .filter(|&&(other, _, _)| other != seat)
                .map(|&(_, rival, _)| {
                    let actual = if won { 1.0 } else { 0.0 };
                    k * (actual - expected(elo, rival))
                })
                .sum();
            (seat, elo + delta)
        })
        .collect()
}
