//! Level selection: maps a completed level to the one that follows.

use skyfire_core::enums::LevelId;

/// First level of a fresh run.
pub const FIRST_LEVEL: LevelId = LevelId::One;

/// The level after `completed`, or `None` when the campaign is over.
pub fn next_level(completed: LevelId) -> Option<LevelId> {
    match completed {
        LevelId::One => Some(LevelId::Two),
        LevelId::Two => Some(LevelId::Three),
        LevelId::Three => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_campaign_order() {
        let mut order = vec![FIRST_LEVEL];
        while let Some(next) = order.last().copied().and_then(next_level) {
            order.push(next);
        }
        assert_eq!(order, vec![LevelId::One, LevelId::Two, LevelId::Three]);
    }
}
