use crate::catalog::Category;
use crate::consts::{BONUS_THRESHOLD, BONUS_VALUE};
use crate::store::Scorecard;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    pub upper: u32,
    pub bonus: u32,
    pub lower: u32,
    pub total: u32,
}

pub fn bonus(upper: u32) -> u32 {
    if upper >= BONUS_THRESHOLD {
        BONUS_VALUE
    } else {
        0
    }
}

/// Points still missing in the upper section before the bonus is earned.
pub fn bonus_shortfall(upper: u32) -> u32 {
    BONUS_THRESHOLD.saturating_sub(upper)
}

fn section_sum(card: &Scorecard, cats: impl Iterator<Item = Category>) -> u32 {
    cats.map(|c| card.get(c).points())
        .fold(0u32, |acc, p| acc.saturating_add(p))
}

pub fn totals(card: &Scorecard) -> Totals {
    let upper = section_sum(card, Category::upper());
    let lower = section_sum(card, Category::lower());
    let bonus = bonus(upper);

    Totals {
        upper,
        bonus,
        lower,
        total: upper.saturating_add(bonus).saturating_add(lower),
    }
}

pub fn filled_count(card: &Scorecard) -> usize {
    card.filled_count()
}
