use crate::consts::MAX_DICE;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{Display, EnumIter, EnumString, IntoStaticStr};

/// Number of scoreable categories on a sheet.
pub const CATEGORY_COUNT: usize = 13;

/// The 13 categories of a Yam's sheet, in display order.
///
/// The camelCase key (`"threeKind"`, `"smallStr"`, ...) is the stable
/// identifier used in every persisted and exported document.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    EnumIter,
    EnumString,
    Display,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "camelCase", ascii_case_insensitive)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    Ones,
    Twos,
    Threes,
    Fours,
    Fives,
    Sixes,
    ThreeKind,
    FourKind,
    FullHouse,
    SmallStr,
    LargeStr,
    Yahtzee,
    Chance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryKind {
    /// Legal values: `0, base, 2·base, ..., 5·base`.
    FixedMultiple { base: u32 },
    /// Legal values: `0` or `value`.
    FixedValue { value: u32 },
    /// Legal values: `0` or any integer in `[min, max]`.
    RangeOrZero { min: u32, max: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Upper,
    Lower,
}

impl CategoryKind {
    /// Every legal value in ascending order, when the set is finite.
    pub fn legal_values(&self) -> Option<Vec<u32>> {
        match *self {
            Self::FixedMultiple { base } => Some((0..=MAX_DICE).map(|k| k * base).collect()),
            Self::FixedValue { value } => Some(vec![0, value]),
            Self::RangeOrZero { .. } => None,
        }
    }

    pub fn max_value(&self) -> u32 {
        match *self {
            Self::FixedMultiple { base } => base * MAX_DICE,
            Self::FixedValue { value } => value,
            Self::RangeOrZero { max, .. } => max,
        }
    }
}

impl Category {
    pub fn all() -> impl Iterator<Item = Category> {
        Category::iter()
    }

    pub fn upper() -> impl Iterator<Item = Category> {
        Category::iter().filter(|c| c.section() == Section::Upper)
    }

    pub fn lower() -> impl Iterator<Item = Category> {
        Category::iter().filter(|c| c.section() == Section::Lower)
    }

    pub fn key(&self) -> &'static str {
        self.into()
    }

    pub fn kind(&self) -> CategoryKind {
        match self {
            Self::Ones => CategoryKind::FixedMultiple { base: 1 },
            Self::Twos => CategoryKind::FixedMultiple { base: 2 },
            Self::Threes => CategoryKind::FixedMultiple { base: 3 },
            Self::Fours => CategoryKind::FixedMultiple { base: 4 },
            Self::Fives => CategoryKind::FixedMultiple { base: 5 },
            Self::Sixes => CategoryKind::FixedMultiple { base: 6 },
            Self::FullHouse => CategoryKind::FixedValue { value: 25 },
            Self::SmallStr => CategoryKind::FixedValue { value: 30 },
            Self::LargeStr => CategoryKind::FixedValue { value: 40 },
            Self::Yahtzee => CategoryKind::FixedValue { value: 50 },
            Self::ThreeKind | Self::FourKind | Self::Chance => {
                CategoryKind::RangeOrZero { min: 5, max: 30 }
            }
        }
    }

    pub fn section(&self) -> Section {
        match self.kind() {
            CategoryKind::FixedMultiple { .. } => Section::Upper,
            _ => Section::Lower,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Ones => "1 ×",
            Self::Twos => "2 ×",
            Self::Threes => "3 ×",
            Self::Fours => "4 ×",
            Self::Fives => "5 ×",
            Self::Sixes => "6 ×",
            Self::ThreeKind => "Brelan",
            Self::FourKind => "Carré",
            Self::FullHouse => "Full",
            Self::SmallStr => "Petite suite",
            Self::LargeStr => "Grande suite",
            Self::Yahtzee => "Yam's",
            Self::Chance => "Chance",
        }
    }

    /// Short reminder of the legal values, shown next to the label.
    pub fn hint(&self) -> String {
        match self.kind() {
            CategoryKind::FixedMultiple { .. } => "multiples".to_string(),
            CategoryKind::FixedValue { value } => format!("0 ou {}", value),
            CategoryKind::RangeOrZero { min, max } => format!("0 ou [{}..{}]", min, max),
        }
    }
}
