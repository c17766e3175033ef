//! Keyword-based attribute extraction from item text.
//!
//! [`AttributeExtractor`] scores an item's title and description against
//! fixed keyword dictionaries and produces an [`ItemAttributes`] record:
//! named scores in `[0, 1]` grouped into colors, style vibes, occasions,
//! and seasons. Extraction is deterministic and never fails; text with no
//! matches yields all-zero scores.
//!
//! Records are immutable once computed. When an item's text is edited the
//! whole record is recomputed, never partially mutated.

use serde::{Deserialize, Serialize};

/// Score contribution of a single keyword match.
const MATCH_WEIGHT: f32 = 0.3;

/// Scores for the primary color palette.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ColorScores {
    pub black: f32,
    pub white: f32,
    pub red: f32,
    pub blue: f32,
    pub green: f32,
    pub yellow: f32,
    pub pink: f32,
    pub brown: f32,
    pub neutral: f32,
}

impl ColorScores {
    /// The scores paired with their attribute names, in schema order.
    pub fn named(&self) -> [(&'static str, f32); 9] {
        [
            ("black", self.black),
            ("white", self.white),
            ("red", self.red),
            ("blue", self.blue),
            ("green", self.green),
            ("yellow", self.yellow),
            ("pink", self.pink),
            ("brown", self.brown),
            ("neutral", self.neutral),
        ]
    }
}

/// Scores for style vibes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VibeScores {
    pub casual: f32,
    pub formal: f32,
    pub bohemian: f32,
    pub minimalist: f32,
    pub vintage: f32,
    pub streetwear: f32,
    pub romantic: f32,
    pub edgy: f32,
}

impl VibeScores {
    /// The scores paired with their attribute names, in schema order.
    pub fn named(&self) -> [(&'static str, f32); 8] {
        [
            ("casual", self.casual),
            ("formal", self.formal),
            ("bohemian", self.bohemian),
            ("minimalist", self.minimalist),
            ("vintage", self.vintage),
            ("streetwear", self.streetwear),
            ("romantic", self.romantic),
            ("edgy", self.edgy),
        ]
    }
}

/// Scores for wear occasions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OccasionScores {
    pub work: f32,
    pub party: f32,
    pub date: f32,
    pub casual: f32,
    pub formal: f32,
    pub vacation: f32,
}

impl OccasionScores {
    /// The scores paired with their attribute names, in schema order.
    pub fn named(&self) -> [(&'static str, f32); 6] {
        [
            ("work", self.work),
            ("party", self.party),
            ("date", self.date),
            ("casual", self.casual),
            ("formal", self.formal),
            ("vacation", self.vacation),
        ]
    }
}

/// Scores for seasonality.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SeasonScores {
    pub spring: f32,
    pub summer: f32,
    pub fall: f32,
    pub winter: f32,
}

impl SeasonScores {
    /// The scores paired with their attribute names, in schema order.
    pub fn named(&self) -> [(&'static str, f32); 4] {
        [
            ("spring", self.spring),
            ("summer", self.summer),
            ("fall", self.fall),
            ("winter", self.winter),
        ]
    }
}

/// The full attribute record computed for one item's text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemAttributes {
    /// Color palette scores.
    pub colors: ColorScores,
    /// Style vibe scores.
    pub vibes: VibeScores,
    /// Occasion scores.
    pub occasions: OccasionScores,
    /// Seasonality scores.
    pub seasons: SeasonScores,
}

impl ItemAttributes {
    /// Every score in the record, flattened in schema order.
    pub fn all_scores(&self) -> Vec<(&'static str, f32)> {
        let mut scores = Vec::with_capacity(27);
        scores.extend(self.colors.named());
        scores.extend(self.vibes.named());
        scores.extend(self.occasions.named());
        scores.extend(self.seasons.named());
        scores
    }
}

static BLACK_KEYWORDS: &[&str] = &["black", "noir", "onyx"];
static WHITE_KEYWORDS: &[&str] = &["white", "ivory", "cream"];
static RED_KEYWORDS: &[&str] = &["red", "crimson", "scarlet", "burgundy"];
static BLUE_KEYWORDS: &[&str] = &["blue", "navy", "cobalt", "denim"];
static GREEN_KEYWORDS: &[&str] = &["green", "olive", "emerald", "sage"];
static YELLOW_KEYWORDS: &[&str] = &["yellow", "mustard", "gold"];
static PINK_KEYWORDS: &[&str] = &["pink", "blush", "rose", "fuchsia"];
static BROWN_KEYWORDS: &[&str] = &["brown", "tan", "camel", "chocolate"];
static NEUTRAL_KEYWORDS: &[&str] = &["beige", "gray", "grey", "taupe", "neutral", "nude"];

static CASUAL_VIBE_KEYWORDS: &[&str] = &["casual", "everyday", "relaxed", "comfy"];
static FORMAL_VIBE_KEYWORDS: &[&str] =
    &["formal", "elegant", "evening", "gown", "tailored", "sophisticated"];
static BOHEMIAN_KEYWORDS: &[&str] = &["boho", "bohemian", "flowy", "paisley", "fringe"];
static MINIMALIST_KEYWORDS: &[&str] = &["minimal", "minimalist", "clean", "simple", "sleek"];
static VINTAGE_KEYWORDS: &[&str] = &["vintage", "retro", "classic", "antique"];
static STREETWEAR_KEYWORDS: &[&str] = &["street", "streetwear", "urban", "oversized", "graphic"];
static ROMANTIC_KEYWORDS: &[&str] = &["romantic", "floral", "lace", "ruffle", "feminine"];
static EDGY_KEYWORDS: &[&str] = &["edgy", "leather", "studded", "grunge", "bold"];

static WORK_KEYWORDS: &[&str] = &["work", "office", "business", "professional", "blazer"];
static PARTY_KEYWORDS: &[&str] = &["party", "evening", "cocktail", "night out", "celebration"];
static DATE_KEYWORDS: &[&str] = &["date", "dinner", "romantic"];
static CASUAL_OCCASION_KEYWORDS: &[&str] = &["casual", "weekend", "everyday", "brunch"];
static FORMAL_OCCASION_KEYWORDS: &[&str] = &["formal", "gala", "wedding", "black tie", "ceremony"];
static VACATION_KEYWORDS: &[&str] = &["vacation", "beach", "resort", "holiday", "travel"];

static SPRING_KEYWORDS: &[&str] = &["spring", "pastel"];
static SUMMER_KEYWORDS: &[&str] = &["summer", "sundress", "linen", "breezy", "shorts"];
static FALL_KEYWORDS: &[&str] = &["fall", "autumn", "cozy", "knit"];
static WINTER_KEYWORDS: &[&str] = &["winter", "wool", "coat", "sweater", "warm"];

/// Extracts an [`ItemAttributes`] record from free text.
#[derive(Debug, Clone, Copy, Default)]
pub struct AttributeExtractor;

impl AttributeExtractor {
    /// Create a new extractor.
    pub fn new() -> Self {
        Self
    }

    /// Score the given title and description against the keyword
    /// dictionaries.
    ///
    /// Missing input is treated as the empty string; the returned record
    /// is always fully populated with scores in `[0, 1]`.
    pub fn extract(&self, title: &str, description: &str) -> ItemAttributes {
        let text = format!("{title} {description}").to_lowercase();

        ItemAttributes {
            colors: ColorScores {
                black: keyword_score(&text, BLACK_KEYWORDS),
                white: keyword_score(&text, WHITE_KEYWORDS),
                red: keyword_score(&text, RED_KEYWORDS),
                blue: keyword_score(&text, BLUE_KEYWORDS),
                green: keyword_score(&text, GREEN_KEYWORDS),
                yellow: keyword_score(&text, YELLOW_KEYWORDS),
                pink: keyword_score(&text, PINK_KEYWORDS),
                brown: keyword_score(&text, BROWN_KEYWORDS),
                neutral: keyword_score(&text, NEUTRAL_KEYWORDS),
            },
            vibes: VibeScores {
                casual: keyword_score(&text, CASUAL_VIBE_KEYWORDS),
                formal: keyword_score(&text, FORMAL_VIBE_KEYWORDS),
                bohemian: keyword_score(&text, BOHEMIAN_KEYWORDS),
                minimalist: keyword_score(&text, MINIMALIST_KEYWORDS),
                vintage: keyword_score(&text, VINTAGE_KEYWORDS),
                streetwear: keyword_score(&text, STREETWEAR_KEYWORDS),
                romantic: keyword_score(&text, ROMANTIC_KEYWORDS),
                edgy: keyword_score(&text, EDGY_KEYWORDS),
            },
            occasions: OccasionScores {
                work: keyword_score(&text, WORK_KEYWORDS),
                party: keyword_score(&text, PARTY_KEYWORDS),
                date: keyword_score(&text, DATE_KEYWORDS),
                casual: keyword_score(&text, CASUAL_OCCASION_KEYWORDS),
                formal: keyword_score(&text, FORMAL_OCCASION_KEYWORDS),
                vacation: keyword_score(&text, VACATION_KEYWORDS),
            },
            seasons: SeasonScores {
                spring: keyword_score(&text, SPRING_KEYWORDS),
                summer: keyword_score(&text, SUMMER_KEYWORDS),
                fall: keyword_score(&text, FALL_KEYWORDS),
                winter: keyword_score(&text, WINTER_KEYWORDS),
            },
        }
    }
}

/// Score a lowercased text against one keyword list.
///
/// Each matching keyword contributes [`MATCH_WEIGHT`]; the total is
/// capped at 1.0.
fn keyword_score(text: &str, keywords: &[&str]) -> f32 {
    let matches = keywords.iter().filter(|kw| text.contains(*kw)).count();
    (matches as f32 * MATCH_WEIGHT).min(1.0)
}
