// src/mood.rs

use std::fmt;

/// Mood bucket for a score on the -10..=10 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Mood {
    Furious,
    Sad,
    Neutral,
    Happy,
    Ecstatic,
}

impl Mood {
    /// Buckets a score. Upper bounds are inclusive: -7 is Furious, 3 is Neutral.
    pub fn classify(score: i32) -> Mood {
        match score {
            s if s <= -7 => Mood::Furious,
            s if s <= -3 => Mood::Sad,
            s if s <= 3 => Mood::Neutral,
            s if s <= 7 => Mood::Happy,
            _ => Mood::Ecstatic,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Furious => "Furious",
            Mood::Sad => "Sad",
            Mood::Neutral => "Neutral",
            Mood::Happy => "Happy",
            Mood::Ecstatic => "Ecstatic",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Furious => "😡",
            Mood::Sad => "😢",
            Mood::Neutral => "😐",
            Mood::Happy => "🙂",
            Mood::Ecstatic => "😀",
        }
    }

    /// Position on the coarse 1..=5 input scale.
    pub fn level(self) -> u8 {
        match self {
            Mood::Furious => 1,
            Mood::Sad => 2,
            Mood::Neutral => 3,
            Mood::Happy => 4,
            Mood::Ecstatic => 5,
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.label())
    }
}

/// Maps a 1..=5 input level to the score that gets stored. Unknown levels store 0.
pub fn score_for_level(level: u8) -> i32 {
    match level {
        1 => -10,
        2 => -5,
        3 => 0,
        4 => 5,
        5 => 10,
        _ => 0,
    }
}

/// Maps a stored score back onto the 1..=5 input scale through `Mood::classify`.
pub fn level_for_score(score: i32) -> u8 {
    Mood::classify(score).level()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_exact() {
        assert_eq!(Mood::classify(-8), Mood::Furious);
        assert_eq!(Mood::classify(-7), Mood::Furious);
        assert_eq!(Mood::classify(-6), Mood::Sad);
        assert_eq!(Mood::classify(-3), Mood::Sad);
        assert_eq!(Mood::classify(-2), Mood::Neutral);
        assert_eq!(Mood::classify(3), Mood::Neutral);
        assert_eq!(Mood::classify(4), Mood::Happy);
        assert_eq!(Mood::classify(7), Mood::Happy);
        assert_eq!(Mood::classify(8), Mood::Ecstatic);
    }

    #[test]
    fn classification_is_monotonic() {
        let buckets: Vec<Mood> = (-15..=15).map(Mood::classify).collect();
        assert!(buckets.windows(2).all(|w| w[0] <= w[1]));
    }

    #[test]
    fn out_of_range_scores_still_classify() {
        assert_eq!(Mood::classify(i32::MIN), Mood::Furious);
        assert_eq!(Mood::classify(42), Mood::Ecstatic);
    }

    #[test]
    fn labels_and_emoji() {
        assert_eq!(Mood::Furious.label(), "Furious");
        assert_eq!(Mood::Ecstatic.emoji(), "😀");
        assert_eq!(Mood::Neutral.to_string(), "😐 Neutral");
    }

    #[test]
    fn levels_round_trip_through_scores() {
        for mood in [Mood::Furious, Mood::Sad, Mood::Neutral, Mood::Happy, Mood::Ecstatic] {
            assert_eq!(level_for_score(score_for_level(mood.level())), mood.level());
        }
        assert_eq!(score_for_level(3), 0);
        assert_eq!(score_for_level(0), 0);
        assert_eq!(score_for_level(9), 0);
    }

    #[test]
    fn fine_scores_land_on_asymmetric_levels() {
        assert_eq!(level_for_score(-7), 1);
        assert_eq!(level_for_score(-3), 2);
        assert_eq!(level_for_score(3), 3);
        assert_eq!(level_for_score(7), 4);
    }
}
