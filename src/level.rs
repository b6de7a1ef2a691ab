use serde::Deserialize;

/// Quantile bucket the provider assigns to each calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ContributionLevel {
    None,
    FirstQuartile,
    SecondQuartile,
    ThirdQuartile,
    FourthQuartile,
    #[serde(other)]
    Unknown,
}

impl ContributionLevel {
    pub fn ordinal(self) -> u8 {
        match self {
            ContributionLevel::FirstQuartile => 1,
            ContributionLevel::SecondQuartile => 2,
            ContributionLevel::ThirdQuartile => 3,
            ContributionLevel::FourthQuartile => 4,
            ContributionLevel::None | ContributionLevel::Unknown => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> ContributionLevel {
        serde_json::from_value(serde_json::Value::String(raw.to_string())).unwrap()
    }

    #[test]
    fn known_levels_map_to_ordinals() {
        assert_eq!(parse("NONE").ordinal(), 0);
        assert_eq!(parse("FIRST_QUARTILE").ordinal(), 1);
        assert_eq!(parse("SECOND_QUARTILE").ordinal(), 2);
        assert_eq!(parse("THIRD_QUARTILE").ordinal(), 3);
        assert_eq!(parse("FOURTH_QUARTILE").ordinal(), 4);
    }

    #[test]
    fn unrecognized_level_maps_to_zero() {
        assert_eq!(parse("FIFTH_QUARTILE"), ContributionLevel::Unknown);
        assert_eq!(parse("fourth_quartile").ordinal(), 0);
    }
}
