//! Rewrite styles, tones and the intensity scale.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Voice the humanizer writes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Tone {
    #[default]
    Neutral,
    Friendly,
    Professional,
    Confident,
}

impl Tone {
    pub const ALL: [Self; 4] = [
        Self::Neutral,
        Self::Friendly,
        Self::Professional,
        Self::Confident,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Neutral => "Neutral",
            Self::Friendly => "Friendly",
            Self::Professional => "Professional",
            Self::Confident => "Confident",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|tone| tone.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paraphrase strategies offered by the paraphrase action.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ParaphraseMode {
    Simpler,
    #[default]
    Balanced,
    Formal,
    Creative,
    Expand,
    Shorten,
}

impl ParaphraseMode {
    pub const ALL: [Self; 6] = [
        Self::Simpler,
        Self::Balanced,
        Self::Formal,
        Self::Creative,
        Self::Expand,
        Self::Shorten,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Simpler => "Simpler",
            Self::Balanced => "Balanced",
            Self::Formal => "Formal",
            Self::Creative => "Creative",
            Self::Expand => "Expand",
            Self::Shorten => "Shorten",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for ParaphraseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Layout of a generated summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SummaryFormat {
    #[default]
    Paragraph,
    BulletPoints,
}

impl SummaryFormat {
    pub const ALL: [Self; 2] = [Self::Paragraph, Self::BulletPoints];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Paragraph => "Paragraph",
            Self::BulletPoints => "Bullet Points",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "paragraph" => Some(Self::Paragraph),
            "bullet points" | "bullet_points" | "bullets" => Some(Self::BulletPoints),
            _ => None,
        }
    }
}

impl fmt::Display for SummaryFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Citation formatting standard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum CitationStyle {
    #[default]
    Apa,
    Mla,
    Chicago,
}

impl CitationStyle {
    pub const ALL: [Self; 3] = [Self::Apa, Self::Mla, Self::Chicago];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Apa => "APA",
            Self::Mla => "MLA",
            Self::Chicago => "Chicago",
        }
    }

    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for CitationStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What a transformer call is asked to do.
///
/// Displays as the bare tone or mode name (`Formal`, `Friendly`), which is
/// what prompts and history labels quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum RewriteStyle {
    Humanize(Tone),
    Paraphrase(ParaphraseMode),
    Proofread,
}

impl fmt::Display for RewriteStyle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Humanize(tone) => write!(f, "{tone}"),
            Self::Paraphrase(mode) => write!(f, "{mode}"),
            Self::Proofread => f.write_str("Proofread"),
        }
    }
}

/// Rewrite aggressiveness hint, always within `1..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Intensity(u8);

impl Intensity {
    pub const MIN: Self = Self(1);
    pub const MAX: Self = Self(100);
    /// Intensity used by actions that do not expose a level control.
    pub const DEFAULT: Self = Self(50);

    /// Build an intensity, rejecting values outside `1..=100`.
    pub fn new(value: u8) -> Option<Self> {
        (Self::MIN.0..=Self::MAX.0)
            .contains(&value)
            .then_some(Self(value))
    }

    /// Build an intensity, pinning out-of-range values to the nearest bound.
    pub fn clamped(value: i64) -> Self {
        let pinned = value.clamp(i64::from(Self::MIN.0), i64::from(Self::MAX.0));
        Self(u8::try_from(pinned).unwrap_or(Self::MAX.0))
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    /// Raise the intensity by `step`, saturating at the ceiling.
    pub fn escalate(self, step: u8) -> Self {
        Self(self.0.saturating_add(step).min(Self::MAX.0))
    }

    pub fn band(self) -> IntensityBand {
        match self.0 {
            0..=20 => IntensityBand::Subtle,
            21..=40 => IntensityBand::Natural,
            41..=60 => IntensityBand::Casual,
            61..=80 => IntensityBand::VeryHuman,
            _ => IntensityBand::Chaotic,
        }
    }

    /// Sampling temperature scaled from 0.5 at the floor to 1.0 at the ceiling.
    pub fn temperature(self) -> f32 {
        0.5 + f32::from(self.0) / 200.0
    }
}

impl Default for Intensity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<u8> for Intensity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value).ok_or_else(|| format!("intensity {value} is outside 1..=100"))
    }
}

impl From<Intensity> for u8 {
    fn from(value: Intensity) -> Self {
        value.0
    }
}

impl fmt::Display for Intensity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Persona bands the intensity scale is divided into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntensityBand {
    Subtle,
    Natural,
    Casual,
    VeryHuman,
    Chaotic,
}

impl IntensityBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Subtle => "Subtle",
            Self::Natural => "Natural",
            Self::Casual => "Casual",
            Self::VeryHuman => "Very Human",
            Self::Chaotic => "Chaotic Human",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intensity_bounds() {
        assert!(Intensity::new(0).is_none());
        assert!(Intensity::new(101).is_none());
        assert_eq!(Intensity::new(1), Some(Intensity::MIN));
        assert_eq!(Intensity::clamped(-4), Intensity::MIN);
        assert_eq!(Intensity::clamped(250), Intensity::MAX);
    }

    #[test]
    fn test_escalate_saturates_at_ceiling() {
        let start = Intensity::new(50).unwrap();
        let steps: Vec<u8> = std::iter::successors(Some(start), |i| Some(i.escalate(25)))
            .take(4)
            .map(Intensity::value)
            .collect();
        assert_eq!(steps, vec![50, 75, 100, 100]);
    }

    #[test]
    fn test_bands() {
        assert_eq!(Intensity::new(20).unwrap().band(), IntensityBand::Subtle);
        assert_eq!(Intensity::new(21).unwrap().band(), IntensityBand::Natural);
        assert_eq!(Intensity::new(60).unwrap().band(), IntensityBand::Casual);
        assert_eq!(Intensity::new(80).unwrap().band(), IntensityBand::VeryHuman);
        assert_eq!(Intensity::MAX.band(), IntensityBand::Chaotic);
    }

    #[test]
    fn test_temperature_scale() {
        assert!((Intensity::MAX.temperature() - 1.0).abs() < f32::EPSILON);
        assert!((Intensity::DEFAULT.temperature() - 0.75).abs() < f32::EPSILON);
    }

    #[test]
    fn test_style_display_is_bare_name() {
        assert_eq!(RewriteStyle::Paraphrase(ParaphraseMode::Formal).to_string(), "Formal");
        assert_eq!(RewriteStyle::Humanize(Tone::Friendly).to_string(), "Friendly");
    }

    #[test]
    fn test_parse_choices_case_insensitively() {
        assert_eq!(Tone::from_str("confident"), Some(Tone::Confident));
        assert_eq!(ParaphraseMode::from_str(" FORMAL "), Some(ParaphraseMode::Formal));
        assert_eq!(SummaryFormat::from_str("Bullet Points"), Some(SummaryFormat::BulletPoints));
        assert_eq!(CitationStyle::from_str("mla"), Some(CitationStyle::Mla));
        assert_eq!(Tone::from_str("sarcastic"), None);
    }
}
