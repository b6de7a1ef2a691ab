/// Fill colour for each of the five levels, indexed by level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    colors: [String; 5],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeName {
    #[default]
    Green,
    Halloween,
    Teal,
    Blue,
    Monochrome,
}

impl ThemeName {
    pub fn all() -> &'static [ThemeName] {
        &[
            ThemeName::Green,
            ThemeName::Halloween,
            ThemeName::Teal,
            ThemeName::Blue,
            ThemeName::Monochrome,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeName::Green => "green",
            ThemeName::Halloween => "halloween",
            ThemeName::Teal => "teal",
            ThemeName::Blue => "blue",
            ThemeName::Monochrome => "monochrome",
        }
    }

    fn palette(&self) -> [&'static str; 5] {
        match self {
            ThemeName::Green => ["#161b22", "#0e4429", "#006d32", "#26a641", "#39d353"],
            ThemeName::Halloween => ["#161b22", "#631c03", "#bd561d", "#fa7a18", "#fddf68"],
            ThemeName::Teal => ["#161b22", "#004444", "#006d6d", "#26a69a", "#39d3c4"],
            ThemeName::Blue => ["#161b22", "#0e2944", "#00326d", "#2641a6", "#3953d3"],
            ThemeName::Monochrome => ["#161b22", "#32373e", "#50555c", "#8c9198", "#c8cdd4"],
        }
    }
}

impl std::str::FromStr for ThemeName {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ThemeName::all()
            .iter()
            .copied()
            .find(|name| name.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or(())
    }
}

impl Theme {
    pub fn new(colors: [String; 5]) -> Self {
        Self { colors }
    }

    pub fn from_name(name: ThemeName) -> Self {
        Self::new(name.palette().map(str::to_string))
    }

    /// Preset lookup; unknown names fall back to the default green scale.
    pub fn named(name: &str) -> Self {
        Self::from_name(name.parse().unwrap_or_default())
    }

    /// Levels above 4 never occur in valid data; they are drawn as level 4.
    pub fn color(&self, level: u8) -> &str {
        &self.colors[usize::from(level.min(4))]
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(ThemeName::Green)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_dark_to_bright_green() {
        let theme = Theme::default();
        assert_eq!(theme.color(0), "#161b22");
        assert_eq!(theme.color(4), "#39d353");
    }

    #[test]
    fn named_lookup_is_case_insensitive_with_fallback() {
        assert_eq!(Theme::named("TEAL"), Theme::from_name(ThemeName::Teal));
        assert_eq!(Theme::named("sepia"), Theme::default());
    }

    #[test]
    fn every_preset_covers_all_levels() {
        for name in ThemeName::all() {
            let theme = Theme::from_name(*name);
            for level in 0..=4 {
                assert!(theme.color(level).starts_with('#'), "{}", name.as_str());
            }
        }
    }
}
