use glyphon::FontSystem;

pub const DEFAULT_FAMILY: &str = "Monospace";
pub const DEFAULT_SIZE: f32 = 16.0;

/// Display typeface, always the regular face of `family`. Only the windowed
/// frontend renders with it; the terminal keeps whatever font the emulator
/// uses.
#[derive(Debug, Clone, PartialEq)]
pub struct FontSetting {
    pub family: String,
    pub size: f32,
}

impl Default for FontSetting {
    fn default() -> Self {
        Self {
            family: DEFAULT_FAMILY.to_string(),
            size: DEFAULT_SIZE,
        }
    }
}

impl FontSetting {
    pub fn new(family: impl Into<String>, size: f32) -> Self {
        Self {
            family: family.into(),
            size,
        }
    }

    /// Picking a family keeps the size.
    pub fn with_family(&self, family: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            size: self.size,
        }
    }
}

/// Every family name in the host font database, sorted and deduplicated.
pub fn system_font_families() -> Vec<String> {
    let font_system = FontSystem::new();
    let mut families: Vec<String> = font_system
        .db()
        .faces()
        .flat_map(|face| face.families.iter().map(|(name, _)| name.clone()))
        .collect();
    families.sort_by_key(|name| name.to_lowercase());
    families.dedup();
    log::debug!("found {} font families", families.len());
    families
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_family_keeps_size() {
        let current = FontSetting::new("Serif", 22.0);
        let next = current.with_family("Fira Code");
        assert_eq!(next, FontSetting::new("Fira Code", 22.0));
    }

    #[test]
    fn test_default_setting() {
        let font = FontSetting::default();
        assert_eq!(font.family, DEFAULT_FAMILY);
        assert_eq!(font.size, DEFAULT_SIZE);
    }
}
