use std::fs;
use std::path::Path;

use anyhow::Context;
use mineboard_core::CellView;
use serde::{Deserialize, Serialize};

/// Glyphs used to draw each kind of cell, loaded from TOML.
///
/// Any field missing from the file keeps its default.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlyphTheme {
    pub closed: String,
    pub flag: String,
    pub mine: String,
    pub exploded: String,
    pub wrong_flag: String,
    /// Indexed by mine count, `counts[0]` is the empty cell.
    pub counts: [String; 9],
    pub separator: String,
}

impl GlyphTheme {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid glyph theme")
    }

    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("could not read theme {}", path.display()))?;
        let theme = Self::from_toml(&text)?;
        log::debug!("loaded theme from {}", path.display());
        Ok(theme)
    }

    pub fn glyph(&self, view: &CellView) -> &str {
        if view.is_open {
            return match (view.is_mine, view.mine_count) {
                (Some(true), _) => &self.exploded,
                (_, Some(count)) => self.count(count),
                _ => &self.closed,
            };
        }

        if view.is_wrong_flag() {
            &self.wrong_flag
        } else if view.is_flagged {
            &self.flag
        } else if view.is_mine == Some(true) {
            &self.mine
        } else {
            &self.closed
        }
    }

    fn count(&self, count: u8) -> &str {
        self.counts
            .get(usize::from(count))
            .map(String::as_str)
            .unwrap_or("?")
    }
}

impl Default for GlyphTheme {
    fn default() -> Self {
        Self {
            closed: "#".into(),
            flag: "F".into(),
            mine: "*".into(),
            exploded: "X".into(),
            wrong_flag: "x".into(),
            counts: [".", "1", "2", "3", "4", "5", "6", "7", "8"].map(String::from),
            separator: " ".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn view(is_open: bool, is_flagged: bool, is_mine: Option<bool>, count: Option<u8>) -> CellView {
        CellView {
            is_open,
            is_flagged,
            is_mine,
            mine_count: count,
        }
    }

    #[test]
    fn partial_theme_keeps_defaults() {
        let theme = GlyphTheme::from_toml("flag = \"!\"").unwrap();

        assert_eq!(theme.flag, "!");
        assert_eq!(theme.closed, GlyphTheme::default().closed);
        assert_eq!(theme.counts, GlyphTheme::default().counts);
    }

    #[test]
    fn bundled_emoji_theme_parses() {
        let theme = GlyphTheme::from_toml(include_str!("../themes/emoji.toml")).unwrap();

        assert_eq!(theme.mine, "💣");
        assert_eq!(theme.separator, "");
    }

    #[test]
    fn rejects_wrong_count_table() {
        assert!(GlyphTheme::from_toml("counts = [\"0\", \"1\"]").is_err());
    }

    #[test]
    fn picks_glyph_by_state() {
        let theme = GlyphTheme::default();

        assert_eq!(theme.glyph(&view(false, false, None, None)), "#");
        assert_eq!(theme.glyph(&view(false, true, None, None)), "F");
        assert_eq!(theme.glyph(&view(true, false, Some(false), Some(0))), ".");
        assert_eq!(theme.glyph(&view(true, false, Some(false), Some(3))), "3");
        assert_eq!(theme.glyph(&view(true, false, Some(true), None)), "X");
        assert_eq!(theme.glyph(&view(false, false, Some(true), None)), "*");
        assert_eq!(theme.glyph(&view(false, true, Some(false), None)), "x");
        assert_eq!(theme.glyph(&view(false, true, Some(true), None)), "F");
    }
}
