use serde::{Deserialize, Serialize};

/// Colors applied while a node is highlighted, and the text shown for a rule
/// the sheet does not define.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightStyle {
    pub phrase_background: String,
    pub phrase_color: String,
    pub range_background: String,
    pub missing_rule: String,
}

impl Default for HighlightStyle {
    fn default() -> Self {
        Self {
            phrase_background: "#ff0".to_string(),
            phrase_color: "#f00".to_string(),
            range_background: "#cfc".to_string(),
            missing_rule: "undefined".to_string(),
        }
    }
}

impl HighlightStyle {
    pub fn phrase(&self) -> InlineStyle {
        InlineStyle {
            background_color: Some(self.phrase_background.clone()),
            color: Some(self.phrase_color.clone()),
        }
    }

    pub fn range(&self) -> InlineStyle {
        InlineStyle {
            background_color: Some(self.range_background.clone()),
            color: None,
        }
    }
}

/// Inline style of one element. `None` means the property is unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct InlineStyle {
    pub background_color: Option<String>,
    pub color: Option<String>,
}

impl InlineStyle {
    pub fn is_empty(&self) -> bool {
        self.background_color.is_none() && self.color.is_none()
    }

    pub fn to_css(&self) -> String {
        let mut css = String::new();
        if let Some(background) = &self.background_color {
            css.push_str(&format!("background-color: {background};"));
        }
        if let Some(color) = &self.color {
            if !css.is_empty() {
                css.push(' ');
            }
            css.push_str(&format!("color: {color};"));
        }
        css
    }
}
