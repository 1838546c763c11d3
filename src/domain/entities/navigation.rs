use serde::{Deserialize, Serialize};

/// Suffix of every category navigation selection id
pub const CATEGORY_MENU_SUFFIX: &str = "-menu";

/// One selectable row of an interactive list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Row {
    pub title: String,
    pub row_id: String,
    pub description: String,
}

impl Row {
    pub fn new(title: impl Into<String>, row_id: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            row_id: row_id.into(),
            description: description.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub title: String,
    pub rows: Vec<Row>,
}

/// Structured list message consumed by the transport's selection UI
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavigationPayload {
    pub text: String,
    pub title: String,
    pub footer: String,
    pub button_text: String,
    pub sections: Vec<Section>,
}

impl NavigationPayload {
    pub fn new(title: impl Into<String>, footer: impl Into<String>, button_text: impl Into<String>) -> Self {
        let title = title.into();
        Self {
            text: title.clone(),
            title,
            footer: footer.into(),
            button_text: button_text.into(),
            sections: Vec::new(),
        }
    }

    /// Append a section; empty row sets are skipped
    pub fn with_section(mut self, title: impl Into<String>, rows: Vec<Row>) -> Self {
        if !rows.is_empty() {
            self.sections.push(Section { title: title.into(), rows });
        }
        self
    }

    pub fn rows(&self) -> impl Iterator<Item = &Row> {
        self.sections.iter().flat_map(|s| s.rows.iter())
    }
}

/// Selection id that opens the sub-menu of `category`
pub fn category_selection_id(prefix: &str, category: &str) -> String {
    format!("{}{}{}", prefix, category, CATEGORY_MENU_SUFFIX)
}

/// Selection id that runs `command` directly
pub fn command_selection_id(prefix: &str, command: &str) -> String {
    format!("{}{}", prefix, command)
}
