//! Groups registered commands by category and renders the top-level menu

use std::collections::BTreeMap;

use super::classifier::{glyph_for, normalize, stylize};
use crate::domain::entities::navigation::category_selection_id;
use crate::domain::entities::{CommandDescriptor, NavigationPayload, Row};

/// Commands grouped by category key, both levels sorted lexicographically
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuModel {
    categories: BTreeMap<String, Vec<String>>,
}

impl MenuModel {
    /// Aggregate every descriptor that has a category, a non-empty pattern
    /// and is not hidden from the menu. Categories that normalize to an
    /// empty key are skipped since no sub-menu command can serve them.
    pub fn aggregate<'a, I>(descriptors: I) -> Self
    where
        I: IntoIterator<Item = &'a CommandDescriptor>,
    {
        let mut categories: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for descriptor in descriptors {
            let Some(category) = descriptor.category.as_deref() else {
                continue;
            };
            if descriptor.suppress_from_menu || descriptor.pattern.is_empty() {
                continue;
            }
            let key = normalize(category);
            if key.is_empty() {
                continue;
            }
            categories
                .entry(key)
                .or_default()
                .push(descriptor.primary_name().to_string());
        }
        for names in categories.values_mut() {
            names.sort();
        }
        Self { categories }
    }

    /// Category keys in lexicographic order
    pub fn categories(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn commands(&self, category: &str) -> Option<&[String]> {
        self.categories.get(category).map(Vec::as_slice)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.categories
            .iter()
            .map(|(key, names)| (key.as_str(), names.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// Caller-supplied fields of the menu header; rendered verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MenuHeader {
    pub brand: String,
    pub user: String,
    pub runtime: String,
    pub mode: String,
    pub prefix: String,
    pub owner: String,
    pub plugins: usize,
    pub developer: String,
    pub version: String,
}

impl MenuHeader {
    pub fn render(&self) -> String {
        let line = |label: &str, value: &str| format!("*┃* {} : {}\n", stylize(label), value);

        let mut out = format!("\n*┏────〘 {} 〙───⊷*\n", stylize(&self.brand));
        out.push_str(&line("User", &format!("@{}", self.user)));
        out.push_str(&line("Runtime", &self.runtime));
        out.push_str(&line("Mode", &format!("*{}*", self.mode)));
        out.push_str(&line("Prefix", &format!("「 {} 」", self.prefix)));
        out.push_str(&line("Owner", &self.owner));
        out.push_str(&line("Plugins", &format!("『 {} 』", self.plugins)));
        out.push_str(&line("Dev", &stylize(&self.developer)));
        out.push_str(&line("Version", &self.version));
        out.push_str("*┗──────────────⊷*");
        out
    }
}

/// Menu text plus the navigation payload offered alongside it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMenu {
    pub text: String,
    pub navigation: NavigationPayload,
}

/// Heading used for a category in both the menu and its sub-menu
pub fn category_title(key: &str) -> String {
    format!("{} {} {}", glyph_for(key), stylize(key), stylize("Menu"))
}

/// Render the full menu for a registry snapshot.
///
/// Output depends only on the arguments: the same descriptors, prefix and
/// header always produce identical text and payload.
pub fn build_menu<'a, I>(descriptors: I, prefix: &str, header: &MenuHeader) -> RenderedMenu
where
    I: IntoIterator<Item = &'a CommandDescriptor>,
{
    let model = MenuModel::aggregate(descriptors);
    render_menu(&model, prefix, header)
}

pub fn render_menu(model: &MenuModel, prefix: &str, header: &MenuHeader) -> RenderedMenu {
    let mut text = header.render();
    let mut rows = Vec::with_capacity(model.len());

    for (key, names) in model.iter() {
        text.push_str(&format!("\n\n┏─『 {} 』──⊷\n", category_title(key)));
        for name in names {
            text.push_str(&format!("│ {}{}\n", prefix, name));
        }
        text.push_str("┗──────────────⊷");

        rows.push(Row::new(
            format!("{} {}", glyph_for(key), stylize(key)),
            category_selection_id(prefix, key),
            format!("{} {}", stylize(key), stylize("Menu")),
        ));
    }

    let title = format!("{} MENU", header.brand.to_uppercase());
    let navigation = NavigationPayload::new(title, "Select a category to explore commands", "Browse Categories")
        .with_section("Menu Navigation", rows);

    RenderedMenu { text, navigation }
}
