//! Focused listing of a single category

use super::aggregator::{category_title, RenderedMenu};
use crate::domain::entities::navigation::command_selection_id;
use crate::domain::entities::{NavigationPayload, Row};

/// Render the sub-menu of `category`.
///
/// `commands` must already be sorted and the category must exist in the
/// caller's aggregation; no existence check happens here.
pub fn build_sub_menu(category: &str, commands: &[String], prefix: &str, footer: &str, menu_command: &str) -> RenderedMenu {
    let title = category_title(category);

    let mut text = format!("*{}*\n\n", title);
    for name in commands {
        text.push_str(&format!("• {}{}\n", prefix, name));
    }
    text.push_str(&format!("\n*Total Commands*: {}", commands.len()));

    let mut rows: Vec<Row> = commands
        .iter()
        .map(|name| {
            let id = command_selection_id(prefix, name);
            Row::new(id.clone(), id, format!("Execute {} command", name))
        })
        .collect();
    rows.push(Row::new(
        "🔙 Back to Main Menu",
        command_selection_id(prefix, menu_command),
        "Return to main menu",
    ));

    let navigation = NavigationPayload::new(title, footer, "Select a Command")
        .with_section("Available Commands", rows);

    RenderedMenu { text, navigation }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_commands_with_count_and_back_row() {
        let commands = vec!["gmt".to_string(), "time".to_string()];
        let menu = build_sub_menu("utility", &commands, ".", "MERCEDES BOT", "meu");

        assert!(menu.text.starts_with("*🧮 ᴜᴛɪʟɪᴛʏ ᴍᴇɴᴜ*\n\n"));
        assert!(menu.text.contains("• .gmt\n• .time\n"));
        assert!(menu.text.ends_with("*Total Commands*: 2"));

        let rows: Vec<&Row> = menu.navigation.rows().collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].row_id, ".gmt");
        assert_eq!(rows[1].description, "Execute time command");
        assert_eq!(rows[2].row_id, ".meu");
        assert_eq!(rows.iter().filter(|r| r.title.contains("Back")).count(), 1);
        assert_eq!(menu.navigation.footer, "MERCEDES BOT");
    }
}
