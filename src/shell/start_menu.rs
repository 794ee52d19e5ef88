// Start menu state: open flag, tab, search query

use serde::{Deserialize, Serialize};

use crate::launcher::AppCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StartTab {
    #[default]
    Pinned,
    All,
}

/// One tile in the start menu grid
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StartEntry {
    pub id: String,
    pub title: String,
    pub icon: String,
    /// Hidden from the desktop; shown greyed out here
    pub dimmed: bool,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct StartMenu {
    open: bool,
    tab: StartTab,
    query: String,
}

impl StartMenu {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn tab(&self) -> StartTab {
        self.tab
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    /// Open or close; either way the search box is cleared
    pub fn toggle(&mut self) -> bool {
        self.open = !self.open;
        self.query.clear();
        self.open
    }

    pub fn close(&mut self) -> bool {
        let was_open = self.open;
        self.open = false;
        self.query.clear();
        was_open
    }

    pub fn set_tab(&mut self, tab: StartTab) {
        self.tab = tab;
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Key press while the desktop has focus. Returns true if it was consumed.
    pub fn handle_key(&mut self, key: &str) -> bool {
        if key == "Meta" {
            self.toggle();
            return true;
        }
        if key == "Escape" && self.open {
            self.close();
            return true;
        }
        false
    }

    /// Tiles to show: search results when a query is set, otherwise the current tab
    pub fn entries(&self, catalog: &AppCatalog, hidden: &[String]) -> Vec<StartEntry> {
        let apps: Vec<_> = if !self.query.trim().is_empty() {
            catalog.search(&self.query)
        } else {
            match self.tab {
                StartTab::Pinned => catalog.pinned_apps().collect(),
                StartTab::All => catalog.start_menu_apps().collect(),
            }
        };

        apps.into_iter()
            .map(|app| StartEntry {
                id: app.id.clone(),
                title: app.title.clone(),
                icon: app.icon.clone(),
                dimmed: hidden.contains(&app.id),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_meta_toggles_and_clears_search() {
        let mut menu = StartMenu::new();
        assert!(menu.handle_key("Meta"));
        assert!(menu.is_open());
        menu.set_query("snake");
        assert!(menu.handle_key("Meta"));
        assert!(!menu.is_open());
        assert_eq!(menu.query(), "");
        assert!(!menu.handle_key("a"));
    }

    #[test]
    fn test_tabs_and_search() {
        let catalog = AppCatalog::builtin();
        let mut menu = StartMenu::new();
        assert_eq!(menu.entries(&catalog, &[]).len(), 6);

        menu.set_tab(StartTab::All);
        assert_eq!(menu.entries(&catalog, &[]).len(), catalog.start_menu_apps().count());

        menu.set_query("tetr");
        let ids: Vec<String> = menu.entries(&catalog, &[]).into_iter().map(|e| e.id).collect();
        assert_eq!(ids, vec!["tetris"]);
    }

    #[test]
    fn test_hidden_apps_are_dimmed_not_removed() {
        let catalog = AppCatalog::builtin();
        let menu = StartMenu::new();
        let hidden = vec!["contact".to_string()];
        let entries = menu.entries(&catalog, &hidden);
        let contact = entries.iter().find(|e| e.id == "contact").unwrap();
        assert!(contact.dimmed);
        assert!(entries.iter().filter(|e| e.id != "contact").all(|e| !e.dimmed));
    }
}
