// Application launcher: the static table mapping app identifiers to window descriptors

pub mod content;

use serde::{Deserialize, Serialize};

pub use content::{ContentKind, ContentRegistry, GameKind};

/// Everything needed to open a window for an application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppDescriptor {
    pub id: String,
    pub title: String,
    pub icon: String,
    pub width: f64,
    pub height: f64,
    pub content: ContentKind,
    /// Shown as a desktop icon
    pub desktop: bool,
    /// Listed in the start menu
    pub start_menu: bool,
    /// Listed under the start menu's pinned tab
    pub pinned: bool,
}

impl AppDescriptor {
    pub fn new(id: &str, title: &str, icon: &str, size: (f64, f64), content: ContentKind) -> Self {
        Self {
            id: id.to_string(),
            title: title.to_string(),
            icon: icon.to_string(),
            width: size.0,
            height: size.1,
            content,
            desktop: false,
            start_menu: true,
            pinned: false,
        }
    }

    pub fn on_desktop(mut self) -> Self {
        self.desktop = true;
        self
    }

    pub fn pinned(mut self) -> Self {
        self.pinned = true;
        self
    }

    /// Reachable only programmatically (e.g. the properties sheet)
    pub fn unlisted(mut self) -> Self {
        self.start_menu = false;
        self
    }
}

/// Ordered, immutable set of app descriptors
#[derive(Debug, Clone, Default)]
pub struct AppCatalog {
    apps: Vec<AppDescriptor>,
}

impl AppCatalog {
    pub fn new(apps: Vec<AppDescriptor>) -> Self {
        Self { apps }
    }

    /// The portfolio shell's built-in applications
    pub fn builtin() -> Self {
        use ContentKind::*;

        let project_icon = "icons/project.png";
        Self::new(vec![
            AppDescriptor::new("about", "User Profile", "icons/profile.png", (450.0, 600.0), Profile)
                .on_desktop()
                .pinned(),
            AppDescriptor::new("projects", "File Manager", "icons/folder.png", (700.0, 450.0), Explorer)
                .on_desktop()
                .pinned(),
            AppDescriptor::new("skills", "System Monitor", "icons/monitor.png", (600.0, 450.0), Monitor)
                .on_desktop()
                .pinned(),
            AppDescriptor::new("contact", "Contact Me", "icons/mail.png", (400.0, 500.0), Contact)
                .on_desktop()
                .pinned(),
            AppDescriptor::new("terminal", "Terminal", "icons/console.png", (600.0, 350.0), Terminal)
                .on_desktop()
                .pinned(),
            AppDescriptor::new("settings", "Settings", "icons/settings.png", (750.0, 550.0), Settings)
                .on_desktop()
                .pinned(),
            AppDescriptor::new("properties", "Properties", "icons/info.png", (380.0, 460.0), Properties)
                .unlisted(),
            AppDescriptor::new("proj_helmet", "Smart Helmet", project_icon, (450.0, 500.0), Document),
            AppDescriptor::new("proj_capstone", "DiscountMate", project_icon, (450.0, 500.0), Document),
            AppDescriptor::new("proj_robot", "Patrolling Robot", project_icon, (450.0, 500.0), Document),
            AppDescriptor::new("proj_dev", "DevDeakin", project_icon, (450.0, 500.0), Document),
            AppDescriptor::new("snake", "Snake", "icons/snake.png", (420.0, 520.0), Game(GameKind::Snake)),
            AppDescriptor::new("game2048", "2048", "icons/2048.png", (420.0, 560.0), Game(GameKind::Game2048)),
            AppDescriptor::new("tetris", "Tetris", "icons/tetris.png", (460.0, 640.0), Game(GameKind::Tetris)),
            AppDescriptor::new("maze", "Maze", "icons/maze.png", (520.0, 600.0), Game(GameKind::Maze)),
            AppDescriptor::new("tictactoe", "Tic Tac Toe", "icons/tictactoe.png", (380.0, 480.0), Game(GameKind::TicTacToe)),
        ])
    }

    pub fn describe(&self, id: &str) -> Option<&AppDescriptor> {
        self.apps.iter().find(|app| app.id == id)
    }

    pub fn all(&self) -> &[AppDescriptor] {
        &self.apps
    }

    /// Identifiers that get a desktop icon, in catalog order
    pub fn desktop_ids(&self) -> Vec<String> {
        self.apps
            .iter()
            .filter(|app| app.desktop)
            .map(|app| app.id.clone())
            .collect()
    }

    pub fn start_menu_apps(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.apps.iter().filter(|app| app.start_menu)
    }

    pub fn pinned_apps(&self) -> impl Iterator<Item = &AppDescriptor> {
        self.start_menu_apps().filter(|app| app.pinned)
    }

    /// Case-insensitive title search over start menu entries
    pub fn search(&self, query: &str) -> Vec<&AppDescriptor> {
        let needle = query.trim().to_lowercase();
        self.start_menu_apps()
            .filter(|app| app.title.to_lowercase().contains(&needle))
            .collect()
    }
}
