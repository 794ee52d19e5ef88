// Content kinds a window can host, and the render table the application layer fills in

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::state::window::WindowRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GameKind {
    Snake,
    Game2048,
    Tetris,
    Maze,
    TicTacToe,
}

impl GameKind {
    /// Preference key the game's best score is stored under
    pub fn score_key(&self) -> &'static str {
        match self {
            GameKind::Snake => "snakeHighScore",
            GameKind::Game2048 => "2048HighScore",
            GameKind::Tetris => "tetrisHighScore",
            GameKind::Maze => "mazeBestScore",
            GameKind::TicTacToe => "tictactoeWins",
        }
    }
}

/// Which renderer gets mounted inside a window frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", content = "game", rename_all = "kebab-case")]
pub enum ContentKind {
    Profile,
    Contact,
    Monitor,
    Explorer,
    Terminal,
    Settings,
    Properties,
    /// Static page (project write-ups and similar)
    Document,
    Game(GameKind),
}

type RenderFn<R> = Box<dyn Fn(&WindowRecord) -> R + Send + Sync>;

/// Maps content kinds to render functions.
///
/// The window manager only knows the closed set of kinds; what a kind looks
/// like is registered by whoever embeds the desktop.
pub struct ContentRegistry<R> {
    renderers: HashMap<ContentKind, RenderFn<R>>,
}

impl<R> ContentRegistry<R> {
    pub fn new() -> Self {
        Self {
            renderers: HashMap::new(),
        }
    }

    /// Register (or replace) the renderer for a kind
    pub fn register<F>(&mut self, kind: ContentKind, render: F)
    where
        F: Fn(&WindowRecord) -> R + Send + Sync + 'static,
    {
        self.renderers.insert(kind, Box::new(render));
    }

    pub fn is_registered(&self, kind: ContentKind) -> bool {
        self.renderers.contains_key(&kind)
    }

    /// Render a window's body. `None` when nothing is registered for its kind.
    pub fn render(&self, window: &WindowRecord) -> Option<R> {
        self.renderers.get(&window.content).map(|render| render(window))
    }
}

impl<R> Default for ContentRegistry<R> {
    fn default() -> Self {
        Self::new()
    }
}
