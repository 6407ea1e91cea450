use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Screen {
    Search,
    Results,
    Details,
    Nav,
}

impl Screen {
    pub const ALL: [Screen; 4] = [Screen::Search, Screen::Results, Screen::Details, Screen::Nav];

    fn index(self) -> usize {
        match self {
            Screen::Search => 0,
            Screen::Results => 1,
            Screen::Details => 2,
            Screen::Nav => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Screen::Search => "search",
            Screen::Results => "results",
            Screen::Details => "details",
            Screen::Nav => "nav",
        }
    }

    /// Target of the unconditional backward transition, if any.
    pub fn previous(self) -> Option<Screen> {
        match self {
            Screen::Search => None,
            Screen::Results => Some(Screen::Search),
            Screen::Details => Some(Screen::Results),
            Screen::Nav => Some(Screen::Details),
        }
    }
}

/// Four mutually exclusive screens; exactly one is visible at any time.
///
/// There is no terminal state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewController {
    active: Screen,
    visible: [bool; 4],
}

impl Default for ViewController {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewController {
    pub fn new() -> Self {
        let mut vc = Self {
            active: Screen::Search,
            visible: [false; 4],
        };
        vc.show(Screen::Search);
        vc
    }

    pub fn active(&self) -> Screen {
        self.active
    }

    /// Hides every screen, then shows `screen`. Showing the active screen
    /// again goes through the same steps.
    pub fn show(&mut self, screen: Screen) {
        self.visible = [false; 4];
        self.visible[screen.index()] = true;
        self.active = screen;
    }

    pub fn is_visible(&self, screen: Screen) -> bool {
        self.visible[screen.index()]
    }

    pub fn visible_screens(&self) -> Vec<Screen> {
        Screen::ALL
            .into_iter()
            .filter(|s| self.is_visible(*s))
            .collect()
    }
}
