//! Menu handling module.
//!
//! Provides menu actions and parsing for the main menu and the article
//! list.

/// Main menu action representing the user's choice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    /// Add a website link.
    AddLink,
    /// Check all links for updates.
    CheckUpdates,
    /// List tracked links and pick one to read.
    ViewLinks,
    /// List saved articles.
    ViewSaved,
    /// Exit the program.
    Quit,
    /// Invalid or unknown action.
    Invalid(String),
}

impl MenuAction {
    /// All selectable actions, in display order.
    pub const ALL: [MenuAction; 5] = [
        MenuAction::AddLink,
        MenuAction::CheckUpdates,
        MenuAction::ViewLinks,
        MenuAction::ViewSaved,
        MenuAction::Quit,
    ];

    /// Parse a menu action from user input (case-insensitive).
    pub fn parse(input: &str) -> Self {
        let input = input.trim().to_uppercase();

        match input.as_str() {
            "A" | "1" => MenuAction::AddLink,
            "C" | "2" => MenuAction::CheckUpdates,
            "L" | "3" => MenuAction::ViewLinks,
            "S" | "4" => MenuAction::ViewSaved,
            "Q" | "5" => MenuAction::Quit,
            other => MenuAction::Invalid(other.to_string()),
        }
    }

    /// Get the menu key for this action.
    pub fn key(&self) -> &'static str {
        match self {
            MenuAction::AddLink => "A",
            MenuAction::CheckUpdates => "C",
            MenuAction::ViewLinks => "L",
            MenuAction::ViewSaved => "S",
            MenuAction::Quit => "Q",
            MenuAction::Invalid(_) => "",
        }
    }

    /// Get the menu label for this action.
    pub fn label(&self) -> &'static str {
        match self {
            MenuAction::AddLink => "Add a website link",
            MenuAction::CheckUpdates => "Check for updates",
            MenuAction::ViewLinks => "View saved links",
            MenuAction::ViewSaved => "View saved articles",
            MenuAction::Quit => "Exit",
            MenuAction::Invalid(_) => "",
        }
    }
}

/// Command entered while browsing an article list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListCommand {
    /// Move the cursor down one row.
    Down,
    /// Move the cursor up one row.
    Up,
    /// Move the cursor one page forward.
    PageDown,
    /// Move the cursor one page back.
    PageUp,
    /// Save or unsave the article under the cursor.
    ToggleSave,
    /// Leave the list.
    Back,
    /// Unrecognized input.
    Unknown,
}

impl ListCommand {
    /// Parse a list command. An empty line moves down.
    pub fn parse(input: &str) -> Self {
        match input.trim() {
            "" | "j" | "J" => ListCommand::Down,
            "k" | "K" => ListCommand::Up,
            "n" | "N" => ListCommand::PageDown,
            "p" | "P" => ListCommand::PageUp,
            "s" | "S" => ListCommand::ToggleSave,
            "q" | "Q" => ListCommand::Back,
            _ => ListCommand::Unknown,
        }
    }
}
