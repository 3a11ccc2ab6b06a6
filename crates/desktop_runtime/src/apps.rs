//! Application catalog consumed by the window manager's `open` operation.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppId {
    Explorer,
    Minesweeper,
    Solitaire,
    Notepad,
    DisplayProperties,
}

impl AppId {
    /// Stable identifier stored on application-shortcut items.
    pub fn canonical_id(self) -> &'static str {
        match self {
            Self::Explorer => "explorer",
            Self::Minesweeper => "minesweeper",
            Self::Solitaire => "solitaire",
            Self::Notepad => "notepad",
            Self::DisplayProperties => "display_properties",
        }
    }

    pub fn from_canonical(raw: &str) -> Option<Self> {
        app_registry()
            .iter()
            .map(|entry| entry.app_id)
            .find(|app_id| app_id.canonical_id() == raw.trim())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AppDescriptor {
    pub app_id: AppId,
    pub title: &'static str,
    pub icon: &'static str,
    pub preferred_width: Option<i32>,
    pub preferred_height: Option<i32>,
    pub resizable: bool,
    pub show_in_start_menu: bool,
}

const APP_REGISTRY: [AppDescriptor; 5] = [
    AppDescriptor {
        app_id: AppId::Explorer,
        title: "File Explorer",
        icon: "📂",
        preferred_width: Some(600),
        preferred_height: Some(400),
        resizable: true,
        show_in_start_menu: true,
    },
    AppDescriptor {
        app_id: AppId::Minesweeper,
        title: "Minesweeper",
        icon: "💣",
        preferred_width: Some(300),
        preferred_height: Some(350),
        resizable: true,
        show_in_start_menu: true,
    },
    AppDescriptor {
        app_id: AppId::Solitaire,
        title: "Solitaire",
        icon: "🃏",
        preferred_width: Some(600),
        preferred_height: Some(450),
        resizable: true,
        show_in_start_menu: true,
    },
    AppDescriptor {
        app_id: AppId::Notepad,
        title: "ReadMe.txt",
        icon: "📝",
        preferred_width: Some(400),
        preferred_height: Some(300),
        resizable: true,
        show_in_start_menu: true,
    },
    AppDescriptor {
        app_id: AppId::DisplayProperties,
        title: "Display Properties",
        icon: "🎨",
        preferred_width: Some(420),
        preferred_height: Some(480),
        resizable: false,
        show_in_start_menu: false,
    },
];

pub fn app_registry() -> &'static [AppDescriptor] {
    &APP_REGISTRY
}

pub fn start_menu_apps() -> Vec<AppDescriptor> {
    app_registry()
        .iter()
        .copied()
        .filter(|entry| entry.show_in_start_menu)
        .collect()
}

pub fn app_descriptor(app_id: AppId) -> &'static AppDescriptor {
    // Every AppId variant has exactly one registry row.
    let index = match app_id {
        AppId::Explorer => 0,
        AppId::Minesweeper => 1,
        AppId::Solitaire => 2,
        AppId::Notepad => 3,
        AppId::DisplayProperties => 4,
    };
    &APP_REGISTRY[index]
}

/// Resolves an application-shortcut `app_id` string to its catalog entry.
pub fn app_descriptor_by_canonical(raw: &str) -> Option<&'static AppDescriptor> {
    AppId::from_canonical(raw).map(app_descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_app_id_resolves_to_its_own_registry_row() {
        for entry in app_registry() {
            assert_eq!(app_descriptor(entry.app_id).app_id, entry.app_id);
            assert_eq!(
                AppId::from_canonical(entry.app_id.canonical_id()),
                Some(entry.app_id)
            );
        }
    }

    #[test]
    fn unknown_shortcut_ids_do_not_resolve() {
        assert!(app_descriptor_by_canonical("paint").is_none());
        assert_eq!(
            app_descriptor_by_canonical("notepad").map(|entry| entry.title),
            Some("ReadMe.txt")
        );
    }

    #[test]
    fn display_properties_is_fixed_size_and_hidden_from_start_menu() {
        let entry = app_descriptor(AppId::DisplayProperties);
        assert!(!entry.resizable);
        assert!(!start_menu_apps()
            .iter()
            .any(|app| app.app_id == AppId::DisplayProperties));
    }
}
