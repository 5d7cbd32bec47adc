//! Main menu system with settings configuration

use crate::mode::GameMode;
use crate::settings::{MAX_BASE_QUANTITY, Settings};

/// Menu screens
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuScreen {
    Main,
    Settings,
    SettingsKeys,
    SettingsVisual,
    SettingsGameplay,
}

/// Menu state
#[derive(Debug, Clone)]
pub struct Menu {
    pub screen: MenuScreen,
    pub selected: usize,
    pub items: Vec<MenuItem>,
    /// For key rebinding: which action is waiting for input
    pub rebinding: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct MenuItem {
    pub label: String,
    pub item_type: MenuItemType,
}

#[derive(Debug, Clone)]
pub enum MenuItemType {
    /// Simple button that triggers an action
    Button(MenuAction),
    /// Toggle boolean setting
    Toggle { key: SettingKey, value: bool },
    /// Cycle through options
    Cycle {
        key: SettingKey,
        options: Vec<String>,
        current: usize,
    },
    /// Numeric value with increment/decrement
    Number {
        key: SettingKey,
        value: u32,
        min: u32,
        max: u32,
        step: u32,
    },
    /// Key binding (shows current keys, can rebind)
    KeyBind { action: String, keys: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuAction {
    StartGame(GameMode),
    GoToScreen(MenuScreen),
    Back,
    Quit,
}

/// Setting keys for identifying which setting to modify
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingKey {
    ShowPreview,
    BlockStyle,
    BaseQuantity,
}

fn button(label: &str, action: MenuAction) -> MenuItem {
    MenuItem {
        label: label.to_string(),
        item_type: MenuItemType::Button(action),
    }
}

fn key_bind(label: &str, action: &str, keys: &[String]) -> MenuItem {
    MenuItem {
        label: label.to_string(),
        item_type: MenuItemType::KeyBind {
            action: action.to_string(),
            keys: keys.to_vec(),
        },
    }
}

impl Menu {
    pub fn new() -> Self {
        Self::main_menu()
    }

    fn with_items(screen: MenuScreen, items: Vec<MenuItem>) -> Self {
        Self {
            screen,
            selected: 0,
            rebinding: None,
            items,
        }
    }

    pub fn main_menu() -> Self {
        let mut items: Vec<MenuItem> = GameMode::all()
            .iter()
            .map(|&mode| button(mode.name(), MenuAction::StartGame(mode)))
            .collect();
        items.push(button("Settings", MenuAction::GoToScreen(MenuScreen::Settings)));
        items.push(button("Quit", MenuAction::Quit));
        Self::with_items(MenuScreen::Main, items)
    }

    pub fn settings_menu() -> Self {
        Self::with_items(
            MenuScreen::Settings,
            vec![
                button("Key Bindings", MenuAction::GoToScreen(MenuScreen::SettingsKeys)),
                button("Visual", MenuAction::GoToScreen(MenuScreen::SettingsVisual)),
                button("Gameplay", MenuAction::GoToScreen(MenuScreen::SettingsGameplay)),
                button("Back", MenuAction::Back),
            ],
        )
    }

    pub fn settings_keys(settings: &Settings) -> Self {
        let keys = &settings.keys;
        Self::with_items(
            MenuScreen::SettingsKeys,
            vec![
                key_bind("Left", "left", &keys.left),
                key_bind("Right", "right", &keys.right),
                key_bind("Up", "up", &keys.up),
                key_bind("Down", "down", &keys.down),
                key_bind("Confirm", "confirm", &keys.confirm),
                key_bind("Back", "back", &keys.back),
                button("Done", MenuAction::Back),
            ],
        )
    }

    pub fn settings_visual(settings: &Settings) -> Self {
        let block_styles = vec!["solid".to_string(), "bracket".to_string(), "round".to_string()];
        let current_style = block_styles
            .iter()
            .position(|s| s == &settings.visual.block_style)
            .unwrap_or(0);

        Self::with_items(
            MenuScreen::SettingsVisual,
            vec![
                MenuItem {
                    label: "Landing Preview".to_string(),
                    item_type: MenuItemType::Toggle {
                        key: SettingKey::ShowPreview,
                        value: settings.visual.show_preview,
                    },
                },
                MenuItem {
                    label: "Block Style".to_string(),
                    item_type: MenuItemType::Cycle {
                        key: SettingKey::BlockStyle,
                        options: block_styles,
                        current: current_style,
                    },
                },
                button("Back", MenuAction::Back),
            ],
        )
    }

    pub fn settings_gameplay(settings: &Settings) -> Self {
        Self::with_items(
            MenuScreen::SettingsGameplay,
            vec![
                MenuItem {
                    label: "Pieces per Kind".to_string(),
                    item_type: MenuItemType::Number {
                        key: SettingKey::BaseQuantity,
                        value: settings.gameplay.base_quantity,
                        min: 1,
                        max: MAX_BASE_QUANTITY,
                        step: 1,
                    },
                },
                button("Back", MenuAction::Back),
            ],
        )
    }

    pub fn move_up(&mut self) {
        if self.rebinding.is_some() {
            return; // Don't move while rebinding
        }
        if self.selected > 0 {
            self.selected -= 1;
        } else {
            self.selected = self.items.len().saturating_sub(1);
        }
    }

    pub fn move_down(&mut self) {
        if self.rebinding.is_some() {
            return;
        }
        if self.selected + 1 < self.items.len() {
            self.selected += 1;
        } else {
            self.selected = 0;
        }
    }

    /// Handle left/right for cycling options and numbers
    pub fn adjust_left(&mut self, settings: &mut Settings) {
        self.adjust(settings, false);
    }

    pub fn adjust_right(&mut self, settings: &mut Settings) {
        self.adjust(settings, true);
    }

    fn adjust(&mut self, settings: &mut Settings, forward: bool) {
        if self.rebinding.is_some() {
            return;
        }
        let Some(item) = self.items.get_mut(self.selected) else {
            return;
        };
        match &mut item.item_type {
            MenuItemType::Toggle { key, value } => {
                *value = !*value;
                apply_setting(settings, *key, &SettingValue::Bool(*value));
            }
            MenuItemType::Cycle {
                key,
                options,
                current,
            } => {
                let len = options.len();
                *current = if forward {
                    (*current + 1) % len
                } else {
                    (*current + len - 1) % len
                };
                apply_setting(settings, *key, &SettingValue::String(options[*current].clone()));
            }
            MenuItemType::Number {
                key,
                value,
                min,
                max,
                step,
            } => {
                *value = if forward {
                    value.saturating_add(*step).min(*max)
                } else {
                    value.saturating_sub(*step).max(*min)
                };
                apply_setting(settings, *key, &SettingValue::Number(*value));
            }
            _ => {}
        }
    }

    /// Get the action for the current selection (for Button types)
    pub fn select(&self) -> Option<&MenuAction> {
        if self.rebinding.is_some() {
            return None;
        }
        match self.items.get(self.selected).map(|item| &item.item_type) {
            Some(MenuItemType::Button(action)) => Some(action),
            _ => None,
        }
    }

    pub fn on_key_bind(&self) -> bool {
        self.items
            .get(self.selected)
            .is_some_and(|item| matches!(item.item_type, MenuItemType::KeyBind { .. }))
    }

    /// Start rebinding a key
    pub fn start_rebind(&mut self) {
        if self.on_key_bind() {
            self.rebinding = Some(self.selected);
        }
    }

    /// Cancel rebinding
    pub fn cancel_rebind(&mut self) {
        self.rebinding = None;
    }

    /// Add a key to the current rebinding action (stays in rebind mode)
    pub fn add_key(&mut self, key_str: String, settings: &mut Settings) {
        if let Some(MenuItemType::KeyBind { action, keys }) = self.rebinding_item() {
            if !keys.contains(&key_str) {
                keys.push(key_str);
                update_key_binding(settings, action, keys.clone());
            }
        }
    }

    /// Clear keys for current rebinding action and set new key
    pub fn set_key(&mut self, key_str: String, settings: &mut Settings) {
        if let Some(MenuItemType::KeyBind { action, keys }) = self.rebinding_item() {
            keys.clear();
            keys.push(key_str);
            update_key_binding(settings, action, keys.clone());
        }
        self.rebinding = None;
    }

    /// Remove the keys bound to the selected action
    ///
    /// Confirm and back keep their first key, a game cannot be played or
    /// left without them.
    pub fn clear_keys(&mut self, settings: &mut Settings) {
        if let Some(item) = self.items.get_mut(self.selected) {
            if let MenuItemType::KeyBind { action, keys } = &mut item.item_type {
                let keep = if REQUIRED_ACTIONS.contains(&action.as_str()) { 1 } else { 0 };
                keys.truncate(keep);
                update_key_binding(settings, action, keys.clone());
            }
        }
    }

    fn rebinding_item(&mut self) -> Option<&mut MenuItemType> {
        let idx = self.rebinding?;
        self.items.get_mut(idx).map(|item| &mut item.item_type)
    }

    /// Finish adding keys and exit rebind mode
    pub fn finish_rebind(&mut self) {
        self.rebinding = None;
    }

    pub fn go_to(&mut self, screen: MenuScreen, settings: &Settings) {
        *self = match screen {
            MenuScreen::Main => Self::main_menu(),
            MenuScreen::Settings => Self::settings_menu(),
            MenuScreen::SettingsKeys => Self::settings_keys(settings),
            MenuScreen::SettingsVisual => Self::settings_visual(settings),
            MenuScreen::SettingsGameplay => Self::settings_gameplay(settings),
        };
    }

    /// Go back to previous screen
    pub fn go_back(&mut self, settings: &Settings) {
        let prev = match self.screen {
            MenuScreen::Main | MenuScreen::Settings => MenuScreen::Main,
            MenuScreen::SettingsKeys | MenuScreen::SettingsVisual | MenuScreen::SettingsGameplay => {
                MenuScreen::Settings
            }
        };
        self.go_to(prev, settings);
    }
}

impl Default for Menu {
    fn default() -> Self {
        Self::new()
    }
}

/// Helper enum for setting values
enum SettingValue {
    Bool(bool),
    String(String),
    Number(u32),
}

/// Apply a setting change to the Settings struct
fn apply_setting(settings: &mut Settings, key: SettingKey, value: &SettingValue) {
    match (key, value) {
        (SettingKey::ShowPreview, SettingValue::Bool(v)) => {
            settings.visual.show_preview = *v;
        }
        (SettingKey::BlockStyle, SettingValue::String(v)) => {
            settings.visual.block_style = v.clone();
        }
        (SettingKey::BaseQuantity, SettingValue::Number(v)) => {
            settings.gameplay.base_quantity = *v;
        }
        _ => {}
    }
}

/// Update a key binding in settings
/// Actions that must always have a key
const REQUIRED_ACTIONS: [&str; 2] = ["confirm", "back"];

fn update_key_binding(settings: &mut Settings, action: &str, keys: Vec<String>) {
    match action {
        "left" => settings.keys.left = keys,
        "right" => settings.keys.right = keys,
        "up" => settings.keys.up = keys,
        "down" => settings.keys.down = keys,
        "confirm" => settings.keys.confirm = keys,
        "back" => settings.keys.back = keys,
        _ => {}
    }
}
