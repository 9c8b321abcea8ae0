// Game action definitions and key bindings

use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Represents all in-game actions a platformer player can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveLeft,
    MoveRight,
    Jump,
}

/// Default keyboard bindings: arrows plus WASD, space to jump
pub fn default_bindings() -> Vec<(KeyCode, Action)> {
    vec![
        (KeyCode::ArrowLeft, Action::MoveLeft),
        (KeyCode::KeyA, Action::MoveLeft),
        (KeyCode::ArrowRight, Action::MoveRight),
        (KeyCode::KeyD, Action::MoveRight),
        (KeyCode::Space, Action::Jump),
        (KeyCode::ArrowUp, Action::Jump),
        (KeyCode::KeyW, Action::Jump),
    ]
}

/// Mapping from keys to actions, with rebinding support
#[derive(Debug, Clone, Default)]
pub struct InputBindings {
    bindings: HashMap<KeyCode, Action>,
}

impl InputBindings {
    /// Create an empty binding set
    pub fn new() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }

    /// Create a binding set from a list of bindings
    pub fn from_bindings(bindings: Vec<(KeyCode, Action)>) -> Self {
        let mut config = Self::new();
        for (key, action) in bindings {
            config.bind(key, action);
        }
        config
    }

    /// Binding set with `default_bindings`
    pub fn defaults() -> Self {
        Self::from_bindings(default_bindings())
    }

    /// Bind a key to an action, replacing whatever the key did before
    pub fn bind(&mut self, key: KeyCode, action: Action) {
        self.bindings.insert(key, action);
    }

    /// Get the action bound to a key
    pub fn get_action(&self, key: KeyCode) -> Option<Action> {
        self.bindings.get(&key).copied()
    }

    /// Get all keys bound to an action
    pub fn keys_for(&self, action: Action) -> Vec<KeyCode> {
        self.bindings
            .iter()
            .filter(|(_, bound)| **bound == action)
            .map(|(key, _)| *key)
            .collect()
    }

    /// Check if an action has any bindings
    pub fn has_binding(&self, action: Action) -> bool {
        self.bindings.values().any(|bound| *bound == action)
    }
}
