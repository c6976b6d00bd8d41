//! Keyboard bindings configuration.

use crate::layout::GroupingSize;
use crate::model::key_action::KeyAction;
use crate::model::InterpretationKind;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Default write key for each interpretation.
const WRITE_KEYS: [(char, InterpretationKind); 5] = [
    ('b', InterpretationKind::HexBe),
    ('l', InterpretationKind::HexLe),
    ('s', InterpretationKind::SignedInt16),
    ('f', InterpretationKind::Float32),
    ('d', InterpretationKind::Decimal),
];

/// Maps keyboard events to domain actions.
#[derive(Debug, Clone)]
pub struct KeyBindings {
    bindings: HashMap<KeyEvent, KeyAction>,
}

impl KeyBindings {
    /// Look up the action for a key event.
    ///
    /// Only code and modifiers take part in the lookup; event kind and state are ignored.
    pub fn get(&self, key: KeyEvent) -> Option<KeyAction> {
        self.bindings
            .get(&KeyEvent::new(key.code, key.modifiers))
            .copied()
    }

    /// The interpretation a key writes, if it is bound to a write action.
    ///
    /// Edit mode reuses these keys to pick the field to edit.
    pub fn kind_for(&self, key: KeyEvent) -> Option<InterpretationKind> {
        match self.get(key)? {
            KeyAction::WriteAnnotation(kind) => Some(kind),
            _ => None,
        }
    }

    /// The first plain character bound to writing `kind`, for on-screen hints.
    pub fn hint_for(&self, kind: InterpretationKind) -> Option<char> {
        let mut keys: Vec<char> = self
            .bindings
            .iter()
            .filter(|(_, action)| **action == KeyAction::WriteAnnotation(kind))
            .filter_map(|(key, _)| match key.code {
                KeyCode::Char(c) => Some(c),
                _ => None,
            })
            .collect();
        keys.sort_unstable();
        keys.first().copied()
    }

    /// Bind `key` to `action`, replacing any previous binding for that key.
    pub fn bind(&mut self, key: KeyEvent, action: KeyAction) {
        self.bindings.insert(key, action);
    }
}

impl Default for KeyBindings {
    fn default() -> Self {
        let mut bindings = HashMap::new();
        let mut plain = |c: char, action: KeyAction| {
            bindings.insert(KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE), action);
        };

        // Vim-style scrolling
        plain('j', KeyAction::ScrollDown);
        plain('k', KeyAction::ScrollUp);
        plain('g', KeyAction::ScrollToTop);

        plain('p', KeyAction::LoadAnnotations);

        // Grouping
        plain('1', KeyAction::SetGrouping(GroupingSize::One));
        plain('2', KeyAction::SetGrouping(GroupingSize::Two));
        plain('4', KeyAction::SetGrouping(GroupingSize::Four));

        plain('e', KeyAction::StartEdit);
        plain('q', KeyAction::Quit);

        let mut with = |code: KeyCode, modifiers: KeyModifiers, action: KeyAction| {
            bindings.insert(KeyEvent::new(code, modifiers), action);
        };

        with(KeyCode::Char('G'), KeyModifiers::SHIFT, KeyAction::ScrollToBottom);
        with(KeyCode::Up, KeyModifiers::NONE, KeyAction::ScrollUp);
        with(KeyCode::Down, KeyModifiers::NONE, KeyAction::ScrollDown);
        with(KeyCode::Home, KeyModifiers::NONE, KeyAction::ScrollToTop);
        with(KeyCode::End, KeyModifiers::NONE, KeyAction::ScrollToBottom);

        // Page navigation
        with(KeyCode::PageUp, KeyModifiers::NONE, KeyAction::PageUp);
        with(KeyCode::PageDown, KeyModifiers::NONE, KeyAction::PageDown);

        // Annotation writes, plain or with Ctrl
        for (c, kind) in WRITE_KEYS {
            for modifiers in [KeyModifiers::NONE, KeyModifiers::CONTROL] {
                with(KeyCode::Char(c), modifiers, KeyAction::WriteAnnotation(kind));
            }
        }

        with(KeyCode::Char('c'), KeyModifiers::CONTROL, KeyAction::Quit);

        Self { bindings }
    }
}
