use std::collections::BTreeMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::action::Action;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MouseButton {
    Left,
    Middle,
    Right,
}

/// Keys the front-end reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Key {
    Escape,
    Space,
    Delete,
    Home,
    PageUp,
    PageDown,
    A,
    C,
    F,
    N,
    O,
    P,
    Q,
    R,
    S,
    W,
}

/// A raw event from the host window, in screen pixels with the origin at the
/// top-left corner. Wheel deltas follow the browser convention: positive
/// scrolls down.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputEvent {
    PointerMove { position: Vec2 },
    ButtonDown { button: MouseButton },
    ButtonUp { button: MouseButton },
    Click { position: Vec2, button: MouseButton },
    DoubleClick { position: Vec2, button: MouseButton },
    Wheel { delta: f32 },
    Key { key: Key },
    Resize { width: f32, height: f32 },
}

/// Key to action table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings(BTreeMap<Key, Action>);

impl Default for KeyBindings {
    fn default() -> Self {
        Self(BTreeMap::from([
            (Key::Escape, Action::CancelPlacing),
            (Key::Space, Action::TogglePause),
            (Key::Delete, Action::DeleteSelected),
            (Key::Home, Action::ResetCamera),
            (Key::PageUp, Action::FollowPrevious),
            (Key::PageDown, Action::FollowNext),
            (Key::A, Action::FollowPlainAverage),
            (Key::C, Action::ClearFollow),
            (Key::F, Action::ToggleFiring),
            (Key::N, Action::BeginInteractiveCreation),
            (Key::O, Action::BeginOrbitalCreation),
            (Key::P, Action::BeginCreation),
            (Key::Q, Action::Quit),
            (Key::R, Action::Recenter),
            (Key::S, Action::FollowSelection),
            (Key::W, Action::FollowWeightedAverage),
        ]))
    }
}

impl KeyBindings {
    pub fn empty() -> Self {
        Self(BTreeMap::new())
    }

    pub fn action(&self, key: Key) -> Option<Action> {
        self.0.get(&key).copied()
    }

    /// Bind `key`, returning the action it replaced.
    pub fn bind(&mut self, key: Key, action: Action) -> Option<Action> {
        self.0.insert(key, action)
    }

    pub fn unbind(&mut self, key: Key) -> Option<Action> {
        self.0.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_bindings() {
        let keys = KeyBindings::default();
        assert_eq!(keys.action(Key::Escape), Some(Action::CancelPlacing));
        assert_eq!(keys.action(Key::PageDown), Some(Action::FollowNext));
    }

    #[test]
    fn rebind_and_unbind() {
        let mut keys = KeyBindings::empty();
        assert!(keys.is_empty());
        assert_eq!(keys.bind(Key::Q, Action::Quit), None);
        assert_eq!(keys.bind(Key::Q, Action::TogglePause), Some(Action::Quit));
        assert_eq!(keys.action(Key::Q), Some(Action::TogglePause));
        keys.unbind(Key::Q);
        assert_eq!(keys.action(Key::Q), None);
    }

    #[test]
    fn bindings_load_from_yaml() {
        let keys: KeyBindings = serde_yaml::from_str("space: quit\nf: toggle_firing\n").unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys.action(Key::Space), Some(Action::Quit));
    }

    #[test]
    fn events_load_from_yaml() {
        let yaml = "
- pointer_move: { position: [10.0, 20.0] }
- click: { position: [10.0, 20.0], button: left }
- wheel: { delta: -5.0 }
- key: { key: escape }
";
        let events: Vec<InputEvent> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(
            events[0],
            InputEvent::PointerMove {
                position: Vec2::new(10.0, 20.0)
            }
        );
        assert_eq!(events[2], InputEvent::Wheel { delta: -5.0 });
        assert_eq!(events[3], InputEvent::Key { key: Key::Escape });
    }
}
