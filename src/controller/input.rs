/// Platform-agnostic input handling
use std::collections::HashSet;

/// Everything the simulation can be asked to do in a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    MoveUp,
    MoveRight,
    MoveDown,
    MoveLeft,
    Jump,
    Run,
    Glide,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::MoveUp,
        Action::MoveRight,
        Action::MoveDown,
        Action::MoveLeft,
        Action::Jump,
        Action::Run,
        Action::Glide,
    ];

    fn bit(self) -> u8 {
        1 << self as u8
    }
}

/// Read-only view of which actions are held during a tick
pub trait InputSnapshot {
    fn is_action_held(&self, action: Action) -> bool;
}

/// Frozen set of held actions. Captured once per tick so the answers cannot
/// change while the tick is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionSet {
    bits: u8,
}

impl ActionSet {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn held(actions: &[Action]) -> Self {
        let mut set = Self::empty();
        for &action in actions {
            set.insert(action);
        }
        set
    }

    pub fn capture(input: &impl InputSnapshot) -> Self {
        let mut set = Self::empty();
        for action in Action::ALL {
            if input.is_action_held(action) {
                set.insert(action);
            }
        }
        set
    }

    pub fn insert(&mut self, action: Action) {
        self.bits |= action.bit();
    }

    pub fn remove(&mut self, action: Action) {
        self.bits &= !action.bit();
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl InputSnapshot for ActionSet {
    fn is_action_held(&self, action: Action) -> bool {
        self.bits & action.bit() != 0
    }
}

/// Platform-independent input events
#[derive(Debug, Clone)]
pub enum InputEvent {
    KeyDown(String),
    KeyUp(String),
    FocusLost,
    VisibilityChanged { visible: bool },
}

/// Keys currently held, fed by the host's event listeners
#[derive(Debug, Default)]
pub struct InputState {
    pub pressed_keys: HashSet<String>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process an input event and update state
    pub fn process_event(&mut self, event: &InputEvent) {
        match event {
            InputEvent::KeyDown(key) => {
                self.pressed_keys.insert(normalize_key(key));
            }
            InputEvent::KeyUp(key) => {
                self.pressed_keys.remove(&normalize_key(key));
            }
            InputEvent::FocusLost | InputEvent::VisibilityChanged { .. } => {
                self.clear_keys();
            }
        }
    }

    pub fn is_key_pressed(&self, key: &str) -> bool {
        self.pressed_keys.contains(&normalize_key(key))
    }

    pub fn clear_keys(&mut self) {
        self.pressed_keys.clear();
    }
}

// "W" and "w" arrive depending on Shift; a release must match its press.
fn normalize_key(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_string()
    }
}

/// Key mapping configuration
#[derive(Debug, Clone)]
pub struct KeyBindings {
    pub up: String,
    pub right: String,
    pub down: String,
    pub left: String,
    pub jump: String,
    pub run: String,
    pub glide: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            up: "w".to_string(),
            right: "d".to_string(),
            down: "s".to_string(),
            left: "a".to_string(),
            jump: " ".to_string(),
            run: "Shift".to_string(),
            glide: "e".to_string(),
        }
    }
}

/// Translates held keys into actions
#[derive(Debug, Clone, Default)]
pub struct InputProcessor {
    bindings: KeyBindings,
}

impl InputProcessor {
    pub fn new(bindings: KeyBindings) -> Self {
        Self { bindings }
    }

    pub fn is_moving_up(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.up) || input.is_key_pressed("ArrowUp")
    }

    pub fn is_moving_right(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.right) || input.is_key_pressed("ArrowRight")
    }

    pub fn is_moving_down(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.down) || input.is_key_pressed("ArrowDown")
    }

    pub fn is_moving_left(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.left) || input.is_key_pressed("ArrowLeft")
    }

    pub fn is_jumping(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.jump)
    }

    pub fn is_running(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.run)
    }

    pub fn is_gliding(&self, input: &InputState) -> bool {
        input.is_key_pressed(&self.bindings.glide)
    }

    /// Keys whose browser default (scrolling, focus moves) should be suppressed
    pub fn is_bound(&self, key: &str) -> bool {
        let b = &self.bindings;
        matches!(key, "ArrowUp" | "ArrowDown" | "ArrowLeft" | "ArrowRight")
            || [&b.up, &b.right, &b.down, &b.left, &b.jump, &b.run, &b.glide]
                .iter()
                .any(|bound| normalize_key(bound) == normalize_key(key))
    }

    pub fn snapshot(&self, input: &InputState) -> ActionSet {
        let checks: [(Action, bool); 7] = [
            (Action::MoveUp, self.is_moving_up(input)),
            (Action::MoveRight, self.is_moving_right(input)),
            (Action::MoveDown, self.is_moving_down(input)),
            (Action::MoveLeft, self.is_moving_left(input)),
            (Action::Jump, self.is_jumping(input)),
            (Action::Run, self.is_running(input)),
            (Action::Glide, self.is_gliding(input)),
        ];
        let mut set = ActionSet::empty();
        for (action, held) in checks {
            if held {
                set.insert(action);
            }
        }
        set
    }
}

#[cfg(target_arch = "wasm32")]
pub mod wasm {
    use super::*;
    use web_sys::KeyboardEvent;

    pub fn keyboard_event_to_input(e: &KeyboardEvent, is_down: bool) -> InputEvent {
        let key = e.key();
        if is_down {
            InputEvent::KeyDown(key)
        } else {
            InputEvent::KeyUp(key)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(keys: &[&str]) -> InputState {
        let mut state = InputState::new();
        for key in keys {
            state.process_event(&InputEvent::KeyDown(key.to_string()));
        }
        state
    }

    #[test]
    fn action_set_tracks_membership() {
        let mut set = ActionSet::held(&[Action::Jump, Action::MoveLeft]);
        assert!(set.is_action_held(Action::Jump));
        assert!(set.is_action_held(Action::MoveLeft));
        assert!(!set.is_action_held(Action::Glide));
        set.remove(Action::Jump);
        set.remove(Action::MoveLeft);
        assert!(set.is_empty());
    }

    #[test]
    fn capture_copies_every_action() {
        let source = ActionSet::held(&Action::ALL);
        assert_eq!(ActionSet::capture(&source), source);
    }

    #[test]
    fn shifted_release_clears_lowercase_press() {
        let mut state = pressed(&["w"]);
        state.process_event(&InputEvent::KeyUp("W".to_string()));
        assert!(state.pressed_keys.is_empty());
    }

    #[test]
    fn focus_loss_releases_everything() {
        let mut state = pressed(&["ArrowUp", " ", "Shift"]);
        state.process_event(&InputEvent::FocusLost);
        assert!(state.pressed_keys.is_empty());

        let mut state = pressed(&["a"]);
        state.process_event(&InputEvent::VisibilityChanged { visible: false });
        assert!(state.pressed_keys.is_empty());
    }

    #[test]
    fn snapshot_maps_default_bindings() {
        let processor = InputProcessor::default();
        let snapshot = processor.snapshot(&pressed(&["ArrowUp", "d", " ", "Shift", "E"]));
        for action in [Action::MoveUp, Action::MoveRight, Action::Jump, Action::Run, Action::Glide] {
            assert!(snapshot.is_action_held(action), "{action:?} should be held");
        }
        assert!(!snapshot.is_action_held(Action::MoveDown));
        assert!(!snapshot.is_action_held(Action::MoveLeft));
    }

    #[test]
    fn bound_keys_include_arrows_and_bindings() {
        let processor = InputProcessor::default();
        assert!(processor.is_bound("ArrowLeft"));
        assert!(processor.is_bound(" "));
        assert!(processor.is_bound("A"));
        assert!(!processor.is_bound("q"));
    }

    #[test]
    fn only_run_sits_on_a_modifier() {
        // Ctrl/Alt/Meta + WASD are browser shortcuts (Ctrl+W closes the tab).
        let b = KeyBindings::default();
        for key in [&b.up, &b.right, &b.down, &b.left, &b.jump, &b.glide] {
            assert!(!matches!(key.as_str(), "Control" | "Alt" | "Meta" | "Shift"), "{key}");
        }
        let processor = InputProcessor::default();
        assert!(!processor.is_bound("Control"));
        assert!(processor.snapshot(&pressed(&["Control"])).is_empty());
    }
}
