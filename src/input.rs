//! Keyboard state shared between the window layer and the simulation
//!
//! The window layer records key presses and releases. The simulation reads
//! held keys for continuous actions and uses [`Keyboard::take_press`] for
//! one-shot actions: a key fires once per physical press and re-arms when
//! it is released.

/// Number of key slots (covers every GLFW key code)
pub const KEY_SLOTS: usize = 1024;

/// Keys the game reacts to, with their GLFW key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Space,
    A,
    D,
    S,
    W,
    Escape,
    Enter,
}

impl Key {
    pub const fn code(self) -> usize {
        match self {
            Key::Space => 32,
            Key::A => 65,
            Key::D => 68,
            Key::S => 83,
            Key::W => 87,
            Key::Escape => 256,
            Key::Enter => 257,
        }
    }
}

/// Pressed state plus "already handled" flags, one slot per key code
#[derive(Debug, Clone)]
pub struct Keyboard {
    pressed: [bool; KEY_SLOTS],
    processed: [bool; KEY_SLOTS],
}

impl Default for Keyboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Keyboard {
    pub fn new() -> Self {
        Self {
            pressed: [false; KEY_SLOTS],
            processed: [false; KEY_SLOTS],
        }
    }

    /// Record a key event from the window layer. Out-of-range codes are ignored.
    pub fn set_key(&mut self, code: usize, pressed: bool) {
        if code >= KEY_SLOTS {
            log::debug!("Ignoring key code {code}");
            return;
        }
        self.pressed[code] = pressed;
        if !pressed {
            self.processed[code] = false;
        }
    }

    pub fn press(&mut self, key: Key) {
        self.set_key(key.code(), true);
    }

    pub fn release(&mut self, key: Key) {
        self.set_key(key.code(), false);
    }

    /// Held right now
    #[inline]
    pub fn is_down(&self, key: Key) -> bool {
        self.pressed[key.code()]
    }

    /// Held and not yet handled since it went down; marks it handled
    pub fn take_press(&mut self, key: Key) -> bool {
        let code = key.code();
        if self.pressed[code] && !self.processed[code] {
            self.processed[code] = true;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_press_fires_once_per_press() {
        let mut kb = Keyboard::new();
        assert!(!kb.take_press(Key::Enter));

        kb.press(Key::Enter);
        assert!(kb.take_press(Key::Enter));
        assert!(!kb.take_press(Key::Enter));
        assert!(kb.is_down(Key::Enter));

        kb.release(Key::Enter);
        assert!(!kb.is_down(Key::Enter));
        kb.press(Key::Enter);
        assert!(kb.take_press(Key::Enter));
    }

    #[test]
    fn test_keys_are_independent() {
        let mut kb = Keyboard::new();
        kb.press(Key::W);
        kb.press(Key::S);
        assert!(kb.take_press(Key::W));
        assert!(kb.take_press(Key::S));
        assert!(!kb.is_down(Key::A));
    }

    #[test]
    fn test_out_of_range_code_ignored() {
        let mut kb = Keyboard::new();
        kb.set_key(KEY_SLOTS + 5, true);
        assert!(!kb.is_down(Key::Space));
    }
}
