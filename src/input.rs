use std::collections::HashSet;

use cgmath::{Vector3, Zero};

use crate::key::KeyToken;

/// Unit direction contributed by a movement token, if it is one.
///
/// Two vocabularies cover the same six directions: the numeric-keypad digits
/// and the named navigation keys. 8/up = +Z, 2/down = -Z, 4/left = -X,
/// 6/right = +X, 9/pageup = +Y, 3/pagedown = -Y.
pub fn movement_direction(token: &KeyToken) -> Option<Vector3<f64>> {
    match token {
        KeyToken::Char('8') | KeyToken::Up => Some(Vector3::new(0.0, 0.0, 1.0)),
        KeyToken::Char('2') | KeyToken::Down => Some(Vector3::new(0.0, 0.0, -1.0)),
        KeyToken::Char('4') | KeyToken::Left => Some(Vector3::new(-1.0, 0.0, 0.0)),
        KeyToken::Char('6') | KeyToken::Right => Some(Vector3::new(1.0, 0.0, 0.0)),
        KeyToken::Char('9') | KeyToken::PageUp => Some(Vector3::new(0.0, 1.0, 0.0)),
        KeyToken::Char('3') | KeyToken::PageDown => Some(Vector3::new(0.0, -1.0, 0.0)),
        _ => None,
    }
}

pub fn is_movement_token(token: &KeyToken) -> bool {
    movement_direction(token).is_some()
}

/// Set of canonical tokens currently held down. Press and release are
/// idempotent; a token is present only between a recognized press and its
/// matching release.
#[derive(Debug, Default)]
pub struct HeldKeys {
    down: HashSet<KeyToken>,
}

impl HeldKeys {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the token was not already held.
    pub fn press(&mut self, token: KeyToken) -> bool {
        self.down.insert(token)
    }

    /// Returns true if the token was held.
    pub fn release(&mut self, token: &KeyToken) -> bool {
        self.down.remove(token)
    }

    pub fn is_held(&self, token: &KeyToken) -> bool {
        self.down.contains(token)
    }

    pub fn clear(&mut self) {
        self.down.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.down.is_empty()
    }

    /// Vector sum of the directions of every held movement token.
    ///
    /// The sum is not normalized: opposite keys cancel exactly, adjacent
    /// keys combine into diagonal motion longer than a unit step.
    pub fn summed_direction(&self) -> Vector3<f64> {
        let mut sum = Vector3::zero();
        for token in &self.down {
            if let Some(direction) = movement_direction(token) {
                sum += direction;
            }
        }
        sum
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keypad_and_named_vocabularies_agree() {
        let pairs = [
            (KeyToken::Char('8'), KeyToken::Up),
            (KeyToken::Char('2'), KeyToken::Down),
            (KeyToken::Char('4'), KeyToken::Left),
            (KeyToken::Char('6'), KeyToken::Right),
            (KeyToken::Char('9'), KeyToken::PageUp),
            (KeyToken::Char('3'), KeyToken::PageDown),
        ];
        for (digit, named) in pairs {
            assert_eq!(movement_direction(&digit), movement_direction(&named));
        }
    }

    #[test]
    fn non_movement_tokens_contribute_nothing() {
        assert_eq!(movement_direction(&KeyToken::Char('p')), None);
        assert_eq!(movement_direction(&KeyToken::Char('5')), None);
        assert_eq!(
            movement_direction(&KeyToken::Other("escape".to_string())),
            None
        );
    }

    #[test]
    fn press_and_release_are_idempotent() {
        let mut held = HeldKeys::new();
        assert!(held.press(KeyToken::Up));
        assert!(!held.press(KeyToken::Up));
        assert!(held.is_held(&KeyToken::Up));
        assert!(held.release(&KeyToken::Up));
        assert!(!held.release(&KeyToken::Up));
        assert!(held.is_empty());
    }

    #[test]
    fn opposite_keys_cancel() {
        let mut held = HeldKeys::new();
        held.press(KeyToken::Up);
        held.press(KeyToken::Down);
        assert_eq!(held.summed_direction(), Vector3::new(0.0, 0.0, 0.0));
    }

    #[test]
    fn adjacent_keys_combine_without_clamping() {
        let mut held = HeldKeys::new();
        held.press(KeyToken::Right);
        held.press(KeyToken::PageUp);
        held.press(KeyToken::Char('8'));
        assert_eq!(held.summed_direction(), Vector3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn duplicate_vocabularies_double_the_contribution() {
        // Holding both encodings of the same direction is two tokens, and
        // the unnormalized sum reflects that.
        let mut held = HeldKeys::new();
        held.press(KeyToken::Char('6'));
        held.press(KeyToken::Right);
        assert_eq!(held.summed_direction(), Vector3::new(2.0, 0.0, 0.0));
    }
}
