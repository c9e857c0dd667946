use crate::key::RawKey;

/// Explicit press/release direction of a key event.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyTransition {
    Pressed,
    Released,
}

/// Host-facing view of a key event.
///
/// Engines expose key events in different shapes; the controller only needs
/// three things recovered from them: the raw key, the press/release
/// direction (either explicit or recoverable from the event's class name),
/// and somewhere to record that the event was consumed. Everything else is
/// resolved at this boundary, once.
pub trait KeyEventAccess {
    /// The raw key carried by the event, if one can be recovered.
    fn raw_key(&self) -> Option<RawKey>;

    /// Explicit press/release flag, when the host has one.
    fn transition(&self) -> Option<KeyTransition> {
        None
    }

    /// The event's declared class name. Only consulted when [`transition`]
    /// returns `None`: a name containing `keyreleased` means release, one
    /// containing `keypressed` means press.
    ///
    /// [`transition`]: KeyEventAccess::transition
    fn class_name(&self) -> &str {
        ""
    }

    /// Called by the controller when it consumed the event.
    fn mark_handled(&mut self) {}
}

/// Recover a transition from an event's class name.
pub(crate) fn transition_from_class_name(name: &str) -> Option<KeyTransition> {
    let name = name.to_lowercase();
    if name.contains("keyreleased") {
        Some(KeyTransition::Released)
    } else if name.contains("keypressed") {
        Some(KeyTransition::Pressed)
    } else {
        None
    }
}

/// A plain owned key event, for hosts that build events themselves and for
/// tests. Implements [`KeyEventAccess`] directly.
#[derive(Clone, Debug, Default)]
pub struct SimKeyEvent {
    pub key: Option<RawKey>,
    pub transition: Option<KeyTransition>,
    pub class_name: String,
    pub handled: bool,
}

impl SimKeyEvent {
    pub fn pressed(key: RawKey) -> Self {
        Self {
            key: Some(key),
            transition: Some(KeyTransition::Pressed),
            ..Self::default()
        }
    }

    pub fn released(key: RawKey) -> Self {
        Self {
            key: Some(key),
            transition: Some(KeyTransition::Released),
            ..Self::default()
        }
    }

    /// An event carrying no explicit flag, only a class name to inspect.
    pub fn from_class_name(key: RawKey, class_name: &str) -> Self {
        Self {
            key: Some(key),
            class_name: class_name.to_string(),
            ..Self::default()
        }
    }
}

impl KeyEventAccess for SimKeyEvent {
    fn raw_key(&self) -> Option<RawKey> {
        self.key.clone()
    }

    fn transition(&self) -> Option<KeyTransition> {
        self.transition
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn mark_handled(&mut self) {
        self.handled = true;
    }
}
