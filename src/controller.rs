use cgmath::{Point3, Vector3};
use log::{info, warn};

use crate::config::RodToolConfig;
use crate::cut;
use crate::data::DataSlot;
use crate::event::{transition_from_class_name, KeyEventAccess, KeyTransition};
use crate::input::{is_movement_token, movement_direction, HeldKeys};
use crate::key::{self, KeyToken, RawKey};
use crate::rod::{RodGeometry, RodState};

/// Slots connecting the controller to the engine-owned data it reads and
/// writes. The mesh slots are read-only from the controller's side; the
/// removal slot may be absent, in which case cutting degrades to a warning.
pub struct EngineBindings {
    pub rod_geometry: Box<dyn DataSlot<RodGeometry>>,
    pub positions: Box<dyn DataSlot<Vec<Point3<f64>>>>,
    pub tetrahedra: Box<dyn DataSlot<Vec<[u32; 4]>>>,
    pub removal: Option<Box<dyn DataSlot<Vec<u32>>>>,
}

/// Keyboard-driven rod tool that cuts tetrahedral elements out of an
/// engine-owned mesh.
///
/// The host calls [`dispatch`] (or the explicit press/release entry points)
/// for each key event and [`on_animate_begin`] once per simulation tick, in
/// that order: movement and cutting always observe the held-key set as of
/// the start of the tick.
///
/// [`dispatch`]: RodCutController::dispatch
/// [`on_animate_begin`]: RodCutController::on_animate_begin
pub struct RodCutController {
    rod: RodState,
    held: HeldKeys,
    cut_enabled: bool,
    speed: f64,
    dt: f64,
    bindings: EngineBindings,
}

impl RodCutController {
    pub fn new(config: &RodToolConfig, bindings: EngineBindings) -> Self {
        let [cx, cy, cz] = config.center;
        let [hx, hy, hz] = config.half_extents;
        let mut controller = Self {
            rod: RodState::new(
                Point3::new(cx, cy, cz),
                Vector3::new(hx, hy, hz),
                config.rigid,
            ),
            held: HeldKeys::new(),
            cut_enabled: false,
            speed: config.speed,
            dt: config.dt,
            bindings,
        };
        controller.republish_rod();
        info!("rod control: keypad 8/2 = Z+/Z-, 4/6 = X-/X+, 9/3 = Y+/Y-");
        info!("p toggles cut mode, r resets the rod");
        controller
    }

    pub fn center(&self) -> Point3<f64> {
        self.rod.center()
    }

    pub fn cut_enabled(&self) -> bool {
        self.cut_enabled
    }

    pub fn is_held(&self, token: &KeyToken) -> bool {
        self.held.is_held(token)
    }

    /// Handle one host key event. Returns whether the event was consumed;
    /// consumed events are also marked handled on the event itself.
    ///
    /// An event with no recoverable key, an ignored key, or no recoverable
    /// press/release direction is not handled and changes no state.
    pub fn dispatch(&mut self, event: &mut dyn KeyEventAccess) -> bool {
        let Some(raw) = event.raw_key() else {
            return false;
        };
        let Some(token) = key::normalize(&raw) else {
            return false;
        };
        let transition = event
            .transition()
            .or_else(|| transition_from_class_name(event.class_name()));
        let Some(transition) = transition else {
            return false;
        };
        let handled = match transition {
            KeyTransition::Pressed => self.handle_press(token),
            KeyTransition::Released => self.handle_release(&token),
        };
        if handled {
            event.mark_handled();
        }
        handled
    }

    /// Explicit-transition entry point for hosts with dedicated press
    /// callbacks.
    pub fn on_key_pressed(&mut self, raw: &RawKey) -> bool {
        match key::normalize(raw) {
            Some(token) => self.handle_press(token),
            None => false,
        }
    }

    /// Explicit-transition entry point for hosts with dedicated release
    /// callbacks.
    pub fn on_key_released(&mut self, raw: &RawKey) -> bool {
        match key::normalize(raw) {
            Some(token) => self.handle_release(&token),
            None => false,
        }
    }

    /// Per-tick update: apply continuous movement from the held keys, then
    /// re-evaluate the cut if cut mode is on.
    pub fn on_animate_begin(&mut self) {
        let direction = self.held.summed_direction();
        let step = direction * (self.speed * self.dt);
        if self.rod.translate(step) {
            self.republish_rod();
        }
        if self.cut_enabled {
            self.run_cut_pass();
        }
    }

    /// Release every held key at once.
    ///
    /// For hosts that can lose keyboard focus without delivering release
    /// events; without this, a dropped release would leave the rod moving
    /// forever. Cut mode is a toggle, not a held state, and is unaffected.
    pub fn clear_held(&mut self) {
        self.held.clear();
    }

    fn handle_press(&mut self, token: KeyToken) -> bool {
        // Auto-repeat suppression: a key already down changes nothing.
        if self.held.is_held(&token) {
            return true;
        }
        match token {
            KeyToken::Char('p') => {
                self.cut_enabled = !self.cut_enabled;
                info!(
                    "cut mode: {}",
                    if self.cut_enabled { "on" } else { "off" }
                );
                self.held.press(token);
                true
            }
            KeyToken::Char('r') => {
                self.rod.reset_center();
                self.republish_rod();
                self.held.press(token);
                true
            }
            _ if is_movement_token(&token) => {
                self.nudge(&token);
                self.held.press(token);
                true
            }
            _ => false,
        }
    }

    fn handle_release(&mut self, token: &KeyToken) -> bool {
        if matches!(token, KeyToken::Char('p')) {
            // The toggle fired on press; the release only clears the
            // repeat-suppression entry.
            self.held.release(token);
            return true;
        }
        self.held.release(token)
    }

    // One discrete step in a single key's direction, applied at press time
    // so a tap moves the rod without waiting for the next tick.
    fn nudge(&mut self, token: &KeyToken) {
        let Some(direction) = movement_direction(token) else {
            return;
        };
        if self.rod.translate(direction * (self.speed * self.dt)) {
            self.republish_rod();
        }
    }

    fn republish_rod(&mut self) {
        self.bindings.rod_geometry.write(self.rod.geometry());
    }

    fn run_cut_pass(&mut self) {
        let positions = self.bindings.positions.read();
        let tetrahedra = self.bindings.tetrahedra.read();
        // An empty snapshot means the mesh is mid-rebuild, not "remove
        // nothing": leave any pending request alone.
        if positions.is_empty() || tetrahedra.is_empty() {
            return;
        }
        let Some(removal) = self.bindings.removal.as_mut() else {
            warn!("cut skipped: no removal sink bound");
            return;
        };
        let bounds = self.rod.bounds();
        let to_remove = cut::removal_candidates(&positions, &tetrahedra, &bounds);
        if !to_remove.is_empty() {
            let center = self.rod.center();
            info!(
                "cut removed {} tetrahedra at rod center ({:.3}, {:.3}, {:.3})",
                to_remove.len(),
                center.x,
                center.y,
                center.z
            );
        }
        // An explicitly empty write clears a stale request from an earlier
        // tick.
        removal.write(to_remove);
    }
}
