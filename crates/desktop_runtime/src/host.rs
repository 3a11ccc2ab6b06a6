//! Host-side runtime: owns the desktop state, executes reducer effects, and drives timers.
//!
//! The host is the single dispatcher. Every state change goes through [`DesktopHost::dispatch`],
//! which runs the reducer and then executes the emitted [`RuntimeEffect`]s in order.

mod boot;
mod effects;

use std::rc::Rc;

use platform_host::PrefsStore;

use crate::{
    config::DesktopConfig,
    model::{DesktopState, InteractionState},
    reducer::{reduce_desktop, DesktopAction, RuntimeEffect},
    timers::{ClockReading, ClockTicker, IdleTimer, ScreenSaverKind},
};

/// Timer outcomes observed by one [`DesktopHost::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub clock: Option<ClockReading>,
    pub screensaver_started: bool,
}

pub struct DesktopHost {
    state: DesktopState,
    interaction: InteractionState,
    prefs: Rc<dyn PrefsStore>,
    clock: ClockTicker,
    idle: IdleTimer,
    pending_sounds: Vec<&'static str>,
}

impl DesktopHost {
    /// Builds the runtime from configuration and hydrates the file system from `prefs`.
    ///
    /// Storage failures never abort boot; the seed tree is used instead.
    pub fn boot(config: &DesktopConfig, prefs: Rc<dyn PrefsStore>, now_ms: u64) -> Self {
        let mut state = DesktopState::with_screen(config.screen.into());
        state.appearance = config.appearance.clone();
        let mut host = Self {
            state,
            interaction: InteractionState::default(),
            prefs,
            clock: ClockTicker::new(config.clock.interval_ms),
            idle: IdleTimer::new(
                config.screensaver.kind,
                config.screensaver.timeout_minutes,
                now_ms,
            ),
            pending_sounds: Vec::new(),
        };
        boot::hydrate_file_system(&mut host);
        host.pending_sounds.push("startup");
        host
    }

    pub fn state(&self) -> &DesktopState {
        &self.state
    }

    pub fn interaction(&self) -> &InteractionState {
        &self.interaction
    }

    pub fn prefs_store(&self) -> Rc<dyn PrefsStore> {
        self.prefs.clone()
    }

    pub fn idle_timer(&self) -> &IdleTimer {
        &self.idle
    }

    /// Runs `action` through the reducer and executes the resulting effects.
    pub fn dispatch(&mut self, action: DesktopAction) -> Vec<RuntimeEffect> {
        let effects = reduce_desktop(&mut self.state, &mut self.interaction, action);
        for effect in &effects {
            self.run_runtime_effect(effect);
        }
        effects
    }

    fn run_runtime_effect(&mut self, effect: &RuntimeEffect) {
        match effect {
            RuntimeEffect::PersistFileSystem => effects::persist_file_system(self),
            RuntimeEffect::PlaySound(name) => effects::queue_sound(self, *name),
        }
    }

    /// Sounds requested since the last call, oldest first.
    pub fn take_sounds(&mut self) -> Vec<&'static str> {
        std::mem::take(&mut self.pending_sounds)
    }

    /// Records user input for the idle timer. Returns `true` when it dismissed the screensaver.
    pub fn record_input(&mut self, now_ms: u64) -> bool {
        self.idle.record_activity(now_ms)
    }

    pub fn tick(&mut self, now_ms: u64) -> TickOutcome {
        TickOutcome {
            clock: self.clock.poll(now_ms),
            screensaver_started: self.idle.poll(now_ms),
        }
    }

    /// Display Properties: changes the screensaver and restarts the idle countdown.
    pub fn set_screensaver(&mut self, kind: ScreenSaverKind, timeout_minutes: u32, now_ms: u64) {
        self.idle.configure(kind, timeout_minutes, now_ms);
    }
}
