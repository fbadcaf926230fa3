//! Preamp controller
//!
//! Owns the configuration and runtime state, turns key presses into volume,
//! mute and input changes, and drives the attenuator and relays. Time only
//! advances through [`Controller::tick`], so the controller can be driven by
//! any polling loop.

use crate::config::{
    first_active_input, is_selectable, ControllerConfig, RuntimeState, TriggerKind, INPUT_COUNT,
    MAX_ATTENUATION_DB, MAX_VOLUME_STEPS,
};
use crate::hardware::{Attenuator, HardwareError, RelayBus, RelayController};
use crate::mapping::MUTE_CODE;
use anyhow::{ensure, Result};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Length of a momentary trigger pulse
pub const TRIGGER_PULSE: Duration = Duration::from_millis(200);

/// User input, from the encoders or the remote
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Up,
    Down,
    /// Previous active input
    Left,
    /// Next active input
    Right,
    Mute,
    /// Input selected before the current one
    Previous,
    /// Direct input selection (0-based)
    Input(u8),
    /// Toggle standby
    Power,
}

impl Key {
    /// Parse a key name as typed on the simulator console
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "up" | "+" => Some(Key::Up),
            "down" | "-" => Some(Key::Down),
            "left" => Some(Key::Left),
            "right" => Some(Key::Right),
            "mute" => Some(Key::Mute),
            "prev" | "previous" => Some(Key::Previous),
            "power" | "onoff" => Some(Key::Power),
            other => other
                .parse::<u8>()
                .ok()
                .filter(|n| (1..=INPUT_COUNT as u8).contains(n))
                .map(|n| Key::Input(n - 1)),
        }
    }
}

/// Power state of the controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerState {
    /// Running since the given uptime
    On { since: Duration },
    Standby,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TriggerPhase {
    Waiting,
    Pulsing { until: Duration },
    /// Power-on pulse still running, power-off pulse to follow
    PulsingThenOff { until: Duration },
    OffQueued { at: Duration },
    Engaged,
    Done,
}

/// The preamp controller
pub struct Controller<A: Attenuator, B: RelayBus> {
    config: ControllerConfig,
    state: RuntimeState,
    attenuator: A,
    relays: RelayController<B>,
    power: PowerState,
    triggers: Vec<TriggerPhase>,
    uptime: Duration,
    last_input: Duration,
}

impl<A: Attenuator, B: RelayBus> Controller<A, B> {
    /// Create a new controller; call [`Controller::startup`] before use
    pub fn new(config: ControllerConfig, mut state: RuntimeState, attenuator: A, bus: B) -> Result<Self> {
        config.validate()?;
        state.reconcile(&config);
        let triggers = vec![TriggerPhase::Done; config.triggers.len()];

        Ok(Self {
            config,
            state,
            attenuator,
            relays: RelayController::new(bus),
            power: PowerState::Standby,
            triggers,
            uptime: Duration::ZERO,
            last_input: Duration::ZERO,
        })
    }

    /// Get the configuration
    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Get the runtime state
    pub fn state(&self) -> &RuntimeState {
        &self.state
    }

    /// Get the attenuator
    pub fn attenuator(&self) -> &A {
        &self.attenuator
    }

    /// Get the relay controller
    pub fn relays(&self) -> &RelayController<B> {
        &self.relays
    }

    /// Get the power state
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Check if the controller is on
    pub fn is_on(&self) -> bool {
        matches!(self.power, PowerState::On { .. })
    }

    /// Power on: reset relays, select the input and restore the volume
    pub fn startup(&mut self) {
        info!(uptime = ?self.uptime, "starting up");

        self.power = PowerState::On { since: self.uptime };
        self.last_input = self.uptime;
        self.triggers = self
            .config
            .triggers
            .iter()
            .map(|trigger| if trigger.active { TriggerPhase::Waiting } else { TriggerPhase::Done })
            .collect();

        let result = self.relays.begin();
        self.report(result);

        if !is_selectable(&self.config, self.state.input) {
            self.state.input = first_active_input(&self.config).unwrap_or(0);
        }
        let result = self.relays.set_input(self.state.input);
        self.report(result);

        if self.config.volume.recall_set_level {
            let input = usize::from(self.state.input);
            self.state.volume = self.state.input_last_volume[input]
                .min(self.config.volume.max_start_volume);
        }
        self.state.volume = self.clamp_to_input(self.state.volume);

        if self.state.muted {
            self.engage_mute();
        } else {
            self.apply_volume();
        }
    }

    /// Handle a key press
    pub fn handle_key(&mut self, key: Key) {
        debug!(?key, "key");
        self.last_input = self.uptime;

        if !self.is_on() {
            if key == Key::Power {
                self.startup();
            }
            return;
        }

        match key {
            Key::Up => self.volume_up(),
            Key::Down => self.volume_down(),
            Key::Left => self.previous_input(),
            Key::Right => self.next_input(),
            Key::Mute => self.toggle_mute(),
            Key::Previous => self.recall_previous_input(),
            Key::Input(input) => self.select_input(input),
            Key::Power => self.standby(),
        }
    }

    /// Advance time to `uptime` and run pending timed actions
    pub fn tick(&mut self, uptime: Duration) {
        self.uptime = self.uptime.max(uptime);

        let PowerState::On { since } = self.power else {
            self.run_trigger_pulses();
            return;
        };

        let hours = self.config.power.inactivity_off_hours;
        if hours > 0 && self.uptime - self.last_input >= Duration::from_secs(u64::from(hours) * 3600) {
            info!(hours, "no user input, going to standby");
            self.standby();
            return;
        }

        for index in 0..self.triggers.len() {
            if self.triggers[index] != TriggerPhase::Waiting {
                continue;
            }
            let trigger = &self.config.triggers[index];
            if self.uptime - since < Duration::from_secs(u64::from(trigger.on_delay_secs)) {
                continue;
            }

            info!(trigger = index, kind = ?trigger.kind, "trigger on");
            self.triggers[index] = match trigger.kind {
                TriggerKind::Latching => TriggerPhase::Engaged,
                TriggerKind::Momentary => TriggerPhase::Pulsing {
                    until: self.uptime + TRIGGER_PULSE,
                },
            };
            let result = self.relays.set_trigger(index as u8, true);
            self.report(result);
        }

        self.run_trigger_pulses();
    }

    /// Go to standby: release the triggers and disconnect the output
    pub fn standby(&mut self) {
        if !self.is_on() {
            return;
        }
        info!("standby");
        self.power = PowerState::Standby;

        for index in 0..self.triggers.len() {
            let trigger = &self.config.triggers[index];
            if !trigger.active {
                continue;
            }
            let kind = trigger.kind;
            let next = match (self.triggers[index], kind) {
                (TriggerPhase::Waiting, _) => TriggerPhase::Done,
                (TriggerPhase::Engaged, _) => {
                    let result = self.relays.set_trigger(index as u8, false);
                    self.report(result);
                    TriggerPhase::Done
                }
                // Amplifier was switched on by a pulse, switch it off the same way
                (TriggerPhase::Done, TriggerKind::Momentary) => {
                    let result = self.relays.set_trigger(index as u8, true);
                    self.report(result);
                    TriggerPhase::Pulsing {
                        until: self.uptime + TRIGGER_PULSE,
                    }
                }
                (TriggerPhase::Pulsing { until }, TriggerKind::Momentary) => {
                    TriggerPhase::PulsingThenOff { until }
                }
                (other, _) => other,
            };
            self.triggers[index] = next;
        }

        let result = self.attenuator.mute();
        self.report(result);
        let result = self.relays.mute(true);
        self.report(result);
    }

    /// One step louder, within the current input's limit
    pub fn volume_up(&mut self) {
        let limit = self.input_limits().1;
        if self.state.muted || self.state.volume >= limit {
            return;
        }
        self.set_volume(self.state.volume + 1);
    }

    /// One step quieter, within the current input's limit
    pub fn volume_down(&mut self) {
        let limit = self.input_limits().0;
        if self.state.muted || self.state.volume <= limit {
            return;
        }
        self.set_volume(self.state.volume - 1);
    }

    fn set_volume(&mut self, volume: u8) {
        self.state.volume = volume;
        self.state.input_last_volume[usize::from(self.state.input)] = volume;
        self.apply_volume();
    }

    /// Write the code for the current volume step to the attenuator
    pub fn apply_volume(&mut self) {
        let code = self.config.profile().code_for(self.state.volume);
        self.state.attenuation = code;
        info!(step = self.state.volume, code, "volume");
        self.write_code(code);
    }

    fn write_code(&mut self, code: u8) {
        let result = if code == MUTE_CODE {
            warn!("attenuation profile cannot be mapped, muting");
            self.attenuator.mute()
        } else {
            self.attenuator.set_attenuation(code)
        };
        self.report(result);
    }

    /// Mute, or restore the volume when already muted
    pub fn toggle_mute(&mut self) {
        self.state.muted = !self.state.muted;
        if self.state.muted {
            self.engage_mute();
        } else {
            info!("unmuted");
            self.apply_volume();
        }
    }

    fn engage_mute(&mut self) {
        let level = self.config.volume.mute_level;
        info!(level, "muted");
        if level == 0 {
            let result = self.attenuator.mute();
            self.report(result);
        } else {
            let code = self.config.profile().code_for(level);
            self.write_code(code);
        }
    }

    /// Select `input` if it exists, is active and is not already selected
    pub fn select_input(&mut self, input: u8) {
        if input == self.state.input || !is_selectable(&self.config, input) {
            return;
        }

        info!(input, name = %self.config.inputs[usize::from(input)].name, "input");
        self.state.previous_input = self.state.input;
        self.state.input = input;

        let result = self.relays.set_input(input);
        self.report(result);

        if self.config.volume.recall_set_level {
            self.state.volume = self.state.input_last_volume[usize::from(input)];
        }
        self.state.volume = self.clamp_to_input(self.state.volume);
        self.state.input_last_volume[usize::from(input)] = self.state.volume;

        if !self.state.muted {
            self.apply_volume();
        }
    }

    /// Next active input, wrapping around
    pub fn next_input(&mut self) {
        if let Some(input) = self.find_input(1) {
            self.select_input(input);
        }
    }

    /// Previous active input, wrapping around
    pub fn previous_input(&mut self) {
        if let Some(input) = self.find_input(INPUT_COUNT - 1) {
            self.select_input(input);
        }
    }

    /// Swap back to the input selected before the current one
    pub fn recall_previous_input(&mut self) {
        self.select_input(self.state.previous_input);
    }

    fn find_input(&self, stride: usize) -> Option<u8> {
        let current = usize::from(self.state.input);
        (1..INPUT_COUNT)
            .map(|offset| ((current + offset * stride) % INPUT_COUNT) as u8)
            .find(|&input| is_selectable(&self.config, input))
    }

    /// Change the number of volume steps
    pub fn set_volume_steps(&mut self, steps: u8) -> Result<()> {
        ensure!(
            (1..=MAX_VOLUME_STEPS).contains(&steps),
            "Volume steps must be between 1 and {}",
            MAX_VOLUME_STEPS
        );

        self.config.set_volume_steps(steps);
        self.state.reconcile(&self.config);
        self.state.volume = self.clamp_to_input(self.state.volume);
        self.reapply();
        Ok(())
    }

    /// Change the attenuation range
    pub fn set_attenuation_range(&mut self, min_db: u8, max_db: u8) -> Result<()> {
        ensure!(
            min_db < max_db && max_db <= MAX_ATTENUATION_DB,
            "Attenuation range must satisfy min < max <= {} dB",
            MAX_ATTENUATION_DB
        );

        self.config.volume.min_attenuation = min_db;
        self.config.volume.max_attenuation = max_db;
        self.reapply();
        Ok(())
    }

    /// Display contrast level: dimmed after the screen saver timeout, 0 in standby
    pub fn display_level(&self) -> u8 {
        let display = &self.config.display;
        if !self.is_on() {
            return 0;
        }

        let idle = self.uptime - self.last_input;
        if display.screen_saver && idle >= Duration::from_secs(u64::from(display.timeout_secs)) {
            display.dim_level
        } else {
            display.on_level
        }
    }

    fn reapply(&mut self) {
        if !self.is_on() {
            return;
        }
        if self.state.muted {
            self.engage_mute();
        } else {
            self.apply_volume();
        }
    }

    fn input_limits(&self) -> (u8, u8) {
        let input = &self.config.inputs[usize::from(self.state.input)];
        (input.min_volume, input.max_volume)
    }

    fn clamp_to_input(&self, volume: u8) -> u8 {
        let (min, max) = self.input_limits();
        volume.clamp(min, max.max(min))
    }

    fn run_trigger_pulses(&mut self) {
        for index in 0..self.triggers.len() {
            loop {
                let next = match self.triggers[index] {
                    TriggerPhase::Pulsing { until } if self.uptime >= until => {
                        let result = self.relays.set_trigger(index as u8, false);
                        self.report(result);
                        TriggerPhase::Done
                    }
                    // Off pulse starts one pulse length after the on pulse ends
                    TriggerPhase::PulsingThenOff { until } if self.uptime >= until => {
                        let result = self.relays.set_trigger(index as u8, false);
                        self.report(result);
                        TriggerPhase::OffQueued {
                            at: until + TRIGGER_PULSE,
                        }
                    }
                    TriggerPhase::OffQueued { at } if self.uptime >= at => {
                        debug!(trigger = index, "trigger off pulse");
                        let result = self.relays.set_trigger(index as u8, true);
                        self.report(result);
                        TriggerPhase::Pulsing {
                            until: self.uptime + TRIGGER_PULSE,
                        }
                    }
                    _ => break,
                };
                self.triggers[index] = next;
            }
        }
    }

    fn report(&self, result: Result<(), HardwareError>) {
        if let Err(e) = result {
            warn!("hardware write failed: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hardware::{SimAttenuator, SimRelayBus};

    type TestController = Controller<SimAttenuator, SimRelayBus>;

    fn controller_with(config: ControllerConfig, state: RuntimeState) -> TestController {
        let mut controller =
            Controller::new(config, state, SimAttenuator::new(), SimRelayBus::new()).unwrap();
        controller.startup();
        controller
    }

    fn controller() -> TestController {
        controller_with(ControllerConfig::default(), RuntimeState::default())
    }

    #[test]
    fn test_key_names() {
        assert_eq!(Key::from_name("up"), Some(Key::Up));
        assert_eq!(Key::from_name(" MUTE "), Some(Key::Mute));
        assert_eq!(Key::from_name("3"), Some(Key::Input(2)));
        assert_eq!(Key::from_name("7"), None);
        assert_eq!(Key::from_name("0"), None);
        assert_eq!(Key::from_name("louder"), None);
    }

    #[test]
    fn test_startup_selects_input_and_volume() {
        let controller = controller();

        assert!(controller.is_on());
        assert!(controller.relays().bus().pin(0));
        assert_eq!(controller.state().volume, 0);
        assert_eq!(controller.attenuator().code(), Some(120));
    }

    #[test]
    fn test_startup_limits_recalled_volume() {
        let mut config = ControllerConfig::default();
        config.volume.max_start_volume = 20;
        let state = RuntimeState {
            input_last_volume: vec![50, 0, 0, 0, 0, 0],
            ..RuntimeState::default()
        };

        let controller = controller_with(config, state);
        assert_eq!(controller.state().volume, 20);
        assert_eq!(controller.attenuator().code(), Some(80));
    }

    #[test]
    fn test_volume_up_and_down() {
        let mut controller = controller();

        controller.handle_key(Key::Up);
        controller.handle_key(Key::Up);
        assert_eq!(controller.state().volume, 2);
        assert_eq!(controller.state().attenuation, 116);
        assert_eq!(controller.attenuator().code(), Some(116));
        assert_eq!(controller.state().input_last_volume[0], 2);

        controller.handle_key(Key::Down);
        assert_eq!(controller.state().volume, 1);
        assert_eq!(controller.attenuator().code(), Some(118));
    }

    #[test]
    fn test_volume_respects_input_limits() {
        let mut config = ControllerConfig::default();
        config.inputs[0].min_volume = 5;
        config.inputs[0].max_volume = 7;
        let mut controller = controller_with(config, RuntimeState::default());

        // Start-up pulls the volume up to the input minimum
        assert_eq!(controller.state().volume, 5);

        controller.handle_key(Key::Down);
        assert_eq!(controller.state().volume, 5);

        for _ in 0..5 {
            controller.handle_key(Key::Up);
        }
        assert_eq!(controller.state().volume, 7);
    }

    #[test]
    fn test_mute_blocks_volume_changes() {
        let mut controller = controller();
        controller.handle_key(Key::Up);

        controller.handle_key(Key::Mute);
        assert!(controller.state().muted);
        assert!(controller.attenuator().is_muted());

        controller.handle_key(Key::Up);
        assert_eq!(controller.state().volume, 1);

        controller.handle_key(Key::Mute);
        assert!(!controller.state().muted);
        assert!(!controller.attenuator().is_muted());
        assert_eq!(controller.attenuator().code(), Some(118));
    }

    #[test]
    fn test_mute_level_uses_step() {
        let mut config = ControllerConfig::default();
        config.volume.mute_level = 10;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.handle_key(Key::Mute);
        assert!(controller.state().muted);
        assert!(!controller.attenuator().is_muted());
        assert_eq!(controller.attenuator().code(), Some(100));
    }

    #[test]
    fn test_infeasible_profile_mutes() {
        let mut config = ControllerConfig::default();
        config.set_volume_steps(20);
        let controller = controller_with(config, RuntimeState::default());

        assert_eq!(controller.state().attenuation, MUTE_CODE);
        assert!(controller.attenuator().is_muted());
    }

    #[test]
    fn test_input_cycling_skips_inactive() {
        let mut config = ControllerConfig::default();
        config.inputs[1].active = false;
        config.inputs[2].active = false;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.handle_key(Key::Right);
        assert_eq!(controller.state().input, 3);
        assert!(controller.relays().bus().pin(3));
        assert!(!controller.relays().bus().pin(0));

        controller.handle_key(Key::Left);
        assert_eq!(controller.state().input, 0);

        // Wraps backwards to the last input
        controller.handle_key(Key::Left);
        assert_eq!(controller.state().input, 5);
    }

    #[test]
    fn test_direct_and_previous_input() {
        let mut config = ControllerConfig::default();
        config.inputs[4].active = false;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.handle_key(Key::Input(4));
        assert_eq!(controller.state().input, 0);

        controller.handle_key(Key::Input(2));
        assert_eq!(controller.state().input, 2);

        controller.handle_key(Key::Previous);
        assert_eq!(controller.state().input, 0);
        assert_eq!(controller.state().previous_input, 2);
    }

    #[test]
    fn test_input_recalls_volume() {
        let mut controller = controller();
        for _ in 0..10 {
            controller.handle_key(Key::Up);
        }

        controller.handle_key(Key::Input(1));
        assert_eq!(controller.state().volume, 0);
        controller.handle_key(Key::Up);

        controller.handle_key(Key::Input(0));
        assert_eq!(controller.state().volume, 10);
        assert_eq!(controller.state().input_last_volume[1], 1);
    }

    #[test]
    fn test_set_volume_steps_clamps_volume() {
        let mut controller = controller();
        for _ in 0..50 {
            controller.handle_key(Key::Up);
        }

        controller.set_volume_steps(40).unwrap();
        assert_eq!(controller.state().volume, 40);
        assert_eq!(controller.config().inputs[0].max_volume, 40);
        assert_eq!(controller.attenuator().code(), Some(0));

        assert!(controller.set_volume_steps(0).is_err());
        assert!(controller.set_volume_steps(200).is_err());
    }

    #[test]
    fn test_set_attenuation_range() {
        let mut controller = controller();

        controller.set_attenuation_range(10, 70).unwrap();
        assert_eq!(controller.attenuator().code(), Some(140));

        assert!(controller.set_attenuation_range(50, 50).is_err());
        assert!(controller.set_attenuation_range(0, 91).is_err());
    }

    #[test]
    fn test_latching_trigger_after_delay() {
        let mut config = ControllerConfig::default();
        config.triggers[0].active = true;
        config.triggers[0].kind = TriggerKind::Latching;
        config.triggers[0].on_delay_secs = 5;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.tick(Duration::from_secs(4));
        assert!(!controller.relays().trigger(0));

        controller.tick(Duration::from_secs(5));
        assert!(controller.relays().trigger(0));
        assert!(!controller.relays().trigger(1));

        controller.tick(Duration::from_secs(60));
        assert!(controller.relays().trigger(0));

        controller.handle_key(Key::Power);
        assert!(!controller.is_on());
        assert!(!controller.relays().trigger(0));
    }

    #[test]
    fn test_momentary_trigger_pulses() {
        let mut config = ControllerConfig::default();
        config.triggers[1].active = true;
        config.triggers[1].on_delay_secs = 0;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.tick(Duration::from_millis(10));
        assert!(controller.relays().trigger(1));

        controller.tick(Duration::from_millis(300));
        assert!(!controller.relays().trigger(1));

        // Standby pulses again to switch the amplifier off
        controller.handle_key(Key::Power);
        assert!(controller.relays().trigger(1));
        controller.tick(Duration::from_secs(1));
        assert!(!controller.relays().trigger(1));
    }

    #[test]
    fn test_standby_during_power_on_pulse() {
        let mut config = ControllerConfig::default();
        config.triggers[0].active = true;
        config.triggers[0].on_delay_secs = 0;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.tick(Duration::from_millis(10));
        controller.tick(Duration::from_millis(100));
        assert!(controller.relays().trigger(0));

        controller.handle_key(Key::Power);
        // The power-on pulse runs to its end before the power-off pulse
        controller.tick(Duration::from_millis(150));
        assert!(controller.relays().trigger(0));
        controller.tick(Duration::from_millis(300));
        assert!(!controller.relays().trigger(0));

        controller.tick(Duration::from_secs(2));
        assert!(controller.relays().trigger(0));
        controller.tick(Duration::from_secs(3));
        assert!(!controller.relays().trigger(0));

        let pulses = controller
            .relays()
            .bus()
            .writes()
            .iter()
            .filter(|&&write| write == (6, true))
            .count();
        assert_eq!(pulses, 2);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = ControllerConfig::default();
        config.inputs.clear();
        let result = Controller::new(config, RuntimeState::default(), SimAttenuator::new(), SimRelayBus::new());
        assert!(result.is_err());

        let mut config = ControllerConfig::default();
        for input in &mut config.inputs {
            input.active = false;
        }
        let result = Controller::new(config, RuntimeState::default(), SimAttenuator::new(), SimRelayBus::new());
        assert!(result.is_err());
    }

    #[test]
    fn test_standby_and_wake() {
        let mut controller = controller();
        controller.handle_key(Key::Up);

        controller.handle_key(Key::Power);
        assert_eq!(controller.power(), PowerState::Standby);
        assert!(controller.attenuator().is_muted());
        assert!(!controller.relays().bus().pin(0));

        // Keys other than power are ignored in standby
        controller.handle_key(Key::Up);
        assert_eq!(controller.state().volume, 1);

        controller.tick(Duration::from_secs(2));
        controller.handle_key(Key::Power);
        assert_eq!(
            controller.power(),
            PowerState::On {
                since: Duration::from_secs(2)
            }
        );
        assert!(controller.relays().bus().pin(0));
        assert_eq!(controller.attenuator().code(), Some(118));
    }

    #[test]
    fn test_inactivity_standby() {
        let mut config = ControllerConfig::default();
        config.power.inactivity_off_hours = 1;
        let mut controller = controller_with(config, RuntimeState::default());

        controller.tick(Duration::from_secs(1800));
        controller.handle_key(Key::Up);
        controller.tick(Duration::from_secs(3600));
        assert!(controller.is_on());

        controller.tick(Duration::from_secs(1800 + 3600));
        assert!(!controller.is_on());
    }

    #[test]
    fn test_display_dims_after_timeout() {
        let mut controller = controller();
        assert_eq!(controller.display_level(), 3);

        controller.tick(Duration::from_secs(30));
        assert_eq!(controller.display_level(), 0);

        controller.handle_key(Key::Up);
        assert_eq!(controller.display_level(), 3);
    }
}
