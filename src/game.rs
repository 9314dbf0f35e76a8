//! Tick scheduler
//!
//! `Game` owns the simulation state, the input adapter and a fixed-timestep
//! accumulator. Hosts feed it wall-clock frame deltas and key edges; ticks run
//! at a steady cadence regardless of when input arrives, each one reading the
//! latest intent snapshot.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::consts::*;
use crate::platform::InputAdapter;
use crate::renderer::{DrawCommand, build_scene};
use crate::sim::{SimState, tick};
use crate::tuning::{Tuning, TuningError};

/// Cloneable handle that stops a running `Game`
#[derive(Debug, Clone)]
pub struct StopHandle {
    stopped: Arc<AtomicBool>,
}

impl StopHandle {
    /// Request that no further ticks run
    pub fn stop(&self) {
        if !self.stopped.swap(true, Ordering::SeqCst) {
            log::debug!("Stop requested");
        }
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped.load(Ordering::SeqCst)
    }
}

/// Game instance holding all state
#[derive(Debug)]
pub struct Game {
    state: SimState,
    tuning: Tuning,
    input: InputAdapter,
    accumulator: f32,
    stop: StopHandle,
}

impl Game {
    /// New session with default key bindings
    pub fn new(tuning: Tuning, seed: Option<u64>) -> Result<Self, TuningError> {
        tuning.validate()?;
        let state = SimState::new(&tuning, seed);
        Self::with_state(tuning, state)
    }

    /// Wrap an existing simulation state
    pub fn with_state(tuning: Tuning, state: SimState) -> Result<Self, TuningError> {
        tuning.validate()?;
        Ok(Self {
            state,
            tuning,
            input: InputAdapter::default(),
            accumulator: 0.0,
            stop: StopHandle {
                stopped: Arc::new(AtomicBool::new(false)),
            },
        })
    }

    pub fn state(&self) -> &SimState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn input(&self) -> &InputAdapter {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut InputAdapter {
        &mut self.input
    }

    pub fn stop_handle(&self) -> StopHandle {
        self.stop.clone()
    }

    pub fn is_running(&self) -> bool {
        !self.stop.is_stopped()
    }

    /// Key pressed on the host. Returns whether the key is bound.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.input.key_down(key)
    }

    /// Key released on the host. Returns whether the key is bound.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.input.key_up(key)
    }

    /// Host lost focus or was hidden: releases will not arrive
    pub fn focus_lost(&mut self) {
        self.input.release_all();
    }

    /// Run one tick now, bypassing the accumulator. Returns false once stopped.
    pub fn tick_once(&mut self) -> bool {
        if !self.is_running() {
            return false;
        }
        let intent = self.input.intent();
        tick(&mut self.state, &intent, &self.tuning, TICK_DT);
        true
    }

    /// Account for `elapsed` seconds of wall-clock time and run the ticks it covers
    ///
    /// Returns the number of ticks run. Long stalls are capped so a frozen
    /// tab does not fast-forward the vehicle.
    pub fn frame(&mut self, elapsed: f32) -> u32 {
        if !self.is_running() {
            return 0;
        }

        let elapsed = if elapsed.is_finite() { elapsed.max(0.0) } else { 0.0 };
        if elapsed > MAX_FRAME_SECONDS {
            log::warn!("Frame delta {:.3}s capped to {:.3}s", elapsed, MAX_FRAME_SECONDS);
        }
        self.accumulator += elapsed.min(MAX_FRAME_SECONDS);

        let mut substeps = 0;
        while self.accumulator >= TICK_SECONDS && substeps < MAX_SUBSTEPS {
            // Checked per tick: a stop raised mid-frame takes effect before the next one
            if !self.tick_once() {
                break;
            }
            self.accumulator -= TICK_SECONDS;
            substeps += 1;
        }
        substeps
    }

    /// Start over on fresh terrain. Held keys are released; a stopped game stays stopped.
    pub fn restart(&mut self, seed: Option<u64>) {
        self.state = SimState::new(&self.tuning, seed);
        self.accumulator = 0.0;
        self.input.release_all();
    }

    /// Draw list for the current state
    pub fn scene(&self) -> Vec<DrawCommand> {
        build_scene(&self.state, &self.tuning)
    }
}
