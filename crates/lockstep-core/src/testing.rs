//! Recording mocks of the playback engine and the external transport.

use crate::compat::{AtomicU32, AtomicU64, AtomicU8, Mutex, Ordering, RwLock};
use crate::sync::{ExternalState, ExternalTransport, StateCallback};
use crate::transport::{FrameCount, PlayMode, PlaybackEngine, TimePos};
use crate::{AtomicDouble, AtomicFlag, AtomicFrame};

/// Call made by the sync core into the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineCall {
    SeekToTime(TimePos),
    TogglePause,
    StartPlayback,
}

/// Engine with settable state that records every transport call.
///
/// `start_playback` and `toggle_pause` update the playing flag the way a
/// real engine would, so repeated notifications see the new state.
#[derive(Debug)]
pub struct MockEngine {
    playing: AtomicFlag,
    stopped: AtomicFlag,
    exporting: AtomicFlag,
    pattern_mode: AtomicFlag,
    panic_armed: AtomicFlag,
    frame: AtomicFrame,
    frames_per_tick: AtomicDouble,
    sample_rate: AtomicU32,
    calls: Mutex<Vec<EngineCall>>,
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl MockEngine {
    /// Stopped at frame 0, song mode, 100 frames per tick, 48 kHz.
    pub fn new() -> Self {
        Self {
            playing: AtomicFlag::new(false),
            stopped: AtomicFlag::new(true),
            exporting: AtomicFlag::new(false),
            pattern_mode: AtomicFlag::new(false),
            panic_armed: AtomicFlag::new(false),
            frame: AtomicFrame::new(0),
            frames_per_tick: AtomicDouble::new(100.0),
            sample_rate: AtomicU32::new(48_000),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_playing(&self) {
        self.playing.set(true);
        self.stopped.set(false);
    }

    pub fn set_paused(&self) {
        self.playing.set(false);
        self.stopped.set(false);
    }

    pub fn set_stopped(&self) {
        self.playing.set(false);
        self.stopped.set(true);
    }

    pub fn set_exporting(&self, exporting: bool) {
        self.exporting.set(exporting);
    }

    pub fn set_play_mode(&self, mode: PlayMode) {
        self.pattern_mode.set(mode == PlayMode::Pattern);
    }

    /// Make the next `is_stopped` query panic, as a misbehaving engine would.
    pub fn panic_on_next_stopped_query(&self) {
        self.panic_armed.set(true);
    }

    pub fn set_frame(&self, frame: FrameCount) {
        self.frame.set(frame);
    }

    pub fn set_frames_per_tick(&self, frames_per_tick: f64) {
        self.frames_per_tick.set(frames_per_tick);
    }

    pub fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().clone()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: EngineCall) {
        self.calls.lock().push(call);
    }
}

impl PlaybackEngine for MockEngine {
    fn is_playing(&self) -> bool {
        self.playing.get()
    }

    fn is_stopped(&self) -> bool {
        if self.panic_armed.get() {
            self.panic_armed.set(false);
            panic!("engine state unavailable");
        }
        self.stopped.get()
    }

    fn is_exporting(&self) -> bool {
        self.exporting.get()
    }

    fn play_mode(&self) -> PlayMode {
        if self.pattern_mode.get() {
            PlayMode::Pattern
        } else {
            PlayMode::Song
        }
    }

    fn current_frame(&self) -> FrameCount {
        self.frame.get()
    }

    fn frames_per_tick(&self) -> f64 {
        self.frames_per_tick.get()
    }

    fn output_sample_rate(&self) -> u32 {
        self.sample_rate.load(Ordering::Acquire)
    }

    fn seek_to_time(&self, time: TimePos) {
        self.record(EngineCall::SeekToTime(time));
        self.frame.set(time.to_frames(self.frames_per_tick.get()));
    }

    fn toggle_pause(&self) {
        self.record(EngineCall::TogglePause);
        self.playing.toggle();
        self.stopped.set(false);
    }

    fn start_playback(&self) {
        self.record(EngineCall::StartPlayback);
        self.set_playing();
    }
}

/// Call made by the sync core into the external transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportCall {
    Start,
    Stop,
    Locate(FrameCount),
}

/// External transport that records calls and lets tests drive its state
/// and fire its registered callback.
///
/// Replacing the callback waits for any invocation still running, like a
/// real provider deactivating its client.
pub struct MockTransport {
    state: AtomicU8,
    position: AtomicFrame,
    calls: Mutex<Vec<TransportCall>>,
    callback: RwLock<Option<StateCallback>>,
    registrations: AtomicU64,
    unregistrations: AtomicU64,
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTransport {
    pub fn new() -> Self {
        Self {
            state: AtomicU8::new(ExternalState::Stopped as u8),
            position: AtomicFrame::new(0),
            calls: Mutex::new(Vec::new()),
            callback: RwLock::new(None),
            registrations: AtomicU64::new(0),
            unregistrations: AtomicU64::new(0),
        }
    }

    /// Set what `query_state` reports, as a third party would.
    pub fn set_state(&self, state: ExternalState) {
        self.state.store(state as u8, Ordering::Release);
    }

    /// Relocate without notifying anyone, as a third party would.
    pub fn relocate(&self, frame: FrameCount) {
        self.position.set(frame);
    }

    pub fn position(&self) -> FrameCount {
        self.position.get()
    }

    /// Invoke the registered callback the way the clock's thread would.
    /// Returns `None` when nothing is registered.
    pub fn fire(&self, state: ExternalState, frame: FrameCount) -> Option<bool> {
        self.callback.read().as_ref().map(|cb| cb(state, frame))
    }

    pub fn has_callback(&self) -> bool {
        self.callback.read().is_some()
    }

    /// Callbacks currently registered (0 or 1).
    pub fn registered_count(&self) -> usize {
        usize::from(self.has_callback())
    }

    /// Total `set_state_callback(Some(..))` calls.
    pub fn registrations(&self) -> u64 {
        self.registrations.load(Ordering::Acquire)
    }

    /// Total `set_state_callback(None)` calls.
    pub fn unregistrations(&self) -> u64 {
        self.unregistrations.load(Ordering::Acquire)
    }

    pub fn calls(&self) -> Vec<TransportCall> {
        self.calls.lock().clone()
    }

    pub fn locate_calls(&self) -> Vec<FrameCount> {
        self.calls
            .lock()
            .iter()
            .filter_map(|call| match call {
                TransportCall::Locate(frame) => Some(*frame),
                _ => None,
            })
            .collect()
    }
}

impl ExternalTransport for MockTransport {
    fn start(&self) {
        self.calls.lock().push(TransportCall::Start);
        self.set_state(ExternalState::Rolling);
    }

    fn stop(&self) {
        self.calls.lock().push(TransportCall::Stop);
        self.set_state(ExternalState::Stopped);
    }

    fn locate(&self, frame: FrameCount) {
        self.calls.lock().push(TransportCall::Locate(frame));
        self.position.set(frame);
    }

    fn query_state(&self) -> ExternalState {
        ExternalState::from_u8(self.state.load(Ordering::Acquire))
    }

    fn set_state_callback(&self, callback: Option<StateCallback>) {
        let counter = if callback.is_some() {
            &self.registrations
        } else {
            &self.unregistrations
        };
        counter.fetch_add(1, Ordering::AcqRel);
        *self.callback.write() = callback;
    }
}
