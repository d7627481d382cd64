//! Acquisition controller - the system state machine.
//!
//! Single-threaded and cooperative. The main loop calls [`Controller::poll`]
//! every iteration with the current monotonic time; one call processes at
//! most one scheduled sample and then at most one button event. Timed
//! screens (fault display, confirmations, the stop summary) are deadlines
//! checked at the top of `poll`, never blocking pauses.
//!
//! Transitions:
//!
//! ```text
//! Initializing --settle--> Ready
//! Ready      --A, medium ready-----> Capturing      (begin session)
//! Ready      --A, medium unready---> Faulted ~> Ready
//! Ready      --B-------------------> StorageBusy -> Ready | Faulted ~> Ready
//! Capturing  --tick----------------> Capturing | Faulted ~> Ready
//! Capturing  --A-------------------> Ready          (end session)
//! Capturing  --B-------------------> Capturing      (refused, error cue)
//! ```

mod state;


pub use state::SystemState;

use core::fmt::Write;

use heapless::String;

use crate::config::{
    ACTIVITY_PULSE_EVERY, ACTIVITY_PULSE_MS, FAULT_DISPLAY_MS, INIT_SETTLE_MS, NOTICE_DISPLAY_MS,
    PROGRESS_RENDER_EVERY, SAMPLE_PERIOD_MS, START_NOTICE_MS, SUMMARY_DISPLAY_MS,
};
use crate::error::Error;
use crate::sampler::SampleScheduler;
use crate::sensor::MotionSensor;
use crate::storage::session::{CaptureSession, SessionManager};
use crate::storage::{MediumStatus, StorageDriver, StorageGateway};
use crate::ui::feedback::{Cue, FeedbackSink, LedColor, StatusScreen};
use crate::ui::input_logic::DebouncedInput;
use crate::ui::{ButtonEvent, ButtonSource};
use state::{reached, Hold, Resume};

// Screen text

const TITLE_INIT: &str = "INITIALIZING";
const TITLE_READY: &str = "READY";
const TITLE_STARTING: &str = "STARTING";
const TITLE_RECORDING: &str = "RECORDING";
const TITLE_FINISHED: &str = "FINISHED";
const TITLE_MOUNTING: &str = "MOUNTING SD";
const TITLE_UNMOUNTING: &str = "UNMOUNTING";
const TITLE_MOUNTED: &str = "SD MOUNTED";
const TITLE_UNMOUNTED: &str = "SD UNMOUNTED";
const TITLE_ERROR: &str = "ERROR";
const TITLE_SD_ERROR: &str = "SD ERROR";

const HINT_READY: &str = "A:Start B:SD";
const HINT_RECORDING: &str = "A:Stop";
const DETAIL_WAIT: &str = "Please wait...";

pub struct Controller<S, D, F> {
    state: SystemState,
    sensor: S,
    storage: StorageGateway<D>,
    sessions: SessionManager,
    scheduler: SampleScheduler,
    feedback: F,
    hold: Option<Hold>,
    pulse_until: Option<u32>,
}

impl<S, D, F> Controller<S, D, F>
where
    S: MotionSensor,
    D: StorageDriver,
    F: FeedbackSink,
{
    pub fn new(sensor: S, storage: D, feedback: F) -> Self {
        Self {
            state: SystemState::Initializing,
            sensor,
            storage: StorageGateway::new(storage),
            sessions: SessionManager::new(),
            scheduler: SampleScheduler::new(SAMPLE_PERIOD_MS),
            feedback,
            hold: None,
            pulse_until: None,
        }
    }

    pub fn state(&self) -> SystemState {
        self.state
    }

    pub fn storage_status(&self) -> MediumStatus {
        self.storage.status()
    }

    pub fn session(&self) -> Option<&CaptureSession> {
        self.sessions.active()
    }

    pub fn sessions(&self) -> &SessionManager {
        &self.sessions
    }

    pub fn storage(&self) -> &StorageGateway<D> {
        &self.storage
    }

    pub fn storage_mut(&mut self) -> &mut StorageGateway<D> {
        &mut self.storage
    }

    pub fn sensor_mut(&mut self) -> &mut S {
        &mut self.sensor
    }

    pub fn feedback(&self) -> &F {
        &self.feedback
    }

    /// Deadline of the timed screen currently shown, if any.
    pub fn hold_until(&self) -> Option<u32> {
        self.hold.map(|h| h.until_ms)
    }

    /// Run the init sequence. Ready follows after the settle delay.
    pub fn boot(&mut self, now_ms: u32) {
        info!("controller: boot");
        self.feedback.indicate(LedColor::Busy);
        self.render(TITLE_INIT, "Configuring...");

        match self.sensor.init() {
            Ok(()) => {
                self.render(TITLE_INIT, "Sensor OK");
                self.hold_for(now_ms, INIT_SETTLE_MS, Resume::Ready);
            }
            Err(_) => {
                error!("controller: sensor init failed");
                self.fault(now_ms, TITLE_ERROR, "Sensor init failed");
            }
        }
    }

    /// One main-loop iteration.
    pub fn poll(&mut self, now_ms: u32, input: &DebouncedInput) {
        self.expire_timers(now_ms);
        if !self.state.accepts_input() {
            return;
        }

        if self.state == SystemState::Capturing && self.scheduler.due(now_ms) {
            self.take_sample(now_ms);
        }

        // A failed sample leaves us Faulted; the press waits for recovery.
        if !self.state.accepts_input() {
            return;
        }

        let event = input
            .take(ButtonSource::StartStop)
            .or_else(|| input.take(ButtonSource::StorageToggle));
        if let Some(event) = event {
            self.handle_event(event, now_ms);
        }
    }

    /// Apply one debounced press.
    pub fn handle_event(&mut self, event: ButtonEvent, now_ms: u32) {
        info!(
            "controller: {:?} pressed at {} ms in {:?}",
            event.source,
            event.at_ms,
            self.state
        );
        match (self.state, event.source) {
            (SystemState::Ready, ButtonSource::StartStop) => self.start_capture(now_ms),
            (SystemState::Ready, ButtonSource::StorageToggle) => self.toggle_storage(now_ms),
            (SystemState::Capturing, ButtonSource::StartStop) => self.stop_capture(now_ms),
            (SystemState::Capturing, ButtonSource::StorageToggle) => {
                self.refuse_storage_toggle(now_ms)
            }
            (state, source) => debug!("controller: {:?} ignored in {:?}", source, state),
        }
    }

    fn set_state(&mut self, next: SystemState) {
        if next != self.state {
            info!("controller: {:?} -> {:?}", self.state, next);
            self.state = next;
        }
    }

    fn hold_for(&mut self, now_ms: u32, duration_ms: u32, then: Resume) {
        self.hold = Some(Hold {
            until_ms: now_ms.wrapping_add(duration_ms),
            then,
        });
    }

    fn expire_timers(&mut self, now_ms: u32) {
        if let Some(until) = self.pulse_until {
            if reached(now_ms, until) {
                self.pulse_until = None;
                if self.state == SystemState::Capturing {
                    self.feedback.indicate(LedColor::Capturing);
                }
            }
        }

        if let Some(hold) = self.hold {
            if reached(now_ms, hold.until_ms) {
                self.hold = None;
                match hold.then {
                    Resume::Recording if self.state == SystemState::Capturing => {
                        self.render_recording()
                    }
                    Resume::Recording => {}
                    Resume::Ready => self.enter_ready(),
                }
            }
        }
    }

    fn render(&mut self, title: &str, detail: &str) {
        let mut screen = StatusScreen::new(title, detail, self.storage.is_ready());
        if let Some(session) = self.sessions.active() {
            screen = screen.with_samples(session.samples());
        }
        self.feedback.render(&screen);
    }

    fn render_recording(&mut self) {
        let storage_ready = self.storage.is_ready();
        if let Some(session) = self.sessions.active() {
            let screen = StatusScreen::new(TITLE_RECORDING, HINT_RECORDING, storage_ready)
                .with_samples(session.samples())
                .with_file(session.file_name());
            self.feedback.render(&screen);
        }
    }

    fn enter_ready(&mut self) {
        self.set_state(SystemState::Ready);
        self.feedback.indicate(LedColor::Ready);
        self.render(TITLE_READY, HINT_READY);
    }

    /// Enter the transient fault state. Any open capture is terminated.
    fn fault(&mut self, now_ms: u32, title: &str, detail: &str) {
        if self.sessions.is_active() {
            self.sessions.end_session();
        }
        self.pulse_until = None;
        self.set_state(SystemState::Faulted);
        self.feedback.indicate(LedColor::Fault);
        self.feedback.cue(Cue::Error);
        self.render(title, detail);
        self.hold_for(now_ms, FAULT_DISPLAY_MS, Resume::Ready);
    }

    fn start_capture(&mut self, now_ms: u32) {
        if !self.storage.is_ready() {
            warn!("controller: start refused, medium not mounted");
            self.fault(now_ms, TITLE_ERROR, "SD not mounted");
            return;
        }

        let begun = self
            .sessions
            .begin_session(&mut self.storage, now_ms)
            .map(|_| ());
        match begun {
            Ok(()) => {
                self.scheduler.reset(now_ms);
                self.set_state(SystemState::Capturing);
                self.feedback.indicate(LedColor::Capturing);
                self.feedback.cue(Cue::Single);
                self.render(TITLE_STARTING, "Preparing...");
                self.hold_for(now_ms, START_NOTICE_MS, Resume::Recording);
            }
            Err(Error::FileIndexExhausted) => {
                error!("controller: record file indexes exhausted");
                self.fault(now_ms, TITLE_ERROR, "File limit reached");
            }
            Err(e) => {
                error!("controller: cannot begin session: {:?}", e);
                self.fault(now_ms, TITLE_ERROR, "File create failed");
            }
        }
    }

    fn stop_capture(&mut self, now_ms: u32) {
        let total = self
            .sessions
            .end_session()
            .map(|s| s.samples())
            .unwrap_or(0);
        self.pulse_until = None;
        self.set_state(SystemState::Ready);
        self.feedback.indicate(LedColor::Ready);
        self.feedback.cue(Cue::Double);

        let mut detail: String<24> = String::new();
        let _ = write!(detail, "Saved: {}", total);
        self.render(TITLE_FINISHED, &detail);
        self.hold_for(now_ms, SUMMARY_DISPLAY_MS, Resume::Ready);
    }

    fn refuse_storage_toggle(&mut self, now_ms: u32) {
        warn!("controller: storage toggle refused during capture");
        self.feedback.cue(Cue::Error);
        self.render(TITLE_ERROR, "Stop capture first");
        self.hold_for(now_ms, NOTICE_DISPLAY_MS, Resume::Recording);
    }

    /// Mount when unready, unmount when ready. Only reachable from Ready,
    /// so the medium is never touched while a session is open.
    fn toggle_storage(&mut self, now_ms: u32) {
        self.set_state(SystemState::StorageBusy);
        self.feedback.indicate(LedColor::Busy);

        if self.storage.is_ready() {
            self.render(TITLE_UNMOUNTING, DETAIL_WAIT);
            match self.storage.unmount() {
                Ok(()) => {
                    self.set_state(SystemState::Ready);
                    self.feedback.indicate(LedColor::Ready);
                    self.feedback.cue(Cue::Double);
                    self.render(TITLE_UNMOUNTED, "Safe to remove");
                    self.hold_for(now_ms, NOTICE_DISPLAY_MS, Resume::Ready);
                }
                Err(_) => self.fault(now_ms, TITLE_ERROR, "Unmount failed"),
            }
        } else {
            self.render(TITLE_MOUNTING, DETAIL_WAIT);
            match self.storage.mount() {
                Ok(()) => {
                    self.set_state(SystemState::Ready);
                    self.feedback.indicate(LedColor::Ready);
                    self.feedback.cue(Cue::Single);
                    self.render(TITLE_MOUNTED, "Ready!");
                    self.hold_for(now_ms, NOTICE_DISPLAY_MS, Resume::Ready);
                }
                Err(_) => self.fault(now_ms, TITLE_SD_ERROR, "Mount failed"),
            }
        }
    }

    fn take_sample(&mut self, now_ms: u32) {
        let written = self
            .sensor
            .read_raw()
            .map_err(|_| Error::Sensor)
            .and_then(|raw| self.sessions.record_sample(&mut self.storage, &raw, now_ms));

        match written {
            Ok(count) => {
                if count % ACTIVITY_PULSE_EVERY == 0 {
                    self.feedback.indicate(LedColor::Busy);
                    self.pulse_until = Some(now_ms.wrapping_add(ACTIVITY_PULSE_MS));
                }
                if count % PROGRESS_RENDER_EVERY == 0 && self.hold.is_none() {
                    self.render_recording();
                }
            }
            Err(Error::Sensor) => {
                error!("controller: sensor read failed");
                self.fault(now_ms, TITLE_ERROR, "Sensor read failed");
            }
            Err(e) => {
                error!("controller: sample dropped: {:?}", e);
                self.fault(now_ms, TITLE_ERROR, "SD write failed");
            }
        }
    }
}
