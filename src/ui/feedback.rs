//! Operator feedback: status screen, indicator color and audible cues.
//!
//! The controller talks to a single [`FeedbackSink`]; [`Feedback`] fans the
//! calls out to the three output collaborators. Nothing here reports back.

use crate::config::{
    BUZZER_DOUBLE_GAP_MS, BUZZER_DOUBLE_MS, BUZZER_ERROR_HZ, BUZZER_ERROR_MS, BUZZER_OK_HZ,
    BUZZER_SINGLE_MS,
};

/// Indicator states. Exactly five are distinguishable on the RGB LED.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LedColor {
    /// Green.
    Ready,
    /// Blue - storage access, initialization, activity pulse.
    Busy,
    /// Red.
    Capturing,
    /// Purple.
    Fault,
    Off,
}

impl LedColor {
    /// `(red, green, blue)` channel levels.
    pub const fn rgb(self) -> (bool, bool, bool) {
        match self {
            LedColor::Ready => (false, true, false),
            LedColor::Busy => (false, false, true),
            LedColor::Capturing => (true, false, false),
            LedColor::Fault => (true, false, true),
            LedColor::Off => (false, false, false),
        }
    }
}

/// Audible cue patterns.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Cue {
    /// One pulse: start, mount OK.
    Single,
    /// Two pulses: capture finished, unmount OK.
    Double,
    /// Low, long tone: any failure or refused request.
    Error,
}

/// One tone of a cue followed by a silent gap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tone {
    pub freq_hz: u32,
    pub on_ms: u32,
    pub gap_ms: u32,
}

const SINGLE: [Tone; 1] = [Tone {
    freq_hz: BUZZER_OK_HZ,
    on_ms: BUZZER_SINGLE_MS,
    gap_ms: 0,
}];

const DOUBLE: [Tone; 2] = [
    Tone {
        freq_hz: BUZZER_OK_HZ,
        on_ms: BUZZER_DOUBLE_MS,
        gap_ms: BUZZER_DOUBLE_GAP_MS,
    },
    Tone {
        freq_hz: BUZZER_OK_HZ,
        on_ms: BUZZER_DOUBLE_MS,
        gap_ms: 0,
    },
];

const ERROR: [Tone; 1] = [Tone {
    freq_hz: BUZZER_ERROR_HZ,
    on_ms: BUZZER_ERROR_MS,
    gap_ms: 0,
}];

impl Cue {
    pub fn tones(self) -> &'static [Tone] {
        match self {
            Cue::Single => &SINGLE,
            Cue::Double => &DOUBLE,
            Cue::Error => &ERROR,
        }
    }
}

/// Everything the status screen shows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StatusScreen<'a> {
    pub title: &'a str,
    pub detail: &'a str,
    /// Drives the "SD: OK" / "SD: N/A" tag in the header.
    pub storage_ready: bool,
    /// Running sample count, shown only while capturing.
    pub samples: Option<u32>,
    /// Active record file, shown on the progress screen.
    pub file: Option<&'a str>,
}

impl<'a> StatusScreen<'a> {
    pub const fn new(title: &'a str, detail: &'a str, storage_ready: bool) -> Self {
        Self {
            title,
            detail,
            storage_ready,
            samples: None,
            file: None,
        }
    }

    pub const fn with_samples(mut self, samples: u32) -> Self {
        self.samples = Some(samples);
        self
    }

    pub const fn with_file(mut self, file: &'a str) -> Self {
        self.file = Some(file);
        self
    }
}

pub trait StatusDisplay {
    fn render(&mut self, screen: &StatusScreen<'_>);
}

pub trait Indicator {
    fn set(&mut self, color: LedColor);
}

/// Must not block the caller for the length of the cue.
pub trait Buzzer {
    fn play(&mut self, cue: Cue);
}

/// What the controller needs from the feedback side.
pub trait FeedbackSink {
    fn render(&mut self, screen: &StatusScreen<'_>);
    fn indicate(&mut self, color: LedColor);
    fn cue(&mut self, cue: Cue);
}

/// Pass-through sink over the three output collaborators.
pub struct Feedback<V, L, B> {
    display: V,
    led: L,
    buzzer: B,
    color: LedColor,
}

impl<V, L, B> Feedback<V, L, B>
where
    V: StatusDisplay,
    L: Indicator,
    B: Buzzer,
{
    pub fn new(display: V, mut led: L, buzzer: B) -> Self {
        led.set(LedColor::Off);
        Self {
            display,
            led,
            buzzer,
            color: LedColor::Off,
        }
    }

    /// Last color sent to the indicator.
    pub fn color(&self) -> LedColor {
        self.color
    }
}

impl<V, L, B> FeedbackSink for Feedback<V, L, B>
where
    V: StatusDisplay,
    L: Indicator,
    B: Buzzer,
{
    fn render(&mut self, screen: &StatusScreen<'_>) {
        self.display.render(screen);
    }

    fn indicate(&mut self, color: LedColor) {
        if color != self.color {
            self.led.set(color);
            self.color = color;
        }
    }

    fn cue(&mut self, cue: Cue) {
        self.buzzer.play(cue);
    }
}
