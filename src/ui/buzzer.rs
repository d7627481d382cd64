//! Passive piezo buzzer on PWM0.
//!
//! The controller only queues cues; a dedicated task plays them so a
//! 500 ms error tone never stalls sampling.

use embassy_nrf::peripherals::PWM0;
use embassy_nrf::pwm::{Prescaler, SimplePwm};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::Timer;

use crate::config::BUZZER_QUEUE_DEPTH;
use crate::ui::feedback::{Buzzer, Cue, Tone};

/// Cues waiting to be played.
pub static CUES: Channel<CriticalSectionRawMutex, Cue, BUZZER_QUEUE_DEPTH> = Channel::new();

/// Controller-side handle. Never waits: when the queue is full the cue is
/// dropped.
#[derive(Clone, Copy, Default)]
pub struct CueSender;

impl Buzzer for CueSender {
    fn play(&mut self, cue: Cue) {
        if CUES.try_send(cue).is_err() {
            warn!("Buzzer: queue full, {:?} dropped", cue);
        }
    }
}

async fn play_tone(pwm: &mut SimplePwm<'static, PWM0>, tone: &Tone) {
    pwm.set_period(tone.freq_hz);
    // 50 % duty square wave.
    pwm.set_duty(0, pwm.max_duty() / 2);
    pwm.enable();
    Timer::after_millis(tone.on_ms as u64).await;
    pwm.disable();
    if tone.gap_ms > 0 {
        Timer::after_millis(tone.gap_ms as u64).await;
    }
}

#[embassy_executor::task]
pub async fn buzzer_task(mut pwm: SimplePwm<'static, PWM0>) -> ! {
    pwm.set_prescaler(Prescaler::Div1);
    pwm.disable();

    loop {
        let cue = CUES.receive().await;
        debug!("Buzzer: {:?}", cue);
        for tone in cue.tones() {
            play_tone(&mut pwm, tone).await;
        }
    }
}
