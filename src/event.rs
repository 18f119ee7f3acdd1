use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::event::{self, Event, KeyEvent};

use crate::notify::DeliveryStatus;

pub enum AppEvent {
    Key(KeyEvent),
    Tick,
    Resize(#[allow(dead_code)] u16, #[allow(dead_code)] u16),
    Delivery(DeliveryStatus),
}

/// Tick deadline kept independent of how much input arrives.
struct TickClock {
    rate: Duration,
    last_tick: Instant,
}

impl TickClock {
    fn new(rate: Duration, now: Instant) -> Self {
        Self {
            rate,
            last_tick: now,
        }
    }

    fn poll_timeout(&self, now: Instant) -> Duration {
        self.rate
            .saturating_sub(now.saturating_duration_since(self.last_tick))
    }

    /// True once per elapsed period; restarts the period when it fires.
    fn take_tick(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last_tick) >= self.rate {
            self.last_tick = now;
            true
        } else {
            false
        }
    }
}

pub struct EventHandler {
    rx: mpsc::Receiver<AppEvent>,
    tx: mpsc::Sender<AppEvent>,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::channel();
        let input_tx = tx.clone();

        thread::spawn(move || {
            let mut clock = TickClock::new(tick_rate, Instant::now());
            loop {
                if event::poll(clock.poll_timeout(Instant::now())).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(Event::Key(key)) => input_tx.send(AppEvent::Key(key)).is_ok(),
                        Ok(Event::Resize(w, h)) => input_tx.send(AppEvent::Resize(w, h)).is_ok(),
                        _ => true,
                    };
                    if !forwarded {
                        return;
                    }
                }
                if clock.take_tick(Instant::now()) && input_tx.send(AppEvent::Tick).is_err() {
                    return;
                }
            }
        });

        Self { rx, tx }
    }

    /// Sender for work that finishes off the UI thread.
    pub fn sender(&self) -> mpsc::Sender<AppEvent> {
        self.tx.clone()
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        Ok(self.rx.recv()?)
    }
}
