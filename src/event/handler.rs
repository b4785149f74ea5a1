use crate::status::LookupResponse;
use crate::timer::TimerKind;
use crossterm::event::{self, KeyEvent};
use std::time::Duration;
use tokio::sync::mpsc;

#[derive(Debug)]
pub enum Event {
    Key(KeyEvent),
    Mouse,
    Resize,
    Tick,
    /// A scoped timer fired
    Timer { timer: u64, kind: TimerKind },
    /// A status lookup finished
    Lookup(LookupResponse),
}

/// Sending half of the event loop channel, handed to background tasks
pub type EventSender = mpsc::UnboundedSender<Event>;

/// Single queue feeding the UI loop.
///
/// Terminal input is polled on a dedicated thread; timers and lookups push
/// into the same channel through [`EventHandler::sender`], so every state
/// change is applied on the loop that draws.
pub struct EventHandler {
    rx: mpsc::UnboundedReceiver<Event>,
    tx: EventSender,
}

impl EventHandler {
    pub fn new(tick_rate: Duration) -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        let event_tx = tx.clone();

        std::thread::spawn(move || {
            loop {
                if event::poll(tick_rate).unwrap_or(false) {
                    let forwarded = match event::read() {
                        Ok(event::Event::Key(key)) => Some(Event::Key(key)),
                        Ok(event::Event::Mouse(_)) => Some(Event::Mouse),
                        Ok(event::Event::Resize(_, _)) => Some(Event::Resize),
                        _ => None,
                    };
                    if let Some(ev) = forwarded {
                        if event_tx.send(ev).is_err() {
                            break;
                        }
                    }
                } else if event_tx.send(Event::Tick).is_err() {
                    break;
                }
            }
        });

        Self { rx, tx }
    }

    pub fn sender(&self) -> EventSender {
        self.tx.clone()
    }

    pub async fn next(&mut self) -> Option<Event> {
        self.rx.recv().await
    }
}
