//! Terminal input: raw crossterm events, the poller task, and the event
//! kinds components see

use std::time::Duration;

use crossterm::event::{self, KeyEvent, KeyEventKind};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Event as read from crossterm
#[derive(Debug)]
pub enum RawEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Event delivered to components
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventKind {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Upper bound on events read per poll cycle, so a paste can't starve the loop.
const MAX_EVENTS_PER_BATCH: usize = 20;

/// Spawn the input polling task.
///
/// Key presses and resizes are forwarded to `tx` until `cancel_token` fires
/// or the receiver is dropped. Key release/repeat events are discarded.
pub fn spawn_event_poller(
    tx: mpsc::UnboundedSender<RawEvent>,
    poll_timeout: Duration,
    loop_sleep: Duration,
    cancel_token: CancellationToken,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            tokio::select! {
                _ = cancel_token.cancelled() => {
                    info!("event poller cancelled");
                    while event::poll(Duration::ZERO).unwrap_or(false) {
                        let _ = event::read();
                    }
                    break;
                }
                _ = tokio::time::sleep(loop_sleep) => {
                    let mut read = 0;
                    while read < MAX_EVENTS_PER_BATCH && event::poll(poll_timeout).unwrap_or(false) {
                        read += 1;
                        let raw = match event::read() {
                            Ok(event::Event::Key(key)) if key.kind == KeyEventKind::Press => {
                                RawEvent::Key(key)
                            }
                            Ok(event::Event::Resize(w, h)) => RawEvent::Resize(w, h),
                            _ => continue,
                        };
                        if tx.send(raw).is_err() {
                            debug!("event channel closed, stopping poller");
                            return;
                        }
                    }
                }
            }
        }
    })
}

pub fn process_raw_event(raw: RawEvent) -> EventKind {
    match raw {
        RawEvent::Key(key) => EventKind::Key(key),
        RawEvent::Resize(w, h) => EventKind::Resize(w, h),
    }
}
