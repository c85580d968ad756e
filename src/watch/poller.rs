use chrono::{DateTime, Utc};
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::MissedTickBehavior;

use super::client::{BackendClient, Target};
use super::error::WatchError;
use super::state::{PositionsUpdate, TrackState};
use super::view::{is_centered, Coordinates};
use crate::upstream::PositionSample;

#[derive(Debug, Clone)]
pub struct WatchOptions {
    pub target: Target,
    pub interval: Duration,
    pub center: Option<Coordinates>,
    pub history: usize,
}

impl Default for WatchOptions {
    fn default() -> Self {
        Self {
            target: Target::default(),
            interval: Duration::from_secs(5),
            center: None,
            history: 50,
        }
    }
}

enum Event {
    Positions {
        seq: u64,
        result: Result<Vec<PositionSample>, WatchError>,
    },
    Location {
        seq: u64,
        coords: Coordinates,
        result: Result<String, WatchError>,
    },
}

pub struct Watcher {
    client: BackendClient,
    options: WatchOptions,
    state: TrackState,
    poll_seq: u64,
    geocode_seq: u64,
}

impl Watcher {
    pub fn new(client: BackendClient, options: WatchOptions) -> Self {
        let state = TrackState::new(options.history);
        Self {
            client,
            options,
            state,
            poll_seq: 0,
            geocode_seq: 0,
        }
    }

    /// Polls immediately and then on every interval until `stop_rx` fires.
    /// In-flight requests are not cancelled; their answers are sequenced.
    pub async fn run(mut self, mut stop_rx: oneshot::Receiver<()>) -> TrackState {
        let (tx, mut rx) = mpsc::channel(16);
        let mut ticker = tokio::time::interval(self.options.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                _ = ticker.tick() => self.spawn_poll(&tx),
                Some(event) = rx.recv() => self.handle(event, &tx),
                _ = &mut stop_rx => break,
            }
        }

        self.state
    }

    fn spawn_poll(&mut self, tx: &mpsc::Sender<Event>) {
        self.poll_seq += 1;
        let seq = self.poll_seq;
        let client = self.client.clone();
        let target = self.options.target.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let result = client.positions(&target).await;
            let _ = tx.send(Event::Positions { seq, result }).await;
        });
    }

    fn spawn_geocode(&mut self, coords: Coordinates, tx: &mpsc::Sender<Event>) {
        self.geocode_seq += 1;
        let seq = self.geocode_seq;
        let client = self.client.clone();
        let tx = tx.clone();

        tokio::spawn(async move {
            let result = client.location(coords.lat, coords.lng).await;
            let _ = tx.send(Event::Location { seq, coords, result }).await;
        });
    }

    fn handle(&mut self, event: Event, tx: &mpsc::Sender<Event>) {
        match event {
            Event::Positions { seq, result } => match result {
                Ok(samples) => match self.state.apply_positions(seq, samples) {
                    PositionsUpdate::Moved(coords) => {
                        self.print_latest();
                        self.spawn_geocode(coords, tx);
                    }
                    PositionsUpdate::Cleared => println!("No positions available"),
                    PositionsUpdate::Unchanged if self.state.latest().is_none() => {
                        println!("No positions available")
                    }
                    PositionsUpdate::Unchanged => {}
                    PositionsUpdate::Discarded => {
                        log::debug!("Discarding out-of-order poll answer #{}", seq)
                    }
                },
                Err(e) => log::warn!("Error fetching positions: {}", e),
            },
            Event::Location {
                seq,
                coords,
                result,
            } => match result {
                Ok(location) => {
                    if self.state.apply_location(seq, coords, location) {
                        println!("  over {}", self.state.location());
                    } else {
                        log::debug!("Discarding out-of-order location answer #{}", seq);
                    }
                }
                Err(e) => log::warn!("Error fetching location: {}", e),
            },
        }
    }

    fn print_latest(&self) {
        let Some(latest) = self.state.latest() else {
            return;
        };
        let when = DateTime::<Utc>::from_timestamp(latest.timestamp, 0)
            .map(|t| t.format("%H:%M:%S UTC").to_string())
            .unwrap_or_else(|| latest.timestamp.to_string());
        let centered = match self.options.center {
            Some(center) if is_centered(center, Coordinates::of(latest)) => " (centered)",
            Some(_) => " (off center)",
            None => "",
        };
        println!(
            "{} lat {:.2} lng {:.2} alt {:.2} km{}",
            when, latest.satlatitude, latest.satlongitude, latest.sataltitude, centered
        );
    }
}
