use std::collections::VecDeque;

use super::view::Coordinates;
use crate::upstream::PositionSample;

/// Shown until the first geocode response arrives.
pub const LOADING_LOCATION: &str = "Loading...";

#[derive(Debug, Clone, PartialEq)]
pub struct HistoryEntry {
    pub sample: PositionSample,
    pub location: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PositionsUpdate {
    /// An answer to an older poll than the one already applied.
    Discarded,
    Unchanged,
    Cleared,
    Moved(Coordinates),
}

/// What the watcher currently knows. Poll and geocode answers carry the
/// sequence number of their request and only newer answers are applied.
#[derive(Debug)]
pub struct TrackState {
    samples: Vec<PositionSample>,
    location: String,
    positions_seq: u64,
    location_seq: u64,
    history: VecDeque<HistoryEntry>,
    history_limit: usize,
}

impl TrackState {
    pub fn new(history_limit: usize) -> Self {
        Self {
            samples: Vec::new(),
            location: LOADING_LOCATION.to_string(),
            positions_seq: 0,
            location_seq: 0,
            history: VecDeque::new(),
            history_limit: history_limit.max(1),
        }
    }

    pub fn samples(&self) -> &[PositionSample] {
        &self.samples
    }

    pub fn latest(&self) -> Option<&PositionSample> {
        self.samples.last()
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn history(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.history.iter()
    }

    /// Replaces the held samples with a poll answer.
    pub fn apply_positions(&mut self, seq: u64, samples: Vec<PositionSample>) -> PositionsUpdate {
        if seq <= self.positions_seq {
            return PositionsUpdate::Discarded;
        }
        self.positions_seq = seq;

        let previous = self.latest().map(Coordinates::of);
        self.samples = samples;

        let Some(latest) = self.samples.last().cloned() else {
            return if previous.is_some() {
                PositionsUpdate::Cleared
            } else {
                PositionsUpdate::Unchanged
            };
        };

        let current = Coordinates::of(&latest);
        if previous == Some(current) {
            return PositionsUpdate::Unchanged;
        }

        if self.history.len() == self.history_limit {
            self.history.pop_front();
        }
        self.history.push_back(HistoryEntry {
            sample: latest,
            location: None,
        });
        PositionsUpdate::Moved(current)
    }

    /// Records a geocode answer for `coords`. Returns false when a newer
    /// answer was already applied.
    pub fn apply_location(&mut self, seq: u64, coords: Coordinates, location: String) -> bool {
        if seq <= self.location_seq {
            return false;
        }
        self.location_seq = seq;

        if let Some(entry) = self
            .history
            .iter_mut()
            .rev()
            .find(|e| e.location.is_none() && Coordinates::of(&e.sample) == coords)
        {
            entry.location = Some(location.clone());
        }
        self.location = location;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(lat: f64, lng: f64, timestamp: i64) -> PositionSample {
        PositionSample {
            satlatitude: lat,
            satlongitude: lng,
            sataltitude: 420.0,
            azimuth: 0.0,
            elevation: 0.0,
            ra: 0.0,
            dec: 0.0,
            timestamp,
            eclipsed: false,
        }
    }

    #[test]
    fn starts_empty_and_loading() {
        let state = TrackState::new(10);
        assert!(state.latest().is_none());
        assert_eq!(state.location(), LOADING_LOCATION);
    }

    #[test]
    fn each_poll_replaces_samples() {
        let mut state = TrackState::new(10);
        state.apply_positions(1, vec![sample(1.0, 1.0, 1), sample(2.0, 2.0, 2)]);
        let update = state.apply_positions(2, vec![sample(3.0, 3.0, 3)]);

        assert_eq!(update, PositionsUpdate::Moved(Coordinates { lat: 3.0, lng: 3.0 }));
        assert_eq!(state.samples().len(), 1);
        assert_eq!(state.latest().map(|s| s.timestamp), Some(3));
    }

    #[test]
    fn late_poll_answer_is_discarded() {
        let mut state = TrackState::new(10);
        state.apply_positions(2, vec![sample(5.0, 5.0, 20)]);
        let update = state.apply_positions(1, vec![sample(1.0, 1.0, 10)]);

        assert_eq!(update, PositionsUpdate::Discarded);
        assert_eq!(state.latest().map(|s| s.timestamp), Some(20));
    }

    #[test]
    fn same_coordinates_do_not_trigger_geocode() {
        let mut state = TrackState::new(10);
        state.apply_positions(1, vec![sample(1.0, 1.0, 1)]);
        let update = state.apply_positions(2, vec![sample(1.0, 1.0, 1)]);
        assert_eq!(update, PositionsUpdate::Unchanged);
        assert_eq!(state.history().count(), 1);
    }

    #[test]
    fn empty_answer_clears_samples() {
        let mut state = TrackState::new(10);
        assert_eq!(state.apply_positions(1, Vec::new()), PositionsUpdate::Unchanged);
        state.apply_positions(2, vec![sample(1.0, 1.0, 1)]);
        assert_eq!(state.apply_positions(3, Vec::new()), PositionsUpdate::Cleared);
        assert!(state.latest().is_none());
    }

    #[test]
    fn location_answers_fill_history_and_ignore_stale_ones() {
        let mut state = TrackState::new(10);
        let first = Coordinates { lat: 1.0, lng: 1.0 };
        let second = Coordinates { lat: 2.0, lng: 2.0 };
        state.apply_positions(1, vec![sample(1.0, 1.0, 1)]);
        state.apply_positions(2, vec![sample(2.0, 2.0, 2)]);

        assert!(state.apply_location(2, second, "Kansas".into()));
        assert!(!state.apply_location(1, first, "Nebraska".into()));

        assert_eq!(state.location(), "Kansas");
        let locations: Vec<_> = state.history().map(|e| e.location.clone()).collect();
        assert_eq!(locations, vec![None, Some("Kansas".to_string())]);
    }

    #[test]
    fn history_is_bounded() {
        let mut state = TrackState::new(2);
        for i in 1..=3 {
            state.apply_positions(i, vec![sample(i as f64, 0.0, i as i64)]);
        }
        let stamps: Vec<_> = state.history().map(|e| e.sample.timestamp).collect();
        assert_eq!(stamps, vec![2, 3]);
    }
}
