use std::str::FromStr;

use crate::upstream::PositionSample;

/// Distance in degrees under which the view counts as centred.
pub const CENTER_TOLERANCE_DEG: f64 = 0.01;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinates {
    pub fn of(sample: &PositionSample) -> Self {
        Coordinates {
            lat: sample.satlatitude,
            lng: sample.satlongitude,
        }
    }
}

impl FromStr for Coordinates {
    type Err = String;

    /// Parses `"lat,lng"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<_> = s.split(',').map(|p| p.trim()).collect();
        if parts.len() != 2 {
            return Err(format!("expected \"lat,lng\", got {:?}", s));
        }
        let lat = parts[0]
            .parse()
            .map_err(|e| format!("invalid latitude {:?}: {}", parts[0], e))?;
        let lng = parts[1]
            .parse()
            .map_err(|e| format!("invalid longitude {:?}: {}", parts[1], e))?;
        Ok(Coordinates { lat, lng })
    }
}

/// Planar distance on raw degrees, not a geodesic one.
pub fn is_centered(center: Coordinates, target: Coordinates) -> bool {
    let dlat = center.lat - target.lat;
    let dlng = center.lng - target.lng;
    (dlat * dlat + dlng * dlng).sqrt() < CENTER_TOLERANCE_DEG
}
