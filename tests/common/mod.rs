#![allow(dead_code)]

use std::time::Duration;

use sat_o_track::web::{build_router, AppState, Config};
use serde_json::{json, Value};

pub const POSITIONS_PATH: &str = "/rest/v1/satellite/positions/25544/41.702/-76.014/0/10/";

/// Config pointing both upstreams at `upstream_uri` with test credentials.
pub fn test_config(upstream_uri: &str) -> Config {
    let mut config = Config::default();
    config.n2yo.api_key = Some("n2yo-key".to_string());
    config.n2yo.base_url = Some(upstream_uri.to_string());
    config.opencage.api_key = Some("opencage-key".to_string());
    config.opencage.base_url = Some(upstream_uri.to_string());
    config.upstream_timeout = Duration::from_secs(2);
    config
}

/// Serves the router on an ephemeral port and returns its base URL.
pub async fn spawn_app(config: Config) -> String {
    let state = AppState::new(config).expect("Failed to build app state");
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("Failed to read local addr");

    tokio::spawn(async move {
        axum::serve(listener, build_router(state))
            .await
            .expect("Test server failed");
    });

    format!("http://{}", addr)
}

pub fn positions_body(latitude: f64) -> Value {
    json!({
        "info": { "satname": "SPACE STATION", "satid": 25544, "transactionscount": 1 },
        "positions": [
            {
                "satlatitude": latitude, "satlongitude": -40.25, "sataltitude": 418.77,
                "azimuth": 98.1, "elevation": -31.2, "ra": 301.4, "dec": -4.2,
                "timestamp": 1760850000, "eclipsed": false
            },
            {
                "satlatitude": latitude + 1.0, "satlongitude": -40.2, "sataltitude": 418.78,
                "azimuth": 98.2, "elevation": -31.1, "ra": 301.5, "dec": -4.1,
                "timestamp": 1760850001, "eclipsed": false
            }
        ]
    })
}
