/// Client connection configuration.
///
/// Values come from environment variables, with defaults matching a
/// locally running game server.
use log::warn;

/// Default websocket endpoint of the game server.
pub const DEFAULT_SERVER_URL: &str = "ws://127.0.0.1:8080/ws";

pub const SERVER_URL_VAR: &str = "AIRCRAFT_SERVER_URL";
pub const JOIN_ROOM_VAR: &str = "AIRCRAFT_JOIN_ROOM";
pub const AUTOPILOT_VAR: &str = "AIRCRAFT_AUTOPILOT";
pub const SEED_VAR: &str = "AIRCRAFT_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Websocket URL of the game server.
    pub server_url: String,
    /// Room code the autopilot joins instead of creating a room.
    pub join_room: Option<String>,
    /// Let the autopilot play instead of reading commands from stdin.
    pub autopilot: bool,
    /// Seed for the autopilot RNG.
    pub seed: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            server_url: DEFAULT_SERVER_URL.to_string(),
            join_room: None,
            autopilot: false,
            seed: None,
        }
    }
}

impl ClientConfig {
    /// Read the configuration from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        let defaults = Self::default();
        let seed = non_empty(SEED_VAR).and_then(|raw| match raw.parse::<u64>() {
            Ok(seed) => Some(seed),
            Err(_) => {
                warn!("[Config] Ignoring invalid {}={}", SEED_VAR, raw);
                None
            }
        });

        Self {
            server_url: non_empty(SERVER_URL_VAR).unwrap_or(defaults.server_url),
            join_room: non_empty(JOIN_ROOM_VAR),
            autopilot: non_empty(AUTOPILOT_VAR)
                .map(|raw| matches!(raw.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
                .unwrap_or(defaults.autopilot),
            seed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_when_environment_is_empty() {
        let config = ClientConfig::from_lookup(|_| None);
        assert_eq!(config, ClientConfig::default());
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
    }

    #[test]
    fn test_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (SERVER_URL_VAR, "ws://example.org/ws"),
            (JOIN_ROOM_VAR, " room_7 "),
            (AUTOPILOT_VAR, "TRUE"),
            (SEED_VAR, "42"),
        ]));
        assert_eq!(config.server_url, "ws://example.org/ws");
        assert_eq!(config.join_room.as_deref(), Some("room_7"));
        assert!(config.autopilot);
        assert_eq!(config.seed, Some(42));
    }

    #[test]
    fn test_blank_and_invalid_values_fall_back() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            (SERVER_URL_VAR, "   "),
            (JOIN_ROOM_VAR, ""),
            (AUTOPILOT_VAR, "0"),
            (SEED_VAR, "not-a-number"),
        ]));
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert_eq!(config.join_room, None);
        assert!(!config.autopilot);
        assert_eq!(config.seed, None);
    }
}
