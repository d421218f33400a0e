/// Configuration for the `roomwatch` binary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchConfig {
    /// Room to watch; `None` means no room (no data will ever be shown)
    pub room: Option<String>,
    /// Fallback tracing filter when `RUST_LOG` is not set
    pub log_filter: String,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            room: None,
            log_filter: "roomwatch=info".to_string(),
        }
    }
}

impl WatchConfig {
    pub const ROOM_VAR: &'static str = "ROOMWATCH_ROOM";
    pub const LOG_VAR: &'static str = "ROOMWATCH_LOG";

    /// Load from `ROOMWATCH_ROOM` / `ROOMWATCH_LOG`, falling back to defaults
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load from an arbitrary variable lookup
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let default = Self::default();
        Self {
            room: lookup(Self::ROOM_VAR).and_then(non_empty),
            log_filter: lookup(Self::LOG_VAR)
                .and_then(non_empty)
                .unwrap_or(default.log_filter),
        }
    }

    /// Override the room with the first positional argument, if any
    pub fn with_args(mut self, mut args: impl Iterator<Item = String>) -> Self {
        if let Some(room) = args.next() {
            self.room = non_empty(room);
        }
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}
