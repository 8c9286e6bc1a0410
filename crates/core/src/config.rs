//! Explicit configuration passed into the session lifecycle and policy engine
//!
//! Nothing here is read from the environment or a global; the external
//! config-loading collaborator fills these in per session.

/// Energy cost of spawning one item on the board
pub const SPAWN_ENERGY_COST: u32 = 5;

/// Minimum energy required before a spawn is attempted
pub const MIN_SPAWN_ENERGY: u32 = 5;

/// Default game field id (the backend currently serves a single field)
pub const DEFAULT_FIELD_ID: u32 = 1;

/// Per-request timeout ceiling in seconds
pub const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Per-session record supplied by the external config loader
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Session name (also feeds the referral bucket)
    pub session_name: String,
    /// User agent string to impersonate
    pub user_agent: String,
    /// Proxy URL this session is bound to, if any
    pub proxy: Option<String>,
}

/// Behavior knobs shared by the session lifecycle and policy engine
#[derive(Debug, Clone)]
pub struct BotSettings {
    /// API base URL, no trailing slash
    pub api_base: String,
    /// Configured referral parameter (base64 start param), if any
    pub ref_code: Option<String>,
    /// Whether a working proxy is required to start
    pub use_proxy: bool,
    /// Upper bound of the randomized startup delay window, seconds
    pub session_start_delay_secs: f64,
    /// Delay ranges for every randomized pause
    pub pacing: Pacing,
}

impl Default for BotSettings {
    fn default() -> Self {
        Self {
            api_base: "https://gift.stepcdn.space".to_string(),
            ref_code: None,
            use_proxy: false,
            session_start_delay_secs: 30.0,
            pacing: Pacing::default(),
        }
    }
}

/// Randomized delay ranges, seconds. Each pause in the cycle draws
/// uniformly from its range to model human pacing.
#[derive(Debug, Clone)]
pub struct Pacing {
    /// Between quest/lootbox open actions
    pub quest_collect: (f64, f64),
    /// Between a pre-collect analytics event and the collect call
    pub pre_collect: (f64, f64),
    /// Before placing an inventory item on the board
    pub place: (f64, f64),
    /// Before a spawn call
    pub spawn: (f64, f64),
    /// Before a merge call
    pub merge: (f64, f64),
    /// Before a burn call
    pub burn: (f64, f64),
    /// End-of-cycle jitter
    pub cycle_end: (f64, f64),
    /// Jitter added on top of the computed energy wait, seconds
    pub energy_jitter: (u64, u64),
    /// Sleep after a failed cycle or board fetch failure
    pub cycle_failure_secs: u64,
    /// Sleep when the board reports zero cells
    pub board_outage_secs: u64,
    /// Outer-loop backoff after an unexpected lifecycle error
    pub outer_backoff: (f64, f64),
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            quest_collect: (2.0, 5.0),
            pre_collect: (1.0, 2.0),
            place: (1.0, 3.0),
            spawn: (1.0, 3.0),
            merge: (1.0, 2.0),
            burn: (1.0, 2.0),
            cycle_end: (1.0, 3.0),
            energy_jitter: (10, 30),
            cycle_failure_secs: 60,
            board_outage_secs: 300,
            outer_backoff: (60.0, 120.0),
        }
    }
}
