//! Centralized scoring, pacing and persistence constants for MathQuest.
//!
//! These values define the deterministic rules of the quest. Keeping them
//! together means the scoring curve can only be adjusted through reviewed code
//! changes rather than through external assets.

// Catalog ------------------------------------------------------------------
/// Number of stations on the map.
pub const TOPIC_COUNT: u8 = 7;
/// Frontier value meaning every topic is reachable.
pub const FRONTIER_MAX: u8 = TOPIC_COUNT + 1;
/// Problems per topic (easy, medium, boss).
pub const TIERS_PER_TOPIC: u8 = 3;

// Evaluation ---------------------------------------------------------------
/// Absolute tolerance for accepting a numeric answer.
pub const ANSWER_TOLERANCE: f64 = 0.1;
/// Wrong submissions after which the answer is revealed.
pub const MAX_ATTEMPTS: u8 = 3;

// Scoring ------------------------------------------------------------------
pub const BASE_POINTS: u32 = 100;
pub const TIER_POINTS: u32 = 50;
pub const SPEED_BONUS: u32 = 50;
pub const SPEED_WINDOW_DEFAULT: u32 = 30;
pub const SPEED_WINDOW_EXPLORER: u32 = 45;
pub const HINT_PENALTY_PER_ATTEMPT: u32 = 30;
pub const MIN_POINTS: u32 = 10;

// Completion ---------------------------------------------------------------
pub const CERTIFICATE_OFFSET: u32 = 1_000;
pub const CERTIFICATE_SUFFIX: &str = "MST";

// Persistence --------------------------------------------------------------
/// Key of the single save record in the external store.
pub const SAVE_KEY: &str = "mathQuestFinal_v27";

// Instructor panel ---------------------------------------------------------
/// Shared classroom PIN for the instructor panel. This is a convenience gate
/// for demos, not an authentication boundary: it is a plain literal compared
/// for equality with no rate limiting.
pub const INSTRUCTOR_PIN: &str = "314";

// Feedback copy ------------------------------------------------------------
pub(crate) const MSG_INVALID_INPUT: &str = "Enter a number!";
pub(crate) const MSG_SHIELDED: &str = "The Scholar shields you from this mistake!";
pub(crate) const MSG_WRONG_PIN: &str = "Wrong PIN!";
pub(crate) const MSG_MAP_UNLOCKED: &str = "The map is unlocked! Any station can be opened.";
pub(crate) const MSG_GAME_COMPLETED: &str = "All artifacts granted. The certificate is ready.";
