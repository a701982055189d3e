#[derive(Debug, Clone)]
pub enum Message {
    // === ORDER MESSAGES ===
    OrderCreated(String),          // id
    OrdersNotFound,
    InvalidSlaHours(f64),          // rejected value
    OrderDetailsHeader(String),    // id
    OrderMarkedWaiting(String),    // id
    OrderPauseUpdated(String),     // id
    OrderResumed(String, String),  // id, restored status
    OrderNoOpenPause(String),      // id
    OrderCompleted(String),        // id
    PausesHeader,
    NoPauses,

    // === DASHBOARD MESSAGES ===
    DashboardHeader(String),       // reference time
    NewOverdueSinceLastSeen(usize), // count

    // === WATCH MESSAGES ===
    WatchStarted(u64),             // poll interval in seconds
    WatchStopped,
    WatchTick(usize),              // orders evaluated
    OrderBecameOverdue(String, String),  // id, chargeable hours
    OrderBecameNearDue(String, String),  // id, remaining
    OrderBackOnTrack(String),      // id
    WatchCtrlCListenFailed(String), // error

    // === SESSION MESSAGES ===
    SessionRole(String),           // role
    SessionUpdated(String),        // role

    // === CONFIGURATION MESSAGES ===
    ConfigSaved,
    ConfigDeleted,
    ConfigModuleSla,
    ConfigModuleWatch,

    // === EXPORT MESSAGES ===
    ExportCompleted(String),       // path

    // === DATABASE MESSAGES ===
    MigrationsFound(usize),        // count
    RunningMigration(u32, String), // version, name
    MigrationCompleted(u32),       // version
    MigrationFailed(u32, String),  // version, error
    AllMigrationsCompleted,

    // === PROMPTS ===
    PromptSelectModules,
    PromptElapsedMode,
    PromptDefaultSlaHours,
    PromptNearDueRatio,
    PromptPollInterval,
    PromptNotifyNearDue,
}
