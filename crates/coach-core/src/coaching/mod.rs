//! Coaching State Aggregator: event model, pure reducer, and the per-call session adapter.

pub mod event;
pub mod reducer;
pub mod session;
pub mod state;

pub use event::{EventKind, InboundEvent};
pub use reducer::{reduce, Disposition};
pub use session::{CoachingSession, SessionCommand, SessionStats};
pub use state::{
    BufferLimits, BuySignal, BuySignalType, CheckpointItemDetail, CheckpointStatus,
    CoachingFeedback, CoachingState, DetectedObjection, FeedbackPriority, FeedbackType,
    ItemStatus, ManagerAnalysis, ObjectionType, ProspectProfile, ScriptProgress, Stamped,
    StepAdvancement,
};
