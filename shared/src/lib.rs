//! Shared types for the Gallery platform
//!
//! Framework-free types used by the economy core and by whatever boundary
//! layer fronts it: domain enums, plain result payloads, the response
//! envelope, and time/hash utilities.

pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use response::{ApiResponse, ErrorCode};
pub use serde::{Deserialize, Serialize};
pub use types::{
    AppreciationReward, BoxKind, BoxReward, BuffEffects, BuffType, DividendEntry,
    MerchandiseStatus, RewardKind, SeriesCoupon, ShareGrant, SynthesisResult,
};
