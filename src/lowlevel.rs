//! Building blocks behind the matchers.
//!
//! Exposes the correlation plan and sample layouts for callers that want
//! to inspect pattern statistics or build their own strategy. Most users
//! only need `PatternMatcher` and `QuadrantMatcher`.

pub use crate::cache::PixelWindowCache;
pub use crate::strategy::{
    ChannelStats, CorrelationPlan, MatchingStrategy, PixelGroup, SampleLayout, SampleRegion,
};
