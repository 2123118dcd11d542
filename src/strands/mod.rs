pub mod pattern;
pub mod repository;
pub mod resolver;

pub use self::pattern::{
    DiameterClass, Layer, StrandCoordinate, StrandCounts, StrandId, StrandPattern, StrandSlot,
};
pub use self::repository::{InMemoryPatternRepository, PatternRepository};
pub use self::resolver::{
    check_full_width, resolve_active, summarize, ActiveStrands, StrandSummary, WidthMismatch,
};
