pub mod bucket;
pub mod item;
pub mod money;
pub mod period;
pub mod totals;

pub use bucket::Bucket;
pub use item::{AccountMapping, Confidence, LineItem};
pub use period::Quarter;
pub use totals::BucketTotals;
