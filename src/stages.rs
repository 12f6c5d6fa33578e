mod encode;
pub use encode::Encode;

mod filter;
pub use filter::Filter;

mod guide;
pub use guide::{guide_table, prefix, GuideTable, GUIDE_ENTRIES};

mod map;
pub use map::{offsets, Map};

mod sort;
pub use sort::Sort;
