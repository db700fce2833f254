pub mod cluster;
pub mod matcher;
pub mod metrics;
pub mod normalize;
pub mod pipeline;
pub mod reference;
pub mod report;
pub mod sort;
pub mod util;
pub mod validate;
