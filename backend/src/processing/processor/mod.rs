pub mod similarity;
pub mod matcher;
pub mod hierarchy;
pub mod pipeline;
