// Story grouping — clusters scored articles that cover the same story.

pub mod cluster;
pub mod sequence;
pub mod similarity;
