// compnews: compensation news relevance scoring and story grouping
//
// This is the library root. Each module corresponds to a stage of the
// ingest → score → store → digest pipeline.

pub mod config;
pub mod db;
pub mod feed;
pub mod grouping;
pub mod output;
pub mod pipeline;
pub mod relevance;
pub mod status;
