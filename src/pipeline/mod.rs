// Pipelines — the multi-step flows behind `compnews ingest` and
// `compnews digest`.
//
// Ingest: feed batch → normalize → dedup → score → store.
// Digest: load recent → region filter → group into stories.

pub mod dedup;
pub mod digest;
pub mod ingest;
