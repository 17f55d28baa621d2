// Relevance scoring — decides whether an article is compensation or
// labor-market news, how strongly, and which topics it touches.

pub mod matcher;
pub mod region;
pub mod scorer;
pub mod vocabulary;
