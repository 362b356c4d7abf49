// Assessment engine: catalog, weighted-vote scoring, result enrichment.
// Everything below `handlers` and `store` is pure and synchronous.

pub mod catalog;
pub mod classifier;
pub mod handlers;
pub mod reference;
pub mod scoring;
pub mod store;
pub mod submission;
