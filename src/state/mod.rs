//! Application state and optimistic mutation tracking

pub mod app;
pub mod mutation;

pub use app::AppState;
pub use mutation::{Mutation, MutationState};
