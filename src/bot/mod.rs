//! Automated opponents.
//!
//! - `MovePolicy`: picks a token from the legal moves
//! - `GreedyPolicy`: single-ply heuristic scorer
//! - `FirstMovablePolicy`: lowest legal token, for tests and baselines
//!
//! Rolling needs no decision, so bots only differ in how they move.

pub mod policy;

pub use policy::{FirstMovablePolicy, GreedyPolicy, MovePolicy};
