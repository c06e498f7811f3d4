//! Lifecycle management and collection views for COE structured operations.
//!
//! The crate is organised around three pieces: the operation entity and its
//! status vocabulary ([`operation`], [`status`]), the lifecycle controller
//! that validates and applies transitions ([`lifecycle`], with a persisted
//! variant in [`registry`] and an async front in [`dispatch`]), and the
//! collection view engine that derives filtered, ordered, paged listings
//! ([`view`]).

pub mod dispatch;
pub mod error;
pub mod fixtures;
pub mod lifecycle;
pub mod operation;
pub mod reference;
pub mod registry;
pub mod simulation;
pub mod status;
pub mod utils;
pub mod view;
