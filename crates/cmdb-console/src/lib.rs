//! CMDB Console - browser-style admin UI for the configuration database
//!
//! Pages (assets, CI types, relationship types, lifecycles, graph) each own
//! their list state and dialogs; shared session state lives in explicit
//! stores passed down from the app, never in ambient singletons.

#![allow(clippy::too_many_arguments)]

pub mod app;
pub mod graph;
pub mod modals;
pub mod net;
pub mod pages;
pub mod state;

pub use app::CmdbApp;
