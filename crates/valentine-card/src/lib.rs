//! Valentine proposal card
//!
//! A Dioxus desktop application rendering the card on top of the
//! `valentine-core` state machine.

pub mod components;
pub mod config;
pub mod theme;
