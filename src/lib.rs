//! navspy: scroll-synchronized section navigation for sectioned documents.
//!
//! The heart of the crate is [`tracker::NavTracker`], which keeps one sidebar link
//! highlighted for whichever section the reader has scrolled to. It talks to the page only
//! through the [`environment::Environment`] trait; [`app_state::Page`] implements that trait
//! for the terminal reader built from the remaining modules.
#![allow(clippy::multiple_crate_versions)]

pub mod app_state;
pub mod config;
pub mod document;
pub mod environment;
pub mod error;
pub mod formats;
pub mod input;
pub mod nav;
pub mod schedule;
pub mod scroll;
pub mod section;
pub mod tracker;
pub mod ui;
