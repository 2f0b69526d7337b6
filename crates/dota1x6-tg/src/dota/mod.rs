//! Clients for the dota1x6.com site and its stats API

mod client;
mod config;
pub(crate) mod patch;
mod scrape;
mod stats;

pub(crate) use client::*;
pub(crate) use config::*;
pub(crate) use scrape::{ScrapeError, UpdatePage};
pub(crate) use stats::PlayerStats;
