//! Taiwan High Speed Rail timetable crawler.
//!
//! Drives the operator's timetable search page through a browser, walks the
//! paginated results for each station pair and collects every row into one
//! ordered list that is written out as JSON.

pub mod app;
pub mod cli;
pub mod config;
pub mod crawl;
pub mod domain;
pub mod extract;
pub mod page;
pub mod prompt;
pub mod search;
pub mod session;
pub mod sink;
pub mod site;
pub mod wait;
pub mod webdriver;
