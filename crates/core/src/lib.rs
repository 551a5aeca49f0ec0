#![deny(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod category;
pub mod config;
pub mod document;
pub mod editor;
pub mod filename;
pub mod index;
pub mod markdown;
pub mod repo;
pub mod report;
pub mod search;
pub mod services;
