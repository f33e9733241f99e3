pub mod common;
pub mod import;
pub mod recent;
pub mod related;
pub mod search;
pub mod show;
pub mod stats;
pub mod suggest;
