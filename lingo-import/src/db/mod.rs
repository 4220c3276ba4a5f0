//! Translation store access

pub mod translations;
