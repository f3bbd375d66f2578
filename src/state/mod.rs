/// State management module
/// 
/// This module handles all application state, including:
/// - Shared data structures (data.rs)
/// - Query, page and result sequencing for the current search (search.rs)
/// - The full-size image viewer (lightbox.rs)

pub mod data;
pub mod lightbox;
pub mod search;
