/**
 * Content Module
 * Store access, fallback resolution and page assembly
 */

pub mod adjacency;
pub mod client;
pub mod fallback;
pub mod image;
pub mod memory;
pub mod query;
pub mod sanity;
pub mod sections;
pub mod service;
pub mod static_data;
pub mod store;
pub mod types;
pub mod video;

pub use client::ContentClient;
pub use service::ContentService;
pub use store::{ContentStore, StoreError};
