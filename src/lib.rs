//! Skin type analysis server
//!
//! Serves the camera page and analyses captured stills: three facial regions
//! are sampled, reduced to brightness, redness and oiliness, then classified
//! into a skin type with care recommendations.

pub mod analysis;
pub mod config;
pub mod handler;
pub mod http;
pub mod logger;
pub mod server;
pub mod session;
