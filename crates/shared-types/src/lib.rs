pub mod error;
pub mod feature_flags;

// Session and app configuration
pub mod config;
pub mod models;

// Admin console domain modules
pub mod analytics;
pub mod bid;
pub mod common;
pub mod dispute;
pub mod escrow;
pub mod filters;
pub mod job;
pub mod moderation;
pub mod notification;
pub mod payment;
pub mod project;
pub mod referral;
pub mod security;
pub mod seo;
pub mod support;
pub mod user;

pub use config::*;
pub use error::*;
pub use feature_flags::*;
pub use models::*;

pub use analytics::*;
pub use bid::*;
pub use common::*;
pub use dispute::*;
pub use escrow::*;
pub use filters::*;
pub use job::*;
pub use moderation::*;
pub use notification::*;
pub use payment::*;
pub use project::*;
pub use referral::*;
pub use security::*;
pub use seo::*;
pub use support::*;
pub use user::*;
