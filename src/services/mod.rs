pub mod auth;
pub mod diary;
pub mod import;
pub mod providers;
pub mod rate_limit;
pub mod stats;
