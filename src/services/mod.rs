pub mod bot_init;
pub mod discord;
pub mod event_handler;
pub mod ranking;
pub mod region;
pub mod reporting;
pub mod verification;
