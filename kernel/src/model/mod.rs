pub mod accounting;
pub mod auth;
pub mod complaint;
pub mod dashboard;
pub mod id;
pub mod menu;
pub mod notice;
pub mod order;
pub mod procurement;
pub mod report;
pub mod role;
pub mod user;
