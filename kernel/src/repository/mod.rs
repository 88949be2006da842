pub mod accounting;
pub mod auth;
pub mod complaint;
pub mod dashboard;
pub mod health;
pub mod menu;
pub mod notice;
pub mod order;
pub mod procurement;
pub mod report;
pub mod user;
