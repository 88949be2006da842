pub mod auth;
pub mod complaint;
pub mod dashboard;
pub mod form;
pub mod kitchen;
pub mod menu;
pub mod notice;
pub mod order;
pub mod payment;
pub mod procurement;
pub mod report;
pub mod subscription;
pub mod user;
