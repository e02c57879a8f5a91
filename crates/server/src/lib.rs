//! LogiCode similarity service: sea-orm backed submission store and the HTTP
//! API that turns a problem's submissions into a plagiarism report.

pub mod api;
pub mod config;
pub mod db;
pub mod entity;
pub mod repository;
