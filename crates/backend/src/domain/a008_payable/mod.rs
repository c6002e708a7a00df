pub mod posting;
pub mod repository;
pub mod service;
