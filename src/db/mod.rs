pub mod connection;
pub mod dao;
pub mod entities;
pub mod filter;
pub mod providers;
