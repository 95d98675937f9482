//! Core types and trait definitions for the Agenda contact book.
//!
//! This crate is free of HTTP and database dependencies. The store backend
//! and the phone-validation client both plug in through the traits defined
//! here.

pub mod contact;
pub mod hobby;
pub mod phone;
pub mod store;
