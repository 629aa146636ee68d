//! Core Portcullis library (auth state, reducers, backends, config).

pub mod action;
pub mod backend;
pub mod config;
pub mod form;
pub mod logging;
pub mod props;
pub mod reducers;
pub mod session;
pub mod state;
pub mod store;
pub mod validation;
