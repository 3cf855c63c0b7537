//! Scripts for deploying and initializing the `TokenManager` governance contract.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod chain;
pub mod cli;
pub mod commands;
pub mod config;
pub mod constants;
pub mod deployments;
pub mod errors;
pub mod solidity;
pub mod transactions;
pub mod types;
pub mod utils;
