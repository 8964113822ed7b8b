//! Scripts for deploying the `DealClient` contract and making storage deals through it.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod artifacts;
pub mod cli;
mod commands;
pub mod constants;
pub mod deal;
pub mod deploy;
pub mod errors;
pub mod solidity;
pub mod utils;
