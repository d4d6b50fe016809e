//! Scripts for deploying and initializing the DiTo community contracts.

#![deny(missing_docs)]
#![deny(clippy::missing_docs_in_private_items)]

pub mod cli;
mod commands;
pub mod constants;
pub mod errors;
pub mod networks;
mod solidity;
pub mod utils;
