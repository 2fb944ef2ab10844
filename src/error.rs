// CLASSIFICATION: COMMUNITY
// Filename: error.rs v0.1
// Author: Lukas Bower
// Date Modified: 2026-10-18

//! Error type shared by the register map, detectors and board builder.

use std::path::PathBuf;

use thiserror::Error;

/// Errors returned by board construction and mapped GPIO access.
#[derive(Debug, Error)]
pub enum BoardError {
    #[error("invalid handle: {0}")]
    InvalidHandle(&'static str),
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
    #[error("mapped gpio {0} already enabled")]
    AlreadyEnabled(u32),
    #[error("mapped gpio {0} already disabled")]
    AlreadyDisabled(u32),
    #[error("invalid resource: {0}")]
    InvalidResource(String),
    #[error("no resources: {0}")]
    NoResources(String),
    #[error("unable to open {path}")]
    ResourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("board build step {step} not valid in state {state}")]
    InvalidState {
        step: &'static str,
        state: &'static str,
    },
    #[error("register map lock poisoned")]
    LockPoisoned,
    #[error("config error: {0}")]
    Config(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BoardError>;
