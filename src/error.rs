// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Errors raised by the calendar and the operation store.
//!
//! - [`InvalidInput`] a payload failed validation before reaching storage.
//! - [`Range`] month or day arithmetic was handed an out-of-range value.
//! - [`Storage`] SQLite could not read or write.
//! - [`Corrupt`] a stored row could not be decoded.
//!
//! [`InvalidInput`]: Error::InvalidInput
//! [`Range`]: Error::Range
//! [`Storage`]: Error::Storage
//! [`Corrupt`]: Error::Corrupt
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("out of range: {0}")]
    Range(String),
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),
    #[error("corrupt row: {0}")]
    Corrupt(String),
}

impl Error {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Error::InvalidInput(_))
    }

    pub fn is_storage(&self) -> bool {
        matches!(self, Error::Storage(_))
    }
}

pub type Result<T> = std::result::Result<T, Error>;
