/*
storage.rs

Copyright 2025 Hervé Quatremain

This file is part of Hexmaze.

Hexmaze is free software: you can redistribute it and/or modify it under the
terms of the GNU General Public License as published by the Free Software
Foundation, either version 3 of the License, or (at your option) any later
version.

Hexmaze is distributed in the hope that it will be useful, but WITHOUT ANY
WARRANTY; without even the implied warranty of MERCHANTABILITY or FITNESS FOR
A PARTICULAR PURPOSE. See the GNU General Public License for more details.

You should have received a copy of the GNU General Public License along with
Hexmaze. If not, see <https://www.gnu.org/licenses/>.

SPDX-License-Identifier: GPL-3.0-or-later
*/

//! Allocation of the large arrays used by the generator.
//!
//! The size of every array is known from the grid dimensions before any work starts.
//! The memory is reserved up front with [`Vec::try_reserve_exact`] so that running out of memory
//! is reported as a [`StorageError`] instead of aborting the process.

use log::debug;
use std::error::Error;
use std::fmt;

/// Type of errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// Not enough memory for the named array.
    Exhausted { what: &'static str, len: usize },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            StorageError::Exhausted { what, len } => {
                write!(f, "not enough memory for {len} {what}")
            }
        }
    }
}

impl Error for StorageError {}

/// Return an empty vector that can hold `len` elements without reallocating.
pub fn reserve<T>(what: &'static str, len: usize) -> Result<Vec<T>, StorageError> {
    let mut v: Vec<T> = Vec::new();
    v.try_reserve_exact(len).map_err(|e| {
        debug!("Cannot reserve {len} {what}: {e}");
        StorageError::Exhausted { what, len }
    })?;
    Ok(v)
}

/// Return a vector of `len` copies of `value`.
pub fn allocate<T: Clone>(what: &'static str, len: usize, value: T) -> Result<Vec<T>, StorageError> {
    let mut v: Vec<T> = reserve(what, len)?;
    v.resize(len, value);
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allocate_fills_the_vector() {
        let v: Vec<i8> = allocate("cells", 5, -1).unwrap();
        assert_eq!(v, vec![-1; 5]);
        assert!(reserve::<u64>("walls", 10).unwrap().capacity() >= 10);
    }

    #[test]
    fn impossible_allocation_is_reported() {
        let err: StorageError = reserve::<u64>("walls", usize::MAX).unwrap_err();
        assert_eq!(
            err,
            StorageError::Exhausted {
                what: "walls",
                len: usize::MAX
            }
        );
        assert_eq!(err.to_string(), format!("not enough memory for {} walls", usize::MAX));
    }
}
