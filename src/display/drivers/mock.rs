/*
 *  display/drivers/mock.rs
 *
 *  monogfx - page-addressed monochrome graphics
 *  (c) 2020-26 Stuart Hunter
 *
 *  Mock command port for testing without hardware
 *
 *  This program is free software: you can redistribute it and/or modify
 *  it under the terms of the GNU General Public License as published by
 *  the Free Software Foundation, either version 3 of the License, or
 *  (at your option) any later version.
 *
 *  This program is distributed in the hope that it will be useful,
 *  but WITHOUT ANY WARRANTY; without even the implied warranty of
 *  MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 *  GNU General Public License for more details.
 *
 *  See <http://www.gnu.org/licenses/> to get a copy of the GNU General
 *  Public License.
 *
 */

use std::sync::{Arc, Mutex, MutexGuard};

use crate::display::drivers::port::CommandPort;
use crate::display::error::DisplayError;

/// Mock command port
///
/// Records every command and data block so tests can check exactly what a
/// controller driver sent. Clones share the same state, so a test can keep
/// one handle while the driver owns another.
#[derive(Debug, Clone, Default)]
pub struct MockPort {
    state: Arc<Mutex<MockPortState>>,
}

/// Everything written through a [`MockPort`]
#[derive(Debug, Default)]
pub struct MockPortState {
    /// Commands in the order sent, one entry per write
    pub commands: Vec<Vec<u8>>,

    /// Data blocks in the order sent
    pub data: Vec<Vec<u8>>,

    /// Simulate failures (for error testing)
    pub simulate_command_failure: bool,
    pub simulate_data_failure: bool,
}

impl MockPortState {
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    pub fn last_command(&self) -> Option<&[u8]> {
        self.commands.last().map(Vec::as_slice)
    }

    pub fn last_data(&self) -> Option<&[u8]> {
        self.data.last().map(Vec::as_slice)
    }

    /// Total data bytes written
    pub fn bytes_written(&self) -> usize {
        self.data.iter().map(Vec::len).sum()
    }
}

impl MockPort {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get reference to state for inspection in tests
    pub fn state(&self) -> Arc<Mutex<MockPortState>> {
        Arc::clone(&self.state)
    }

    /// Forget recorded traffic, keeping the failure switches
    pub fn clear_history(&self) {
        let mut state = self.lock();
        state.commands.clear();
        state.data.clear();
    }

    fn lock(&self) -> MutexGuard<'_, MockPortState> {
        // a panicking test may poison the lock; the recorded bytes are still valid
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl CommandPort for MockPort {
    fn write_command(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let mut state = self.lock();
        if state.simulate_command_failure {
            return Err(DisplayError::Other("Simulated command failure".to_string()));
        }
        state.commands.push(bytes.to_vec());
        Ok(())
    }

    fn write_data(&mut self, bytes: &[u8]) -> Result<(), DisplayError> {
        let mut state = self.lock();
        if state.simulate_data_failure {
            return Err(DisplayError::Other("Simulated data failure".to_string()));
        }
        state.data.push(bytes.to_vec());
        Ok(())
    }
}
