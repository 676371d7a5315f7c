// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

use crate::common::{DriverId, ShiftId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnknownDriverError {
    driver: DriverId,
}

impl UnknownDriverError {
    pub fn new(driver: DriverId) -> Self {
        Self { driver }
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }
}

impl std::fmt::Display for UnknownDriverError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Driver {} does not exist in this roster", self.driver)
    }
}

impl std::error::Error for UnknownDriverError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftAlreadyAssignedError {
    shift: ShiftId,
    driver: DriverId,
}

impl ShiftAlreadyAssignedError {
    pub fn new(shift: ShiftId, driver: DriverId) -> Self {
        Self { shift, driver }
    }

    pub fn shift(&self) -> ShiftId {
        self.shift
    }

    pub fn driver(&self) -> DriverId {
        self.driver
    }
}

impl std::fmt::Display for ShiftAlreadyAssignedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Shift {} is already assigned to driver {}",
            self.shift, self.driver
        )
    }
}

impl std::error::Error for ShiftAlreadyAssignedError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ShiftNotAssignedError {
    shift: ShiftId,
}

impl ShiftNotAssignedError {
    pub fn new(shift: ShiftId) -> Self {
        Self { shift }
    }

    pub fn shift(&self) -> ShiftId {
        self.shift
    }
}

impl std::fmt::Display for ShiftNotAssignedError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Shift {} is not assigned to any driver", self.shift)
    }
}

impl std::error::Error for ShiftNotAssignedError {}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssignError {
    UnknownDriver(UnknownDriverError),
    AlreadyAssigned(ShiftAlreadyAssignedError),
    NotAssigned(ShiftNotAssignedError),
}

impl std::fmt::Display for AssignError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssignError::UnknownDriver(e) => write!(f, "{}", e),
            AssignError::AlreadyAssigned(e) => write!(f, "{}", e),
            AssignError::NotAssigned(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for AssignError {}

impl From<UnknownDriverError> for AssignError {
    fn from(err: UnknownDriverError) -> Self {
        AssignError::UnknownDriver(err)
    }
}

impl From<ShiftAlreadyAssignedError> for AssignError {
    fn from(err: ShiftAlreadyAssignedError) -> Self {
        AssignError::AlreadyAssigned(err)
    }
}

impl From<ShiftNotAssignedError> for AssignError {
    fn from(err: ShiftNotAssignedError) -> Self {
        AssignError::NotAssigned(err)
    }
}
