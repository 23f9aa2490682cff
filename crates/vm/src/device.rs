//! I/O devices for the Intcode virtual machine.
//!
//! An engine reads from one device and writes to another without knowing who
//! is on the other side. Devices are strictly FIFO.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// A FIFO queue of integers standing in for the VM's input or output.
pub trait Device: fmt::Debug + Send {
    /// Appends a value.
    fn write(&mut self, value: i64);

    /// Removes and returns the oldest value, if any.
    fn read(&mut self) -> Option<i64>;

    /// Number of values waiting to be read.
    fn len(&self) -> usize;

    /// Returns true if nothing is waiting to be read.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A private in-memory queue; the default device of every engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueueDevice {
    items: VecDeque<i64>,
}

impl QueueDevice {
    /// Creates an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queued values, oldest first, without removing them.
    pub fn to_vec(&self) -> Vec<i64> {
        self.items.iter().copied().collect()
    }
}

impl FromIterator<i64> for QueueDevice {
    fn from_iter<I: IntoIterator<Item = i64>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

impl Device for QueueDevice {
    fn write(&mut self, value: i64) {
        self.items.push_back(value);
    }

    fn read(&mut self) -> Option<i64> {
        self.items.pop_front()
    }

    fn len(&self) -> usize {
        self.items.len()
    }
}

/// A queue that several handles can read from and write to.
///
/// Cloning a `SharedDevice` yields another handle to the same queue, so one
/// engine's output can be another engine's input.
#[derive(Debug, Clone, Default)]
pub struct SharedDevice {
    items: Arc<Mutex<VecDeque<i64>>>,
}

impl SharedDevice {
    /// Creates an empty shared queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the queued values, oldest first, without removing them.
    pub fn snapshot(&self) -> Vec<i64> {
        self.items.lock().iter().copied().collect()
    }

    /// Returns true if both handles refer to the same queue.
    pub fn same_queue(&self, other: &SharedDevice) -> bool {
        Arc::ptr_eq(&self.items, &other.items)
    }
}

impl Device for SharedDevice {
    fn write(&mut self, value: i64) {
        self.items.lock().push_back(value);
    }

    fn read(&mut self) -> Option<i64> {
        self.items.lock().pop_front()
    }

    fn len(&self) -> usize {
        self.items.lock().len()
    }
}
