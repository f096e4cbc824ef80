//! A fixed-capacity list of labelled arrays.
//!
//! Hosts keep one bank per storage block. Cells are edited one at a time
//! through [`ArrayBank::edit_cell`], which goes through the bounds-checked
//! linear write of `FlatArray`.
use std::slice::Iter;

use crate::config::LogicConfig;
use crate::error::BankError;
use crate::math::FlatArray;
use crate::record::StoredArray;

#[derive(Debug, Clone, PartialEq)]
pub struct BankSlot {
    pub label: String,
    pub transposed: bool,
    pub array: FlatArray,
}

#[derive(Debug, Clone)]
pub struct ArrayBank {
    capacity: usize,
    slots: Vec<BankSlot>,
}

impl ArrayBank {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            slots: Vec::with_capacity(capacity),
        }
    }

    pub fn from_config(config: &LogicConfig) -> Self {
        Self::new(config.bank_capacity)
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.slots.len() >= self.capacity
    }

    pub fn iter(&self) -> Iter<'_, BankSlot> {
        self.slots.iter()
    }

    /// Append an array and return its slot index.
    pub fn push(&mut self, label: impl Into<String>, array: FlatArray) -> Result<usize, BankError> {
        if self.is_full() {
            return Err(BankError::Full {
                capacity: self.capacity,
            });
        }
        self.slots.push(BankSlot {
            label: label.into(),
            transposed: false,
            array,
        });
        Ok(self.slots.len() - 1)
    }

    /// Remove a slot; later slots shift down by one.
    pub fn remove(&mut self, index: usize) -> Result<BankSlot, BankError> {
        if index >= self.slots.len() {
            return Err(self.no_slot(index));
        }
        Ok(self.slots.remove(index))
    }

    pub fn get(&self, index: usize) -> Option<&BankSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut BankSlot> {
        self.slots.get_mut(index)
    }

    /// First slot carrying `label`.
    pub fn find(&self, label: &str) -> Option<(usize, &BankSlot)> {
        self.slots.iter().enumerate().find(|(_, s)| s.label == label)
    }

    /// Parse `text` as a number and write it at linear `index` of a slot.
    ///
    /// An index past the end of the array is ignored, like any linear write.
    pub fn edit_cell(&mut self, slot: usize, index: usize, text: &str) -> Result<(), BankError> {
        let value: f64 = text.trim().parse().map_err(|_| BankError::InvalidCell {
            text: text.to_string(),
        })?;
        let len = self.slots.len();
        let entry = self
            .slots
            .get_mut(slot)
            .ok_or(BankError::NoSlot { index: slot, len })?;
        entry.array.set_index(index, value);
        Ok(())
    }

    pub fn to_records(&self) -> Vec<StoredArray> {
        self.slots
            .iter()
            .map(|s| StoredArray::capture(s.label.clone(), &s.array, s.transposed))
            .collect()
    }

    /// Rebuild a bank from persisted records. Records past `capacity` are dropped.
    pub fn from_records(capacity: usize, records: &[StoredArray]) -> Result<Self, BankError> {
        if records.len() > capacity {
            log::warn!(
                "Dropping {} stored arrays past bank capacity {}",
                records.len() - capacity,
                capacity
            );
        }
        let mut bank = Self::new(capacity);
        for rec in records.iter().take(capacity) {
            let array = rec.restore().map_err(|source| BankError::Record {
                label: rec.label.clone(),
                source,
            })?;
            bank.slots.push(BankSlot {
                label: rec.label.clone(),
                transposed: rec.transposed,
                array,
            });
        }
        Ok(bank)
    }

    fn no_slot(&self, index: usize) -> BankError {
        BankError::NoSlot {
            index,
            len: self.slots.len(),
        }
    }
}

impl Default for ArrayBank {
    fn default() -> Self {
        Self::from_config(&LogicConfig::default())
    }
}
