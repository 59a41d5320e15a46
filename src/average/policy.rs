//! Per-field reduction policy.

use crate::i3::{Field, OBJECT_DATA_SIZE};

/// How a field is combined across the records of one track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldPolicy {
    /// Carried from the head record untouched.
    NoAverage,
    /// Weighted by sqrt(height) and normalized by the total weight.
    Average,
    /// Summed.
    Total,
}

/// Immutable field -> policy table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyTable {
    policies: [FieldPolicy; OBJECT_DATA_SIZE],
}

impl PolicyTable {
    /// The standard Insight3 table.
    pub fn insight3() -> Self {
        use FieldPolicy::*;
        Self {
            policies: [
                Average,   // XO
                Average,   // YO
                Average,   // X
                Average,   // Y
                Total,     // HEIGHT
                Total,     // AREA
                Average,   // WIDTH
                NoAverage, // VISITED
                Average,   // ASPECT
                Average,   // BACKGROUND
                NoAverage, // SUM
                NoAverage, // CAT
                NoAverage, // FITI
                NoAverage, // FRAME
                NoAverage, // TLEN
                NoAverage, // LINK
                Average,   // ZO
                Average,   // Z
            ],
        }
    }

    /// Copy of this table with one field overridden.
    ///
    /// Integer slots are always carried, so asking to reduce one is ignored.
    pub fn with(mut self, field: Field, policy: FieldPolicy) -> Self {
        if !field.is_integer() {
            self.policies[field.index()] = policy;
        }
        self
    }

    #[inline]
    pub fn get(&self, field: Field) -> FieldPolicy {
        self.policies[field.index()]
    }

    /// Fields paired with their policy, in file order.
    pub fn iter(&self) -> impl Iterator<Item = (Field, FieldPolicy)> + '_ {
        Field::ALL.into_iter().map(move |f| (f, self.get(f)))
    }
}

impl Default for PolicyTable {
    fn default() -> Self {
        Self::insight3()
    }
}
