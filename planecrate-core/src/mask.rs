//! Inlier masks aligned to a point set

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Which side of a mask to keep when partitioning
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Inliers,
    Outliers,
}

/// Per-point inlier flags for one specific point set.
///
/// A mask starts all-false and entries only ever flip from false to true.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InlierMask {
    flags: Vec<bool>,
}

impl InlierMask {
    /// An all-false mask for a set of `len` points
    pub fn new(len: usize) -> Self {
        Self {
            flags: vec![false; len],
        }
    }

    pub fn len(&self) -> usize {
        self.flags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flags.is_empty()
    }

    /// Mark entry `index` as an inlier.
    ///
    /// Panics if `index` is out of bounds, like slice indexing.
    pub fn flag(&mut self, index: usize) {
        self.flags[index] = true;
    }

    pub fn is_inlier(&self, index: usize) -> bool {
        self.flags.get(index).copied().unwrap_or(false)
    }

    /// Number of inlier entries
    pub fn count(&self) -> usize {
        self.flags.iter().filter(|&&flag| flag).count()
    }

    /// OR `other` into this mask. Entries already set stay set.
    pub fn union_with(&mut self, other: &InlierMask) -> Result<()> {
        if other.len() != self.len() {
            return Err(Error::MaskSizeMismatch {
                mask_len: other.len(),
                set_len: self.len(),
            });
        }

        for (flag, &other_flag) in self.flags.iter_mut().zip(&other.flags) {
            *flag |= other_flag;
        }
        Ok(())
    }

    /// Whether entry `index` belongs to the requested side
    pub fn selects(&self, index: usize, membership: Membership) -> bool {
        match membership {
            Membership::Inliers => self.is_inlier(index),
            Membership::Outliers => !self.is_inlier(index),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        self.flags.iter().copied()
    }
}

impl FromIterator<bool> for InlierMask {
    fn from_iter<I: IntoIterator<Item = bool>>(iter: I) -> Self {
        Self {
            flags: iter.into_iter().collect(),
        }
    }
}
