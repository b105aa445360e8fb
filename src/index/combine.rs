//! Two-field combination of equality lookups

use std::collections::HashSet;

use super::scalar::RowId;

/// How two equality results are merged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CombineOp {
    /// Union: leading hits, then trailing hits, each row once
    Or,
    /// Intersection: leading hits that also appear in the trailing hits
    And,
}

impl CombineOp {
    /// Merge two hit lists by row position.
    ///
    /// Output order follows `leading`, then (for `Or`) `trailing`; a row
    /// appears at its first occurrence only.
    pub fn combine(self, leading: Vec<RowId>, trailing: Vec<RowId>) -> Vec<RowId> {
        let mut seen = HashSet::new();
        match self {
            CombineOp::Or => leading
                .into_iter()
                .chain(trailing)
                .filter(|id| seen.insert(*id))
                .collect(),
            CombineOp::And => {
                let trailing: HashSet<RowId> = trailing.into_iter().collect();
                leading
                    .into_iter()
                    .filter(|id| trailing.contains(id) && seen.insert(*id))
                    .collect()
            }
        }
    }
}
