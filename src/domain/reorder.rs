//! Reorder sequencer
//!
//! Plans the rank updates needed to move one item within an ordered
//! collection while keeping ranks exactly 1..N. The repository applies the
//! returned batch in a single transaction.

use crate::error::{AppError, AppResult};

/// One rank assignment produced by a reorder plan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RankChange {
    pub id: i32,
    pub rank: i32,
}

/// Compute the rank changes for moving `moved_id` to `new_index` (zero-based)
/// within `ordered_ids` (current rank order). Only items whose rank actually
/// changes are returned; an empty plan means the move was a no-op.
pub fn plan_reorder(ordered_ids: &[i32], moved_id: i32, new_index: usize) -> AppResult<Vec<RankChange>> {
    let current_index = ordered_ids
        .iter()
        .position(|&id| id == moved_id)
        .ok_or_else(|| AppError::InvalidRank(format!("item {} is not in the sequence", moved_id)))?;

    if new_index >= ordered_ids.len() {
        return Err(AppError::InvalidRank(format!(
            "index {} out of range for {} items",
            new_index,
            ordered_ids.len()
        )));
    }

    if new_index == current_index {
        return Ok(Vec::new());
    }

    let mut sequence: Vec<i32> = ordered_ids.to_vec();
    let item = sequence.remove(current_index);
    sequence.insert(new_index, item);

    let changes = sequence
        .iter()
        .enumerate()
        .filter_map(|(pos, &id)| {
            let rank = pos as i32 + 1;
            let old_rank = ordered_ids.iter().position(|&o| o == id).unwrap() as i32 + 1;
            (rank != old_rank).then_some(RankChange { id, rank })
        })
        .collect();

    Ok(changes)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn apply(ordered: &[i32], changes: &[RankChange]) -> Vec<i32> {
        let mut ranked: Vec<(i32, i32)> = ordered
            .iter()
            .enumerate()
            .map(|(pos, &id)| (id, pos as i32 + 1))
            .collect();
        for c in changes {
            for entry in ranked.iter_mut() {
                if entry.0 == c.id {
                    entry.1 = c.rank;
                }
            }
        }
        ranked.sort_by_key(|&(_, rank)| rank);
        ranked.into_iter().map(|(id, _)| id).collect()
    }

    #[test]
    fn test_move_forward() {
        let ordered = [10, 20, 30, 40];
        let changes = plan_reorder(&ordered, 10, 2).unwrap();
        assert_eq!(apply(&ordered, &changes), vec![20, 30, 10, 40]);
    }

    #[test]
    fn test_move_backward() {
        let ordered = [10, 20, 30, 40];
        let changes = plan_reorder(&ordered, 40, 0).unwrap();
        assert_eq!(apply(&ordered, &changes), vec![40, 10, 20, 30]);
    }

    #[test]
    fn test_noop_move() {
        let ordered = [10, 20, 30];
        assert!(plan_reorder(&ordered, 20, 1).unwrap().is_empty());
    }

    #[test]
    fn test_ranks_stay_dense() {
        let mut ordered = vec![1, 2, 3, 4, 5];
        for (moved, idx) in [(3, 0), (1, 4), (5, 2), (2, 1)] {
            let changes = plan_reorder(&ordered, moved, idx).unwrap();
            ordered = apply(&ordered, &changes);
        }
        // After any sequence of moves, ranks are exactly 1..N
        let mut sorted = ordered.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![1, 2, 3, 4, 5]);
        assert_eq!(ordered.len(), 5);
    }

    #[test]
    fn test_unknown_item() {
        assert!(matches!(
            plan_reorder(&[1, 2, 3], 9, 0),
            Err(AppError::InvalidRank(_))
        ));
    }

    #[test]
    fn test_index_out_of_range() {
        assert!(matches!(
            plan_reorder(&[1, 2, 3], 2, 3),
            Err(AppError::InvalidRank(_))
        ));
    }
}
