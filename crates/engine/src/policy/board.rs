//! Pure board decisions: what to place, merge, and burn
//!
//! These are deliberately simple positional rules, not a solver. The merge
//! rule takes the first pair per item identity in first-occurrence order
//! rather than searching for the best merge; a smarter pick is a possible
//! future improvement but the simple rule is the intended behavior.

use giftfest_core::{BoardCell, InventoryItem};

/// One planned placement of an inventory item onto an empty cell
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placement {
    pub cell_id: i64,
    pub item_id: i64,
    pub title: String,
}

/// A mergeable pair of cells sharing an item identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergePair {
    pub cell_a: i64,
    pub cell_b: i64,
    pub item_id: i64,
    pub title: String,
}

/// Pair loose inventory items with empty cells by position
///
/// First available item goes to the first available empty cell; the plan
/// holds `min(items, empty cells)` entries.
pub fn plan_placements(items: &[InventoryItem], empty: &[&BoardCell]) -> Vec<Placement> {
    items
        .iter()
        .zip(empty.iter())
        .map(|(item, cell)| Placement {
            cell_id: cell.id,
            item_id: item.id,
            title: item.reward.title.clone(),
        })
        .collect()
}

/// Mergeable pairs, one per item identity, in first-occurrence order
///
/// For each identity occupying at least two cells, the pair is the first
/// two such cells in board order.
pub fn merge_candidates(filled: &[&BoardCell]) -> Vec<MergePair> {
    let mut groups: Vec<(i64, Vec<&BoardCell>)> = Vec::new();

    for cell in filled {
        if let Some(item) = &cell.item {
            match groups.iter_mut().find(|(id, _)| *id == item.id) {
                Some((_, cells)) => cells.push(cell),
                None => groups.push((item.id, vec![cell])),
            }
        }
    }

    groups
        .into_iter()
        .filter(|(_, cells)| cells.len() >= 2)
        .map(|(item_id, cells)| MergePair {
            cell_a: cells[0].id,
            cell_b: cells[1].id,
            item_id,
            title: cells[0]
                .item
                .as_ref()
                .map(|i| i.title.clone())
                .unwrap_or_default(),
        })
        .collect()
}

/// Pick the filled cell to burn when the board is saturated
///
/// The numerically smallest item id stands in for the cheapest item.
pub fn burn_target<'a>(filled: &[&'a BoardCell]) -> Option<&'a BoardCell> {
    filled
        .iter()
        .min_by_key(|cell| cell.item.as_ref().map(|i| i.id).unwrap_or(i64::MAX))
        .copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftfest_core::{BoardItem, InventoryReward};

    fn cell(id: i64, item_id: Option<i64>) -> BoardCell {
        BoardCell {
            id,
            item: item_id.map(|item_id| BoardItem {
                id: item_id,
                title: format!("Tier {}", item_id),
            }),
        }
    }

    fn item(id: i64) -> InventoryItem {
        InventoryItem {
            id,
            reward: InventoryReward {
                slug: format!("gift_{}", id),
                title: format!("Gift {}", id),
            },
        }
    }

    #[test]
    fn placements_are_bounded_by_empty_cells() {
        let items: Vec<_> = (1..=9).map(item).collect();
        let cells: Vec<_> = (1..=7).map(|id| cell(id, None)).collect();
        let empty: Vec<&BoardCell> = cells.iter().collect();

        let plan = plan_placements(&items, &empty);
        assert_eq!(plan.len(), 7);
        assert_eq!(plan[0], Placement {
            cell_id: 1,
            item_id: 1,
            title: "Gift 1".into(),
        });
    }

    #[test]
    fn placements_are_bounded_by_items() {
        let items = vec![item(1), item(2)];
        let cells: Vec<_> = (1..=7).map(|id| cell(id, None)).collect();
        let empty: Vec<&BoardCell> = cells.iter().collect();

        assert_eq!(plan_placements(&items, &empty).len(), 2);
    }

    #[test]
    fn merge_pairs_first_two_cells_of_an_identity() {
        // 5 filled cells, cells 2 and 9 share item id 4
        let cells = vec![
            cell(1, Some(7)),
            cell(2, Some(4)),
            cell(5, Some(3)),
            cell(9, Some(4)),
            cell(11, Some(8)),
        ];
        let filled: Vec<&BoardCell> = cells.iter().collect();

        let pairs = merge_candidates(&filled);
        assert_eq!(pairs.len(), 1);
        assert_eq!(pairs[0].cell_a, 2);
        assert_eq!(pairs[0].cell_b, 9);
        assert_eq!(pairs[0].item_id, 4);
    }

    #[test]
    fn merge_candidates_honor_first_occurrence_order() {
        let cells = vec![
            cell(1, Some(7)),
            cell(2, Some(4)),
            cell(3, Some(7)),
            cell(4, Some(4)),
            cell(5, Some(4)),
        ];
        let filled: Vec<&BoardCell> = cells.iter().collect();

        let pairs = merge_candidates(&filled);
        // Item 7 appears first on the board, so its pair comes first;
        // item 4's pair is still only its first two cells.
        assert_eq!(pairs.len(), 2);
        assert_eq!((pairs[0].item_id, pairs[0].cell_a, pairs[0].cell_b), (7, 1, 3));
        assert_eq!((pairs[1].item_id, pairs[1].cell_a, pairs[1].cell_b), (4, 2, 4));
    }

    #[test]
    fn no_candidates_on_a_board_of_singles() {
        let cells = vec![cell(1, Some(1)), cell(2, Some(2)), cell(3, Some(3))];
        let filled: Vec<&BoardCell> = cells.iter().collect();
        assert!(merge_candidates(&filled).is_empty());
    }

    #[test]
    fn burn_picks_the_smallest_item_id() {
        let cells = vec![
            cell(1, Some(7)),
            cell(2, Some(2)),
            cell(3, Some(9)),
            cell(4, Some(5)),
        ];
        let filled: Vec<&BoardCell> = cells.iter().collect();

        let target = burn_target(&filled).unwrap();
        assert_eq!(target.id, 2);
    }

    #[test]
    fn burn_on_empty_board_is_none() {
        assert!(burn_target(&[]).is_none());
    }
}
