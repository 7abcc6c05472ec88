//! # Sequencing
//!
//! Pointer-driven reordering of a page's block list.
//!
//! The list is rendered with a drop gap before, between and after the items
//! (N blocks, N + 1 gaps). Two orders are tracked while dragging:
//!
//! - `committed`: the page's order when the drag began (source of truth)
//! - `live`: the working copy shown on screen, moved on every hover
//!
//! On drop the live order is committed if it diverges from `committed`, even
//! when the pointer was released over nothing, so a finished drag is never
//! lost.

/// Where the pointer is hovering
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DropTarget {
    /// Insertion point `i` in the live list, `0..=len`
    Gap(usize),
    /// Another block; the dragged block goes immediately before it
    Block(String),
}

#[derive(Debug, Clone)]
pub struct ReorderDrag {
    dragged: String,
    committed: Vec<String>,
    live: Vec<String>,
}

impl ReorderDrag {
    /// `None` if `dragged` isn't in `order`
    pub fn begin(order: Vec<String>, dragged: &str) -> Option<Self> {
        if !order.iter().any(|id| id == dragged) {
            return None;
        }
        Some(Self {
            dragged: dragged.to_string(),
            live: order.clone(),
            committed: order,
        })
    }

    pub fn dragged(&self) -> &str {
        &self.dragged
    }

    pub fn live_order(&self) -> &[String] {
        &self.live
    }

    pub fn committed_order(&self) -> &[String] {
        &self.committed
    }

    /// Move the dragged block to the hovered target. Returns whether the live
    /// order changed.
    pub fn hover(&mut self, target: &DropTarget) -> bool {
        let Some(current) = self.live.iter().position(|id| *id == self.dragged) else {
            return false;
        };

        let dest = match target {
            DropTarget::Gap(gap) => {
                if *gap > self.live.len() {
                    return false;
                }
                if *gap > current {
                    gap - 1
                } else {
                    *gap
                }
            }
            DropTarget::Block(id) => {
                if *id == self.dragged {
                    return false;
                }
                let Some(target) = self.live.iter().position(|b| b == id) else {
                    return false;
                };
                if target > current {
                    target - 1
                } else {
                    target
                }
            }
        };

        if dest == current {
            return false;
        }

        let moved = self.live.remove(current);
        self.live.insert(dest, moved);
        tracing::trace!("live order now {:?}", self.live);
        true
    }

    /// Finish the drag. Returns the order to commit, or `None` for no change.
    pub fn drop(mut self, target: Option<&DropTarget>) -> Option<Vec<String>> {
        if let Some(target) = target {
            self.hover(target);
        }

        if self.live != self.committed {
            Some(self.live)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(ids: &[&str]) -> Vec<String> {
        ids.iter().map(|s| s.to_string()).collect()
    }

    fn gap(i: usize) -> DropTarget {
        DropTarget::Gap(i)
    }

    fn block(id: &str) -> DropTarget {
        DropTarget::Block(id.to_string())
    }

    #[test]
    fn test_begin_requires_member() {
        assert!(ReorderDrag::begin(order(&["a", "b"]), "z").is_none());
    }

    #[test]
    fn test_drag_last_to_first_gap() {
        let drag = ReorderDrag::begin(order(&["A", "B", "C"]), "C").unwrap();
        assert_eq!(drag.drop(Some(&gap(0))), Some(order(&["C", "A", "B"])));
    }

    #[test]
    fn test_drop_on_self_is_noop() {
        let drag = ReorderDrag::begin(order(&["A", "B", "C"]), "A").unwrap();
        assert_eq!(drag.drop(Some(&block("A"))), None);
    }

    #[test]
    fn test_hover_block_places_before_it() {
        let mut drag = ReorderDrag::begin(order(&["A", "B", "C", "D"]), "A").unwrap();
        assert!(drag.hover(&block("D")));
        assert_eq!(drag.live_order(), order(&["B", "C", "A", "D"]).as_slice());

        // Already directly before D
        assert!(!drag.hover(&block("D")));

        assert!(drag.hover(&block("B")));
        assert_eq!(drag.live_order(), order(&["A", "B", "C", "D"]).as_slice());
    }

    #[test]
    fn test_gaps_adjacent_to_item_are_noops() {
        let mut drag = ReorderDrag::begin(order(&["A", "B", "C"]), "B").unwrap();
        assert!(!drag.hover(&gap(1)));
        assert!(!drag.hover(&gap(2)));
        assert!(drag.hover(&gap(3)));
        assert_eq!(drag.live_order(), order(&["A", "C", "B"]).as_slice());
    }

    #[test]
    fn test_out_of_range_targets_ignored() {
        let mut drag = ReorderDrag::begin(order(&["A", "B"]), "A").unwrap();
        assert!(!drag.hover(&gap(3)));
        assert!(!drag.hover(&block("missing")));
        assert_eq!(drag.live_order(), order(&["A", "B"]).as_slice());
    }

    #[test]
    fn test_drop_without_target_commits_live_order() {
        let mut drag = ReorderDrag::begin(order(&["A", "B", "C"]), "A").unwrap();
        drag.hover(&gap(3));
        assert_eq!(drag.drop(None), Some(order(&["B", "C", "A"])));
    }

    #[test]
    fn test_drop_without_movement_commits_nothing() {
        let drag = ReorderDrag::begin(order(&["A", "B", "C"]), "B").unwrap();
        assert_eq!(drag.drop(None), None);
    }

    #[test]
    fn test_hover_back_to_origin_commits_nothing() {
        let mut drag = ReorderDrag::begin(order(&["A", "B", "C"]), "A").unwrap();
        drag.hover(&gap(3));
        drag.hover(&gap(0));
        assert_eq!(drag.drop(None), None);
    }

    #[test]
    fn test_repeated_hovers_keep_a_permutation() {
        let mut drag = ReorderDrag::begin(order(&["A", "B", "C", "D", "E"]), "C").unwrap();
        for target in [gap(0), block("E"), gap(5), block("A"), gap(2), block("B")] {
            drag.hover(&target);
            let mut sorted = drag.live_order().to_vec();
            sorted.sort();
            assert_eq!(sorted, order(&["A", "B", "C", "D", "E"]));
        }
    }
}
