//! Move planning for the board.
//!
//! Re-ranking a client must keep every lane's priorities a contiguous run
//! 1..N with no duplicates. The planner here is pure: given the client being
//! moved, the destination lane's current tail, and the requested change, it
//! produces the priority shifts and final placement for the store to apply in
//! one transaction. It never touches storage itself.

use crate::domain::client::{Client, Lane};

/// A requested change to a client's placement. Both fields optional;
/// neither present (or both matching current state) means no move.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MoveRequest {
    pub lane: Option<Lane>,
    pub priority: Option<i64>,
}

/// Which priorities inside a lane a shift applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PriorityBand {
    /// priority > n
    Above(i64),
    /// priority >= n
    AtOrAbove(i64),
    /// lo <= priority <= hi
    Slice { lo: i64, hi: i64 },
}

/// A single renumbering step: add `delta` to every priority in `band`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shift {
    pub lane: Lane,
    pub band: PriorityBand,
    pub delta: i64,
}

/// Final resting place of the moved client
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub lane: Lane,
    pub priority: i64,
}

/// The full mutation for one move: shifts first, then the placement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovePlan {
    pub shifts: Vec<Shift>,
    pub placement: Placement,
}

/// Computes the mutation needed to honor `request` for `client`.
///
/// `dest_tail` is the highest priority currently in the destination lane
/// (0 when empty); for a same-lane move that is the client's own lane.
/// Returns `None` when the request leaves the client where it already is.
///
/// A requested priority past the end of the destination lane is clamped to
/// the append slot, so the contiguity invariant holds for any input.
pub fn plan_move(client: &Client, dest_tail: i64, request: MoveRequest) -> Option<MovePlan> {
    let dest_lane = request.lane.unwrap_or(client.lane);

    if dest_lane != client.lane {
        // Lane change: close the gap left behind, then open a slot in the
        // destination (or append when no priority was asked for).
        let mut shifts = vec![Shift {
            lane: client.lane,
            band: PriorityBand::Above(client.priority),
            delta: -1,
        }];

        let priority = match request.priority {
            Some(p) => {
                let p = p.clamp(1, dest_tail + 1);
                shifts.push(Shift {
                    lane: dest_lane,
                    band: PriorityBand::AtOrAbove(p),
                    delta: 1,
                });
                p
            }
            None => dest_tail + 1,
        };

        return Some(MovePlan {
            shifts,
            placement: Placement {
                lane: dest_lane,
                priority,
            },
        });
    }

    // Same lane: only a differing priority is a move.
    let priority = request.priority?.clamp(1, dest_tail.max(1));
    if priority == client.priority {
        return None;
    }

    let band = if priority > client.priority {
        // Moving toward the tail: the block in between slides up one.
        PriorityBand::Slice {
            lo: client.priority + 1,
            hi: priority,
        }
    } else {
        // Moving toward the head: the block in between slides down one.
        PriorityBand::Slice {
            lo: priority,
            hi: client.priority - 1,
        }
    };
    let delta = if priority > client.priority { -1 } else { 1 };

    Some(MovePlan {
        shifts: vec![Shift {
            lane: client.lane,
            band,
            delta,
        }],
        placement: Placement {
            lane: client.lane,
            priority,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(id: i64, lane: Lane, priority: i64) -> Client {
        Client::new(id, format!("Client {id}"), lane, priority)
    }

    #[test]
    fn test_lane_change_without_priority_appends() {
        // backlog P1,P2,P3; move P1 to in-progress which holds 2 clients
        let c = client(1, Lane::Backlog, 1);
        let plan = plan_move(&c, 2, MoveRequest {
            lane: Some(Lane::InProgress),
            priority: None,
        })
        .unwrap();

        assert_eq!(plan.shifts, vec![Shift {
            lane: Lane::Backlog,
            band: PriorityBand::Above(1),
            delta: -1,
        }]);
        assert_eq!(plan.placement, Placement {
            lane: Lane::InProgress,
            priority: 3,
        });
    }

    #[test]
    fn test_lane_change_into_empty_lane() {
        let c = client(1, Lane::Backlog, 2);
        let plan = plan_move(&c, 0, MoveRequest {
            lane: Some(Lane::Complete),
            priority: None,
        })
        .unwrap();

        assert_eq!(plan.placement.priority, 1);
    }

    #[test]
    fn test_lane_change_with_priority_opens_slot() {
        let c = client(4, Lane::Backlog, 2);
        let plan = plan_move(&c, 3, MoveRequest {
            lane: Some(Lane::InProgress),
            priority: Some(2),
        })
        .unwrap();

        assert_eq!(plan.shifts, vec![
            Shift {
                lane: Lane::Backlog,
                band: PriorityBand::Above(2),
                delta: -1,
            },
            Shift {
                lane: Lane::InProgress,
                band: PriorityBand::AtOrAbove(2),
                delta: 1,
            },
        ]);
        assert_eq!(plan.placement, Placement {
            lane: Lane::InProgress,
            priority: 2,
        });
    }

    #[test]
    fn test_oversized_priority_clamps_to_append_slot() {
        // priority 50 into a 3-client lane lands at 4, not 50
        let c = client(1, Lane::Backlog, 1);
        let plan = plan_move(&c, 3, MoveRequest {
            lane: Some(Lane::InProgress),
            priority: Some(50),
        })
        .unwrap();

        assert_eq!(plan.placement.priority, 4);
    }

    #[test]
    fn test_same_lane_move_down() {
        // backlog P1=1,P2=2,P3=3; P1 -> 3 leaves P2=1,P3=2,P1=3
        let c = client(1, Lane::Backlog, 1);
        let plan = plan_move(&c, 3, MoveRequest {
            lane: None,
            priority: Some(3),
        })
        .unwrap();

        assert_eq!(plan.shifts, vec![Shift {
            lane: Lane::Backlog,
            band: PriorityBand::Slice { lo: 2, hi: 3 },
            delta: -1,
        }]);
        assert_eq!(plan.placement.priority, 3);
    }

    #[test]
    fn test_same_lane_move_up() {
        // backlog P1=1,P2=2,P3=3; P3 -> 1 leaves P3=1,P1=2,P2=3
        let c = client(3, Lane::Backlog, 3);
        let plan = plan_move(&c, 3, MoveRequest {
            lane: None,
            priority: Some(1),
        })
        .unwrap();

        assert_eq!(plan.shifts, vec![Shift {
            lane: Lane::Backlog,
            band: PriorityBand::Slice { lo: 1, hi: 2 },
            delta: 1,
        }]);
        assert_eq!(plan.placement.priority, 1);
    }

    #[test]
    fn test_same_lane_oversized_priority_clamps_to_tail() {
        let c = client(1, Lane::Backlog, 1);
        let plan = plan_move(&c, 3, MoveRequest {
            lane: None,
            priority: Some(50),
        })
        .unwrap();

        assert_eq!(plan.placement.priority, 3);
    }

    #[test]
    fn test_no_change_is_none() {
        let c = client(2, Lane::InProgress, 2);

        // Nothing requested
        assert!(plan_move(&c, 3, MoveRequest::default()).is_none());

        // Same lane, same priority
        assert!(plan_move(&c, 3, MoveRequest {
            lane: Some(Lane::InProgress),
            priority: Some(2),
        })
        .is_none());

        // Same lane spelled out, no priority
        assert!(plan_move(&c, 3, MoveRequest {
            lane: Some(Lane::InProgress),
            priority: None,
        })
        .is_none());
    }

    #[test]
    fn test_explicit_same_lane_is_a_rerank_not_a_lane_change() {
        let c = client(2, Lane::InProgress, 2);
        let plan = plan_move(&c, 3, MoveRequest {
            lane: Some(Lane::InProgress),
            priority: Some(1),
        })
        .unwrap();

        // One slice shift, no gap-closing shift
        assert_eq!(plan.shifts.len(), 1);
        assert_eq!(plan.placement, Placement {
            lane: Lane::InProgress,
            priority: 1,
        });
    }
}
