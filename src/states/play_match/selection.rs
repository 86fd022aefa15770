//! Selection Queue
//!
//! Level-ups and the opening build each ask a team to choose something:
//! a card or a building. Requests are served strictly first-in first-out and
//! only one is ever presented at a time; the simulation stays paused while
//! a selection is active.

use std::collections::VecDeque;

use super::cards::Card;
use super::production::BuildingChoice;
use crate::states::match_config::Team;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionKind {
    Card,
    Building,
}

/// The choices shown for one selection
#[derive(Debug, Clone, PartialEq)]
pub enum SelectionOffer {
    Cards(Vec<Card>),
    Buildings(Vec<BuildingChoice>),
}

impl SelectionOffer {
    pub fn kind(&self) -> SelectionKind {
        match self {
            SelectionOffer::Cards(_) => SelectionKind::Card,
            SelectionOffer::Buildings(_) => SelectionKind::Building,
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            SelectionOffer::Cards(cards) => cards.is_empty(),
            SelectionOffer::Buildings(buildings) => buildings.is_empty(),
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SelectionOffer::Cards(cards) => cards.len(),
            SelectionOffer::Buildings(buildings) => buildings.len(),
        }
    }
}

/// A queued request whose offer has not been drawn yet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingSelection {
    pub team: Team,
    pub kind: SelectionKind,
}

/// The selection currently awaiting a choice
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSelection {
    pub team: Team,
    pub offer: SelectionOffer,
}

#[derive(Debug, Clone, Default)]
pub struct SelectionQueue {
    pub active: Option<ActiveSelection>,
    pub pending: VecDeque<PendingSelection>,
}

impl SelectionQueue {
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn push(&mut self, team: Team, kind: SelectionKind) {
        self.pending.push_back(PendingSelection { team, kind });
    }

    pub fn next_pending(&mut self) -> Option<PendingSelection> {
        self.pending.pop_front()
    }

    pub fn clear(&mut self) {
        self.active = None;
        self.pending.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_queue_is_fifo() {
        let mut queue = SelectionQueue::default();
        queue.push(Team::Bottom, SelectionKind::Card);
        queue.push(Team::Top, SelectionKind::Building);

        assert_eq!(
            queue.next_pending(),
            Some(PendingSelection { team: Team::Bottom, kind: SelectionKind::Card })
        );
        assert_eq!(
            queue.next_pending(),
            Some(PendingSelection { team: Team::Top, kind: SelectionKind::Building })
        );
        assert_eq!(queue.next_pending(), None);
    }

    #[test]
    fn test_offer_kind() {
        assert_eq!(SelectionOffer::Cards(vec![]).kind(), SelectionKind::Card);
        assert!(SelectionOffer::Buildings(vec![]).is_empty());
    }
}
