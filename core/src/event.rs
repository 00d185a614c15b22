use serde::{Deserialize, Serialize};

use crate::*;

/// Change notifications pushed to every subscribed observer, in the order they happen.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BoardEvent {
    CellOpened { coords: Coord2, view: CellView },
    FlagToggled { coords: Coord2, flagged: bool },
    GameWon,
    GameLost { coords: Coord2 },
    Reset { generation: u32 },
}

pub trait BoardObserver {
    fn on_event(&mut self, event: &BoardEvent);
}

impl<F> BoardObserver for F
where
    F: FnMut(&BoardEvent),
{
    fn on_event(&mut self, event: &BoardEvent) {
        self(event)
    }
}
