//! Game board models for the /game2048 endpoints

use serde::{Deserialize, Serialize};

/// An item occupying a board cell
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardItem {
    /// Item tier identifier; lower ids are lower-tier ("cheaper") items
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub title: String,
}

/// One cell of the fixed-size board
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardCell {
    #[serde(default)]
    pub id: i64,
    #[serde(default)]
    pub item: Option<BoardItem>,
}

/// Full board snapshot as returned by `GET /game2048/{field}/state`
///
/// The same shape is embedded under `field` in spawn/place responses, so
/// both representations decode through this one type.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BoardState {
    #[serde(default)]
    pub cells: Vec<BoardCell>,
}

impl BoardState {
    /// Cells currently holding an item, in board order
    pub fn filled(&self) -> Vec<&BoardCell> {
        self.cells.iter().filter(|c| c.item.is_some()).collect()
    }

    /// Empty cells, in board order
    pub fn empty(&self) -> Vec<&BoardCell> {
        self.cells.iter().filter(|c| c.item.is_none()).collect()
    }
}

/// Response wrapper for board-mutating calls (spawn, place)
#[derive(Debug, Clone, Deserialize, Default)]
pub struct BoardResponse {
    #[serde(default)]
    pub field: Option<BoardState>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board_json() -> &'static str {
        r#"{"cells":[
            {"id":1,"item":{"id":3,"title":"Bow"}},
            {"id":2,"item":null},
            {"id":3,"item":{"id":3,"title":"Bow"}},
            {"id":4}
        ]}"#
    }

    #[test]
    fn filled_and_empty_partition_the_board() {
        let board: BoardState = serde_json::from_str(board_json()).unwrap();
        assert_eq!(board.filled().len() + board.empty().len(), board.cells.len());
        assert_eq!(board.filled().len(), 2);
        assert_eq!(board.empty().len(), 2);
    }

    #[test]
    fn spawn_snapshot_decodes_like_a_state_fetch() {
        let direct: BoardState = serde_json::from_str(board_json()).unwrap();
        let wrapped: BoardResponse =
            serde_json::from_str(&format!(r#"{{"field":{}}}"#, board_json())).unwrap();
        let embedded = wrapped.field.unwrap();
        assert_eq!(embedded.cells.len(), direct.cells.len());
        assert_eq!(embedded.filled().len(), direct.filled().len());
        assert_eq!(embedded.empty().len(), direct.empty().len());
    }
}
