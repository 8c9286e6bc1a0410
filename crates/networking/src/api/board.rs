//! Game board endpoints: state, spawn, merge, burn, place

use reqwest::Method;
use serde_json::{json, Value};
use tracing::debug;

use giftfest_core::{BoardResponse, BoardState, Result};

use super::decode_or_default;
use crate::GiftFestClient;

impl GiftFestClient {
    /// Fetch the current board snapshot
    ///
    /// `None` means the fetch failed or the body carried no board data at
    /// all; a board that decodes but has zero cells is a distinct condition
    /// the policy engine treats differently.
    pub async fn fetch_board_state(&mut self, field_id: u32) -> Result<Option<BoardState>> {
        let response = self
            .request(
                Method::GET,
                &format!("game2048/{}/state", field_id),
                None,
                None,
            )
            .await?;
        Ok(response.and_then(board_from_value))
    }

    /// Spawn a new item on the board (costs energy server-side)
    pub async fn spawn(&mut self, field_id: u32) -> Result<BoardResponse> {
        debug!(field_id, "Spawning item");
        let response = self
            .request(
                Method::POST,
                &format!("game2048/{}/spawn", field_id),
                Some(&json!({})),
                None,
            )
            .await?;
        Ok(decode_or_default(response, "spawn"))
    }

    /// Merge two cells holding the same item
    pub async fn merge_cells(&mut self, cell_a: i64, cell_b: i64) -> Result<bool> {
        debug!(cell_a, cell_b, "Merging cells");
        let body = json!({ "cell_ids": [cell_a, cell_b] });
        let response = self
            .request(Method::POST, "game2048/cells/merge", Some(&body), None)
            .await?;
        Ok(response.is_some())
    }

    /// Burn a cell's item to free the cell
    pub async fn burn_cell(&mut self, cell_id: i64) -> Result<bool> {
        debug!(cell_id, "Burning cell");
        let response = self
            .request(
                Method::POST,
                &format!("game2048/cells/{}/burn", cell_id),
                Some(&json!({})),
                None,
            )
            .await?;
        Ok(response.is_some())
    }

    /// Place an inventory item onto an empty cell
    pub async fn place_item(
        &mut self,
        cell_id: i64,
        inventory_item_id: i64,
    ) -> Result<BoardResponse> {
        debug!(cell_id, inventory_item_id, "Placing item on board");
        let body = json!({ "inventory_item_id": inventory_item_id });
        let response = self
            .request(
                Method::POST,
                &format!("game2048/cells/{}/place", cell_id),
                Some(&body),
                None,
            )
            .await?;
        Ok(decode_or_default(response, "place"))
    }
}

/// An empty success body reads as a failed fetch, not an empty board
fn board_from_value(value: Value) -> Option<BoardState> {
    if value.as_object().map_or(false, |obj| obj.is_empty()) {
        return None;
    }
    Some(decode_or_default(Some(value), "board state"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_success_body_is_a_failed_fetch() {
        assert!(board_from_value(json!({})).is_none());
    }

    #[test]
    fn board_with_zero_cells_is_still_a_board() {
        let state = board_from_value(json!({ "cells": [] })).unwrap();
        assert!(state.cells.is_empty());
    }

    #[test]
    fn populated_board_decodes() {
        let state = board_from_value(json!({
            "cells": [
                { "id": 1, "item": { "id": 4, "title": "Gift" } },
                { "id": 2 }
            ]
        }))
        .unwrap();
        assert_eq!(state.filled().len(), 1);
        assert_eq!(state.empty().len(), 1);
    }
}
