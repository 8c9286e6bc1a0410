//! Game policy engine: the per-cycle decision loop
//!
//! One cycle walks a fixed order — advent quests, regular quests, main
//! progress, lootboxes, board placement, energy gate, spawn/merge/burn —
//! because later steps assume earlier ones already updated server-side
//! state. Nothing persists between cycles; everything is refetched.

mod board;

use rand::Rng;
use std::time::{Duration, SystemTime, UNIX_EPOCH};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use giftfest_core::config::{DEFAULT_FIELD_ID, MIN_SPAWN_ENERGY, SPAWN_ENERGY_COST};
use giftfest_core::{
    BotSettings, ClientEvent, QuestState, QuestTag, Resource, Result, RewardKind,
    INCLUDE_GAME_ITEMS,
};
use giftfest_networking::GiftFestClient;

pub use board::{burn_target, merge_candidates, plan_placements, MergePair, Placement};

/// Sleep a uniformly random number of seconds from the range
async fn pause(range: (f64, f64)) {
    let secs = {
        let mut rng = rand::thread_rng();
        rng.gen_range(range.0..=range.1)
    };
    sleep(Duration::from_secs_f64(secs)).await;
}

fn epoch_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Seconds to sleep when energy is too low: time until the resource is
/// back at its limit, floored at zero, plus the given jitter.
fn energy_wait(resource: &Resource, now: i64, jitter: u64) -> u64 {
    resource.seconds_until_full(now).max(0) as u64 + jitter
}

/// Runs one decision cycle over the remote game state
pub struct PolicyEngine {
    session_name: String,
    settings: BotSettings,
}

impl PolicyEngine {
    pub fn new(session_name: &str, settings: &BotSettings) -> Self {
        Self {
            session_name: session_name.to_string(),
            settings: settings.clone(),
        }
    }

    /// One full cycle; returns early when the energy gate decides to wait
    pub async fn run_cycle(&self, client: &mut GiftFestClient) -> Result<()> {
        self.collect_advent(client).await?;
        self.collect_regular(client).await?;
        self.collect_main_progress(client).await?;
        self.open_lootboxes(client).await?;
        self.place_inventory(client).await?;

        let energy = match self.energy_gate(client).await? {
            Some(energy) => energy,
            // Slept out the regeneration window; re-evaluate next cycle
            None => return Ok(()),
        };

        self.play_board(client, energy).await?;

        pause(self.settings.pacing.cycle_end).await;
        Ok(())
    }

    /// Step 1: open ready advent-calendar cards
    async fn collect_advent(&self, client: &mut GiftFestClient) -> Result<()> {
        let quests = client.fetch_quests(QuestTag::Advent).await?;
        let ready: Vec<_> = quests
            .into_iter()
            .filter(|q| q.state == QuestState::Ready)
            .collect();
        if ready.is_empty() {
            return Ok(());
        }

        info!(
            session = %self.session_name,
            count = ready.len(),
            "Advent cards ready to open"
        );
        let user_agent = client.user_agent().to_string();

        for quest in ready {
            info!(session = %self.session_name, title = %quest.title, "Opening advent card");
            pause(self.settings.pacing.quest_collect).await;

            let collected = client.collect_quest_reward(quest.uuid.as_deref()).await?;
            if !collected.result {
                warn!(session = %self.session_name, title = %quest.title, "Failed to open advent card");
                continue;
            }

            let granted = collected.rewards.last().map(|r| r.real_amount).unwrap_or(1);
            for reward in &collected.rewards {
                info!(
                    session = %self.session_name,
                    "Received: {} {}",
                    reward.real_amount,
                    reward.slug
                );
            }

            if let Some(quest_id) = quest.id {
                pause(self.settings.pacing.pre_collect).await;
                let event = ClientEvent::advent_opened(quest_id, granted, &user_agent);
                client.send_client_event(&event).await?;
            }
        }
        Ok(())
    }

    /// Step 2: collect completed daily, partner, and epic quests
    async fn collect_regular(&self, client: &mut GiftFestClient) -> Result<()> {
        let mut quests = client.fetch_quests(QuestTag::Daily).await?;
        quests.extend(client.fetch_quests(QuestTag::Partner).await?);
        quests.extend(client.fetch_quests(QuestTag::Epic).await?);

        let completed: Vec<_> = quests
            .into_iter()
            .filter(|q| q.state == QuestState::Completed)
            .collect();
        if completed.is_empty() {
            return Ok(());
        }

        info!(
            session = %self.session_name,
            count = completed.len(),
            "Completed quests with collectable rewards"
        );

        for quest in completed {
            info!(session = %self.session_name, title = %quest.title, "Collecting quest reward");
            pause(self.settings.pacing.quest_collect).await;

            let collected = client.collect_quest_reward(quest.uuid.as_deref()).await?;
            if !collected.result {
                warn!(session = %self.session_name, title = %quest.title, "Failed to collect reward");
                continue;
            }

            for reward in &collected.rewards {
                match &reward.kind {
                    RewardKind::Lootbox => info!(
                        session = %self.session_name,
                        "Received lootbox: {}",
                        reward.title
                    ),
                    _ if !reward.slug.is_empty() => info!(
                        session = %self.session_name,
                        "Received: {} {}",
                        reward.real_amount,
                        reward.slug
                    ),
                    _ => info!(session = %self.session_name, "Reward received"),
                }
            }
        }
        Ok(())
    }

    /// Step 3: collect completed main-progress entries
    async fn collect_main_progress(&self, client: &mut GiftFestClient) -> Result<()> {
        let entries = client.fetch_quests(QuestTag::MainProgress).await?;
        let completed: Vec<_> = entries
            .into_iter()
            .filter(|q| q.state == QuestState::Completed)
            .collect();
        if completed.is_empty() {
            return Ok(());
        }

        info!(
            session = %self.session_name,
            count = completed.len(),
            "Main progress rewards available"
        );
        let user_agent = client.user_agent().to_string();

        for quest in completed {
            info!(
                session = %self.session_name,
                title = %quest.title,
                "Collecting main progress reward"
            );
            pause(self.settings.pacing.quest_collect).await;

            let event = ClientEvent::progress_collect(
                quest.id.unwrap_or_default(),
                &quest.quest_type,
                &user_agent,
            );
            client.send_client_event(&event).await?;

            pause(self.settings.pacing.pre_collect).await;

            let collected = client.collect_quest_reward(quest.uuid.as_deref()).await?;
            if !collected.result {
                warn!(session = %self.session_name, title = %quest.title, "Failed to collect reward");
                continue;
            }

            for reward in &collected.rewards {
                match &reward.kind {
                    RewardKind::LotteryChances => info!(
                        session = %self.session_name,
                        "Received {} raffle tickets",
                        reward.amount
                    ),
                    RewardKind::Lootbox => info!(
                        session = %self.session_name,
                        "Received lootbox: {}",
                        reward.title
                    ),
                    RewardKind::GameItem => info!(
                        session = %self.session_name,
                        "Received game item: {}",
                        reward.title
                    ),
                    kind => info!(
                        session = %self.session_name,
                        "Received reward: {}",
                        if reward.title.is_empty() { kind.label() } else { &reward.title }
                    ),
                }
            }
        }
        Ok(())
    }

    /// Step 4: open every lootbox group with a positive count
    async fn open_lootboxes(&self, client: &mut GiftFestClient) -> Result<()> {
        let groups = client.fetch_lootbox_groups().await?;
        if groups.is_empty() {
            return Ok(());
        }

        info!(session = %self.session_name, count = groups.len(), "Lootbox groups found");

        for group in groups.into_iter().filter(|g| g.count > 0) {
            info!(
                session = %self.session_name,
                "Opening {}x '{}'",
                group.count,
                group.title
            );
            pause(self.settings.pacing.quest_collect).await;

            let opened = client
                .activate_lootboxes(group.reward_amount, group.count)
                .await?;
            if opened.activated == 0 {
                warn!(session = %self.session_name, title = %group.title, "Failed to open lootboxes");
                continue;
            }

            info!(session = %self.session_name, "Opened {} lootboxes", opened.activated);
            for reward in &opened.rewards {
                info!(
                    session = %self.session_name,
                    "Dropped: {} ({})",
                    reward.title,
                    reward.kind.label()
                );
            }
        }
        Ok(())
    }

    /// Step 5: move loose game items from the inventory onto empty cells
    async fn place_inventory(&self, client: &mut GiftFestClient) -> Result<()> {
        let items = client.fetch_inventory(50, INCLUDE_GAME_ITEMS).await?;
        if items.is_empty() {
            return Ok(());
        }

        info!(
            session = %self.session_name,
            count = items.len(),
            "Game items in inventory"
        );

        let board = match client.fetch_board_state(DEFAULT_FIELD_ID).await? {
            Some(board) => board,
            None => return Ok(()),
        };

        let plan = plan_placements(&items, &board.empty());
        if plan.is_empty() {
            return Ok(());
        }

        info!(
            session = %self.session_name,
            count = plan.len(),
            "Placing items on the board"
        );

        for placement in plan {
            pause(self.settings.pacing.place).await;

            let placed = client
                .place_item(placement.cell_id, placement.item_id)
                .await?;
            if placed.field.is_some() {
                info!(
                    session = %self.session_name,
                    "Placed '{}' on cell {}",
                    placement.title,
                    placement.cell_id
                );
            } else {
                warn!(
                    session = %self.session_name,
                    "Failed to place '{}'",
                    placement.title
                );
            }
        }
        Ok(())
    }

    /// Step 6: gate on energy; sleeps out the regeneration window and
    /// returns `None` when the cycle should end early
    async fn energy_gate(&self, client: &mut GiftFestClient) -> Result<Option<u32>> {
        let resources = client.fetch_resources().await?;

        let energy = match resources.energy() {
            Some(energy) => energy,
            None => {
                // Resource missing from the response: treat energy as zero
                // but do not gate; the spawn check will simply skip.
                debug!(session = %self.session_name, "No energy resource reported");
                return Ok(Some(0));
            }
        };

        info!(
            session = %self.session_name,
            "Energy: {}/{}",
            energy.amount,
            energy.limit
        );

        if energy.amount < MIN_SPAWN_ENERGY {
            let jitter = {
                let (lo, hi) = self.settings.pacing.energy_jitter;
                rand::thread_rng().gen_range(lo..=hi)
            };
            let wait = energy_wait(energy, epoch_now(), jitter);
            info!(
                session = %self.session_name,
                "Not enough energy, sleeping {}m {}s",
                wait / 60,
                wait % 60
            );
            sleep(Duration::from_secs(wait)).await;
            return Ok(None);
        }

        Ok(Some(energy.amount))
    }

    /// Steps 7-10: refresh the board, then spawn, merge, or burn
    async fn play_board(&self, client: &mut GiftFestClient, energy: u32) -> Result<()> {
        let mut board = match client.fetch_board_state(DEFAULT_FIELD_ID).await? {
            Some(board) => board,
            None => {
                error!(session = %self.session_name, "Failed to fetch board state");
                sleep(Duration::from_secs(self.settings.pacing.cycle_failure_secs)).await;
                return Ok(());
            }
        };

        if board.cells.is_empty() {
            warn!(session = %self.session_name, "Board reports no cells");
            sleep(Duration::from_secs(self.settings.pacing.board_outage_secs)).await;
            return Ok(());
        }

        info!(
            session = %self.session_name,
            "Board: {} filled, {} empty of {}",
            board.filled().len(),
            board.empty().len(),
            board.cells.len()
        );

        let mut energy = energy;
        if !board.empty().is_empty() && energy >= MIN_SPAWN_ENERGY {
            info!(
                session = %self.session_name,
                "Spawning a new item (cost: {} energy)",
                SPAWN_ENERGY_COST
            );
            pause(self.settings.pacing.spawn).await;

            match client.spawn(DEFAULT_FIELD_ID).await?.field {
                Some(snapshot) => {
                    // Bookkeeping only; the server stays authoritative
                    energy = energy.saturating_sub(SPAWN_ENERGY_COST);
                    debug!(session = %self.session_name, energy, "Item spawned");
                    board = snapshot;
                }
                None => warn!(session = %self.session_name, "Spawn failed"),
            }
        }

        let mut merged = false;
        for pair in merge_candidates(&board.filled()) {
            info!(
                session = %self.session_name,
                "Merging '{}' (item {})",
                pair.title,
                pair.item_id
            );
            pause(self.settings.pacing.merge).await;

            if client.merge_cells(pair.cell_a, pair.cell_b).await? {
                info!(session = %self.session_name, "Merged");
                merged = true;
                // One merge per cycle; the rest wait for the next pass
                break;
            }
            warn!(session = %self.session_name, "Merge failed");
        }

        if !merged && board.empty().is_empty() {
            info!(
                session = %self.session_name,
                "Board is full with no moves, burning the cheapest item"
            );

            let target = {
                let filled = board.filled();
                burn_target(&filled).map(|cell| {
                    let title = cell
                        .item
                        .as_ref()
                        .map(|i| i.title.clone())
                        .unwrap_or_default();
                    (cell.id, title)
                })
            };

            if let Some((cell_id, title)) = target {
                info!(session = %self.session_name, "Burning '{}'", title);
                pause(self.settings.pacing.burn).await;

                if client.burn_cell(cell_id).await? {
                    info!(session = %self.session_name, "Item burned");
                } else {
                    error!(session = %self.session_name, "Burn failed");
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use giftfest_core::ENERGY_SLUG;

    fn low_energy(now: i64) -> Resource {
        Resource {
            slug: ENERGY_SLUG.to_string(),
            amount: 2,
            limit: 20,
            last_spawned_at: now - 300,
            spawn_period_seconds: 600,
        }
    }

    #[test]
    fn energy_wait_adds_jitter_to_the_base_window() {
        let now = 1_700_000_000;
        let energy = low_energy(now);
        // (20 - 2) * 600 - 300 = 10500 before jitter
        assert_eq!(energy_wait(&energy, now, 10), 10_510);
        assert_eq!(energy_wait(&energy, now, 30), 10_530);
    }

    #[test]
    fn energy_wait_sleep_stays_inside_the_jitter_band() {
        let now = 1_700_000_000;
        let energy = low_energy(now);
        for _ in 0..100 {
            let jitter = rand::thread_rng().gen_range(10..=30);
            let wait = energy_wait(&energy, now, jitter);
            assert!((10_510..=10_530).contains(&wait));
        }
    }

    #[test]
    fn overdue_regeneration_floors_at_jitter() {
        let now = 1_700_000_000;
        let energy = Resource {
            slug: ENERGY_SLUG.to_string(),
            amount: 4,
            limit: 5,
            last_spawned_at: now - 100_000,
            spawn_period_seconds: 600,
        };
        assert_eq!(energy_wait(&energy, now, 15), 15);
    }
}
