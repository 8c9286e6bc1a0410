//! Resource balances from /inventory/resources

use serde::{Deserialize, Serialize};

/// Wire slug of the energy resource gating spawn
pub const ENERGY_SLUG: &str = "energy";

/// A regenerating, capped resource (e.g. energy)
///
/// Regeneration is time-based; the math here is used only to size the
/// wait before the next cycle — the server stays authoritative.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Resource {
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub amount: u32,
    #[serde(default)]
    pub limit: u32,
    /// Epoch seconds of the last regeneration tick
    #[serde(default)]
    pub last_spawned_at: i64,
    #[serde(default)]
    pub spawn_period_seconds: i64,
}

impl Resource {
    /// Seconds until the resource regenerates back to its limit, measured
    /// from `now` (epoch seconds). Negative when already full or overdue.
    pub fn seconds_until_full(&self, now: i64) -> i64 {
        let to_restore = self.limit.saturating_sub(self.amount) as i64;
        to_restore * self.spawn_period_seconds - (now - self.last_spawned_at)
    }
}

/// Response from `GET /inventory/resources`
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ResourcesResponse {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl ResourcesResponse {
    /// Locate the energy resource, if the server reported one
    pub fn energy(&self) -> Option<&Resource> {
        self.resources.iter().find(|r| r.slug == ENERGY_SLUG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wait_until_full_matches_regeneration_math() {
        let now = 1_700_000_000;
        let energy = Resource {
            slug: ENERGY_SLUG.to_string(),
            amount: 2,
            limit: 20,
            last_spawned_at: now - 300,
            spawn_period_seconds: 600,
        };
        // (20 - 2) * 600 - 300
        assert_eq!(energy.seconds_until_full(now), 10_500);
    }

    #[test]
    fn full_resource_needs_no_wait() {
        let now = 1_700_000_000;
        let energy = Resource {
            slug: ENERGY_SLUG.to_string(),
            amount: 20,
            limit: 20,
            last_spawned_at: now - 100,
            spawn_period_seconds: 600,
        };
        assert!(energy.seconds_until_full(now) <= 0);
    }

    #[test]
    fn energy_lookup_by_slug() {
        let resp: ResourcesResponse = serde_json::from_str(
            r#"{"resources":[{"slug":"experience","amount":10},{"slug":"energy","amount":7,"limit":20}]}"#,
        )
        .unwrap();
        assert_eq!(resp.energy().map(|r| r.amount), Some(7));
    }
}
