/// One row of the daily missions table.
///
/// A record only exists when all four pieces were structurally present
/// in the source row; `image_url` is still optional because the
/// renderer tolerates its absence and simply draws no icon.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewardRecord {
    /// Short tier code ("T", "C", "P", "S", ...); display label and
    /// color-lookup key.
    pub badge: String,
    /// Absolute URL of the reward icon.
    pub image_url: Option<String>,
    /// Power requirement, displayed verbatim.
    pub power: String,
    /// Reward amount of the form `"<n>x V-Bucks"`.
    pub vbucks: String,
}

impl RewardRecord {
    /// Leading integer of the `vbucks` field: `"50x V-Bucks"` -> 50.
    /// Unparsable amounts count as zero rather than aborting the run.
    pub fn vbucks_quantity(&self) -> u32 {
        self.vbucks
            .split('x')
            .next()
            .map(str::trim)
            .and_then(|n| n.parse().ok())
            .unwrap_or(0)
    }
}

pub fn total_vbucks(records: &[RewardRecord]) -> u32 {
    records.iter().map(RewardRecord::vbucks_quantity).sum()
}

/// Header caption summarizing the day's total.
pub fn total_caption(records: &[RewardRecord]) -> String {
    format!("{}x V-Bucks Today", total_vbucks(records))
}
