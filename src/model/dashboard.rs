use serde::{Deserialize, Serialize};

/// Aggregate counts shown on the dashboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStatsDto {
    pub bot_name: String,
    /// Sum of member counts over every guild the bot is in.
    pub member_count: u64,
    /// Number of registered users in the datastore.
    pub total: u64,
}
