use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CliConfig {
    pub base_url: String,
    pub lottery_id: u32,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8000".to_string(),
            lottery_id: 1,
        }
    }
}
