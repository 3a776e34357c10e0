use serde::{Deserialize, Serialize};

/// # message from race control
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct RaceControlMessage {
    pub time: String,
    pub category: Option<String>,
    pub message: Option<String>,
}
