use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize, Serialize)]
pub struct MessageForm {
    #[serde(default)]
    pub prompt: String,
}
