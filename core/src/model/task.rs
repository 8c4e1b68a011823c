use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::time;

/// A single to-do item. The serde defaults double as the load-time
/// normalization for files written by older schema versions: a record
/// without `created_at` is stamped with the load time, a record without
/// `completed_at` gets null. Records that already carry both fields
/// deserialize unchanged, so normalization is idempotent.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Task {
    pub id: u64,
    pub desc: String,
    #[serde(default)]
    pub done: bool,
    #[serde(with = "time::stamp", default = "time::now")]
    pub created_at: NaiveDateTime,
    #[serde(with = "time::stamp_opt", default)]
    pub completed_at: Option<NaiveDateTime>,
}

impl Task {
    pub fn new(id: u64, desc: String) -> Self {
        Self {
            id,
            desc,
            done: false,
            created_at: time::now(),
            completed_at: None,
        }
    }
}
