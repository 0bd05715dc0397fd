pub use std::{
    env,
    fmt::Display,
    path::{Path, PathBuf},
    sync::Arc,
    sync::Mutex,
};

pub use tokio::time::{Duration, Interval, interval};

pub use anyhow::{Context, anyhow};
pub use async_trait::async_trait;
pub use derive_new::new;
pub use dotenv::dotenv;
pub use getset::Getters;
pub use log::{error, info, warn};
pub use serde::{Deserialize, Serialize, de::DeserializeOwned};
pub use serde_json::Value;
