pub use chrono::{DateTime, Local, TimeZone, Utc};
pub use flexi_logger::{Age, Cleanup, Criterion, DeferredNow, FileSpec, Logger, Naming, Record};
pub use futures::Future;
pub use once_cell::sync::Lazy as once_lazy;
pub use rand::{SeedableRng, prelude::SliceRandom, rngs::StdRng};
pub use reqwest::{Client, Response};
pub use urlencoding::encode;
