//! # Plate Dashboard
//!
//! Client side of the restaurant menu admin.
//!
//! ## Pieces
//!
//! - `cache`: last known server copy of the plate list
//! - `controller`: `Dashboard`, the only thing allowed to touch the cache
//! - `view`: read-only snapshot for list/modal components
//! - `config`: environment driven settings for the binary
//!
//! ## Usage
//!
//! ```no_run
//! # async fn run() -> Result<(), dashboard::DashboardError> {
//! use std::time::Duration;
//!
//! use dashboard::Dashboard;
//! use plates::{PlateDraft, RemoteRepository};
//!
//! let remote = RemoteRepository::new("http://localhost:3333", Duration::from_secs(10))?;
//! let mut dashboard = Dashboard::new(remote);
//!
//! dashboard.load().await?;
//! dashboard
//!     .add_plate(PlateDraft {
//!         name: "Ao molho".to_string(),
//!         price: "19.90".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod view;

pub use controller::Dashboard;
pub use error::DashboardError;
pub use view::DashboardView;
