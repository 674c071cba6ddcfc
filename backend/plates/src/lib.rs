//! # Plates
//!
//! Shared plate records and the client side of the plate repository.
//!
//! ## Resource
//!
//! The repository exposes a single `foods` collection over JSON:
//!
//! | Operation | Method | Path | Body |
//! |---|---|---|---|
//! | list | GET | `foods` | |
//! | create | POST | `foods` | draft + `available` |
//! | update | PUT | `foods/{id}` | draft |
//! | delete | DELETE | `foods/{id}` | |
//!
//! Ids are always assigned by the repository, never by the client.
pub mod config;
pub mod error;
pub mod foods;
pub mod remote;

pub use error::RepositoryError;
pub use foods::{NewPlate, Plate, PlateDraft};
pub use remote::{PlateRepository, RemoteRepository};
