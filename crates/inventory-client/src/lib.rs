//! Client state layer for the inventory backend.
//!
//! [`ClientStore`] holds the signed-in user, the session token and the last
//! fetched copies of inventory and history. It talks to the server through
//! the [`InventoryApi`] port; [`HttpInventoryApi`] implements that port with
//! `reqwest`.
//!
//! The store never patches its collections locally: after every successful
//! mutation it re-fetches inventory and history in full, so what it shows is
//! always what the server last reported.

mod api;
mod error;
mod model;
mod store;

pub use api::{HttpInventoryApi, InventoryApi};
pub use error::ClientError;
pub use model::{
    HistoryAction, HistoryEntry, InventoryItem, NewAccount, ProductInput, Session, UserProfile,
};
pub use store::{ClientState, ClientStore};
