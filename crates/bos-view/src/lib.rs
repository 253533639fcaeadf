//! Platform-independent view controller for the BOS wallet screens.
//!
//! The controller drives an abstract [`Surface`] and an injected
//! [`WalletApi`](bos_wallet_client::WalletApi); the browser crate supplies
//! the `web-sys` surface and HTTP client.

pub mod controller;
pub mod error;
pub mod mode;
pub mod pacing;
pub mod render;
pub mod state;
pub mod surface;

#[cfg(test)]
mod testing;

pub use controller::{Action, ViewController};
pub use error::{ViewError, ViewResult};
pub use mode::{LayoutMode, LoginMode, PopupMode, PopupPanel, ToggleMenu};
pub use pacing::{NoPause, Pacer, ViewConfig};
pub use surface::{Region, Slot, Surface, Target};
