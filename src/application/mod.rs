//! Application layer: the explicit state container, the pure local command
//! layer, checkout orchestration and the `Storefront` dispatcher that ties
//! them to a gateway.

pub mod checkout;
pub mod commands;
pub mod state;
pub mod storefront;
