//! Domain types: catalog entries, customers, the local basket, orders, and
//! the port through which the remote API is reached.

pub mod basket;
pub mod customer;
pub mod order;
pub mod ports;
pub mod product;
