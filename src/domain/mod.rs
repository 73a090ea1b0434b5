//! Business entities and their state machines.
//!
//! Every status/role value that the wire protocol carries as a string is a
//! closed enum here, and every derived transition (auto-stamped timestamps,
//! auto-advanced statuses) is an explicit method on the owning entity rather
//! than a conditional buried in a route handler.

pub mod contact;
pub mod inquiry;
pub mod lead;
pub mod lease;
pub mod maintenance;
pub mod message;
pub mod notification;
pub mod payment;
pub mod property;
pub mod task;
pub mod user;
