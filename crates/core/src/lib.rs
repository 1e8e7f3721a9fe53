//! # Attendance Core
//!
//! Domain types and the scheduling engine of the room attendance service.
//!
//! The engine is split the same way requests flow through it:
//!
//! - [`validator`] checks proposed time windows for ordering and overlap
//! - [`matcher`] picks the window of a check event's calendar day and classifies it
//! - [`statistics`] folds a month of attendance entries into ranked work-time figures
//! - [`services`] orchestrates those pieces over the [`store`] traits
//!
//! Nothing in this crate talks to a database directly; backends implement the
//! traits in [`store`].

pub mod calendar;
pub mod errors;
pub mod matcher;
pub mod messages;
pub mod models;
pub mod services;
pub mod statistics;
pub mod store;
pub mod validator;
