//! Database models for all entities in the system.
//!
//! Each module provides the query model (`Queryable`/`Selectable`), an
//! insertion struct and, where the entity is mutable, an `AsChangeset`
//! update struct.

mod account;
mod event;
mod message;
mod notification;
mod registration;
mod role;
mod room;

pub use account::{Account, UpdateAccount};
pub use event::{Event, NewEvent};
pub use message::{NewOutboundMessage, OutboundMessage};
pub use notification::{AccountNotification, NewAccountNotification};
pub use registration::{NewRegistration, Registration, UpdateRegistration};
pub use role::{Permission, Role};
pub use room::{NewRoom, NewRoomAssignment, Room, RoomAssignment};
