//! Database enumerations shared between the schema and the HTTP layer.

mod account_kind;
mod gender;
mod message_channel;
mod message_status;
mod registration_status;

pub use account_kind::AccountKind;
pub use gender::Gender;
pub use message_channel::MessageChannel;
pub use message_status::MessageStatus;
pub use registration_status::RegistrationStatus;
