mod identifiers;
mod new_registration;
mod outbound_message;

pub use identifiers::*;
pub use new_registration::NewRegistration;
pub use outbound_message::OutboundMessage;
