mod app;
mod delivery_log;
mod ring_user;

pub use app::*;
pub use delivery_log::*;
pub use ring_user::*;
