mod forbidden;
mod unprocessable_entity;

pub use forbidden::*;
pub use unprocessable_entity::*;
