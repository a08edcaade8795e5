#[macro_use]
extern crate rocket;
#[macro_use]
extern crate diesel;
#[macro_use]
extern crate diesel_migrations;

pub mod catchers;
pub mod configuration;
pub mod domain;
pub mod guards;
pub mod liftoff;
pub mod models;
pub mod push;
pub mod routes;
pub mod schema;
pub mod startup;
pub mod telemetry;
