use crate::catchers::*;
use crate::configuration::Settings;
use crate::guards::ApiSecret;
use crate::liftoff::{self, BoundPort};
use crate::push::PushProvider;
use crate::routes::*;
use rocket::fairing::{self, AdHoc};
use rocket::figment::util::map;
use rocket::figment::value::{Map, Value};
use rocket::{Build, Ignite, Rocket};
use rocket_sync_db_pools::database;
use secrecy::ExposeSecret;
use std::sync::Arc;

#[database("relay")]
pub struct RelayDbConn(diesel::PgConnection);

pub struct Application {
    pub server: Rocket<Ignite>,
    pub port: BoundPort,
}

impl Application {
    /// Ignites the server without launching it. A configured port of `None`
    /// binds a random port, readable through `port` after launch.
    pub async fn build(
        configuration: &Settings,
        push_provider: Arc<dyn PushProvider>,
    ) -> Result<Application, rocket::Error> {
        let (port_reporter, port) = liftoff::bound_port_pair();
        let database: Map<_, Value> = map! {
            "url" => configuration.database.connection_string().expose_secret().clone().into(),
            "pool_size" => configuration.database.pool_size.into()
        };
        let figment = rocket::Config::figment()
            .merge(("address", configuration.application.host))
            .merge(("port", configuration.application.port.unwrap_or(0)))
            .merge(("databases", map!["relay" => database]));

        rocket::custom(figment)
            .attach(RelayDbConn::fairing())
            .attach(AdHoc::try_on_ignite("Database Migrations", run_migrations))
            .attach(port_reporter)
            .manage(ApiSecret(configuration.api.secret_key.clone()))
            .manage(push_provider)
            .mount("/", routes![health_check])
            .mount("/api", routes![register, send])
            .register(
                "/",
                catchers![
                    forbidden_as_unauthorized,
                    unprocessable_entity_to_bad_request,
                    any_bad_request_as_invalid_body
                ],
            )
            .ignite()
            .await
            .map(|server| Application { server, port })
    }
}

async fn run_migrations(rocket: Rocket<Build>) -> fairing::Result {
    embed_migrations!();

    let conn = match RelayDbConn::get_one(&rocket).await {
        Some(conn) => conn,
        None => {
            tracing::error!("No database connection is available to run migrations");
            return Err(rocket);
        }
    };
    match conn.run(|c| embedded_migrations::run(c)).await {
        Ok(()) => Ok(rocket),
        Err(e) => {
            tracing::error!(error = %e, "Failed to run database migrations");
            Err(rocket)
        }
    }
}
