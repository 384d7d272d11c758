extern crate chrono;
extern crate config as config_crate;
extern crate csv;
#[macro_use]
extern crate derive_more;
#[macro_use]
extern crate failure;
extern crate futures;
extern crate hyper;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;
extern crate regex;
extern crate serde;
#[macro_use]
extern crate serde_derive;
extern crate serde_json;
extern crate tokio_core;
extern crate url;

pub mod config;
pub mod controller;
pub mod errors;
pub mod loaders;
pub mod models;
pub mod render;
pub mod services;
pub mod types;

use std::net::SocketAddr;
use std::process::exit;
use std::sync::Arc;

use futures::future;
use futures::prelude::*;
use hyper::server::Http;
use tokio_core::reactor::Core;

use config::Config;
use controller::{Application, Asset, ControllerImpl};
use loaders::{load_logo, CsvDatasetSource, DatasetCache};
use services::*;

pub fn start_server(config: Config) {
    let mut core = Core::new().unwrap_or_else(|why| {
        error!("Unexpected error creating event loop core: {}", why);
        exit(1);
    });
    let handle = core.handle();

    // The dataset and the logo are read once, before the listener is bound.
    let cache = Arc::new(DatasetCache::new(CsvDatasetSource::new(config.data.clone())));
    if let Err(why) = cache.get() {
        error!("Failed to load dataset: {}", why);
        for cause in why.iter_causes() {
            error!("Caused by: {}", cause);
        }
        exit(1);
    }
    let logo = load_logo(&config.data.path(&config.data.logo))
        .map(|bytes| Arc::new(Asset::new(config.data.logo.clone(), bytes)))
        .unwrap_or_else(|why| {
            error!("Failed to load logo: {}", why);
            exit(1);
        });

    let service_factory: Arc<Fn() -> Box<DashboardService>> =
        Arc::new(move || Box::new(DashboardServiceImpl::new(cache.clone())) as Box<DashboardService>);

    let address = SocketAddr::new(config.listen.host, config.listen.port);
    let serve = Http::new()
        .serve_addr_handle(&address, &handle, move || {
            let controller = ControllerImpl::new(service_factory.clone(), logo.clone());

            // Prepare application
            let app = Application { controller };

            Ok(app)
        })
        .unwrap_or_else(|why| {
            error!("Http Server Initialization Error: {}", why);
            exit(1);
        });

    let connection_handle = handle.clone();
    handle.spawn(
        serve
            .for_each(move |conn| {
                connection_handle.spawn(
                    conn.map(|_| ())
                        .map_err(|why| error!("Server Error: {:?}", why)),
                );
                Ok(())
            })
            .map_err(|why| error!("Listener Error: {:?}", why)),
    );

    info!("Listening on http://{}", address);
    if core.run(future::empty::<(), ()>()).is_err() {
        error!("Event loop stopped unexpectedly");
        exit(1);
    }
}
