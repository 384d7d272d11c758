extern crate dashboard_lib;
extern crate env_logger;

fn main() {
    env_logger::init();

    let config = dashboard_lib::config::Config::new()
        .expect("Failed to load service configuration. Please check your 'config' folder");
    dashboard_lib::start_server(config);
}
