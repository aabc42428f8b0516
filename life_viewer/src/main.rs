// main.rs - Desktop front end for the life engine

use life_engine::{Driver, Session, SharedSession, SimConfig};

mod ui;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let runtime = tokio::runtime::Runtime::new()?;
    let session = SharedSession::new(Session::new(SimConfig::default()));
    let driver = {
        let _guard = runtime.enter();
        Driver::spawn(session.clone())
    };
    log::info!("Driver started");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([760.0, 760.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Conway's Game of Life",
        options,
        Box::new(move |_cc| Box::new(ui::LifeApp::new(session, driver, runtime))),
    )?;
    Ok(())
}
