use clap::{value_parser, Arg, Command};
use piston_window::{PistonWindow, WindowSettings};
use plotters::coord::Shift;
use plotters::drawing::{DrawingArea, IntoDrawingArea};
use plotters::prelude::{Circle, DrawingBackend, RGBColor, WHITE};
use plotters::style::Color;
use plotters_piston::{draw_piston_window, PistonBackend};
use rplidar_data::ScreenPoint;
use rplidar_driver::{
    ConnectionManager, DisplayConfig, PointStyle, RenderSink, RplidarError, ScanAcquisition,
    ShutdownCoordinator, DEFAULT_DISPLAY_SCALE, DEFAULT_PORT,
};
use tracing::{error, info};

const SCREEN_WIDTH: u32 = 800;
const SCREEN_HEIGHT: u32 = 500;

fn parse_args() -> (String, Option<u32>) {
    let matches = Command::new("RPLIDAR scan display")
        .about("Reads point data from an RPLIDAR device and draws it in a window.")
        .disable_version_flag(true)
        .arg(Arg::new("port").help("The device path to a serial port"))
        .arg(
            Arg::new("baud")
                .help("Explicit baud rate; the candidate list is tried when omitted")
                .value_parser(value_parser!(u32)),
        )
        .get_matches();

    let port_name = matches
        .get_one::<String>("port")
        .cloned()
        .unwrap_or_else(|| DEFAULT_PORT.to_string());
    let explicit_baud = matches.get_one::<u32>("baud").copied();
    (port_name, explicit_baud)
}

/// Draws each streamed point as a filled circle sized and colored by its
/// classification.
struct WindowSink<'a, DB: DrawingBackend> {
    area: &'a DrawingArea<DB, Shift>,
}

impl<'a, DB: DrawingBackend> RenderSink for WindowSink<'a, DB> {
    fn draw_point(&mut self, point: &ScreenPoint) {
        let style = PointStyle::for_quality(point.quality);
        let (r, g, b) = style.color;
        // Window coordinates grow downward.
        let _ = self.area.draw(&Circle::new(
            (point.x as i32, (SCREEN_HEIGHT as f64 - point.y) as i32),
            style.size as i32,
            RGBColor(r, g, b).filled(),
        ));
    }
}

fn fail_and_exit(manager: &mut ConnectionManager, error: RplidarError) -> ! {
    error!("{error}");
    manager.shutdown();
    // Clean failure paths exit with success; the operator restarts after
    // fixing the device.
    std::process::exit(0);
}

fn main() {
    tracing_subscriber::fmt::init();

    let (port_name, explicit_baud) = parse_args();

    let shutdown = ShutdownCoordinator::new();
    if let Err(e) = shutdown.install() {
        error!("cannot install the interrupt handler: {e}");
        std::process::exit(2);
    }

    let mut manager = ConnectionManager::new();
    if let Err(e) = manager.connect(&port_name, explicit_baud) {
        fail_and_exit(&mut manager, e);
    }

    let identity = manager
        .identity()
        .expect("identity is cached on connect")
        .clone();
    info!("RPLIDAR S/N: {}", identity.serial_number_hex());
    info!(
        "Firmware Ver: {}.{:02}",
        identity.firmware_major_version, identity.firmware_minor_version
    );
    info!("Hardware Rev: {}", identity.hardware_version);
    info!("Connected via {} at {} baud", port_name, manager.baud_rate());

    match manager.check_health() {
        Ok(health) => info!("Device health: {:?}", health),
        Err(e) => fail_and_exit(&mut manager, e),
    }

    if let Err(e) = manager.start_scanning() {
        fail_and_exit(&mut manager, e);
    }

    let config = DisplayConfig {
        scale: DEFAULT_DISPLAY_SCALE,
        center: (SCREEN_WIDTH as f64 / 2.0, SCREEN_HEIGHT as f64 / 2.0),
    };
    let mut acquisition = ScanAcquisition::new();

    let mut window: PistonWindow =
        WindowSettings::new("RPLIDAR scan display", [SCREEN_WIDTH, SCREEN_HEIGHT])
            .build()
            .unwrap();

    // One acquisition tick per redraw, as fast as the host redraws. The
    // cancellation flag is checked before anything else in the tick.
    while draw_piston_window(&mut window, |b: PistonBackend| {
        if shutdown.is_cancelled() {
            info!("interrupt received, stopping scan and shutting down");
            manager.shutdown();
            std::process::exit(0);
        }

        let root = b.into_drawing_area();
        root.fill(&WHITE)?;
        let mut sink = WindowSink { area: &root };
        if let Some(device) = manager.device_mut() {
            // A miss draws nothing this tick; the next tick retries.
            acquisition.tick(device, &mut sink, &config);
        }
        Ok(())
    })
    .is_some()
    {}

    // Window closed: same ordered teardown as an interrupt.
    manager.shutdown();
}
