use clap::{Parser, Subcommand, ValueEnum};
use std::cell::RefCell;
use std::rc::Rc;
use stimbox_core::{EngineConfig, Grid, Instrument, RecordingInstrument};

mod balls_app;
mod matrix_app;

use balls_app::BallsApp;
use matrix_app::MatrixApp;

#[derive(Parser)]
#[command(name = "stimbox")]
#[command(about = "Stimbox - a gallery of interactive particle toys", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum Preset {
    /// The sprite-rendered tuning (200 bodies)
    Sprite,
    /// The vector-rendered tuning (24 bodies)
    Vector,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the repulsion balls toy
    Balls {
        /// Engine tuning preset
        #[arg(long, value_enum, default_value_t = Preset::Sprite)]
        preset: Preset,
        /// Seed for deterministic body spawning
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Run the tone matrix toy
    Matrix {
        /// Savestate string to restore on startup
        #[arg(long)]
        load: Option<String>,
    },
    /// Print the tile bitmap stored in a savestate string
    Decode {
        /// The base64 savestate string
        savestate: String,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Balls { preset, seed } => run_balls(preset, seed),
        Commands::Matrix { load } => run_matrix(load),
        Commands::Decode { savestate } => run_decode(&savestate),
    };
    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run_balls(preset: Preset, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let config = match preset {
        Preset::Sprite => EngineConfig::SPRITE,
        Preset::Vector => EngineConfig::VECTOR,
    };
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([900.0, 650.0]),
        ..Default::default()
    };
    eframe::run_native(
        "stimbox - repulsion balls",
        options,
        Box::new(move |_cc| Ok(Box::new(BallsApp::new(config, seed)) as Box<dyn eframe::App>)),
    )?;
    Ok(())
}

fn run_matrix(load: Option<String>) -> Result<(), Box<dyn std::error::Error>> {
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([720.0, 780.0]),
        ..Default::default()
    };
    eframe::run_native(
        "stimbox - tone matrix",
        options,
        Box::new(move |_cc| {
            Ok(Box::new(MatrixApp::new(load.as_deref())) as Box<dyn eframe::App>)
        }),
    )?;
    Ok(())
}

fn run_decode(savestate: &str) -> Result<(), Box<dyn std::error::Error>> {
    let instruments: Vec<Box<dyn Instrument>> =
        vec![Box::new(Rc::new(RefCell::new(RecordingInstrument::new())))];
    let mut grid = Grid::new(16, 16, instruments);
    stimbox_core::savestate::deserialize(&mut grid, savestate)?;

    for y in 0..grid.height() {
        let mut line = String::with_capacity(grid.width());
        for x in 0..grid.width() {
            line.push(if grid.armed(x, y) { '#' } else { '.' });
        }
        println!("{line}");
    }
    Ok(())
}
