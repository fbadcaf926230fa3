//! preamp - volume and input control for a stepped-attenuator preamp

use anyhow::{Context, Result};
use clap::Parser;
use preamp_ctl::config::{self, ControllerConfig};
use preamp_ctl::controller::{Controller, Key};
use preamp_ctl::display::VolumeReadout;
use preamp_ctl::hardware::{Attenuator, RelayBus, SimAttenuator, SimRelayBus};
use preamp_ctl::mapping::{attenuation_code, AttenuationMapper, AttenuationProfile, StepMapper, MUTE_CODE};
use std::io::BufRead;
use std::time::Duration;
use tracing::warn;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

mod cli;

use cli::{Cli, Commands};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::Layer::new().with_writer(std::io::stderr).with_target(false))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging();

    match cli.command {
        Commands::Code { steps, step, min, max } => {
            let code = attenuation_code(steps, step, min, max);
            if code == MUTE_CODE {
                println!("{} (mute)", code);
            } else {
                println!("{} (-{:.1} dB)", code, f32::from(code) / 2.0);
            }
        }

        Commands::Table {
            config: config_path,
            steps,
            min,
            max,
            json,
        } => {
            let profile = match config_path {
                Some(path) => config::load_config(&path)?.profile(),
                None => AttenuationProfile::new(steps, min, max),
            };
            let mapper = AttenuationMapper::new("volume", profile);
            let table = mapper.table();

            if json {
                println!("{}", serde_json::to_string_pretty(&table)?);
            } else {
                print_profile(mapper.profile());
                println!("  Step  Code      dB");
                for row in &table {
                    if row.code == MUTE_CODE {
                        println!("  {:>4}  {:>4}    mute", row.step, row.code);
                    } else {
                        println!(
                            "  {:>4}  {:>4}  {:>6.1}",
                            row.step,
                            row.code,
                            -(f32::from(row.code) / 2.0)
                        );
                    }
                }
            }
        }

        Commands::Check { config: config_path } => {
            println!("Checking configuration at {:?}...", config_path);

            match config::load_config(&config_path) {
                Ok(cfg) => {
                    println!("Configuration is valid!");
                    println!("  Volume steps: {}", cfg.volume.steps);
                    println!(
                        "  Attenuation: {} .. {} dB",
                        cfg.volume.min_attenuation, cfg.volume.max_attenuation
                    );
                    print_profile(&cfg.profile());
                    println!("  Inputs:");
                    for (index, input) in cfg.inputs.iter().enumerate() {
                        println!(
                            "    {}. {:<10} steps {}..{} {}",
                            index + 1,
                            input.name,
                            input.min_volume,
                            input.max_volume,
                            if input.active { "[active]" } else { "[inactive]" }
                        );
                    }
                    for (index, trigger) in cfg.triggers.iter().enumerate() {
                        if trigger.active {
                            println!(
                                "  Trigger {}: {:?}, {} s delay",
                                index + 1,
                                trigger.kind,
                                trigger.on_delay_secs
                            );
                        }
                    }
                }
                Err(e) => {
                    println!("Configuration is invalid: {:#}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Init => {
            let example_config = include_str!("../preamp.example.yaml");

            let path = "preamp.yaml";
            if std::path::Path::new(path).exists() {
                println!("preamp.yaml already exists. Not overwriting.");
            } else {
                std::fs::write(path, example_config)?;
                println!("Created preamp.yaml with example configuration.");
            }
        }

        Commands::Simulate {
            config: config_path,
            state: state_path,
        } => {
            let cfg = config::load_config_or_default(&config_path)?;
            let state = config::load_state_or_default(&state_path)?;

            let mut controller = Controller::new(cfg, state, SimAttenuator::new(), SimRelayBus::new())?;
            controller.startup();
            print_status(&controller);

            println!("Keys: up down left right mute prev power 1-6, 'wait <secs>', 'quit'");

            let mut uptime = Duration::ZERO;
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("failed to read stdin")?;
                let line = line.trim();
                if line.is_empty() {
                    continue;
                }
                if line == "quit" {
                    break;
                }

                if let Some(secs) = line.strip_prefix("wait ") {
                    let step = secs
                        .trim()
                        .parse::<f64>()
                        .ok()
                        .and_then(|secs| Duration::try_from_secs_f64(secs).ok());
                    match step {
                        Some(step) => {
                            uptime += step;
                            controller.tick(uptime);
                            print_status(&controller);
                        }
                        None => warn!("'{}' is not a number of seconds", secs),
                    }
                    continue;
                }

                match Key::from_name(line) {
                    Some(key) => {
                        controller.tick(uptime);
                        controller.handle_key(key);
                        print_status(&controller);
                    }
                    None => warn!("unknown key '{}'", line),
                }
            }

            config::save_state(&state_path, controller.state())?;
            println!("State saved to {:?}", state_path);
        }
    }

    Ok(())
}

fn print_profile(profile: &AttenuationProfile) {
    match profile.derive() {
        Some(derived) => {
            println!(
                "  Coarse step: {} dB, fine steps: {:.2}",
                derived.coarse_step_size(),
                derived.fine_step_count()
            );
            if !derived.is_feasible() {
                println!("  Warning: this profile cannot be mapped, every step mutes");
            }
        }
        None => println!("  Warning: empty attenuation range, every step mutes"),
    }
}

fn print_status<A: Attenuator, B: RelayBus>(controller: &Controller<A, B>) {
    let cfg: &ControllerConfig = controller.config();
    let state = controller.state();

    if !controller.is_on() {
        println!("[standby]");
        return;
    }

    let readout = VolumeReadout::from_state(cfg, state);
    let input = &cfg.inputs[usize::from(state.input)];
    println!(
        "[{}] {} (code {}, display level {})",
        input.name,
        readout,
        state.attenuation,
        controller.display_level()
    );
}

