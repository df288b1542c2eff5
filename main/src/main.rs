/*
 * Copyright 2024 Fluence Labs Limited
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

#![warn(rust_2018_idioms)]
#![warn(rust_2021_compatibility)]
#![deny(
    dead_code,
    nonstandard_style,
    unused_imports,
    unused_mut,
    unused_variables,
    unused_unsafe,
    unreachable_patterns
)]

mod args;
mod psic_workaround;
mod report;
mod sanity;

use clap::Parser;
use eyre::WrapErr as _;
use tracing_subscriber::filter::Directive;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

use rst_config::load_config;
use rst_config::RSTConfig;
use rst_msr::logical_cores_count;
use rst_msr::C6Controller;
use rst_msr::MSRDevice;
use rst_msr::CPU_SIGNATURE;
use rst_toggles::Aslr;
use rst_toggles::Boosting;

use crate::args::Args;
use crate::psic_workaround::PsicWorkaround;
use crate::report::Feature;
use crate::report::Features;

const PROGRAM: &str = "Ryzen Stabilizator";

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    println!(
        "{PROGRAM} {}\nCopyright (C) {}\n",
        env!("CARGO_PKG_VERSION"),
        env!("CARGO_PKG_AUTHORS")
    );

    sanity::check(
        std::env::consts::OS,
        &CPU_SIGNATURE,
        nix::unistd::geteuid(),
    )
    .wrap_err("this machine can't be stabilized")?;

    let config = match &args.config {
        Some(config_path) => {
            let config = load_config(config_path)?;
            println!("Config file: {config_path:?}");
            config
        }
        None => RSTConfig {
            profile: args.profile(),
            ..RSTConfig::default()
        },
    };

    init_tracing(config.logs.log_level)?;
    tracing::debug!("running with config {config:?}");

    run(&config)
}

fn init_tracing(log_level: LevelFilter) -> eyre::Result<()> {
    let filter = EnvFilter::builder()
        .with_env_var("RUST_LOG")
        .with_default_directive(Directive::from(log_level))
        .from_env_lossy();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .wrap_err("setting global tracing subscriber failed")?;
    tracing_log::LogTracer::init()?;

    Ok(())
}

fn run(config: &RSTConfig) -> eyre::Result<()> {
    let platform = &config.platform;

    let cores_count = logical_cores_count().wrap_err("counting online logical CPUs failed")?;
    let msr_device = MSRDevice::with_dir(platform.msr_dir.clone());
    let c6_controller = C6Controller::new(msr_device, cores_count);
    let package_c6_inverse = PsicWorkaround::new(c6_controller.package());
    let boosting_control = Boosting::with_path(platform.boosting_control_file.clone());
    let aslr_control = Aslr::with_path(platform.aslr_control_file.clone());

    let features = Features {
        c6: Feature::new(
            &c6_controller,
            "C6 C-state",
            "C6 C-state",
            Some("C6 C-state control unavailable - check if msr module loaded."),
        ),
        psic_workaround: Feature::new(
            &package_c6_inverse,
            "Power Supply Idle Control workaround",
            "Power Supply Idle Control workaround",
            Some("Power Supply Idle Control workaround unavailable - check if msr module loaded."),
        ),
        boosting: Feature::new(
            &boosting_control,
            "processor boosting",
            "Processor boosting",
            Some(
                "Processor boosting unavailable - \
                 check if AMD Cool'n'Quiet enabled and cpufreq module loaded.",
            ),
        ),
        aslr: Feature::new(
            &aslr_control,
            "address space layout randomization (ASLR)",
            "ASLR",
            None,
        ),
    };

    let mut out = std::io::stdout().lock();
    report::apply_profile(&mut out, &features, &config.profile)?;

    Ok(())
}
