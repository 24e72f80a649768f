/*
MIT License
Copyright (c) 2021 Germán Molina
Permission is hereby granted, free of charge, to any person obtaining a copy
of this software and associated documentation files (the "Software"), to deal
in the Software without restriction, including without limitation the rights
to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
copies of the Software, and to permit persons to whom the Software is
furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be included in all
copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS OR
IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF MERCHANTABILITY,
FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT SHALL THE
AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR OTHER
LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE, ARISING FROM,
OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE
SOFTWARE.
*/

use crate::aggregator::{MemoryResultStore, YieldReport};
use crate::clock::NOON;
use crate::control::{ControlPanel, Granularity, JobKey, Notification};
use crate::error::SimulationError;
use crate::output::{write_report, OutputFormat};
use crate::scheduler::Scheduler;
use crate::static_run::run_static;
use crate::world::World;
use calendar::Date;
use clap::Parser;
use model::{CollectorFamily, Model};
use weather::WeatherProfile;

/// The options we can pass to the simulation
#[derive(Parser, Debug, Clone)]
#[clap(author, version, about, long_about = None)]
pub struct SimOptions {
    /// The model file (JSON or JSON5)
    #[clap(short = 'i')]
    pub input_file: String,

    /// The weather profile of the site (JSON or JSON5)
    #[clap(short = 'w')]
    pub weather_file: String,

    /// The family of collectors to simulate (e.g., flat_panel, heliostat, sensor)
    #[clap(short = 'f', default_value = "flat_panel")]
    pub family: CollectorFamily,

    /// Simulate a single day (hourly results) or the whole year
    #[clap(short = 'g', default_value = "daily")]
    pub granularity: Granularity,

    /// The month of the day simulated in daily simulations
    #[clap(long, default_value_t = 6)]
    pub month: u8,

    /// The day of the month simulated in daily simulations
    #[clap(long, default_value_t = 21)]
    pub day: u8,

    /// Specifies the path to which to write the results.
    /// If none is given, STDOUT is used
    #[clap(short = 'o')]
    pub output: Option<String>,

    /// The format of the results: csv or json
    #[clap(long, default_value = "csv")]
    pub format: OutputFormat,

    /// Simulate all the samples in one go. Not available when
    /// something tracks the sun.
    #[clap(long = "static")]
    pub static_run: bool,
}

/// Loads the model and weather, and places the world at noon of the
/// requested day
pub fn load_world(options: &SimOptions) -> Result<World, SimulationError> {
    let model = Model::from_file(&options.input_file)?;
    let weather = WeatherProfile::from_file(&options.weather_file)?;
    let mut world = World::new(model, weather);
    world.date = Date::new(options.month, options.day)?.at_minute(NOON);
    Ok(world)
}

/// Pumps a [`Scheduler`] until the job finishes
pub fn run_animated(world: &mut World, key: JobKey) -> Result<YieldReport, SimulationError> {
    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();

    scheduler.start(key, world)?;
    panel.start(key);
    while !scheduler.is_idle() {
        for notification in scheduler.pump(world, &mut panel, &mut store) {
            if let Notification::Refused { reason, .. } = notification {
                return Err(SimulationError::Input(reason));
            }
        }
    }
    store.take(key).ok_or_else(|| {
        SimulationError::Input(format!("The {} did not publish any results", key))
    })
}

/// This function drives the simulation, writing the results into `out`
pub fn run<T>(options: &SimOptions, out: T) -> Result<YieldReport, SimulationError>
where
    T: std::io::Write,
{
    let mut world = load_world(options)?;
    let key = JobKey::new(options.family, options.granularity);
    if world.model.collectors_of(key.family).next().is_none() {
        model::print_warning(
            "solar_yield",
            format!("The model has no collectors of family '{}'", key.family),
        );
    }
    if key.granularity == Granularity::Daily {
        tracing::info!(
            "simulating {} on {:02}/{:02}",
            key.family,
            world.date.month,
            world.date.day
        );
    }

    let report = if options.static_run {
        run_static(&world, key)?
    } else {
        run_animated(&mut world, key)?
    };
    write_report(&report, options.format, out)?;
    Ok(report)
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn test_parse_options() {
        let options = SimOptions::parse_from([
            "solar_yield",
            "-i",
            "model.json5",
            "-w",
            "weather.json5",
            "-f",
            "heliostat",
            "-g",
            "yearly",
            "--format",
            "json",
            "--static",
        ]);
        assert_eq!(options.input_file, "model.json5");
        assert_eq!(options.family, CollectorFamily::Heliostat);
        assert_eq!(options.granularity, Granularity::Yearly);
        assert_eq!(options.format, OutputFormat::Json);
        assert!(options.static_run);
        assert_eq!((options.month, options.day), (6, 21));
        assert!(options.output.is_none());

        let options =
            SimOptions::parse_from(["solar_yield", "-i", "m", "-w", "w", "--month", "12", "--day", "1"]);
        assert_eq!(options.family, CollectorFamily::FlatPanel);
        assert_eq!(options.granularity, Granularity::Daily);
        assert_eq!(options.format, OutputFormat::Csv);
        assert_eq!((options.month, options.day), (12, 1));
    }

    #[test]
    fn test_missing_files() {
        let options =
            SimOptions::parse_from(["solar_yield", "-i", "./tests/nothing.json5", "-w", "w"]);
        assert!(matches!(
            load_world(&options),
            Err(SimulationError::Input(_))
        ));
    }
}
