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

#![deny(missing_docs)]

//! A simulation engine estimating the energy collected by solar
//! plants: photovoltaic panels, heliostat fields, parabolic troughs and
//! dishes, Fresnel reflectors, solar updraft towers and light sensors.
//!
//! A [`World`] puts a [`Model`] on a site with a [`WeatherProfile`]. The
//! [`Scheduler`] drives daily or yearly simulations one sample at a time,
//! reacting to the flags of a [`ControlPanel`] and publishing a
//! [`YieldReport`] into a [`ResultStore`] when they finish.
//!
//! ```
//! use solar_yield::*;
//!
//! let model = Model::from_json("{
//!     collectors: [
//!         { id: 'panel', lx: 2, ly: 1, tilt: 30, pole_height: 1, kind: { type: 'FlatPanel' } },
//!     ],
//! }").unwrap();
//! let weather = WeatherProfile::from_json("{
//!     location: { latitude: 42.3 },
//!     sunshine_hours: [149, 165, 202, 214, 253, 280, 305, 272, 226, 198, 143, 141],
//! }").unwrap();
//! let mut world = World::new(model, weather);
//!
//! let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
//! let mut scheduler = Scheduler::new();
//! let mut panel = ControlPanel::new();
//! let mut store = MemoryResultStore::new();
//!
//! panel.start(key);
//! while !panel.results_ready(key) {
//!     scheduler.pump(&mut world, &mut panel, &mut store);
//! }
//! let report = store.get(key).unwrap();
//! assert_eq!(report.total.len(), 24);
//! assert!(report.grand_total() > 0.);
//! ```

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(feature = "float")]
pub type Float = f32;

/// The kind of Floating point number used in the
/// library... the `"float"` feature means it becomes `f32`
/// and `f64` is used otherwise.
#[cfg(not(feature = "float"))]
pub type Float = f64;

/// The errors of the engine
pub mod error;
pub use error::SimulationError;

/// The simulated time
pub mod clock;
pub use clock::SimulatedClock;

/// The flags through which hosts control simulations
pub mod control;
pub use control::{ControlFlags, ControlPanel, Granularity, JobKey, Notification};

/// The model, the weather and the date
pub mod world;
pub use world::{Placement, ReceiverTarget, SceneView, World};

/// Grids of points over the apertures of collectors
pub mod sampler;
pub use sampler::{Frame, GridShape, SampleGrid};

/// The behaviour of each family of collectors
pub mod collectors;
pub use collectors::{calculator, StepContext, YieldCalculator};

/// Raw series and report writers
pub mod output;
pub use output::{OutputFormat, OutputSeries};

/// The data of a running simulation
mod yield_run;
pub use yield_run::YieldRun;

/// Scaling and publication of results
pub mod aggregator;
pub use aggregator::{ElementSeries, MemoryResultStore, ResultStore, YieldAggregator, YieldReport};

/// Drives simulations step by step
pub mod scheduler;
pub use scheduler::{JobState, Scheduler, SimulationJob};

/// Runs simulations in one call
pub mod static_run;
pub use static_run::run_static;

/// A module with some useful functions to run a simulation
pub mod run_simulation;

// Re-exports
pub use calendar::Date;
pub use geometry;
pub use model;
pub use model::{CollectorElement, CollectorFamily, CollectorKind, Model, TrackerType};
pub use rendering::{OcclusionTester, ShadowSource};
pub use solar::{AirMassPolicy, ClearSkyModel, RadiationModel, SkyState, Solar, SunMinutes};
pub use weather::{Location, WeatherProfile, WeatherTrait};
