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

//! This crate contains the data structure utilized for describing
//! a solar plant: the [`Foundation`]s on which collectors are installed,
//! the [`CollectorElement`]s themselves, the [`Obstacle`]s that may
//! cast shadows over them, and the [`SimulationOptions`].
//!
//! The [`Model`] is read-only for the simulation engine. It can be
//! read from JSON or JSON5 files.
//!
//! # Example
//!
//! ```
//! use model::{Model, CollectorFamily};
//!
//! let model = Model::from_json("{
//!     foundations: [
//!         { id: 'roof', position: {x: 0, y: 0, z: 0}, lx: 10, ly: 10, height: 3 },
//!     ],
//!     collectors: [
//!         {
//!             id: 'panel 1',
//!             foundation: 'roof',
//!             lx: 2, ly: 1, tilt: 30,
//!             kind: { type: 'FlatPanel' },
//!         },
//!     ],
//! }").unwrap();
//!
//! assert_eq!(model.collectors_of(CollectorFamily::FlatPanel).count(), 1);
//! assert!(model.foundation("roof").is_some());
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

/// The model itself
mod model;
pub use crate::model::Model;

/// The structures on which collectors are installed (e.g., roofs,
/// frames or towers)
mod foundation;
pub use foundation::Foundation;

/// The elements that collect solar energy
mod collector;
pub use collector::{
    CollectorElement, CollectorFamily, CollectorKind, EfficiencyChain, Receiver, TrackerType,
};

/// Opaque geometry that casts shadows
mod obstacle;
pub use obstacle::{prism_triangles, Obstacle, ObstacleShape};

/// Some details of the site in which the plant is located
mod site_details;
pub use site_details::SiteDetails;

/// For setting options in simulations
mod simulation_options;
pub use simulation_options::SimulationOptions;

/// For reporting warnings and errors
mod error_msgs;
pub use error_msgs::{print_error, print_warning};
