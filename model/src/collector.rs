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

use crate::Float;
use geometry::Point3D;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

fn yes() -> bool {
    true
}

fn one() -> Float {
    1.
}

fn south() -> Float {
    180.
}

/// The mechanical strategy by which a collector follows the sun.
#[derive(Debug, Default, Copy, Clone, Eq, PartialEq, Serialize, Deserialize)]
pub enum TrackerType {
    /// A fixed collector. This is the default.
    #[default]
    None,

    /// Rotates around a horizontal axis, aligned with the azimuth of
    /// the collector
    HorizontalSingleAxis,

    /// Rotates around the vertical axis, keeping its tilt
    VerticalSingleAxis,

    /// Rotates around an axis tilted like the collector, pointing
    /// along its azimuth
    TiltedSingleAxis,

    /// Points straight at the sun
    AltAzimuthDualAxis,
}

impl TrackerType {
    /// Whether collectors with this tracker move during the day
    pub fn is_moving(&self) -> bool {
        !matches!(self, Self::None)
    }
}

/// The chain of efficiencies that is common to all collectors.
///
/// All values default to a perfect collector (i.e., efficiencies of 1 and
/// no dust).
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EfficiencyChain {
    /// The optical efficiency of the collector
    #[serde(default = "one")]
    pub optical_efficiency: Float,

    /// The thermal efficiency of the collector
    #[serde(default = "one")]
    pub thermal_efficiency: Float,

    /// The fraction of the incident radiation absorbed by the receiver
    #[serde(default = "one")]
    pub absorptance: Float,

    /// The reflectance of the mirrors (if any)
    #[serde(default = "one")]
    pub reflectance: Float,

    /// The fraction of radiation lost due to soiling
    #[serde(default)]
    pub dust_loss: Float,
}

impl std::default::Default for EfficiencyChain {
    fn default() -> Self {
        Self {
            optical_efficiency: 1.,
            thermal_efficiency: 1.,
            absorptance: 1.,
            reflectance: 1.,
            dust_loss: 0.,
        }
    }
}

impl EfficiencyChain {
    /// The product of all the efficiencies
    pub fn factor(&self) -> Float {
        self.optical_efficiency
            * self.thermal_efficiency
            * self.absorptance
            * self.reflectance
            * (1. - self.dust_loss)
    }

    /// Checks that all values are fractions
    pub fn validate(&self) -> Result<(), String> {
        let values = [
            ("optical_efficiency", self.optical_efficiency),
            ("thermal_efficiency", self.thermal_efficiency),
            ("absorptance", self.absorptance),
            ("reflectance", self.reflectance),
            ("dust_loss", self.dust_loss),
        ];
        for (name, v) in values {
            if !(0.0..=1.0).contains(&v) {
                return Err(format!("'{}' must be between 0 and 1... found {}", name, v));
            }
        }
        Ok(())
    }
}

/// The fixed target towards which heliostats and Fresnel
/// reflectors redirect the sun.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Receiver {
    /// The id of the foundation (i.e., tower) holding the receiver
    pub foundation: String,

    /// The height of the receiver over the base of the foundation. If
    /// not given, the receiver is at the top.
    #[serde(default)]
    pub height: Option<Float>,
}

/// The family-specific information of a collector
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", deny_unknown_fields)]
pub enum CollectorKind {
    /// A photovoltaic panel
    FlatPanel {
        /// The efficiency of the cells at 25C
        #[serde(default = "FlatPanelDefaults::cell_efficiency")]
        cell_efficiency: Float,

        /// The change of efficiency per degree C (e.g., -0.004)
        #[serde(default = "FlatPanelDefaults::temperature_coefficient")]
        temperature_coefficient: Float,

        /// The nominal operating cell temperature, in C
        #[serde(default = "FlatPanelDefaults::noct")]
        noct: Float,

        /// The efficiency of the inverter
        #[serde(default = "FlatPanelDefaults::inverter_efficiency")]
        inverter_efficiency: Float,
    },

    /// A mirror that reflects the sun towards a receiver on a tower
    Heliostat {
        /// The receiver
        receiver: Receiver,
    },

    /// A parabolic trough, whose aperture rotates around its long
    /// axis (aligned with its azimuth) concentrating the sun on a focal line
    ParabolicTrough {
        /// The distance between the aperture and the focal line
        #[serde(default = "one")]
        focal_length: Float,
    },

    /// A parabolic dish following the sun and concentrating it on a
    /// focal point
    ParabolicDish {
        /// The distance between the aperture and the focal point
        #[serde(default = "one")]
        focal_length: Float,
    },

    /// A row of flat mirrors reflecting the sun onto a linear receiver
    /// parallel to the row
    FresnelReflector {
        /// The receiver
        receiver: Receiver,
    },

    /// The glazed collector of a solar updraft tower, heating the
    /// air that drives a turbine at the bottom of a chimney
    UpdraftTower {
        /// The height of the chimney, in m
        chimney_height: Float,

        /// The discharge coefficient of the chimney
        #[serde(default = "UpdraftDefaults::discharge_coefficient")]
        discharge_coefficient: Float,

        /// The efficiency of the turbine
        #[serde(default = "UpdraftDefaults::turbine_efficiency")]
        turbine_efficiency: Float,
    },

    /// A point that measures the incident irradiation
    Sensor,
}

struct FlatPanelDefaults;
impl FlatPanelDefaults {
    fn cell_efficiency() -> Float {
        0.2
    }
    fn temperature_coefficient() -> Float {
        -0.004
    }
    fn noct() -> Float {
        45.
    }
    fn inverter_efficiency() -> Float {
        0.95
    }
}

struct UpdraftDefaults;
impl UpdraftDefaults {
    fn discharge_coefficient() -> Float {
        0.6
    }
    fn turbine_efficiency() -> Float {
        0.8
    }
}

impl CollectorKind {
    /// The family this kind belongs to
    pub fn family(&self) -> CollectorFamily {
        match self {
            Self::FlatPanel { .. } => CollectorFamily::FlatPanel,
            Self::Heliostat { .. } => CollectorFamily::Heliostat,
            Self::ParabolicTrough { .. } => CollectorFamily::ParabolicTrough,
            Self::ParabolicDish { .. } => CollectorFamily::ParabolicDish,
            Self::FresnelReflector { .. } => CollectorFamily::FresnelReflector,
            Self::UpdraftTower { .. } => CollectorFamily::UpdraftTower,
            Self::Sensor => CollectorFamily::Sensor,
        }
    }

    /// A flat panel with default parameters
    pub fn flat_panel() -> Self {
        Self::FlatPanel {
            cell_efficiency: FlatPanelDefaults::cell_efficiency(),
            temperature_coefficient: FlatPanelDefaults::temperature_coefficient(),
            noct: FlatPanelDefaults::noct(),
            inverter_efficiency: FlatPanelDefaults::inverter_efficiency(),
        }
    }
}

/// The families of collectors. Each family is simulated separately.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum CollectorFamily {
    /// Photovoltaic panels
    FlatPanel,
    /// Heliostats
    Heliostat,
    /// Parabolic troughs
    ParabolicTrough,
    /// Parabolic dishes
    ParabolicDish,
    /// Linear Fresnel reflectors
    FresnelReflector,
    /// Solar updraft tower collectors
    UpdraftTower,
    /// Light sensors
    Sensor,
}

impl CollectorFamily {
    /// All the families
    pub const ALL: [CollectorFamily; 7] = [
        Self::FlatPanel,
        Self::Heliostat,
        Self::ParabolicTrough,
        Self::ParabolicDish,
        Self::FresnelReflector,
        Self::UpdraftTower,
        Self::Sensor,
    ];

    /// Whether the sample grid of the collectors of this family needs to
    /// be symmetric (i.e., have an even number of cells in each direction)
    pub fn needs_even_grid(&self) -> bool {
        matches!(self, Self::ParabolicTrough | Self::ParabolicDish)
    }
}

impl Display for CollectorFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::FlatPanel => "flat_panel",
            Self::Heliostat => "heliostat",
            Self::ParabolicTrough => "parabolic_trough",
            Self::ParabolicDish => "parabolic_dish",
            Self::FresnelReflector => "fresnel_reflector",
            Self::UpdraftTower => "updraft_tower",
            Self::Sensor => "sensor",
        };
        write!(f, "{}", s)
    }
}

impl FromStr for CollectorFamily {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.to_lowercase().replace(['-', ' '], "_");
        Self::ALL
            .iter()
            .find(|f| f.to_string() == normalized)
            .copied()
            .ok_or_else(|| format!("Unknown collector family '{}'", s))
    }
}

/// An element that collects solar energy.
///
/// Its geometry is described relative to its parent [`Foundation`](crate::Foundation): the
/// base of the element is at `position` (relative to the centre of the top
/// of the foundation, in its axes), and the centre of its aperture is
/// `pole_height` meters above that.
///
/// # Example
///
/// ```json
/// {
///     id: "panel 1",
///     foundation: "roof",
///     position: {x: 1, y: 0, z: 0},
///     lx: 2, ly: 1, tilt: 30, azimuth: 180,
///     tracker: "TiltedSingleAxis",
///     efficiency: { dust_loss: 0.05 },
///     kind: { type: "FlatPanel", cell_efficiency: 0.21 },
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorElement {
    /// The identifier of the element
    pub id: String,

    /// The id of the foundation on which this element sits. If none,
    /// it is placed relative to the world origin.
    #[serde(default)]
    pub foundation: Option<String>,

    /// The position of the base of the element relative to its foundation
    #[serde(default)]
    pub position: Point3D,

    /// The width of the aperture, in m
    pub lx: Float,

    /// The length of the aperture, in m. It goes up the slope of tilted
    /// collectors, and along the axis of troughs and Fresnel reflectors.
    pub ly: Float,

    /// The tilt of the aperture, in degrees (0 is horizontal)
    #[serde(default)]
    pub tilt: Float,

    /// The direction the aperture faces, in degrees clockwise from North and
    /// relative to the foundation. Defaults to South (180).
    #[serde(default = "south")]
    pub azimuth: Float,

    /// The height of the centre of the aperture over the base
    #[serde(default)]
    pub pole_height: Float,

    /// The kind of tracker
    #[serde(default)]
    pub tracker: TrackerType,

    /// The chain of efficiencies
    #[serde(default)]
    pub efficiency: EfficiencyChain,

    /// The family-specific parameters
    pub kind: CollectorKind,

    /// Whether this element casts shadows over the others
    #[serde(default = "yes")]
    pub shadow_relevant: bool,
}

impl CollectorElement {
    /// Creates a new fixed element with a perfect efficiency chain
    pub fn new<S: Into<String>>(id: S, lx: Float, ly: Float, kind: CollectorKind) -> Self {
        Self {
            id: id.into(),
            foundation: None,
            position: Point3D::default(),
            lx,
            ly,
            tilt: 0.,
            azimuth: south(),
            pole_height: 0.,
            tracker: TrackerType::None,
            efficiency: EfficiencyChain::default(),
            kind,
            shadow_relevant: true,
        }
    }

    /// The family of the element
    pub fn family(&self) -> CollectorFamily {
        self.kind.family()
    }

    /// The area of the aperture, in m2
    pub fn area(&self) -> Float {
        self.lx * self.ly
    }

    /// Checks that the data makes sense
    pub fn validate(&self) -> Result<(), String> {
        let family = self.family();
        if family != CollectorFamily::Sensor && (self.lx <= 0. || self.ly <= 0.) {
            return Err(format!(
                "Collector '{}' needs a positive size (lx: {}, ly: {})",
                self.id, self.lx, self.ly
            ));
        }
        if !(0.0..=180.0).contains(&self.tilt) {
            return Err(format!(
                "Tilt of Collector '{}' must be between 0 and 180 degrees... found {}",
                self.id, self.tilt
            ));
        }
        self.efficiency
            .validate()
            .map_err(|e| format!("Collector '{}': {}", self.id, e))?;
        match &self.kind {
            CollectorKind::FlatPanel {
                cell_efficiency,
                inverter_efficiency,
                ..
            } => {
                if !(0.0..=1.0).contains(cell_efficiency)
                    || !(0.0..=1.0).contains(inverter_efficiency)
                {
                    return Err(format!(
                        "Efficiencies of Collector '{}' must be between 0 and 1",
                        self.id
                    ));
                }
            }
            CollectorKind::ParabolicTrough { focal_length }
            | CollectorKind::ParabolicDish { focal_length } => {
                if *focal_length <= 0. {
                    return Err(format!(
                        "Collector '{}' needs a positive focal length... found {}",
                        self.id, focal_length
                    ));
                }
            }
            CollectorKind::UpdraftTower {
                chimney_height,
                discharge_coefficient,
                turbine_efficiency,
            } => {
                if *chimney_height <= 0. {
                    return Err(format!(
                        "Updraft tower '{}' needs a positive chimney height... found {}",
                        self.id, chimney_height
                    ));
                }
                if !(0.0..=1.0).contains(discharge_coefficient)
                    || !(0.0..=1.0).contains(turbine_efficiency)
                {
                    return Err(format!(
                        "Coefficients of Updraft tower '{}' must be between 0 and 1",
                        self.id
                    ));
                }
            }
            CollectorKind::Heliostat { .. }
            | CollectorKind::FresnelReflector { .. }
            | CollectorKind::Sensor => {}
        }
        Ok(())
    }
}

/***********/
/* TESTING */
/***********/
