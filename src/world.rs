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

use crate::collectors::calculator;
use crate::error::SimulationError;
use crate::Float;
use calendar::Date;
use geometry::{Point3D, Vector3D};
use model::{CollectorElement, CollectorKind, Model, Receiver};
use rendering::{CasterHandle, ShadowSource};
use solar::{ClearSkyModel, RadiationModel, Solar};
use std::sync::Arc;
use weather::{WeatherProfile, WeatherTrait};

/// The point at which a heliostat or a Fresnel reflector aims
#[derive(Debug, Clone, PartialEq)]
pub struct ReceiverTarget {
    /// The receiver, in world coordinates
    pub point: Point3D,
    /// The foundation holding the receiver
    pub foundation: String,
}

/// Where an element is in the world
#[derive(Debug, Clone, PartialEq)]
pub struct Placement {
    /// The centre of the aperture, in world coordinates
    pub centre: Point3D,
    /// The tilt of the element, in Radians
    pub tilt: Float,
    /// The azimuth of the element in world coordinates, in Radians
    /// clockwise from North
    pub azimuth: Float,
    /// The receiver the element aims at, if any
    pub receiver: Option<ReceiverTarget>,
}

/// Everything the engine reads: the [`Model`], the weather of the
/// site and the current date of the world.
///
/// Only the [`Scheduler`](crate::Scheduler) writes the date, while a job runs.
#[derive(Debug, Clone)]
pub struct World {
    /// The plant
    pub model: Model,
    /// The weather of the site
    pub weather: WeatherProfile,
    /// The date shown by the world
    pub date: Date,
    /// The clear-sky irradiance model used by every simulation
    pub radiation: Arc<dyn RadiationModel>,
}

impl World {
    /// Puts a model on a site, at noon of January 1st. The irradiance
    /// follows the default [`ClearSkyModel`].
    pub fn new(model: Model, weather: WeatherProfile) -> Self {
        Self {
            model,
            weather,
            date: Date::from_ordinal(1).at_minute(crate::clock::NOON),
            radiation: Arc::new(ClearSkyModel::default()),
        }
    }

    /// Replaces the irradiance model
    pub fn with_radiation<R: RadiationModel + 'static>(mut self, radiation: R) -> Self {
        self.radiation = Arc::new(radiation);
        self
    }

    /// The sun position model of the site
    pub fn solar(&self) -> Solar {
        self.weather.location().get_solar()
    }

    /// The elevation of the site, in meters
    pub fn elevation(&self) -> Float {
        self.weather.location().elevation
    }

    /// Checks that nothing in the world moves during the day
    pub fn check_static(&self) -> Result<(), SimulationError> {
        match self
            .model
            .collectors
            .iter()
            .find(|c| calculator(c.family()).is_moving(c))
        {
            Some(c) => Err(SimulationError::MovingElements(c.id.clone())),
            None => Ok(()),
        }
    }

    /// Checks whether something in the world moves during the day
    pub fn has_moving_elements(&self) -> bool {
        self.check_static().is_err()
    }

    fn receiver_target(
        &self,
        element: &CollectorElement,
        receiver: &Receiver,
    ) -> Result<ReceiverTarget, SimulationError> {
        let tower = self.model.foundation(&receiver.foundation).ok_or_else(|| {
            SimulationError::MissingFoundation {
                element: element.id.clone(),
                foundation: receiver.foundation.clone(),
            }
        })?;
        let height = receiver.height.unwrap_or(tower.height);
        Ok(ReceiverTarget {
            point: tower.position + Vector3D::new(0., 0., height),
            foundation: tower.id.clone(),
        })
    }

    /// Resolves where an element is.
    ///
    /// Elements without foundation are placed directly in world coordinates.
    /// Elements whose foundation (or receiver tower) does not exist cannot be placed.
    pub fn placement(&self, element: &CollectorElement) -> Result<Placement, SimulationError> {
        let pole = Vector3D::new(0., 0., element.pole_height);
        let (base, rotation) = match &element.foundation {
            Some(id) => {
                let foundation =
                    self.model
                        .foundation(id)
                        .ok_or_else(|| SimulationError::MissingFoundation {
                            element: element.id.clone(),
                            foundation: id.clone(),
                        })?;
                (foundation.to_world(element.position), foundation.rotation)
            }
            None => (element.position, 0.),
        };

        let receiver = match &element.kind {
            CollectorKind::Heliostat { receiver } | CollectorKind::FresnelReflector { receiver } => {
                Some(self.receiver_target(element, receiver)?)
            }
            _ => None,
        };

        Ok(Placement {
            centre: base + pole,
            tilt: element.tilt.to_radians(),
            azimuth: (element.azimuth + rotation).to_radians(),
            receiver,
        })
    }

    /// The shadow-relevant geometry of the world, with the collectors
    /// oriented as they are when the sun is at `sun`
    pub fn scene(&self, sun: Vector3D) -> SceneView<'_> {
        SceneView { world: self, sun }
    }
}

/// Exposes the shadow-relevant geometry of a [`World`] to the
/// [`OcclusionTester`](rendering::OcclusionTester)
pub struct SceneView<'a> {
    world: &'a World,
    sun: Vector3D,
}

impl ShadowSource for SceneView<'_> {
    fn shadow_casters(&self) -> Vec<CasterHandle> {
        let model = &self.world.model;
        let foundations = model
            .foundations
            .iter()
            .filter(|f| f.shadow_relevant)
            .map(|f| CasterHandle::new(f.id.as_str()));
        let collectors = model
            .collectors
            .iter()
            .filter(|c| c.shadow_relevant)
            .map(|c| CasterHandle::new(c.id.as_str()));
        let obstacles = model
            .obstacles
            .iter()
            .filter(|o| o.shadow_relevant)
            .map(|o| CasterHandle::new(o.id.as_str()));
        foundations.chain(collectors).chain(obstacles).collect()
    }

    fn caster_triangles(&self, handle: &CasterHandle) -> Vec<[Point3D; 3]> {
        let model = &self.world.model;
        if let Some(f) = model.foundation(&handle.id) {
            return f.triangles();
        }
        if let Some(o) = model.obstacles.iter().find(|o| o.id == handle.id) {
            return o.triangles();
        }
        if let Some(c) = model.collector(&handle.id) {
            // Elements that cannot be placed are not in the scene
            if let Ok(placement) = self.world.placement(c) {
                let frame = calculator(c.family()).frame(c, &placement, self.sun);
                return frame.triangles(c.lx, c.ly).to_vec();
            }
        }
        Vec::new()
    }
}
