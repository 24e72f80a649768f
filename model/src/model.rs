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

use crate::{
    print_warning, CollectorElement, CollectorFamily, Foundation, Obstacle, SimulationOptions,
    SiteDetails,
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// A structure describing a solar plant.
///
/// It can be a single rooftop installation or a field of heliostats
/// surrounding a tower.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Model {
    /// The name of the model.
    #[serde(default)]
    pub name: Option<String>,

    /// Some information about the site in which the plant is located
    #[serde(default)]
    pub site_details: SiteDetails,

    /// The [`Foundation`]s in the model
    #[serde(default)]
    pub foundations: Vec<Foundation>,

    /// The [`CollectorElement`]s in the model
    #[serde(default)]
    pub collectors: Vec<CollectorElement>,

    /// The [`Obstacle`]s in the model
    #[serde(default)]
    pub obstacles: Vec<Obstacle>,

    /// The options for the simulation
    #[serde(default)]
    pub options: SimulationOptions,
}

impl Model {
    /// Parses a `Model` from a JSON (or JSON5) string, and validates it
    pub fn from_json(json: &str) -> Result<Self, String> {
        let model: Model = json5::from_str(json).map_err(|e| e.to_string())?;
        model.validate()?;
        Ok(model)
    }

    /// Parses a `Model` from a text file containing a JSON (or JSON5)
    pub fn from_file<P: AsRef<Path>>(filename: P) -> Result<Self, String> {
        let path = filename.as_ref();
        let jsonstring = match std::fs::read_to_string(path) {
            Ok(v) => v,
            Err(_) => return Err(format!("Could not read model file '{}'", path.display())),
        };
        Self::from_json(&jsonstring)
    }

    /// Serializes the model into a JSON string
    pub fn to_json(&self) -> Result<String, String> {
        serde_json::to_string_pretty(self).map_err(|e| e.to_string())
    }

    /// Checks that the model is consistent.
    ///
    /// References to missing foundations are not errors here: they are
    /// reported by the simulation, which skips the affected elements.
    pub fn validate(&self) -> Result<(), String> {
        self.site_details.validate()?;
        self.options.validate()?;

        fn check(kind: &str, id: &str) -> Result<(), String> {
            if id.is_empty() {
                return Err(format!("Found a {} with an empty id", kind));
            }
            Ok(())
        }

        for f in &self.foundations {
            check("Foundation", &f.id)?;
            f.validate()?;
        }
        for c in &self.collectors {
            check("Collector", &c.id)?;
            c.validate()?;
        }
        for o in &self.obstacles {
            check("Obstacle", &o.id)?;
            o.validate()?;
        }

        let all_ids = self
            .foundations
            .iter()
            .map(|f| f.id.as_str())
            .chain(self.collectors.iter().map(|c| c.id.as_str()))
            .chain(self.obstacles.iter().map(|o| o.id.as_str()));
        let mut ids: HashSet<&str> = HashSet::new();
        for id in all_ids {
            if !ids.insert(id) {
                return Err(format!("Found duplicated id '{}'", id));
            }
        }

        for c in &self.collectors {
            if c.efficiency.factor() == 0. {
                print_warning(
                    "Model",
                    format!("Collector '{}' has an efficiency of zero", c.id),
                );
            }
        }
        Ok(())
    }

    /// Gets a [`Foundation`] by its id
    pub fn foundation(&self, id: &str) -> Option<&Foundation> {
        self.foundations.iter().find(|f| f.id == id)
    }

    /// Gets a [`CollectorElement`] by its id
    pub fn collector(&self, id: &str) -> Option<&CollectorElement> {
        self.collectors.iter().find(|c| c.id == id)
    }

    /// Iterates over the collectors of a certain family
    pub fn collectors_of(
        &self,
        family: CollectorFamily,
    ) -> impl Iterator<Item = &CollectorElement> + '_ {
        self.collectors.iter().filter(move |c| c.family() == family)
    }

    /// Adds a [`Foundation`] to the model
    pub fn add_foundation(&mut self, foundation: Foundation) -> &Foundation {
        self.foundations.push(foundation);
        let i = self.foundations.len() - 1;
        &self.foundations[i]
    }

    /// Adds a [`CollectorElement`] to the model
    pub fn add_collector(&mut self, collector: CollectorElement) -> &CollectorElement {
        self.collectors.push(collector);
        let i = self.collectors.len() - 1;
        &self.collectors[i]
    }

    /// Adds an [`Obstacle`] to the model
    pub fn add_obstacle(&mut self, obstacle: Obstacle) -> &Obstacle {
        self.obstacles.push(obstacle);
        let i = self.obstacles.len() - 1;
        &self.obstacles[i]
    }
}

/***********/
/* TESTING */
/***********/
