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
use serde::{Deserialize, Serialize};

/// Some information about the site in which the plant is located.
///
/// The geographic coordinates and the elevation come from the
/// weather profile.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SiteDetails {
    /// The name of the site
    #[serde(default)]
    pub name: String,

    /// The fraction of the incident radiation reflected by the ground
    #[serde(default = "default_albedo")]
    pub ground_albedo: Float,
}

fn default_albedo() -> Float {
    0.2
}

impl std::default::Default for SiteDetails {
    fn default() -> Self {
        Self {
            name: String::new(),
            ground_albedo: default_albedo(),
        }
    }
}

impl SiteDetails {
    /// Checks that the data makes sense
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.ground_albedo) {
            return Err(format!(
                "Ground albedo must be between 0 and 1... found {}",
                self.ground_albedo
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod testing {
    use super::*;

    #[test]
    fn serde_site_details() -> Result<(), String> {
        let site: SiteDetails = json5::from_str("{ name: 'Cambridge' }").map_err(|e| e.to_string())?;
        assert_eq!(site.name, "Cambridge");
        assert!((site.ground_albedo - 0.2).abs() < 1e-9);

        let site: SiteDetails =
            json5::from_str("{ ground_albedo: 1.3 }").map_err(|e| e.to_string())?;
        assert!(site.validate().is_err());

        let bad: Result<SiteDetails, _> = json5::from_str("{ terrain: 'City' }");
        assert!(bad.is_err());
        Ok(())
    }
}
