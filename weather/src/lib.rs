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

//! This library holds the climatic information needed for estimating the
//! yield of solar collectors: a [`Location`] and a set of monthly
//! statistics (sunshine hours and average temperatures), read
//! from JSON or JSON5 files.

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

/// Data associated to a specific Location
pub mod location;
pub use crate::location::Location;

/// Data associated to the weather conditions of a particular day
pub mod current_weather;
pub use crate::current_weather::CurrentWeather;

/// Monthly climatic statistics
pub mod weather_profile;
pub use crate::weather_profile::WeatherProfile;

pub use calendar::Date;

/// The basic trait defining a Weather that can be used in
/// solar yield simulations
pub trait WeatherTrait: Sync {
    /// Retreives a [`CurrentWeather`] object based on the date.
    fn get_weather_data(&self, date: Date) -> CurrentWeather;

    /// The location this weather corresponds to
    fn location(&self) -> &Location;
}
