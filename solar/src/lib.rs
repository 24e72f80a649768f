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

//! Solar geometry and radiation library.
//!
//! Everything is in international units, and times are solar (i.e., noon is
//! when the sun crosses the local meridian). Angles are in Radians unless
//! stated otherwise. Irradiance is in kW/m2.
//!
//! North points in the Y direction. East points in the X direction. Up points in Z.
//!
//! The sun position follows Cooper's declination and the classic spherical
//! astronomy relations (see Duffie and Beckman's book). The radiation side is
//! exposed as a [`RadiationModel`] trait, so that simulations can swap the
//! default [`ClearSkyModel`] for something else.

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

#[cfg(feature = "float")]
const PI: Float = std::f32::consts::PI;

#[cfg(not(feature = "float"))]
const PI: Float = std::f64::consts::PI;

mod sun_position;
pub use sun_position::{Solar, SunMinutes};

mod radiation;
pub use radiation::{
    extraterrestrial_irradiance, AirMassPolicy, ClearSkyModel, RadiationModel, SkyState,
    SOLAR_CONSTANT,
};
