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
use calendar::Date;

/// The weather conditions of a certain day, as far as the
/// solar yield is concerned.
#[derive(Default, Debug, Copy, Clone, PartialEq)]
pub struct CurrentWeather {
    /// The date
    pub date: Date,

    /// The number of hours of sunshine in the month of `date`
    pub sunshine_hours: Float,

    /// The average dry bulb temperature in the month of `date`, in C
    pub dry_bulb_temperature: Float,
}

impl CurrentWeather {
    /// The dry bulb temperature, in K
    pub fn dry_bulb_kelvin(&self) -> Float {
        self.dry_bulb_temperature + 273.15
    }
}
