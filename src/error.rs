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

use crate::control::JobKey;
use thiserror::Error;

/// The errors that can happen when setting up or running a simulation
#[derive(Error, Debug)]
pub enum SimulationError {
    /// Wrong or inconsistent inputs (e.g., a model or weather file that cannot be parsed)
    #[error("Input error: {0}")]
    Input(String),

    /// A collector references a foundation that does not exist
    #[error("Collector '{element}' references foundation '{foundation}', which does not exist")]
    MissingFoundation {
        /// The id of the collector
        element: String,
        /// The id of the missing foundation
        foundation: String,
    },

    /// A job was requested while another one is running
    #[error("Cannot start {requested}... {running} is still running")]
    Busy {
        /// The job that was refused
        requested: JobKey,
        /// The job that is running
        running: JobKey,
    },

    /// The static fast path was requested for a scene in which things move
    #[error("Collector '{0}' tracks the sun, so the static fast path cannot be used")]
    MovingElements(String),

    /// Problems writing results
    #[error("Could not write results: {0}")]
    Io(#[from] std::io::Error),

    /// Problems serializing results
    #[error("Could not serialize results: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<String> for SimulationError {
    fn from(msg: String) -> Self {
        Self::Input(msg)
    }
}
