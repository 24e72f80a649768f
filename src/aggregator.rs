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
use crate::control::{Granularity, JobKey};
use crate::output::OutputSeries;
use crate::world::World;
use crate::yield_run::MIN_DAYLIGHT;
use crate::Float;
use calendar::{days_in_month, Date};
use model::CollectorFamily;
use serde::Serialize;
use std::collections::BTreeMap;
use weather::WeatherTrait;

/// The finalized values of one element
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ElementSeries {
    /// The id of the element
    pub id: String,
    /// One value per slot of the report
    pub values: Vec<Float>,
}

impl ElementSeries {
    /// The sum of all slots
    pub fn sum(&self) -> Float {
        self.values.iter().sum()
    }
}

/// The published results of a simulation.
///
/// Daily reports have 24 hourly slots. Yearly reports have one slot
/// per sampled day, holding the output of that day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YieldReport {
    /// The simulation that produced this report
    pub key: JobKey,
    /// The units of the values
    pub units: String,
    /// A label for each slot
    pub labels: Vec<String>,
    /// The (1-based) days of the year simulated
    pub days: Vec<usize>,
    /// The series of each element of the family
    pub elements: Vec<ElementSeries>,
    /// The sum of all elements, per slot
    pub total: Vec<Float>,
    /// Things that went wrong without stopping the simulation
    pub diagnostics: Vec<String>,
}

impl YieldReport {
    /// Gets the series of an element
    pub fn element(&self, id: &str) -> Option<&ElementSeries> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// The header of the first column of CSV outputs
    pub fn units_label(&self) -> String {
        match self.key.granularity {
            Granularity::Daily => format!("Hour [{}]", self.units),
            Granularity::Yearly => format!("Day [{}/day]", self.units),
        }
    }

    /// The number of days of the year represented by each slot of a
    /// yearly report: the days of its month, shared among the slots
    /// sampled in that month
    pub fn days_represented(&self) -> Vec<Float> {
        let months: Vec<usize> = self
            .days
            .iter()
            .map(|d| Date::from_ordinal(*d).month_index())
            .collect();
        let mut count = [0usize; 12];
        months.iter().for_each(|m| count[*m] += 1);
        if count.iter().any(|c| *c == 0) {
            let n = self.days.len().max(1) as Float;
            return vec![365. / n; self.days.len()];
        }
        months
            .iter()
            .map(|m| days_in_month(*m as u8 + 1) as Float / count[*m] as Float)
            .collect()
    }

    /// The total of each month, for yearly reports
    pub fn monthly_totals(&self) -> Option<[Float; 12]> {
        if self.key.granularity != Granularity::Yearly {
            return None;
        }
        let mut ret = [0.; 12];
        for ((day, value), weight) in self
            .days
            .iter()
            .zip(self.total.iter())
            .zip(self.days_represented())
        {
            ret[Date::from_ordinal(*day).month_index()] += value * weight;
        }
        Some(ret)
    }

    /// The output of the whole day (daily reports) or the whole
    /// year (yearly reports)
    pub fn grand_total(&self) -> Float {
        match self.monthly_totals() {
            Some(months) => months.iter().sum(),
            None => self.total.iter().sum(),
        }
    }
}

/// Somewhere to put the results of simulations
pub trait ResultStore {
    /// Receives the report of a finished simulation
    fn publish(&mut self, report: YieldReport);
}

/// Keeps the last report of each simulation in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryResultStore {
    reports: BTreeMap<JobKey, YieldReport>,
}

impl MemoryResultStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// The last report of a simulation
    pub fn get(&self, key: JobKey) -> Option<&YieldReport> {
        self.reports.get(&key)
    }

    /// Removes the last report of a simulation
    pub fn take(&mut self, key: JobKey) -> Option<YieldReport> {
        self.reports.remove(&key)
    }

    /// The number of reports held
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// Checks whether there are no reports
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

impl ResultStore for MemoryResultStore {
    fn publish(&mut self, report: YieldReport) {
        self.reports.insert(report.key, report);
    }
}

/// Turns raw series into reports
pub struct YieldAggregator;

impl YieldAggregator {
    /// The factor turning the raw sum of irradiance samples of a day into
    /// energy, accounting for the hours of sunshine of its month:
    /// `sunshine / (30 * daylight_hours * samples_per_hour)`
    pub fn time_factor(world: &World, day: usize) -> Float {
        let daylight = world.solar().sunrise_sunset(day).daylight();
        if daylight <= MIN_DAYLIGHT {
            return 0.;
        }
        let weather = world.weather.get_weather_data(Date::from_ordinal(day));
        weather.sunshine_hours
            / (30. * daylight / 60. * world.model.options.samples_per_hour())
    }

    /// Scales the raw series of each element (given as the index within
    /// the collectors of the model, and its id) and adds them up
    pub fn aggregate(
        world: &World,
        key: JobKey,
        days: &[usize],
        elements: Vec<(usize, String)>,
        raw: Vec<OutputSeries>,
        diagnostics: Vec<String>,
    ) -> YieldReport {
        let calc = calculator(key.family);
        let slot_day = |slot: usize| -> usize {
            match key.granularity {
                Granularity::Daily => days[0],
                Granularity::Yearly => days[slot],
            }
        };
        let time_factors: BTreeMap<usize, Float> = days
            .iter()
            .map(|d| (*d, Self::time_factor(world, *d)))
            .collect();

        let elements: Vec<ElementSeries> = elements
            .into_iter()
            .zip(raw)
            .map(|((index, id), series)| {
                let element = &world.model.collectors[index];
                let mut efficiency: BTreeMap<usize, Float> = BTreeMap::new();
                let values = series
                    .values()
                    .iter()
                    .enumerate()
                    .map(|(slot, v)| {
                        let day = slot_day(slot);
                        let eff = *efficiency.entry(day).or_insert_with(|| {
                            let weather =
                                world.weather.get_weather_data(Date::from_ordinal(day));
                            calc.efficiency_factor(element, &weather)
                        });
                        v * time_factors[&day] * eff
                    })
                    .collect();
                ElementSeries { id, values }
            })
            .collect();

        let n_slots = match key.granularity {
            Granularity::Daily => crate::output::HOURS_PER_DAY,
            Granularity::Yearly => days.len(),
        };
        let mut total = vec![0.; n_slots];
        for e in &elements {
            for (t, v) in total.iter_mut().zip(e.values.iter()) {
                *t += v;
            }
        }

        let labels = match key.granularity {
            Granularity::Daily => (0..n_slots).map(|h| format!("{:02}:00", h)).collect(),
            Granularity::Yearly => days
                .iter()
                .map(|d| {
                    let date = Date::from_ordinal(*d);
                    format!("{:02}/{:02}", date.month, date.day)
                })
                .collect(),
        };

        let units = match key.family {
            CollectorFamily::Sensor => "kWh/m2",
            _ => "kWh",
        };

        tracing::info!(job = %key, n_elements = elements.len(), "aggregated results");
        YieldReport {
            key,
            units: units.to_string(),
            labels,
            days: days.to_vec(),
            elements,
            total,
            diagnostics,
        }
    }
}

#[cfg(test)]
mod testing {
    use super::*;
    use crate::clock::sampled_days;
    use model::{CollectorElement, CollectorKind, Model};
    use weather::{Location, WeatherProfile};

    fn yearly(days: Vec<usize>, total: Vec<Float>) -> YieldReport {
        YieldReport {
            key: JobKey::new(CollectorFamily::Sensor, Granularity::Yearly),
            units: "kWh/m2".into(),
            labels: vec![String::new(); days.len()],
            elements: vec![],
            days,
            total,
            diagnostics: vec![],
        }
    }

    #[test]
    fn test_days_represented() {
        let r = yearly(sampled_days(12), vec![1.; 12]);
        let w = r.days_represented();
        assert_eq!(w[0], 31.);
        assert_eq!(w[1], 28.);
        assert_eq!(w.iter().sum::<Float>(), 365.);

        let r = yearly(sampled_days(24), vec![1.; 24]);
        assert!((r.days_represented().iter().sum::<Float>() - 365.).abs() < 1e-9);

        // Fewer samples than months
        let r = yearly(sampled_days(4), vec![1.; 4]);
        assert_eq!(r.days_represented(), vec![365. / 4.; 4]);
    }

    #[test]
    fn test_monthly_totals() {
        let r = yearly(sampled_days(12), vec![2.; 12]);
        let months = r.monthly_totals().unwrap();
        assert_eq!(months[0], 62.);
        assert_eq!(months[1], 56.);
        assert!((r.grand_total() - 730.).abs() < 1e-9);

        let mut daily = r.clone();
        daily.key.granularity = Granularity::Daily;
        assert!(daily.monthly_totals().is_none());
        assert_eq!(daily.grand_total(), 24.);
    }

    #[test]
    fn test_store() {
        let mut store = MemoryResultStore::new();
        assert!(store.is_empty());
        let r = yearly(vec![1], vec![1.]);
        store.publish(r.clone());
        store.publish(r.clone());
        assert_eq!(store.len(), 1);
        assert_eq!(store.get(r.key), Some(&r));
        assert_eq!(store.take(r.key), Some(r));
        assert!(store.is_empty());
    }

    #[test]
    fn test_aggregate() {
        let mut model = Model::default();
        model.add_collector(CollectorElement::new("a", 1., 1., CollectorKind::Sensor));
        model.add_collector(CollectorElement::new("b", 1., 1., CollectorKind::Sensor));
        let mut location = Location::default();
        location.latitude = 40.;
        let weather = WeatherProfile::clear_sky(location);
        let world = World::new(model, weather);

        let key = JobKey::new(CollectorFamily::Sensor, Granularity::Daily);
        let mut a = OutputSeries::new(Granularity::Daily, 0);
        let mut b = OutputSeries::new(Granularity::Daily, 0);
        a.set(12, 4.);
        b.set(12, 2.);
        b.set(13, 1.);
        let report = YieldAggregator::aggregate(
            &world,
            key,
            &[172],
            vec![(0, "a".into()), (1, "b".into())],
            vec![a, b],
            vec!["something".into()],
        );
        assert_eq!(report.total.len(), 24);
        assert_eq!(report.labels[12], "12:00");
        assert_eq!(report.units, "kWh/m2");

        let f = YieldAggregator::time_factor(&world, 172);
        let sph = world.model.options.samples_per_hour();
        let daylight = world.solar().sunrise_sunset(172).daylight_hours();
        let sunshine = world.weather.sunshine_hours[5];
        assert!((f - sunshine / (30. * daylight * sph)).abs() < 1e-9);

        // Clear sky: sunshine is 30 times the mean daylight of the month,
        // so the factor is close to one over the samples per hour, also in
        // months of 31 days
        assert!((f * sph - 1.).abs() < 0.02);
        let december = YieldAggregator::time_factor(&world, 355);
        assert!((december * sph - 1.).abs() < 0.03, "{}", december * sph);

        assert!((report.element("a").unwrap().values[12] - 4. * f).abs() < 1e-9);
        for slot in 0..24 {
            let sum: Float = report.elements.iter().map(|e| e.values[slot]).sum();
            assert!((sum - report.total[slot]).abs() < 1e-9);
        }
        assert_eq!(report.diagnostics, vec!["something".to_string()]);
    }
}
