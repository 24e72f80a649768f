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

use solar_yield::{
    calculator, run_simulation::run_animated, run_static, CollectorFamily, Date, Granularity, JobKey, Model,
    SimulationError, WeatherProfile, World, YieldCalculator,
};

fn plant() -> World {
    let model = Model::from_file("./tests/plant/plant.json5").unwrap();
    let weather = WeatherProfile::from_file("./tests/plant/desert.json5").unwrap();
    let mut world = World::new(model, weather);
    world.date = Date::new(6, 21).unwrap().at_minute(720.);
    world
}

#[test]
fn every_family_collects() {
    let mut world = plant();
    for family in CollectorFamily::ALL {
        let key = JobKey::new(family, Granularity::Daily);
        let report = run_animated(&mut world, key).unwrap();
        let n = world.model.collectors_of(family).count();
        assert_eq!(report.elements.len(), n, "{}", family);
        assert!(report.diagnostics.is_empty(), "{}: {:?}", family, report.diagnostics);
        for e in &report.elements {
            assert!(e.sum() > 0., "{} collected nothing", e.id);
            assert!(e.values.iter().all(|v| *v >= 0.));
        }
        let expected_units = if family == CollectorFamily::Sensor {
            "kWh/m2"
        } else {
            "kWh"
        };
        assert_eq!(report.units, expected_units);
    }
}

#[test]
fn tracker_beats_fixed_panel() {
    let mut world = plant();
    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
    let report = run_animated(&mut world, key).unwrap();
    let fixed = report.element("pv 1").unwrap().sum();
    let tracker = report.element("pv tracker").unwrap().sum();
    assert!(tracker > fixed, "{} vs {}", tracker, fixed);
}

#[test]
fn moving_plant_is_not_static() {
    let world = plant();
    for family in [CollectorFamily::FlatPanel, CollectorFamily::UpdraftTower] {
        let key = JobKey::new(family, Granularity::Daily);
        match run_static(&world, key) {
            Err(SimulationError::MovingElements(_)) => {}
            _ => panic!("{} should not run statically", key),
        }
    }

    // Without the moving elements it works
    let mut world = world;
    world
        .model
        .collectors
        .retain(|c| !calculator(c.family()).is_moving(c));
    assert!(!world.has_moving_elements());
    let key = JobKey::new(CollectorFamily::UpdraftTower, Granularity::Daily);
    let report = run_static(&world, key).unwrap();
    assert!(report.grand_total() > 0.);
}

#[test]
fn yearly_heliostat() {
    let mut world = plant();
    let key = JobKey::new(CollectorFamily::Heliostat, Granularity::Yearly);
    let report = run_animated(&mut world, key).unwrap();
    assert_eq!(report.total.len(), 12);
    assert_eq!(report.labels[0], "01/16");
    let months = report.monthly_totals().unwrap();
    assert!(months.iter().all(|m| *m > 0.));
}
