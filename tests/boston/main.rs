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
    geometry::Vector3D, run_simulation::*, run_static, AirMassPolicy, CollectorElement,
    CollectorFamily, CollectorKind, Date, Float, Granularity, JobKey, Location, Model,
    OutputFormat, RadiationModel, SkyState, WeatherProfile, World,
};

const SUMMER_SOLSTICE: usize = 172;

/// A world whose sunshine in June equals the daylight, so the
/// output is the clear-sky irradiation over the panel
fn clear_june_world() -> World {
    let model = Model::from_file("./tests/boston/model.json5").unwrap();
    let mut weather = WeatherProfile::from_file("./tests/boston/weather.json5").unwrap();
    let solar = solar_yield::Solar::from_degrees(weather.location.latitude);
    weather.sunshine_hours[5] = 30. * solar.sunrise_sunset(SUMMER_SOLSTICE).daylight_hours();
    let mut world = World::new(model, weather);
    world.date = Date::new(6, 21).unwrap().at_minute(720.);
    world
}

/// The irradiation (kWh/m2) over a horizontal surface, integrated at
/// one-minute steps
fn fine_integral(world: &World, day: usize) -> (Float, [Float; 24]) {
    let solar = world.solar();
    let sky_model = world.radiation.as_ref();
    let albedo = world.model.site_details.ground_albedo;
    let up = Vector3D::new(0., 0., 1.);
    let mut hourly = [0.; 24];
    for m in 0..1440 {
        let minute = m as Float + 0.5;
        let sun = solar.sun_direction(day, minute);
        if sun.z <= 0. {
            continue;
        }
        let sky = sky_model.sky_state(
            sun,
            day,
            world.elevation(),
            world.model.options.air_mass,
        );
        let irradiance = sky.peak * sun.z + sky_model.diffuse_radiation(&sky, albedo, up);
        hourly[m / 60] += irradiance / 60.;
    }
    (hourly.iter().sum(), hourly)
}

#[test]
fn solstice_matches_fine_integral() {
    let mut world = clear_june_world();
    let area = 2.;
    let (expected, expected_hourly) = fine_integral(&world, SUMMER_SOLSTICE);
    assert!(expected > 5. && expected < 12., "expected = {}", expected);

    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
    let report = run_animated(&mut world, key).unwrap();
    assert_eq!(report.total.len(), 24);
    assert_eq!(report.labels[0], "00:00");

    let found = report.grand_total() / area;
    let err = (found - expected).abs() / expected;
    assert!(err < 0.05, "found {} ... expected {} (err = {})", found, expected, err);

    // The peak is around solar noon
    let peak_hour = report
        .total
        .iter()
        .enumerate()
        .fold((0, -1.), |(i, max), (j, v)| if *v > max { (j, *v) } else { (i, max) })
        .0;
    assert!((11..=13).contains(&peak_hour), "peak at {}", peak_hour);
    let expected_peak = expected_hourly
        .iter()
        .enumerate()
        .fold((0, -1.), |(i, max), (j, v)| if *v > max { (j, *v) } else { (i, max) })
        .0;
    assert!((peak_hour as i32 - expected_peak as i32).abs() <= 1);

    // Nothing at night
    assert_eq!(report.total[0], 0.);
    assert_eq!(report.total[23], 0.);

    // The date is restored
    assert_eq!(world.date.month, 6);
    assert_eq!(world.date.day, 21);
    assert!((world.date.minute_of_day() - 720.).abs() < 1e-3);
}

#[test]
fn parts_add_up_to_total() {
    let mut world = clear_june_world();
    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
    let report = run_animated(&mut world, key).unwrap();
    for (hour, total) in report.total.iter().enumerate() {
        let sum: Float = report.elements.iter().map(|e| e.values[hour]).sum();
        assert!((sum - total).abs() < 1e-6);
    }
    assert_eq!(report.units, "kWh");
    assert!(report.diagnostics.is_empty());
}

#[test]
fn static_equals_animated() {
    let mut world = clear_june_world();
    for granularity in [Granularity::Daily, Granularity::Yearly] {
        let key = JobKey::new(CollectorFamily::FlatPanel, granularity);
        let fast = run_static(&world, key).unwrap();
        let animated = run_animated(&mut world, key).unwrap();
        assert_eq!(fast.labels, animated.labels);
        assert_eq!(fast.total.len(), animated.total.len());
        for (a, b) in fast.total.iter().zip(animated.total.iter()) {
            assert!((a - b).abs() <= 1e-9 * a.abs().max(1.), "{} vs {}", a, b);
        }
    }
}

#[test]
fn yearly_has_one_value_per_sampled_day() {
    let world = clear_june_world();
    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Yearly);
    let report = run_static(&world, key).unwrap();
    let n = world.model.options.days_per_year;
    assert_eq!(report.total.len(), n);
    assert_eq!(report.days.len(), n);
    assert_eq!(report.labels.len(), n);

    // Summer days collect more than winter ones
    let months = report.monthly_totals().unwrap();
    assert!(months[5] > months[11]);
    assert!(months.iter().all(|v| *v > 0.));
    let year: Float = months.iter().sum();
    assert!((year - report.grand_total()).abs() < 1e-6);

    // The days represented add up to the whole year
    let days: Float = report.days_represented().iter().sum();
    assert!((days - 365.).abs() < 1e-6);
}

#[test]
fn cli_writes_csv() {
    let options = SimOptions {
        input_file: "./tests/boston/model.json5".into(),
        weather_file: "./tests/boston/weather.json5".into(),
        family: CollectorFamily::FlatPanel,
        granularity: Granularity::Daily,
        month: 6,
        day: 21,
        output: None,
        format: OutputFormat::Csv,
        static_run: false,
    };
    let mut buffer: Vec<u8> = Vec::new();
    let report = run(&options, &mut buffer).unwrap();
    let csv = String::from_utf8(buffer).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 25);
    assert_eq!(lines[0], "Hour [kWh],panel,Total");
    assert!(lines[13].starts_with("12:00,"));
    assert!(report.grand_total() > 0.);

    // Same result, statically
    let options = SimOptions {
        static_run: true,
        format: OutputFormat::Json,
        ..options
    };
    let mut buffer: Vec<u8> = Vec::new();
    let fast = run(&options, &mut buffer).unwrap();
    assert!((fast.grand_total() - report.grand_total()).abs() < 1e-6);
    let json: serde_json::Value = serde_json::from_slice(&buffer).unwrap();
    assert_eq!(json["total"].as_array().unwrap().len(), 24);
}

#[test]
fn cli_reports_missing_files() {
    let options = SimOptions {
        input_file: "./tests/boston/nothing_here.json5".into(),
        weather_file: "./tests/boston/weather.json5".into(),
        family: CollectorFamily::FlatPanel,
        granularity: Granularity::Daily,
        month: 6,
        day: 21,
        output: None,
        format: OutputFormat::Csv,
        static_run: false,
    };
    assert!(run(&options, Vec::new()).is_err());
}

/// A horizontal 2m x 2m collector with unit efficiency, on a clear-sky site
fn square_collector_world(latitude: Float, month: u8, day: u8) -> World {
    let mut model = Model::default();
    let mut collector = CollectorElement::new(
        "collector",
        2.,
        2.,
        CollectorKind::FlatPanel {
            cell_efficiency: 1.,
            temperature_coefficient: 0.,
            noct: 45.,
            inverter_efficiency: 1.,
        },
    );
    collector.pole_height = 1.;
    model.add_collector(collector);
    let location = Location {
        latitude,
        ..Location::default()
    };
    let mut world = World::new(model, WeatherProfile::clear_sky(location));
    world.date = Date::new(month, day).unwrap().at_minute(720.);
    world
}

#[test]
fn square_collector_at_42_3_on_june_21() {
    let mut world = square_collector_world(42.3, 6, 21);
    // Sunshine equal to the daylight of the day
    let daylight = world.solar().sunrise_sunset(SUMMER_SOLSTICE).daylight_hours();
    world.weather.sunshine_hours[5] = 30. * daylight;
    let (expected, expected_hourly) = fine_integral(&world, SUMMER_SOLSTICE);

    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
    let report = run_animated(&mut world, key).unwrap();
    let found = report.grand_total() / 4.;
    let err = (found - expected).abs() / expected;
    assert!(err < 0.05, "found {} ... expected {} (err = {})", found, expected, err);

    let argmax = |v: &[Float]| -> usize {
        v.iter()
            .enumerate()
            .fold((0, -1.), |(i, max), (j, x)| if *x > max { (j, *x) } else { (i, max) })
            .0
    };
    let peak = argmax(&report.total);
    assert!((peak as i32 - argmax(&expected_hourly) as i32).abs() <= 1);
    assert!((11..=13).contains(&peak));
}

#[test]
fn clear_sky_december_matches_fine_integral() {
    // December has 31 days
    let mut world = square_collector_world(42.3, 12, 21);
    let (expected, _) = fine_integral(&world, 355);

    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
    let report = run_animated(&mut world, key).unwrap();
    let found = report.grand_total() / 4.;
    let err = (found - expected).abs() / expected;
    assert!(err < 0.025, "found {} ... expected {} (err = {})", found, expected, err);
}

/// A sky with a constant direct irradiance and no diffuse light
#[derive(Debug)]
struct ConstantSky {
    peak: Float,
}

impl RadiationModel for ConstantSky {
    fn peak_radiation(
        &self,
        sun: Vector3D,
        _n: usize,
        _elevation: Float,
        _air_mass: AirMassPolicy,
    ) -> Float {
        if sun.z > 0. {
            self.peak
        } else {
            0.
        }
    }

    fn diffuse_radiation(&self, _sky: &SkyState, _albedo: Float, _normal: Vector3D) -> Float {
        0.
    }
}

#[test]
fn custom_radiation_model() {
    let default_world = square_collector_world(42.3, 6, 21);
    let bright = square_collector_world(42.3, 6, 21).with_radiation(ConstantSky { peak: 1. });
    let dim = square_collector_world(42.3, 6, 21).with_radiation(ConstantSky { peak: 0.5 });

    for granularity in [Granularity::Daily, Granularity::Yearly] {
        let key = JobKey::new(CollectorFamily::FlatPanel, granularity);
        let bright_report = run_animated(&mut bright.clone(), key).unwrap();
        let dim_report = run_static(&dim, key).unwrap();
        let default_report = run_static(&default_world, key).unwrap();

        let b = bright_report.grand_total();
        let d = dim_report.grand_total();
        assert!(b > 0.);
        assert!((b - 2. * d).abs() < 1e-9 * b, "{} vs {}", b, d);
        assert!((b - default_report.grand_total()).abs() > 1e-3);
    }

    // The custom sky agrees with its own fine integral
    let mut world = bright;
    let (expected, _) = fine_integral(&world, SUMMER_SOLSTICE);
    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);
    let found = run_animated(&mut world, key).unwrap();
    let daylight = world.solar().sunrise_sunset(SUMMER_SOLSTICE).daylight_hours();
    let factor = world.weather.sunshine_hours[5] / (30. * daylight);
    let found = found.grand_total() / 4. / factor;
    assert!((found - expected).abs() / expected < 0.02);
}
