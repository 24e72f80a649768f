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

use rand::{rngs::StdRng, Rng, SeedableRng};
use solar_yield::{
    geometry::Point3D,
    model::{Foundation, Obstacle, ObstacleShape, Receiver},
    run_simulation::run_animated,
    run_static, CollectorElement, CollectorFamily, CollectorKind, Date, Float, Granularity,
    JobKey, Location, Model, WeatherProfile, World,
};

fn boston(model: Model) -> World {
    let location = Location {
        latitude: 42.3,
        ..Location::default()
    };
    let mut world = World::new(model, WeatherProfile::clear_sky(location));
    world.date = Date::new(6, 21).unwrap().at_minute(720.);
    world
}

fn sensor(id: &str, x: Float, y: Float) -> CollectorElement {
    let mut s = CollectorElement::new(id, 0.1, 0.1, CollectorKind::Sensor);
    s.position = Point3D::new(x, y, 0.);
    s.pole_height = 1.;
    s
}

fn obstacle(id: &str, position: Point3D, lx: Float, ly: Float, height: Float) -> Obstacle {
    Obstacle {
        id: id.into(),
        shape: ObstacleShape::Box {
            position,
            lx,
            ly,
            height,
            rotation: 0.,
        },
        shadow_relevant: true,
    }
}

fn daily(world: &World, family: CollectorFamily) -> solar_yield::YieldReport {
    let key = JobKey::new(family, Granularity::Daily);
    let mut world = world.clone();
    run_animated(&mut world, key).unwrap()
}

#[test]
fn obstacle_shades_sensor() {
    let mut model = Model::default();
    model.add_collector(sensor("exposed", 30., 0.));
    model.add_collector(sensor("shaded", 0., 0.));
    // A tall wall to the south of the shaded sensor
    model.add_obstacle(obstacle("wall", Point3D::new(0., -6., 0.), 20., 2., 40.));
    let world = boston(model);

    let report = daily(&world, CollectorFamily::Sensor);
    let exposed = &report.element("exposed").unwrap().values;
    let shaded = &report.element("shaded").unwrap().values;
    let total = |v: &[Float]| -> Float { v.iter().sum() };
    assert!(total(shaded) < 0.7 * total(exposed));
    // Only diffuse light at noon
    assert!(shaded[12] < 0.3 * exposed[12]);
    assert!(shaded[12] > 0.);

    // Ignoring the wall gives the same value for both
    let mut world = world;
    world.model.obstacles[0].shadow_relevant = false;
    let report = daily(&world, CollectorFamily::Sensor);
    let exposed = report.element("exposed").unwrap().sum();
    let shaded = report.element("shaded").unwrap().sum();
    assert!((exposed - shaded).abs() < 1e-9);
}

#[test]
fn missing_foundation_only_skips_element() {
    let mut model = Model::default();
    model.add_foundation(Foundation::new("roof", Point3D::new(10., 10., 0.)));
    let mut on_roof = sensor("on roof", 0., 0.);
    on_roof.foundation = Some("roof".into());
    model.add_collector(on_roof);
    model.add_collector(sensor("free", -10., 0.));
    let mut lost = sensor("lost", 5., 0.);
    lost.foundation = Some("nowhere".into());
    model.add_collector(lost);
    let world = boston(model.clone());

    let report = daily(&world, CollectorFamily::Sensor);
    assert_eq!(report.elements.len(), 3);
    assert_eq!(report.element("lost").unwrap().sum(), 0.);
    assert!(report.element("on roof").unwrap().sum() > 0.);
    assert_eq!(report.diagnostics.len(), 1);
    assert!(report.diagnostics[0].contains("'nowhere'"));

    // The others are not affected
    model.collectors.retain(|c| c.id != "lost");
    let reference = daily(&boston(model), CollectorFamily::Sensor);
    for id in ["on roof", "free"] {
        let a = report.element(id).unwrap().sum();
        let b = reference.element(id).unwrap().sum();
        assert!((a - b).abs() < 1e-9, "{}: {} vs {}", id, a, b);
    }
}

#[test]
fn random_sensors_static_equals_animated() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut model = Model::default();
    model.options.interval_minutes = 20.;
    model.options.days_per_year = 6;
    for i in 0..8 {
        let mut s = sensor(
            &format!("s{}", i),
            rng.gen_range(-10.0..10.0),
            rng.gen_range(-10.0..10.0),
        );
        s.pole_height = rng.gen_range(0.5..3.0);
        s.tilt = rng.gen_range(0.0..90.0);
        s.azimuth = rng.gen_range(0.0..360.0);
        model.add_collector(s);
    }
    for i in 0..3 {
        let position = Point3D::new(rng.gen_range(-12.0..12.0), rng.gen_range(-12.0..12.0), 0.);
        model.add_obstacle(obstacle(&format!("o{}", i), position, 3., 3., rng.gen_range(1.0..6.0)));
    }
    let mut world = boston(model);

    for granularity in [Granularity::Daily, Granularity::Yearly] {
        let key = JobKey::new(CollectorFamily::Sensor, granularity);
        let fast = run_static(&world, key).unwrap();
        let animated = run_animated(&mut world, key).unwrap();
        for (a, b) in fast.elements.iter().zip(animated.elements.iter()) {
            assert_eq!(a.id, b.id);
            for (x, y) in a.values.iter().zip(b.values.iter()) {
                assert!((x - y).abs() <= 1e-9 * x.abs().max(1.), "{}: {} vs {}", a.id, x, y);
            }
        }
    }
}

fn tower_field(wall: bool) -> World {
    let mut model = Model::default();
    let mut tower = Foundation::new("tower", Point3D::new(0., 20., 0.));
    tower.lx = 2.;
    tower.ly = 2.;
    tower.height = 30.;
    model.add_foundation(tower);

    let mut mirror = CollectorElement::new(
        "mirror",
        2.,
        2.,
        CollectorKind::Heliostat {
            receiver: Receiver {
                foundation: "tower".into(),
                height: None,
            },
        },
    );
    mirror.pole_height = 1.5;
    model.add_collector(mirror);

    if wall {
        // Between the mirror and the receiver
        model.add_obstacle(obstacle("wall", Point3D::new(0., 5., 0.), 10., 0.5, 12.));
    }
    boston(model)
}

#[test]
fn heliostat_needs_clear_path_to_receiver() {
    let clear = daily(&tower_field(false), CollectorFamily::Heliostat);
    let blocked = daily(&tower_field(true), CollectorFamily::Heliostat);
    let clear = clear.grand_total();
    let blocked = blocked.grand_total();
    assert!(clear > 0.);
    assert!(blocked < 0.5 * clear, "{} vs {}", blocked, clear);

    // Heliostats move, so they cannot be simulated statically
    let key = JobKey::new(CollectorFamily::Heliostat, Granularity::Daily);
    assert!(run_static(&tower_field(false), key).is_err());
}
