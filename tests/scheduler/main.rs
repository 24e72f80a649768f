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
    geometry::Point3D, CollectorElement, CollectorFamily, CollectorKind, ControlPanel, Date,
    Granularity, JobKey, JobState, Location, MemoryResultStore, Model, Notification, Scheduler,
    SimulationError, WeatherProfile, World,
};

fn world() -> World {
    let mut model = Model::default();
    model.options.interval_minutes = 30.;
    model.options.days_per_year = 4;
    for (i, x) in [-3., 0., 3.].iter().enumerate() {
        let mut s = CollectorElement::new(format!("sensor {}", i), 0.1, 0.1, CollectorKind::Sensor);
        s.position = Point3D::new(*x, 0., 0.);
        s.pole_height = 1.;
        s.tilt = 30.;
        model.add_collector(s);
    }
    let mut panel = CollectorElement::new("panel", 2., 1., CollectorKind::flat_panel());
    panel.position = Point3D::new(0., -5., 0.);
    panel.pole_height = 1.;
    model.add_collector(panel);

    let location = Location {
        latitude: -33.4,
        ..Location::default()
    };
    let mut world = World::new(model, WeatherProfile::clear_sky(location));
    world.date = Date::new(3, 2).unwrap().at_minute(600.);
    world
}

fn pump_until_idle(
    scheduler: &mut Scheduler,
    world: &mut World,
    panel: &mut ControlPanel,
    store: &mut MemoryResultStore,
) -> Vec<Notification> {
    let mut ret = scheduler.pump(world, panel, store);
    let mut n = 0;
    while !scheduler.is_idle() {
        ret.extend(scheduler.pump(world, panel, store));
        n += 1;
        assert!(n < 100_000, "the simulation never finished");
    }
    ret
}

#[test]
fn panel_drives_lifecycle() {
    let mut world = world();
    let original = world.date;
    let key = JobKey::new(CollectorFamily::Sensor, Granularity::Daily);

    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();

    // Nothing happens until requested
    assert!(scheduler.pump(&mut world, &mut panel, &mut store).is_empty());
    assert!(scheduler.is_idle());

    panel.start(key);
    let notifications = scheduler.pump(&mut world, &mut panel, &mut store);
    assert_eq!(notifications, vec![Notification::Started(key)]);
    assert_eq!(scheduler.state(key), JobState::Initializing);

    let notifications = pump_until_idle(&mut scheduler, &mut world, &mut panel, &mut store);
    assert_eq!(notifications, vec![Notification::Completed(key)]);
    assert!(panel.results_ready(key));
    assert!(!panel.is_running(key));
    assert_eq!(world.date, original);

    let report = store.get(key).unwrap();
    assert_eq!(report.elements.len(), 3);
    assert_eq!(report.units, "kWh/m2");
    assert!(report.grand_total() > 0.);

    // Results are not recomputed unless requested again
    assert!(scheduler.pump(&mut world, &mut panel, &mut store).is_empty());
    assert_eq!(store.len(), 1);
}

#[test]
fn pause_does_not_change_results() {
    let key = JobKey::new(CollectorFamily::Sensor, Granularity::Yearly);

    let mut world_a = world();
    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();
    panel.start(key);
    pump_until_idle(&mut scheduler, &mut world_a, &mut panel, &mut store);
    let uninterrupted = store.take(key).unwrap();

    let mut world_b = world();
    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();
    panel.start(key);
    for _ in 0..20 {
        scheduler.pump(&mut world_b, &mut panel, &mut store);
    }
    panel.pause(key);
    scheduler.pump(&mut world_b, &mut panel, &mut store);
    let steps = scheduler.active().unwrap().steps();
    let date = world_b.date;
    for _ in 0..50 {
        assert!(scheduler.pump(&mut world_b, &mut panel, &mut store).is_empty());
    }
    assert_eq!(scheduler.state(key), JobState::Paused);
    assert_eq!(scheduler.active().unwrap().steps(), steps);
    assert_eq!(world_b.date, date);

    panel.resume(key);
    pump_until_idle(&mut scheduler, &mut world_b, &mut panel, &mut store);
    let paused = store.take(key).unwrap();
    assert_eq!(uninterrupted, paused);
}

#[test]
fn abort_restores_date() {
    let mut world = world();
    let original = world.date;
    let key = JobKey::new(CollectorFamily::FlatPanel, Granularity::Daily);

    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();
    panel.start(key);
    for _ in 0..10 {
        scheduler.pump(&mut world, &mut panel, &mut store);
    }
    // The world follows the simulated clock
    assert_ne!(world.date, original);
    assert!(world.date.same_day(original));

    panel.cancel(key);
    let notifications = scheduler.pump(&mut world, &mut panel, &mut store);
    assert_eq!(notifications, vec![Notification::Aborted(key)]);
    assert!(scheduler.is_idle());
    assert_eq!(world.date, original);
    assert!(store.is_empty());
    assert!(!panel.results_ready(key));
}

#[test]
fn one_job_at_a_time() {
    let mut world = world();
    let first = JobKey::new(CollectorFamily::Sensor, Granularity::Daily);
    let second = JobKey::new(CollectorFamily::FlatPanel, Granularity::Yearly);

    let mut scheduler = Scheduler::new();
    scheduler.start(first, &mut world).unwrap();
    match scheduler.start(second, &mut world) {
        Err(SimulationError::Busy { requested, running }) => {
            assert_eq!(requested, second);
            assert_eq!(running, first);
        }
        _ => panic!("expected the second job to be refused"),
    }

    // Through the panel
    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();
    panel.start(first);
    scheduler.pump(&mut world, &mut panel, &mut store);
    panel.start(second);
    let notifications = scheduler.pump(&mut world, &mut panel, &mut store);
    assert_eq!(notifications.len(), 1);
    match &notifications[0] {
        Notification::Refused { key, reason } => {
            assert_eq!(*key, second);
            assert!(reason.contains("still running"), "{}", reason);
        }
        n => panic!("unexpected notification {:?}", n),
    }
    assert!(!panel.is_running(second));

    // The first one is unaffected
    let notifications = pump_until_idle(&mut scheduler, &mut world, &mut panel, &mut store);
    assert_eq!(notifications, vec![Notification::Completed(first)]);
    assert!(store.get(second).is_none());
}

#[test]
fn polar_night_completes_with_zeros() {
    let mut model = Model::default();
    model.add_collector(CollectorElement::new("s", 0.1, 0.1, CollectorKind::Sensor));
    let location = Location {
        latitude: 80.,
        ..Location::default()
    };
    let mut world = World::new(model, WeatherProfile::clear_sky(location));
    world.date = Date::new(12, 21).unwrap().at_minute(720.);
    let key = JobKey::new(CollectorFamily::Sensor, Granularity::Daily);

    let mut scheduler = Scheduler::new();
    let mut panel = ControlPanel::new();
    let mut store = MemoryResultStore::new();
    panel.start(key);
    let notifications = pump_until_idle(&mut scheduler, &mut world, &mut panel, &mut store);
    assert_eq!(
        notifications,
        vec![Notification::Started(key), Notification::Completed(key)]
    );
    let report = store.get(key).unwrap();
    assert_eq!(report.total.len(), 24);
    assert!(report.total.iter().all(|v| *v == 0.));
}
