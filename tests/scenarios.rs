//! The six concrete end-to-end scenarios.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use cgmath::{InnerSpace, Point3, Vector3};

use collide3d::broad::SweepAndPrune;
use collide3d::filter::{CollisionFilter, CollisionKind};
use collide3d::primitive;
use collide3d::solver::{RigidBodyAdapter, SolverConfig};
use collide3d::{Aabb, EventKind, Ray, Sphere, World};

#[derive(Clone, Copy)]
struct Body {
    position: Point3<f32>,
    velocity: Vector3<f32>,
    half_extents: Vector3<f32>,
    inverse_mass: f32,
    filter: CollisionFilter,
}

struct Adapter {
    bodies: Rc<RefCell<HashMap<u32, Body>>>,
}

impl RigidBodyAdapter<u32> for Adapter {
    fn position(&self, id: &u32) -> Point3<f32> {
        self.bodies.borrow()[id].position
    }
    fn set_position(&mut self, id: &u32, position: Point3<f32>) {
        self.bodies.borrow_mut().get_mut(id).unwrap().position = position;
    }
    fn velocity(&self, id: &u32) -> Vector3<f32> {
        self.bodies.borrow()[id].velocity
    }
    fn set_velocity(&mut self, id: &u32, velocity: Vector3<f32>) {
        self.bodies.borrow_mut().get_mut(id).unwrap().velocity = velocity;
    }
    fn inverse_mass(&self, id: &u32) -> f32 {
        self.bodies.borrow()[id].inverse_mass
    }
    fn restitution(&self, _id: &u32) -> f32 {
        0.0
    }
    fn friction(&self, _id: &u32) -> f32 {
        0.0
    }
}

fn aabb_of(bodies: &HashMap<u32, Body>, id: &u32) -> Aabb {
    let b = bodies[id];
    Aabb::from_center_half_extents(b.position, b.half_extents).unwrap()
}

fn aabb_of_shared(bodies: &Rc<RefCell<HashMap<u32, Body>>>, id: &u32) -> Aabb {
    let b = bodies.borrow()[id];
    Aabb::from_center_half_extents(b.position, b.half_extents).unwrap()
}

#[test]
fn scenario_1_two_overlapping_unit_boxes() {
    let a = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 2.0, 2.0)).unwrap();
    let b = Aabb::new(Point3::new(1.5, 0.5, 0.5), Point3::new(3.0, 1.5, 1.5)).unwrap();

    let m = primitive::aabb_vs_aabb(&a, &b).unwrap();
    assert_eq!(m.normal, Vector3::new(1.0, 0.0, 0.0));
    assert!((m.penetration_depth - 0.5).abs() < 1e-6);
}

#[test]
fn scenario_2_touching_spheres() {
    let a = Sphere::new(Point3::new(0.0, 0.0, 0.0), 1.0).unwrap();
    let b = Sphere::new(Point3::new(1.5, 0.0, 0.0), 1.0).unwrap();

    let m = primitive::sphere_vs_sphere(&a, &b).unwrap();
    assert_eq!(m.normal, Vector3::new(1.0, 0.0, 0.0));
    assert!((m.penetration_depth - 0.5).abs() < 1e-6);
    assert!((m.point() - Point3::new(0.75, 0.0, 0.0)).magnitude() < 1e-6);
}

#[test]
fn scenario_3_enter_stay_exit_lifecycle() {
    let mut bodies = HashMap::new();
    bodies.insert(1, Body {
        position: Point3::new(0.0, 0.0, 0.0),
        velocity: Vector3::new(0.0, 0.0, 0.0),
        half_extents: Vector3::new(1.0, 1.0, 1.0),
        inverse_mass: 0.0,
        filter: CollisionFilter::default(),
    });
    bodies.insert(2, Body {
        position: Point3::new(1.5, 0.0, 0.0),
        velocity: Vector3::new(0.0, 0.0, 0.0),
        half_extents: Vector3::new(1.0, 1.0, 1.0),
        inverse_mass: 0.0,
        filter: CollisionFilter::default(),
    });
    let items = vec![1u32, 2u32];

    let mut world: World<u32> = World::new(Box::new(SweepAndPrune), SolverConfig::default());
    let narrow = |a: &u32, b: &u32| primitive::aabb_vs_aabb(&aabb_of(&bodies, a), &aabb_of(&bodies, b));

    let frame1 = world.update(&items, |id| aabb_of(&bodies, id), |id| Some(bodies[id].filter), narrow);
    assert_eq!(frame1.len(), 1);
    assert_eq!(frame1[0].kind, EventKind::Enter);

    let frame2 = world.update(&items, |id| aabb_of(&bodies, id), |id| Some(bodies[id].filter), narrow);
    assert_eq!(frame2.len(), 1);
    assert_eq!(frame2[0].kind, EventKind::Stay);

    bodies.get_mut(&2).unwrap().position = Point3::new(100.0, 0.0, 0.0);
    let narrow2 = |a: &u32, b: &u32| primitive::aabb_vs_aabb(&aabb_of(&bodies, a), &aabb_of(&bodies, b));
    let frame3 = world.update(&items, |id| aabb_of(&bodies, id), |id| Some(bodies[id].filter), narrow2);
    assert_eq!(frame3.len(), 1);
    assert_eq!(frame3[0].kind, EventKind::Exit);
    assert!(frame3[0].manifold.normal.magnitude() > 0.0);
}

#[test]
fn scenario_4_trigger_pair_reports_without_response() {
    let mut initial = HashMap::new();
    initial.insert(1, Body {
        position: Point3::new(0.0, 0.0, 0.0),
        velocity: Vector3::new(0.0, 0.0, 0.0),
        half_extents: Vector3::new(1.0, 1.0, 1.0),
        inverse_mass: 1.0,
        filter: CollisionFilter::default(),
    });
    initial.insert(2, Body {
        position: Point3::new(1.5, 0.0, 0.0),
        velocity: Vector3::new(0.0, 0.0, 0.0),
        half_extents: Vector3::new(1.0, 1.0, 1.0),
        inverse_mass: 0.0,
        filter: CollisionFilter { layer: u32::MAX, mask: u32::MAX, kind: CollisionKind::Trigger },
    });
    let items = vec![1u32, 2u32];

    let bodies = Rc::new(RefCell::new(initial));
    let before = (bodies.borrow()[&1].position, bodies.borrow()[&2].position);

    let mut world: World<u32> = World::new(Box::new(SweepAndPrune), SolverConfig::default());
    world.bind_adapter(Box::new(Adapter { bodies: bodies.clone() }));

    let narrow = |a: &u32, b: &u32| primitive::aabb_vs_aabb(&aabb_of_shared(&bodies, a), &aabb_of_shared(&bodies, b));
    let events = world.update(&items, |id| aabb_of_shared(&bodies, id), |id| Some(bodies.borrow()[id].filter), narrow);

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Enter);
    assert!(!events[0].response_enabled);

    // A trigger pair's solver response must leave both bodies alone;
    // `dispatch_response` must never have touched the bound adapter's
    // positions for a pair whose response is disabled.
    let after = (bodies.borrow()[&1].position, bodies.borrow()[&2].position);
    assert_eq!(before, after);
}

#[test]
fn scenario_5_resting_box_on_floor() {
    let mut initial = HashMap::new();
    initial.insert(1, Body {
        position: Point3::new(0.0, 0.0, 0.0),
        velocity: Vector3::new(0.0, 0.0, 0.0),
        half_extents: Vector3::new(5.0, 0.5, 5.0),
        inverse_mass: 0.0,
        filter: CollisionFilter::default(),
    });
    initial.insert(2, Body {
        position: Point3::new(0.0, 0.9, 0.0),
        velocity: Vector3::new(0.0, 0.0, 0.0),
        half_extents: Vector3::new(0.5, 0.5, 0.5),
        inverse_mass: 1.0,
        filter: CollisionFilter::default(),
    });
    let items = vec![1u32, 2u32];

    let bodies = Rc::new(RefCell::new(initial));
    let config = SolverConfig { positional_percent: 1.0, slop: 0.0, ..SolverConfig::default() };
    let mut world: World<u32> = World::new(Box::new(SweepAndPrune), config);
    world.bind_adapter(Box::new(Adapter { bodies: bodies.clone() }));

    let narrow = |a: &u32, b: &u32| primitive::aabb_vs_aabb(&aabb_of_shared(&bodies, a), &aabb_of_shared(&bodies, b));
    let events = world.update(&items, |id| aabb_of_shared(&bodies, id), |id| Some(bodies.borrow()[id].filter), narrow);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].kind, EventKind::Enter);

    // The floor's top sits at y = 0.5 (center 0.0 + half-extent 0.5);
    // the box's half-extent is 0.5, so positional correction must
    // settle its center at y = 1.0.
    assert!((bodies.borrow()[&2].position.y - 1.0).abs() < 1e-3);

    let second = world.update(&items, |id| aabb_of_shared(&bodies, id), |id| Some(bodies.borrow()[id].filter), narrow);
    assert_eq!(second[0].kind, EventKind::Stay);
}

#[test]
fn scenario_6_ray_vs_aabb() {
    let aabb = Aabb::new(Point3::new(1.0, -1.0, -1.0), Point3::new(3.0, 1.0, 1.0)).unwrap();

    let outside = Ray::new(Point3::new(0.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(aabb.raycast(&outside), Some(1.0));

    let inside = Ray::new(Point3::new(2.0, 0.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(aabb.raycast(&inside), Some(0.0));

    let missing = Ray::new(Point3::new(0.0, 5.0, 0.0), Vector3::new(1.0, 0.0, 0.0)).unwrap();
    assert_eq!(aabb.raycast(&missing), None);
}
