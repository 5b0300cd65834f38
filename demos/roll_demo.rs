// demos/roll_demo.rs

use log::info;
use marble_physics::collision::{StaticWorld, SurfaceMaterial};
use marble_physics::errors::PhysicsError;
use marble_physics::marble::{ConsoleVariables, Marble};
use marble_physics::models::{Move, ObjectId, Point3D};
use marble_physics::platforms::{LinearPathedInterior, PathKeyframe};
use marble_physics::utils::{MarbleConstants, CONTACT_PERCENTAGE_VARIABLE};

fn main() -> Result<(), PhysicsError> {
    env_logger::init();

    // A floor, a wall to run into, and a lift going up and down.
    let mut world = StaticWorld::new();
    world.add_box(Point3D::new(-20.0, -20.0, -1.0), Point3D::new(20.0, 20.0, 0.0), ObjectId(1), SurfaceMaterial::default())?;
    world.add_box(Point3D::new(-20.0, 6.0, 0.0), Point3D::new(20.0, 7.0, 3.0), ObjectId(2), SurfaceMaterial { friction: 1.0, restitution: 0.4 })?;

    let lift_faces = marble_physics::collision::box_faces(Point3D::new(3.0, -1.0, 0.0), Point3D::new(5.0, 1.0, 0.25))
        .iter()
        .map(|face| face.to_vec())
        .collect();
    let mut platforms = vec![LinearPathedInterior::new(
        ObjectId(3),
        lift_faces,
        vec![
            PathKeyframe { position: Point3D::ZERO, time_ms: 0.0 },
            PathKeyframe { position: Point3D::new(0.0, 0.0, 2.0), time_ms: 2000.0 },
            PathKeyframe { position: Point3D::ZERO, time_ms: 4000.0 },
        ],
        SurfaceMaterial::default(),
    )?];

    let mut marble = Marble::new(MarbleConstants::default(), Point3D::new(0.0, 0.0, 0.2))?;
    let mut console = ConsoleVariables::new();

    println!("tick  position                      velocity                      contact");
    for tick in 0..120 {
        let mv = match tick {
            0..=59 => Move::with_stick(0.0, 1.0),
            60 => Move::with_stick(0.0, 0.0).with_jump(),
            _ => Move::default(),
        };
        let report = marble.process_tick(&mv, 32, &mut world, &mut platforms, &mut console);
        if report.bounced {
            info!("Bounced on tick {}", tick);
        }

        if tick % 10 == 0 {
            let p = marble.state().position();
            let v = marble.velocity_d();
            println!(
                "{:>4}  ({:>7.3}, {:>7.3}, {:>7.3})   ({:>7.3}, {:>7.3}, {:>7.3})   {:.2}",
                tick, p.x, p.y, p.z, v.x, v.y, v.z,
                console.get(CONTACT_PERCENTAGE_VARIABLE).unwrap_or(0.0),
            );
        }
    }

    println!("\nBounces heard: {:?}", console.bounce_speeds);
    println!("Jumps heard: {}", console.jumps);

    Ok(())
}
