use log::debug;

use crate::axis::{AxisFrame, AxisVectors, CameraOrientation};
use crate::collision::CollisionWorld;
use crate::contacts::{
    apply_contact_forces, cancel_velocity, Accelerations, BounceState, CancelReport, Contact,
    ContactForceContext,
};
use crate::errors::PhysicsError;
use crate::forces::{compute_move_forces, external_forces, MoveIntent};
use crate::marble::{MarbleObserver, MovePath, PathBreakpoint, PresentationDelta};
use crate::models::{Box3D, MarbleMode, MarbleState, Move, Point3D, Quaternion};
use crate::platforms::{PathedInterior, PlatformTick};
use crate::utils::{
    clamp_with_flag, MarbleConstants, BREAKPOINT_MIN_MOVE_TIME, BREAKPOINT_STEP_FRACTION,
    COLLISION_MASK, CONTACT_MASK, CONTACT_PERCENTAGE_VARIABLE, LOOK_PITCH_VARIABLE, MAX_SUB_STEPS,
    SUB_STEP_SECONDS, SWEEP_INFLATION, SWEEP_MARGIN_PER_SECOND,
};

/// Summary of one call to [`Marble::advance_physics`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TickReport {
    pub sub_steps: u32,
    /// Sub-steps cut short by a collision.
    pub truncated_steps: u32,
    /// Simulated seconds actually integrated.
    pub consumed_seconds: f64,
    /// Seconds dropped after the sub-step cap.
    pub leftover_seconds: f64,
    /// Seconds spent with at least one contact.
    pub contact_time: f64,
    /// `contact_time` as a fraction of the tick.
    pub contact_pct: f64,
    pub slip_amount: f64,
    pub platform_candidates: usize,
    pub bounced: bool,
    pub jumped: bool,
    pub pinched: bool,
}

/// Running totals for the tick in progress.
struct TickProgress {
    start_time: f64,
    time_remaining: f64,
    contact_time: f64,
    slip_amount: f64,
    bounce: BounceState,
    report: TickReport,
}

/// A player-controlled sphere and its per-tick solver.
#[derive(Debug, Clone)]
pub struct Marble {
    constants: MarbleConstants,
    state: MarbleState,
    camera: CameraOrientation,
    axis: AxisFrame,
    delta: PresentationDelta,
    move_path: MovePath,
    contacts: Vec<Contact>,
    best_contact: Option<Contact>,
}

impl Marble {
    pub fn new(constants: MarbleConstants, position: Point3D) -> Result<Self, PhysicsError> {
        constants.validate()?;
        let state = MarbleState::new(position, constants.radius)?;
        Ok(Self {
            constants,
            state,
            camera: CameraOrientation::default(),
            axis: AxisFrame::default(),
            delta: PresentationDelta { pos: position, pos_vec: Point3D::ZERO },
            move_path: MovePath::with_capacity(constants.max_path_breakpoints),
            contacts: Vec::new(),
            best_contact: None,
        })
    }

    pub fn constants(&self) -> &MarbleConstants {
        &self.constants
    }

    pub fn state(&self) -> &MarbleState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut MarbleState {
        &mut self.state
    }

    pub fn camera(&self) -> CameraOrientation {
        self.camera
    }

    pub fn axis_frame(&self) -> &AxisFrame {
        &self.axis
    }

    /// Contacts found by the last sub-step.
    pub fn contacts(&self) -> &[Contact] {
        &self.contacts
    }

    pub fn best_contact(&self) -> Option<&Contact> {
        self.best_contact.as_ref()
    }

    pub fn move_path(&self) -> &MovePath {
        &self.move_path
    }

    pub fn presentation_delta(&self) -> &PresentationDelta {
        &self.delta
    }

    /// Render position `backward` of a tick before the latest one.
    pub fn interpolate_tick(&self, backward: f64) -> Point3D {
        self.delta.interpolate(backward)
    }

    pub fn velocity_d(&self) -> Point3D {
        self.state.velocity()
    }

    pub fn set_velocity_d(&mut self, velocity: Point3D) -> Result<(), PhysicsError> {
        self.state.set_velocity(velocity)
    }

    pub fn velocity_rot_d(&self) -> Point3D {
        self.state.omega()
    }

    pub fn set_velocity_rot_d(&mut self, omega: Point3D) -> Result<(), PhysicsError> {
        self.state.set_omega(omega)
    }

    /// Sets the angular velocity from a console string such as `"0 0 3.5"`.
    pub fn set_velocity_rot_from_str(&mut self, text: &str) -> Result<(), PhysicsError> {
        let omega: Point3D = text.parse()?;
        debug!("Angular velocity overridden to {:?}", omega);
        self.set_velocity_rot_d(omega)
    }

    pub fn set_position(&mut self, position: Point3D) -> Result<(), PhysicsError> {
        self.state.set_position(position)
    }

    /// Adds `impulse / mass` to the velocity. `position` is ignored;
    /// impulses act through the centre.
    pub fn apply_impulse(&mut self, _position: Point3D, impulse: Point3D) -> Result<(), PhysicsError> {
        if !impulse.is_finite() {
            return Err(PhysicsError::NonFiniteVector);
        }
        let velocity = self.state.velocity() + impulse / self.constants.mass;
        self.state.set_velocity(velocity)
    }

    pub fn set_mode(&mut self, mode: MarbleMode) {
        self.state.set_mode(mode);
    }

    pub fn set_gravity_frame(&mut self, gravity_frame: Quaternion) {
        self.axis.set_gravity_frame(gravity_frame);
    }

    pub fn set_camera(&mut self, camera: CameraOrientation) {
        self.camera = camera;
        self.axis.invalidate();
    }

    /// Forces the axis frame to be rebuilt on next use.
    pub fn clear_marble_axis(&mut self) {
        self.axis.invalidate();
    }

    pub fn marble_axis(&mut self) -> AxisVectors {
        self.axis.resolve(self.camera)
    }

    /// Camera forward flattened onto the ground plane.
    pub fn motion_dir(&mut self) -> Point3D {
        self.marble_axis().motion
    }

    /// Accumulates the move's look deltas into the camera. Pitch is clamped
    /// to the configured range; the axis frame is invalidated on any change.
    pub fn process_look(&mut self, mv: &Move) {
        let yaw = self.camera.yaw + mv.yaw;
        let (pitch, _) = clamp_with_flag(
            self.camera.pitch + mv.pitch,
            self.constants.min_look_pitch,
            self.constants.max_look_pitch,
        );

        if yaw != self.camera.yaw || pitch != self.camera.pitch {
            self.camera = CameraOrientation { yaw, pitch };
            self.axis.invalidate();
        }
    }

    /// One game tick: look processing followed by physics.
    pub fn process_tick<W, P, O>(
        &mut self,
        mv: &Move,
        time_delta_ms: u32,
        world: &mut W,
        interiors: &mut [P],
        observer: &mut O,
    ) -> TickReport
    where
        W: CollisionWorld + ?Sized,
        P: PathedInterior,
        O: MarbleObserver + ?Sized,
    {
        self.process_look(mv);
        self.advance_physics(mv, time_delta_ms, world, interiors, observer)
    }

    /// Box reachable by the marble within `dt` seconds at its current velocity.
    pub fn swept_volume(&self, dt: f64) -> Box3D {
        let displacement = self.state.velocity() * dt * SWEEP_INFLATION;
        self.state
            .world_box()
            .extruded(displacement)
            .inflated(dt * SWEEP_MARGIN_PER_SECOND)
    }

    /// Advances the marble by `time_delta_ms` in fixed sub-steps.
    ///
    /// At most [`MAX_SUB_STEPS`] sub-steps of [`SUB_STEP_SECONDS`] run; any
    /// time left after the last one is dropped. A zero-length tick returns
    /// immediately without touching any state.
    pub fn advance_physics<W, P, O>(
        &mut self,
        mv: &Move,
        time_delta_ms: u32,
        world: &mut W,
        interiors: &mut [P],
        observer: &mut O,
    ) -> TickReport
    where
        W: CollisionWorld + ?Sized,
        P: PathedInterior,
        O: MarbleObserver + ?Sized,
    {
        if time_delta_ms == 0 {
            return TickReport::default();
        }

        self.delta.begin(self.state.position());
        let start_velocity = self.state.velocity();
        let start_omega = self.state.omega();

        let dt = f64::from(time_delta_ms) / 1000.0;
        let swept = self.swept_volume(dt);

        let mut platforms = PlatformTick::begin(interiors, &swept, time_delta_ms);
        world.reset_objects_and_polys(CONTACT_MASK, &swept);

        self.move_path.clear();
        let mut progress = TickProgress {
            start_time: dt,
            time_remaining: dt,
            contact_time: 0.0,
            slip_amount: 0.0,
            bounce: BounceState::default(),
            report: TickReport { platform_candidates: platforms.candidate_count(), ..TickReport::default() },
        };

        for _ in 0..MAX_SUB_STEPS {
            if progress.time_remaining == 0.0 {
                break;
            }
            let time_step = progress.time_remaining.min(SUB_STEP_SECONDS);

            platforms.run_slice(|platforms| {
                let elapsed_ms = self.sub_step(mv, time_step, &*world, platforms, observer, &mut progress);
                ((), elapsed_ms)
            });
            progress.report.sub_steps += 1;
        }
        drop(platforms);

        let contact_pct = progress.contact_time * 1000.0 / f64::from(time_delta_ms);

        observer.set_float_variable(CONTACT_PERCENTAGE_VARIABLE, contact_pct);
        observer.set_float_variable(LOOK_PITCH_VARIABLE, self.camera.pitch);
        observer.update_roll_sound(contact_pct, progress.slip_amount);

        let position = self.state.position();
        self.delta.finish(position);
        self.state.commit_position();
        self.state.commit_motion(start_velocity, start_omega);
        world.object_moved(&self.state.world_box());
        observer.position_committed(position);

        TickReport {
            consumed_seconds: progress.start_time - progress.time_remaining,
            leftover_seconds: progress.time_remaining,
            contact_time: progress.contact_time,
            contact_pct,
            slip_amount: progress.slip_amount,
            ..progress.report
        }
    }

    /// Runs one sub-step and returns the total time elapsed in the tick, in ms.
    fn sub_step<W, P, O>(
        &mut self,
        mv: &Move,
        time_step: f64,
        world: &W,
        platforms: &mut PlatformTick<'_, P>,
        observer: &mut O,
        progress: &mut TickProgress,
    ) -> f64
    where
        W: CollisionWorld + ?Sized,
        P: PathedInterior,
        O: MarbleObserver + ?Sized,
    {
        let constants = self.constants;
        let radius = constants.radius;
        let restricted = self.state.is_restricted();

        let axes = self.axis.resolve(self.camera);
        let intent: MoveIntent = compute_move_forces(mv, self.state.omega(), &axes, &constants);

        let position = self.state.position();
        self.contacts = world.find_contacts(CONTACT_MASK, position, radius);
        self.contacts.extend(platforms.find_contacts(position, radius));

        let mut velocity = self.state.velocity();
        let mut omega = self.state.omega();

        let cancel = cancel_velocity(
            &self.contacts,
            &mut velocity,
            &mut omega,
            &constants,
            intent.is_centered,
            false,
            &mut progress.bounce,
        );
        handle_cancel(cancel, platforms, observer, &mut progress.report);

        let mut acc = Accelerations {
            linear: external_forces(mv, &axes, &constants, !self.contacts.is_empty(), restricted),
            angular: Point3D::ZERO,
        };
        let ctx = ContactForceContext { constants: &constants, up: axes.up, restricted, time_step };
        let outcome = apply_contact_forces(
            &self.contacts,
            mv,
            &intent,
            &mut velocity,
            omega,
            &ctx,
            &mut acc,
            &mut progress.slip_amount,
        );
        if outcome.jumped {
            observer.play_jump_sound();
            progress.report.jumped = true;
        }
        self.best_contact = outcome.best_contact.map(|i| self.contacts[i]);

        velocity += acc.linear * time_step;
        omega += acc.angular * time_step;
        if restricted {
            velocity = Point3D::ZERO;
        }

        let cancel = cancel_velocity(
            &self.contacts,
            &mut velocity,
            &mut omega,
            &constants,
            intent.is_centered,
            true,
            &mut progress.bounce,
        );
        handle_cancel(cancel, platforms, observer, &mut progress.report);
        if restricted {
            velocity = Point3D::ZERO;
        }

        let mut move_time = platforms.first_platform_intersect(position, velocity, radius, time_step);
        let sweep = world.test_move(velocity, position, move_time, radius, COLLISION_MASK);
        move_time = sweep.time;

        if time_step * BREAKPOINT_STEP_FRACTION > move_time && move_time > BREAKPOINT_MIN_MOVE_TIME {
            let elapsed = progress.start_time - progress.time_remaining;
            self.move_path.try_push(PathBreakpoint {
                position: sweep.position,
                time_fraction: (elapsed + move_time) / progress.start_time,
            });
        }

        let mut current_step = time_step;
        if time_step != move_time {
            // Take back the acceleration for the time not travelled.
            let untravelled = time_step - move_time;
            if !restricted {
                velocity -= acc.linear * untravelled;
            }
            omega -= acc.angular * untravelled;
            current_step = move_time;
            progress.report.truncated_steps += 1;
        }

        if !self.contacts.is_empty() {
            progress.contact_time += current_step;
        }
        progress.time_remaining -= current_step;

        let (state_position, state_velocity, state_omega) = self.state.motion_mut();
        *state_position = sweep.position;
        *state_velocity = velocity;
        *state_omega = omega;

        (progress.start_time - progress.time_remaining) * 1000.0
    }
}

fn handle_cancel<P, O>(
    cancel: CancelReport,
    platforms: &mut PlatformTick<'_, P>,
    observer: &mut O,
    report: &mut TickReport,
) where
    P: PathedInterior,
    O: MarbleObserver + ?Sized,
{
    if let Some(speed) = cancel.bounce_speed {
        observer.play_bounce_sound(speed);
        report.bounced = true;
    }
    if cancel.pinched {
        report.pinched = true;
    }
    if cancel.stop_paths {
        platforms.stop_all();
    }
}
