use log::{debug, trace};

use crate::contacts::Contact;
use crate::models::{Box3D, Point3D};
use crate::platforms::PathedInterior;

/// Speculative platform tick for one marble.
///
/// Creating the tick pushes and prepares every candidate platform. Each
/// sub-step runs through [`PlatformTick::run_slice`], which rolls the
/// candidates back and re-advances them by the real elapsed time when the
/// slice ends. Dropping the tick pops the saved state and releases any
/// platforms stopped by a pinch.
pub struct PlatformTick<'a, P: PathedInterior> {
    interiors: &'a mut [P],
    candidates: Vec<usize>,
    stopped: bool,
}

impl<'a, P: PathedInterior> PlatformTick<'a, P> {
    /// Selects the platforms whose extruded box overlaps `swept`, in level
    /// order, then pushes their state and computes their next step.
    pub fn begin(interiors: &'a mut [P], swept: &Box3D, time_delta_ms: u32) -> Self {
        let candidates: Vec<usize> = interiors
            .iter()
            .enumerate()
            .filter(|(_, interior)| swept.is_overlapped(&interior.extruded_box()))
            .map(|(i, _)| i)
            .collect();

        trace!("{} of {} platforms are tick candidates", candidates.len(), interiors.len());

        for &i in &candidates {
            let interior = &mut interiors[i];
            interior.push_tick_state();
            interior.compute_next_path_step(time_delta_ms);
        }

        Self { interiors, candidates, stopped: false }
    }

    pub fn candidate_count(&self) -> usize {
        self.candidates.len()
    }

    pub fn candidates(&self) -> impl Iterator<Item = &P> + '_ {
        self.candidates.iter().map(move |&i| &self.interiors[i])
    }

    pub fn is_stopped(&self) -> bool {
        self.stopped
    }

    /// Runs one sub-step. `slice` returns its result together with the total
    /// time elapsed in the tick so far, in milliseconds.
    pub fn run_slice<R>(&mut self, slice: impl FnOnce(&mut Self) -> (R, f64)) -> R {
        let (result, total_elapsed_ms) = slice(self);
        for &i in &self.candidates {
            let interior = &mut self.interiors[i];
            interior.reset_tick_state();
            interior.advance(total_elapsed_ms);
        }
        result
    }

    /// Stops every candidate for the rest of the tick.
    pub fn stop_all(&mut self) {
        if !self.candidates.is_empty() {
            debug!("Marble pinched, stopping {} platforms", self.candidates.len());
        }
        for &i in &self.candidates {
            self.interiors[i].set_stopped(true);
        }
        self.stopped = true;
    }

    /// Contacts against every candidate, in level order.
    pub fn find_contacts(&self, position: Point3D, radius: f64) -> Vec<Contact> {
        self.candidates()
            .flat_map(|interior| interior.find_contacts(position, radius))
            .collect()
    }

    /// Shortens `move_time` to the first moment the sphere touches a candidate.
    pub fn first_platform_intersect(
        &self,
        position: Point3D,
        velocity: Point3D,
        radius: f64,
        move_time: f64,
    ) -> f64 {
        self.candidates()
            .filter_map(|interior| interior.first_intersect(position, velocity, radius, move_time))
            .fold(move_time, f64::min)
    }
}

impl<P: PathedInterior> Drop for PlatformTick<'_, P> {
    fn drop(&mut self) {
        for &i in &self.candidates {
            let interior = &mut self.interiors[i];
            interior.pop_tick_state();
            // A pinch only holds platforms for the tick that detected it.
            if self.stopped {
                interior.set_stopped(false);
            }
        }
    }
}
