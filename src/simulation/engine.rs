use log::{debug, info};

use crate::forces::Force;
use crate::simulation::SimulationState;
use crate::utils::{ForceError, SimulationConstants};

/// A force-directed layout: node state, the registered forces and the cooling schedule.
///
/// # Examples
///
/// ```
/// use rs_force_layout::forces::{CenterForce, CollideForce, ManyBodyForce};
/// use rs_force_layout::models::Vector2;
/// use rs_force_layout::simulation::{Simulation, SimulationState};
/// use rs_force_layout::utils::SimulationConstants;
///
/// let positions = (0..10).map(|i| Vector2::new([i as f64, (i * i) as f64 % 7.0])).collect();
/// let state = SimulationState::new((0..10).collect::<Vec<u32>>(), positions).unwrap();
///
/// let mut simulation = Simulation::new(state, SimulationConstants::default()).unwrap();
/// simulation.add_force(ManyBodyForce::new(-30.0)).unwrap();
/// simulation.add_force(CollideForce::new()).unwrap();
/// simulation.add_force(CenterForce::new(Vector2::zero())).unwrap();
///
/// let ticks = simulation.run(1000).unwrap();
/// assert!(ticks < 1000);
/// assert!(simulation.is_settled());
/// ```
pub struct Simulation<N, const D: usize> {
    state: SimulationState<N, D>,
    constants: SimulationConstants,
    forces: Vec<Box<dyn Force<N, D>>>,
}

impl<N, const D: usize> Simulation<N, D> {
    /// Creates a simulation starting at `constants.alpha`.
    ///
    /// # Errors
    ///
    /// Returns `ForceError::InvalidParameter` if `constants` fail validation.
    pub fn new(mut state: SimulationState<N, D>, constants: SimulationConstants) -> Result<Self, ForceError> {
        constants.validate()?;
        state.alpha = constants.alpha;
        Ok(Simulation {
            state,
            constants,
            forces: Vec::new(),
        })
    }

    /// Initializes `force` against the current state and appends it to the force list.
    ///
    /// Forces are applied in registration order. A force that fails to initialize
    /// is not registered.
    pub fn add_force<F>(&mut self, mut force: F) -> Result<(), ForceError>
    where
        F: Force<N, D> + 'static,
    {
        force.initialize(&self.state)?;
        self.forces.push(Box::new(force));
        Ok(())
    }

    /// Re-runs `initialize` on every force, e.g. after nodes were added or removed
    /// through [`state_mut`](Self::state_mut).
    pub fn reinitialize(&mut self) -> Result<(), ForceError> {
        for force in self.forces.iter_mut() {
            force.initialize(&self.state)?;
        }
        Ok(())
    }

    pub fn state(&self) -> &SimulationState<N, D> {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut SimulationState<N, D> {
        &mut self.state
    }

    pub fn constants(&self) -> &SimulationConstants {
        &self.constants
    }

    pub fn alpha(&self) -> f64 {
        self.state.alpha
    }

    /// Sets the current alpha, e.g. to reheat a settled layout.
    pub fn set_alpha(&mut self, alpha: f64) {
        self.state.alpha = alpha;
    }

    pub fn force_count(&self) -> usize {
        self.forces.len()
    }

    pub fn is_settled(&self) -> bool {
        self.constants.is_settled(self.state.alpha)
    }

    /// Advances the layout by one step.
    ///
    /// Alpha cools first, then every force is applied in order, then velocities
    /// are damped and added to positions. The first failing force aborts the
    /// tick; positions are left unintegrated in that case.
    pub fn tick(&mut self) -> Result<(), ForceError> {
        self.state.alpha = self.constants.cooled(self.state.alpha);
        for force in self.forces.iter_mut() {
            force.apply(&mut self.state)?;
        }
        self.state.integrate(self.constants.velocity_decay);
        Ok(())
    }

    /// Ticks until the layout settles or `max_ticks` is reached; returns the number of ticks run.
    pub fn run(&mut self, max_ticks: usize) -> Result<usize, ForceError> {
        let mut ticks = 0;
        while ticks < max_ticks && !self.is_settled() {
            self.tick()?;
            ticks += 1;
        }
        if self.is_settled() {
            info!("Layout of {} node(s) settled after {} tick(s)", self.state.len(), ticks);
        } else {
            debug!("Stopped after {} tick(s) at alpha {:.4}", ticks, self.state.alpha);
        }
        Ok(ticks)
    }
}
