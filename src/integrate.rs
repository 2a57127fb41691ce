//! Integrate trait and output containers
//!
//! [`integrate`] drives anything that implements [`Integrate`] up to a
//! final time. For step-based runs, [`crate::Navier2D::run`] yields
//! [`Snapshot`]s that can be gathered into a [`History`].
use crate::error::{RbcError, Result};
use crate::field::FieldState;

/// Hard limit of steps per call to [`integrate`]
pub const MAX_TIMESTEP: usize = 100_000;

/// Integrate trait, step forward in time, and write results
pub trait Integrate {
    /// Update solution, returns the time step taken
    ///
    /// # Errors
    /// If the solution can not be advanced any further.
    fn update(&mut self) -> Result<f64>;
    /// Receive current time
    fn get_time(&self) -> f64;
    /// Get timestep
    fn get_dt(&self) -> f64;
    /// Callback function (can be used for i/o)
    fn callback(&mut self);
    /// Additional break criteria
    fn exit(&mut self) -> bool;
}

/// Integrade pde, that implements the Integrate trait.
///
/// Specify `save_intervall` to invoke the callback every time the
/// simulation time crosses a multiple of it.
///
/// Stop Criteria:
/// 1. Timestep limit
/// 2. Time limit
/// 3. [`Integrate::exit`]
///
/// Returns the number of steps taken.
///
/// # Errors
/// `InvalidConfiguration` for a non-positive `save_intervall`, and any
/// error raised by [`Integrate::update`].
pub fn integrate<T: Integrate>(pde: &mut T, max_time: f64, save_intervall: Option<f64>) -> Result<usize> {
    if let Some(dt_save) = save_intervall {
        if !(dt_save.is_finite() && dt_save > 0.) {
            return Err(RbcError::invalid(format!(
                "save_intervall must be positive, got {}",
                dt_save
            )));
        }
    }
    let mut next_save = save_intervall.map(|dt_save| pde.get_time() + dt_save);
    let mut timestep: usize = 0;
    loop {
        // Update
        if let Err(e) = pde.update() {
            log::warn!("integration stopped after {} steps: {}", timestep, e);
            return Err(e);
        }
        timestep += 1;
        let time = pde.get_time();
        let eps_dt = pde.get_dt() * 1e-4;

        // Save
        if let (Some(dt_save), Some(t_save)) = (save_intervall, next_save.as_mut()) {
            if time + eps_dt >= *t_save {
                pde.callback();
                while *t_save <= time + eps_dt {
                    *t_save += dt_save;
                }
            }
        }

        // Break
        if pde.exit() {
            log::info!("break criteria triggered at time {:?}", time);
            break;
        }
        if time + eps_dt >= max_time {
            log::info!("time limit reached: {:?}", time);
            break;
        }
        if timestep >= MAX_TIMESTEP {
            log::info!("timestep limit reached: {:?}", timestep);
            break;
        }
    }
    Ok(timestep)
}

/// Copy of the flow state at one instant
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    /// Simulation time
    pub time: f64,
    /// Steps taken
    pub step: usize,
    /// Flow variables
    pub fields: FieldState,
}

/// Ordered, append-only sequence of snapshots
#[derive(Debug, Clone, Default, PartialEq)]
pub struct History {
    snapshots: Vec<Snapshot>,
}

impl History {
    /// Empty history
    pub fn new() -> Self {
        Self::default()
    }

    /// Gather snapshots until the first error.
    ///
    /// Everything recorded before the error is kept.
    pub fn collect<I>(iter: I) -> (Self, Option<RbcError>)
    where
        I: IntoIterator<Item = Result<Snapshot>>,
    {
        let mut history = Self::new();
        for item in iter {
            match item {
                Ok(snapshot) => history.push(snapshot),
                Err(e) => return (history, Some(e)),
            }
        }
        (history, None)
    }

    /// Append snapshot
    pub fn push(&mut self, snapshot: Snapshot) {
        self.snapshots.push(snapshot);
    }

    /// Number of snapshots
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// True if nothing was recorded
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// Iterate over snapshots, oldest first
    pub fn iter(&self) -> std::slice::Iter<'_, Snapshot> {
        self.snapshots.iter()
    }

    /// Most recent snapshot
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// Times of all snapshots
    pub fn times(&self) -> Vec<f64> {
        self.snapshots.iter().map(|s| s.time).collect()
    }
}

impl<'a> IntoIterator for &'a History {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
