//! Application controller: wires input events to the adapters, pushes
//! normalized results at the presentation seam, and keeps slow responses
//! from overwriting newer ones.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::{
    api::{GeocodeApi, WeatherApi},
    debounce::Debouncer,
    error::Error,
    model::{Coordinate, PlaceCandidate, UnitSystem},
    snapshot::{self, WeatherSnapshot},
};

/// Presentation seam. The host (CLI, GUI, web view) renders what it is given;
/// the controller never formats anything itself.
pub trait Render: Send + Sync {
    fn show_snapshot(&self, snapshot: &WeatherSnapshot, units: UnitSystem);
    fn show_suggestions(&self, candidates: &[PlaceCandidate]);
    fn show_error(&self, error: &Error);
}

/// Geolocation seam. `None` means the host could not produce a position;
/// the controller treats that as "leave the view alone", never as a failure.
#[async_trait]
pub trait PositionSource: Send + Sync {
    async fn position(&self) -> Option<Coordinate>;
}

/// Input state read at call time. Single mutator at a time; reads copy the
/// whole state out before any await point.
#[derive(Debug, Clone, Copy)]
pub struct ViewState {
    pub coordinate: Coordinate,
    pub units: UnitSystem,
    pub hour_offset: usize,
}

pub struct App {
    weather: Box<dyn WeatherApi>,
    geocode: Box<dyn GeocodeApi>,
    position: Option<Box<dyn PositionSource>>,
    view: Box<dyn Render>,
    state: Mutex<ViewState>,
    suggest_debounce: Debouncer,
    // Generation tags: a response is applied only while its generation is the
    // latest issued, so a slow earlier response cannot overwrite a newer one.
    weather_gen: AtomicU64,
    suggest_gen: AtomicU64,
}

impl App {
    pub fn new(
        weather: Box<dyn WeatherApi>,
        geocode: Box<dyn GeocodeApi>,
        position: Option<Box<dyn PositionSource>>,
        view: Box<dyn Render>,
        initial: ViewState,
        suggest_quiet_period: Duration,
    ) -> Arc<Self> {
        Arc::new(Self {
            weather,
            geocode,
            position,
            view,
            state: Mutex::new(initial),
            suggest_debounce: Debouncer::new(suggest_quiet_period),
            weather_gen: AtomicU64::new(0),
            suggest_gen: AtomicU64::new(0),
        })
    }

    pub fn state(&self) -> ViewState {
        *lock(&self.state)
    }

    /// Fetch, normalize and render the snapshot for the current input state.
    /// Errors are rendered as a visible error state, not swallowed.
    pub async fn refresh(&self) {
        let ViewState {
            coordinate,
            units,
            hour_offset,
        } = self.state();

        let generation = self.weather_gen.fetch_add(1, Ordering::SeqCst) + 1;

        let outcome = match self.weather.one_call(coordinate, units).await {
            Ok(raw) => snapshot::normalize(&raw, hour_offset),
            Err(err) => Err(err),
        };

        if generation != self.weather_gen.load(Ordering::SeqCst) {
            debug!(generation, "discarding stale weather response");
            return;
        }

        match outcome {
            Ok(snapshot) => self.view.show_snapshot(&snapshot, units),
            Err(err) => {
                warn!(error = %err, "weather refresh failed");
                self.view.show_error(&err);
            }
        }
    }

    /// A place was picked (suggestion list, map click, ...).
    pub async fn select_place(&self, coordinate: Coordinate) {
        lock(&self.state).coordinate = coordinate;
        self.refresh().await;
    }

    pub async fn set_units(&self, units: UnitSystem) {
        lock(&self.state).units = units;
        self.refresh().await;
    }

    /// Move the forecast slider; 0 means "current conditions".
    pub async fn set_hour_offset(&self, hour_offset: usize) {
        lock(&self.state).hour_offset = hour_offset;
        self.refresh().await;
    }

    /// Text-input keystroke. Lookups are debounced; only the latest settled
    /// query hits the geocoder, and only the latest issued lookup is rendered.
    pub fn input_changed(self: &Arc<Self>, text: String) {
        let app = Arc::clone(self);

        self.suggest_debounce.trigger(async move {
            let generation = app.suggest_gen.fetch_add(1, Ordering::SeqCst) + 1;
            let outcome = app.geocode.suggest(&text).await;

            if generation != app.suggest_gen.load(Ordering::SeqCst) {
                debug!(generation, "discarding stale suggestion response");
                return;
            }

            match outcome {
                Ok(candidates) => app.view.show_suggestions(&candidates),
                Err(err) => {
                    warn!(error = %err, "autocomplete lookup failed");
                    app.view.show_error(&err);
                }
            }
        });
    }

    /// GPS affordance. Does nothing when the host has no position source or
    /// the source cannot produce a fix.
    pub async fn use_device_position(&self) {
        let Some(source) = &self.position else {
            debug!("no position source configured");
            return;
        };

        match source.position().await {
            Some(coordinate) => self.select_place(coordinate).await,
            None => warn!("position source produced no fix"),
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
