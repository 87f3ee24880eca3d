use log::info;
use std::cell::RefCell;
use std::collections::{BTreeMap, VecDeque};
use std::time::Instant;

/// Fenêtre glissante de mesures (durées en ms ou valeurs scalaires).
#[derive(Debug, Default)]
struct Series {
    values: VecDeque<f32>,
}

impl Series {
    fn push(&mut self, value: f32, max_samples: usize) {
        if self.values.len() >= max_samples {
            self.values.pop_front();
        }
        self.values.push_back(value);
    }

    /// (moyenne, min, max)
    fn summary(&self) -> Option<(f32, f32, f32)> {
        if self.values.is_empty() {
            return None;
        }
        let sum: f32 = self.values.iter().sum();
        let min = self.values.iter().copied().fold(f32::MAX, f32::min);
        let max = self.values.iter().copied().fold(f32::MIN, f32::max);
        Some((sum / self.values.len() as f32, min, max))
    }
}

#[derive(Debug, Default)]
struct ProfilerInner {
    timings: BTreeMap<String, Series>,
    metrics: BTreeMap<String, Series>,
    frame_times: Series,
}

/// Profiler de la boucle hôte : durées de blocs, métriques scalaires, temps de frame.
///
/// Mono-thread (la boucle hôte n'en a qu'un), d'où le `RefCell`.
#[derive(Debug)]
pub struct Profiler {
    inner: RefCell<ProfilerInner>,
    max_samples: usize,
}

impl Profiler {
    pub fn new(max_samples: usize) -> Self {
        Self {
            inner: RefCell::new(ProfilerInner::default()),
            max_samples: max_samples.max(1),
        }
    }

    /// Mesure globale d'une frame (RAII)
    pub fn frame(&self) -> FrameGuard<'_> {
        FrameGuard {
            profiler: self,
            start: Instant::now(),
        }
    }

    /// Profile un bloc de code et retourne sa valeur de retour
    pub fn profile_block<T, F>(&self, label: &str, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        let start = Instant::now();
        let result = f();
        let dt = start.elapsed().as_secs_f32() * 1000.0;
        self.inner
            .borrow_mut()
            .timings
            .entry(label.to_string())
            .or_default()
            .push(dt, self.max_samples);
        result
    }

    /// Enregistre une métrique scalaire (nombre de fusées, de particules, ...)
    pub fn record_metric(&self, label: &str, value: f32) {
        self.inner
            .borrow_mut()
            .metrics
            .entry(label.to_string())
            .or_default()
            .push(value, self.max_samples);
    }

    /// FPS moyen sur la fenêtre glissante
    pub fn fps(&self) -> f32 {
        match self.inner.borrow().frame_times.summary() {
            Some((avg_ms, _, _)) if avg_ms > 0.0 => 1000.0 / avg_ms,
            _ => 0.0,
        }
    }

    pub fn timing_summary(&self, label: &str) -> Option<(f32, f32, f32)> {
        self.inner.borrow().timings.get(label)?.summary()
    }

    pub fn metric_summary(&self, label: &str) -> Option<(f32, f32, f32)> {
        self.inner.borrow().metrics.get(label)?.summary()
    }

    /// Log toutes les mesures vers l’info log avec un target spécifique
    pub fn log_metrics_for_target(&self, target: &str, show_fps: bool) {
        if show_fps {
            info!(target: target, "{:.2} FPS", self.fps());
        }
        let inner = self.inner.borrow();
        for (label, series) in &inner.timings {
            if let Some((avg, min, max)) = series.summary() {
                info!(
                    target: target,
                    "{}: avg = {:.3} ms | min = {:.3} ms | max = {:.3} ms",
                    label, avg, min, max
                );
            }
        }
        for (label, series) in &inner.metrics {
            if let Some((avg, min, max)) = series.summary() {
                info!(target: target, "{label}: avg={avg:.1}, min={min:.0}, max={max:.0}");
            }
        }
    }
}

/// Mesure globale d'une frame
pub struct FrameGuard<'a> {
    profiler: &'a Profiler,
    start: Instant,
}

impl Drop for FrameGuard<'_> {
    fn drop(&mut self) {
        let dt = self.start.elapsed().as_secs_f32() * 1000.0;
        self.profiler
            .inner
            .borrow_mut()
            .frame_times
            .push(dt, self.profiler.max_samples);
    }
}

/// Macro helper : déduit automatiquement le target via le module appelant
#[macro_export]
macro_rules! log_metrics_and_fps {
    ($profiler:expr) => {
        $profiler.log_metrics_for_target(module_path!(), true);
    };
}
