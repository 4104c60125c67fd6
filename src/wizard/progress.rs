use std::time::Duration;

use tokio::task::JoinHandle;

/// Rotating loading-screen copy. Presentation only.
pub const INSPIRING_MESSAGES: [&str; 10] = [
    "✨ Generando tu futuro brillante...",
    "🎓 Preparando tu momento especial...",
    "🌟 Creando recuerdos inolvidables...",
    "🚀 Construyendo tu éxito académico...",
    "💫 Materializando tus logros...",
    "🏆 Celebrando tu dedicación...",
    "🎯 Finalizando tu jornada académica...",
    "🌈 Tu esfuerzo se hace realidad...",
    "📚 Transformando conocimiento en triunfo...",
    "⭐ Iluminando tu camino profesional...",
];

pub const TICK: Duration = Duration::from_millis(100);
pub const MESSAGE_ROTATION: Duration = Duration::from_secs(4);
const EXISTING_PHOTO_TOTAL: Duration = Duration::from_secs(15);
const GENERATION_TOTAL: Duration = Duration::from_secs(85);

/// Fabricated progress: a fixed-duration animation chosen by whether the
/// server is expected to return an existing photo (short) or generate a new
/// one (long). It never measures actual server progress.
#[derive(Debug, Clone, Copy)]
pub struct LoadingTimeline {
    total: Duration,
}

impl LoadingTimeline {
    pub fn for_existing_photo() -> Self {
        Self {
            total: EXISTING_PHOTO_TOTAL,
        }
    }

    pub fn for_generation() -> Self {
        Self {
            total: GENERATION_TOTAL,
        }
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Percent complete at `elapsed`, clamped to 100.
    pub fn progress_at(&self, elapsed: Duration) -> f64 {
        let pct = elapsed.as_secs_f64() / self.total.as_secs_f64() * 100.0;
        pct.min(100.0)
    }

    /// Message shown at `elapsed`; rotates every four seconds, wrapping.
    pub fn message_at(&self, elapsed: Duration) -> &'static str {
        let idx = (elapsed.as_secs() / MESSAGE_ROTATION.as_secs()) as usize;
        INSPIRING_MESSAGES[idx % INSPIRING_MESSAGES.len()]
    }
}

/// Handle for the animation task. Must be cancelled when the server round
/// trip settles; dropping it aborts the task so the timer cannot leak.
pub struct ProgressHandle {
    task: JoinHandle<()>,
}

impl ProgressHandle {
    pub fn cancel(self) {
        self.task.abort();
    }
}

impl Drop for ProgressHandle {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Drives `on_tick(percent, message)` every 100 ms until the timeline runs
/// out or the handle is cancelled. Entirely decoupled from the network call.
pub fn spawn<F>(timeline: LoadingTimeline, mut on_tick: F) -> ProgressHandle
where
    F: FnMut(f64, &'static str) + Send + 'static,
{
    let task = tokio::spawn(async move {
        let started = tokio::time::Instant::now();
        let mut interval = tokio::time::interval(TICK);
        // First tick fires immediately; skip it so 0% isn't reported twice.
        interval.tick().await;
        loop {
            interval.tick().await;
            let elapsed = started.elapsed();
            on_tick(timeline.progress_at(elapsed), timeline.message_at(elapsed));
            if elapsed >= timeline.total() {
                break;
            }
        }
    });
    ProgressHandle { task }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_progress_is_clamped() {
        let t = LoadingTimeline::for_existing_photo();
        assert_eq!(t.progress_at(Duration::ZERO), 0.0);
        assert!((t.progress_at(Duration::from_secs(15)) - 100.0).abs() < f64::EPSILON);
        assert_eq!(t.progress_at(Duration::from_secs(60)), 100.0);
    }

    #[test]
    fn test_totals_differ_by_expectation() {
        assert_eq!(
            LoadingTimeline::for_existing_photo().total(),
            Duration::from_secs(15)
        );
        assert_eq!(
            LoadingTimeline::for_generation().total(),
            Duration::from_secs(85)
        );
    }

    #[test]
    fn test_message_rotation_wraps() {
        let t = LoadingTimeline::for_generation();
        assert_eq!(t.message_at(Duration::ZERO), INSPIRING_MESSAGES[0]);
        assert_eq!(t.message_at(Duration::from_secs(4)), INSPIRING_MESSAGES[1]);
        assert_eq!(t.message_at(Duration::from_secs(39)), INSPIRING_MESSAGES[9]);
        // 40s wraps back to the first message.
        assert_eq!(t.message_at(Duration::from_secs(40)), INSPIRING_MESSAGES[0]);
    }

    #[tokio::test(start_paused = true)]
    async fn test_spawned_timeline_reaches_completion() {
        let ticks: Arc<Mutex<Vec<f64>>> = Arc::default();
        let sink = Arc::clone(&ticks);
        let handle = spawn(LoadingTimeline::for_existing_photo(), move |pct, _msg| {
            sink.lock().unwrap().push(pct);
        });

        tokio::time::sleep(Duration::from_secs(16)).await;

        let ticks = ticks.lock().unwrap();
        assert!(!ticks.is_empty());
        assert_eq!(*ticks.last().unwrap(), 100.0);
        drop(handle);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_stops_ticking() {
        let ticks: Arc<Mutex<Vec<f64>>> = Arc::default();
        let sink = Arc::clone(&ticks);
        let handle = spawn(LoadingTimeline::for_generation(), move |pct, _msg| {
            sink.lock().unwrap().push(pct);
        });

        tokio::time::sleep(Duration::from_secs(1)).await;
        handle.cancel();
        let seen = ticks.lock().unwrap().len();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(ticks.lock().unwrap().len(), seen);
    }
}
