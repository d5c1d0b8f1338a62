/// Stroke lifecycle events a pad reports to its observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrokeEvent {
    Started,
    Finished,
}

/// Receives stroke lifecycle notifications. Every method defaults to a no-op.
pub trait StrokeObserver {
    fn on_stroke_started(&mut self) {}

    fn on_stroke_finished(&mut self) {}

    /// Older name for [`StrokeObserver::on_stroke_started`]; fires at the same moment.
    #[deprecated(note = "implement `on_stroke_started` instead")]
    fn on_draw_began(&mut self) {}

    /// Older name for [`StrokeObserver::on_stroke_finished`]; fires at the same moment.
    #[deprecated(note = "implement `on_stroke_finished` instead")]
    fn on_draw_ended(&mut self) {}
}

/// The single dispatch point; legacy names ride along with the canonical ones.
#[allow(deprecated)]
pub fn notify(observer: &mut dyn StrokeObserver, event: StrokeEvent) {
    match event {
        StrokeEvent::Started => {
            observer.on_stroke_started();
            observer.on_draw_began();
        }
        StrokeEvent::Finished => {
            observer.on_stroke_finished();
            observer.on_draw_ended();
        }
    }
}
