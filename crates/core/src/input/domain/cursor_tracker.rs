/// Samples the pointer position, once per loop iteration.
pub trait CursorTracker {
    /// Current pointer position in global screen coordinates.
    fn position(&self) -> (i32, i32);
}
