use std::fmt;

/// Opaque handle to a visual element owned by the view layer.
///
/// The animation core never inspects the element; it only passes the id to
/// [`VisualSink`](crate::resources::visualsink::VisualSink) and
/// [`PointerInput`](crate::resources::pointerinput::PointerInput).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub u32);

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
